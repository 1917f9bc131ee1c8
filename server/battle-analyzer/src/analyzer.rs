//! Report analysis: extraction, lineup math, matchup and notes in one pass.

use serde_json::Value;
use tracing::debug;

use crate::catalog::HeroCatalog;
use crate::config::Config;
use crate::extract::{extract_heroes, Side, SideExtraction};
use crate::keys::{hero_order_key, hero_set_key};
use crate::lineup::{compute_bonus, dominant_type};
use crate::troop::{resolve, TroopType};
use crate::types::*;

/// Stateless analyzer over a shared, read-only hero catalog.
pub struct Analyzer<'c> {
  config: Config,
  catalog: &'c HeroCatalog,
}

impl<'c> Analyzer<'c> {
  pub fn new(config: Config, catalog: &'c HeroCatalog) -> Self {
    Self { config, catalog }
  }

  pub fn with_defaults(catalog: &'c HeroCatalog) -> Self {
    Self::new(Config::default(), catalog)
  }

  /// Analyze one parsed report. Never fails: bad shape becomes empty slots plus notes.
  pub fn analyze(&self, report_id: &str, parsed: &Value) -> BattleAnalysis {
    let ex_a = extract_heroes(parsed, Side::A, &self.config);
    let ex_b = extract_heroes(parsed, Side::B, &self.config);

    let mut slot_notes = Vec::new();
    let a = self.build_side(Side::A, ex_a, &mut slot_notes);
    let b = self.build_side(Side::B, ex_b, &mut slot_notes);

    let (a_vs_b, b_vs_a) = match (a.dominant_type, b.dominant_type) {
      (Some(dom_a), Some(dom_b)) => (Some(resolve(dom_a, dom_b)), Some(resolve(dom_b, dom_a))),
      _ => (None, None),
    };

    let mut notes = Vec::new();
    if a.hero_set_key.is_empty() {
      notes.push("Side A hero IDs not detected yet.".to_string());
    }
    if b.hero_set_key.is_empty() {
      notes.push("Side B hero IDs not detected yet.".to_string());
    }
    notes.append(&mut slot_notes);
    if a_vs_b.is_none() {
      notes.push("Dominant troop type could not be determined for at least one side.".to_string());
    }
    notes.push("Effect summaries are counts only until skill effects are fully mapped.".to_string());

    debug!(report_id, set_a = %a.hero_set_key, set_b = %b.hero_set_key, "report analyzed");

    BattleAnalysis {
      ok: true,
      report_id: report_id.to_string(),
      sides: Sides { a, b },
      matchup: Matchup {
        dominant_type_vs: DominantTypeVs { a_vs_b, b_vs_a },
      },
      notes,
    }
  }

  /// Analyze many stored reports, preserving input order.
  pub fn analyze_batch<'r, I>(&self, reports: I) -> BatchAnalysis
  where
    I: IntoIterator<Item = &'r ReportInput>,
  {
    let analyses: Vec<BattleAnalysis> = reports
      .into_iter()
      .map(|r| self.analyze(&r.report_id, &r.parsed))
      .collect();
    BatchAnalysis {
      ok: true,
      count: analyses.len(),
      analyses,
    }
  }

  fn build_side(&self, side: Side, ex: SideExtraction, notes: &mut Vec<String>) -> AnalysisSide {
    for idx in &ex.duplicate_slots {
      notes.push(format!(
        "Side {} slot {} was reported more than once; {}.",
        side.key(),
        idx,
        self.config.slot_conflict.describe()
      ));
    }

    let ids = || ex.slots.iter().map(|s| s.hero_id.as_deref());
    let types: Vec<TroopType> = ex.slots.iter().filter_map(|s| s.troop_type).collect();

    let hero_set_key = hero_set_key(ids());
    let hero_order_key = hero_order_key(ids());
    let effect_summary = self.catalog.effect_summary(ids());

    AnalysisSide {
      hero_set_key,
      hero_order_key,
      lineup: compute_bonus(&types),
      dominant_type: dominant_type(&types),
      effect_summary,
      heroes: ex.slots,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::fixtures::CATALOG_JSON;
  use crate::effects::EffectKey;
  use crate::lineup::LineupTier;
  use crate::troop::AdvantageLabel;
  use serde_json::json;

  fn full_report() -> Value {
    json!({
      "sides": {
        "A": {"heroes": [
          {"slotIndex": 1, "heroId": "Kimberly", "type": "tank", "confidence": 0.95},
          {"slotIndex": 2, "heroId": "Murphy", "type": "tank"},
          {"slotIndex": 3, "heroId": "Marshall", "type": "tank"},
          {"slotIndex": 4, "heroId": "DVA", "type": "air"},
          {"slotIndex": 5, "heroId": "Fiona", "type": "missile"}
        ]},
        "B": {"composition": {"heroes": [
          {"slotIndex": 5, "heroId": "Lucius", "type": "missile"},
          {"slotIndex": 1, "heroId": "Swift", "type": "missile"},
          {"slotIndex": 2, "heroId": "Adam", "type": "missile"},
          {"slotIndex": 3, "heroId": "Tesla", "type": "air"}
        ]}}
      }
    })
  }

  #[test]
  fn empty_report_degrades_with_notes() {
    let catalog = HeroCatalog::empty();
    let out = Analyzer::with_defaults(&catalog).analyze("r-empty", &json!({}));

    assert!(out.ok);
    assert_eq!(out.report_id, "r-empty");
    for side in [&out.sides.a, &out.sides.b] {
      assert_eq!(side.heroes.len(), 5);
      assert!(side.heroes.iter().all(|h| h.hero_id.is_none() && h.confidence == 0.0));
      assert_eq!(side.hero_set_key, "");
      assert_eq!(side.hero_order_key, "_|_|_|_|_");
      assert_eq!(side.dominant_type, None);
      assert_eq!(side.lineup.tier, LineupTier::None);
      assert!(side.effect_summary.is_empty());
    }
    assert!(out.matchup.dominant_type_vs.a_vs_b.is_none());
    assert!(out.matchup.dominant_type_vs.b_vs_a.is_none());
    assert_eq!(
      out.notes,
      vec![
        "Side A hero IDs not detected yet.",
        "Side B hero IDs not detected yet.",
        "Dominant troop type could not be determined for at least one side.",
        "Effect summaries are counts only until skill effects are fully mapped.",
      ]
    );
  }

  #[test]
  fn full_report_resolves_matchup() {
    let catalog = HeroCatalog::empty();
    let out = Analyzer::with_defaults(&catalog).analyze("r-1", &full_report());
    let (a, b) = (&out.sides.a, &out.sides.b);

    assert_eq!(a.hero_set_key, "dva|fiona|kimberly|marshall|murphy");
    assert_eq!(a.hero_order_key, "kimberly|murphy|marshall|dva|fiona");
    assert_eq!(a.lineup.tier, LineupTier::ThreeSameTwoDiff);
    assert_eq!(a.dominant_type, Some(TroopType::Tank));
    assert_eq!(a.heroes[0].confidence, 0.95);
    assert_eq!(a.heroes[1].confidence, 0.6);

    assert_eq!(b.hero_order_key, "swift|adam|tesla|_|lucius");
    assert_eq!(b.lineup.same_type_count, 3);
    assert_eq!(b.lineup.total_heroes, 4);
    assert_eq!(b.lineup.tier, LineupTier::ThreeSame);
    assert_eq!(b.dominant_type, Some(TroopType::Missile));

    let vs = &out.matchup.dominant_type_vs;
    assert_eq!(vs.a_vs_b.as_ref().map(|v| v.label), Some(AdvantageLabel::Advantage));
    assert_eq!(vs.b_vs_a.as_ref().map(|v| v.label), Some(AdvantageLabel::Disadvantage));
    assert_eq!(
      out.notes,
      vec!["Effect summaries are counts only until skill effects are fully mapped."]
    );
  }

  #[test]
  fn tied_side_blocks_matchup() {
    let report = json!({"sides": {
      "A": {"heroes": [{"slotIndex": 1, "heroId": "x", "type": "tank"}, {"slotIndex": 2, "heroId": "y", "type": "air"}]},
      "B": {"heroes": [{"slotIndex": 1, "heroId": "z", "type": "missile"}]}
    }});
    let catalog = HeroCatalog::empty();
    let out = Analyzer::with_defaults(&catalog).analyze("r-tie", &report);
    assert_eq!(out.sides.a.dominant_type, None);
    assert_eq!(out.sides.b.dominant_type, Some(TroopType::Missile));
    assert!(out.matchup.dominant_type_vs.a_vs_b.is_none());
    assert!(out.notes.iter().any(|n| n.contains("Dominant troop type")));
  }

  #[test]
  fn duplicate_slots_are_noted() {
    let report = json!({"sides": {"B": {"heroes": [
      {"slotIndex": 2, "heroId": "x"},
      {"slotIndex": 2, "heroId": "y"}
    ]}}});
    let catalog = HeroCatalog::empty();
    let out = Analyzer::with_defaults(&catalog).analyze("r-dup", &report);
    assert_eq!(out.sides.b.heroes[1].hero_id.as_deref(), Some("y"));
    assert_eq!(out.notes[0], "Side A hero IDs not detected yet.");
    assert_eq!(out.notes[1], "Side B slot 2 was reported more than once; kept the last entry.");
  }

  #[test]
  fn effect_summary_uses_catalog() {
    let catalog = HeroCatalog::from_json_str(CATALOG_JSON).unwrap();
    let out = Analyzer::with_defaults(&catalog).analyze("r-fx", &full_report());
    let fx = &out.sides.a.effect_summary;
    assert_eq!(fx.count(EffectKey::Stun), 2);
    assert_eq!(fx.count(EffectKey::Shield), 1);
    assert!(out.sides.b.effect_summary.is_empty());
  }

  #[test]
  fn batch_preserves_order() {
    let catalog = HeroCatalog::empty();
    let reports = vec![
      ReportInput::new("r-2", full_report()),
      ReportInput::new("r-1", json!({})),
    ];
    let batch = Analyzer::with_defaults(&catalog).analyze_batch(&reports);
    assert!(batch.ok);
    assert_eq!(batch.count, 2);
    assert_eq!(batch.analyses[0].report_id, "r-2");
    assert_eq!(batch.analyses[1].report_id, "r-1");
  }
}
