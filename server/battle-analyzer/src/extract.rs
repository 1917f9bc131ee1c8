//! Best-effort hero slot extraction from a loosely-typed parsed report.
//!
//! The upstream scanner has written heroes to several places over time; each
//! known place is a [`ReportLayout`], tried in preference order. Anything
//! malformed degrades to empty slots instead of failing.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{Config, SlotConflictPolicy};
use crate::troop::TroopType;
use crate::SLOT_COUNT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
  A,
  B,
}

impl Side {
  pub fn key(self) -> &'static str {
    match self {
      Self::A => "A",
      Self::B => "B",
    }
  }
}

/// Known locations of a side's hero list, most preferred first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
  /// `analysis.sides.<S>.heroes`
  AnalysisSides,
  /// `sides.<S>.heroes`
  Sides,
  /// `sides.<S>.composition.heroes`
  SideComposition,
}

impl ReportLayout {
  pub const PREFERENCE: [ReportLayout; 3] = [
    ReportLayout::AnalysisSides,
    ReportLayout::Sides,
    ReportLayout::SideComposition,
  ];

  fn pointer(self, side: Side) -> String {
    match self {
      Self::AnalysisSides => format!("/analysis/sides/{}/heroes", side.key()),
      Self::Sides => format!("/sides/{}/heroes", side.key()),
      Self::SideComposition => format!("/sides/{}/composition/heroes", side.key()),
    }
  }

  /// First layout holding a non-null value for `side`, with that value.
  pub fn locate(parsed: &Value, side: Side) -> Option<(ReportLayout, &Value)> {
    Self::PREFERENCE.into_iter().find_map(|layout| {
      parsed
        .pointer(&layout.pointer(side))
        .filter(|v| !v.is_null())
        .map(|v| (layout, v))
    })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSlot {
  /// 1-based.
  pub slot_index: u8,
  pub hero_id: Option<String>,
  #[serde(rename = "type")]
  pub troop_type: Option<TroopType>,
  pub confidence: f64,
}

impl HeroSlot {
  pub fn empty(slot_index: u8) -> Self {
    Self {
      slot_index,
      hero_id: None,
      troop_type: None,
      confidence: 0.0,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.hero_id.is_none() && self.troop_type.is_none()
  }
}

pub fn empty_slots() -> [HeroSlot; SLOT_COUNT] {
  std::array::from_fn(|i| HeroSlot::empty(i as u8 + 1))
}

#[derive(Debug, Clone)]
pub struct SideExtraction {
  pub slots: [HeroSlot; SLOT_COUNT],
  pub layout: Option<ReportLayout>,
  /// Slot indices claimed by more than one entry, ascending.
  pub duplicate_slots: Vec<u8>,
}

/// Accepts integral numbers and numeric strings; anything outside 1..=5 is `None`.
fn parse_slot_index(v: &Value) -> Option<u8> {
  let n = match v {
    Value::Number(n) => n.as_f64()?,
    Value::String(s) => s.trim().parse::<f64>().ok()?,
    _ => return None,
  };
  if !n.is_finite() || n.fract() != 0.0 || n < 1.0 || n > SLOT_COUNT as f64 {
    return None;
  }
  Some(n as u8)
}

fn parse_slot(entry: &Value, slot_index: u8, config: &Config) -> HeroSlot {
  let hero_id = entry.get("heroId").and_then(Value::as_str).map(str::to_string);
  let troop_type = entry
    .get("type")
    .and_then(Value::as_str)
    .and_then(TroopType::from_literal);

  let declared = entry
    .get("confidence")
    .and_then(Value::as_f64)
    .filter(|c| c.is_finite())
    .map(|c| c.clamp(0.0, 1.0));
  let has_id = hero_id.as_deref().map_or(false, |id| !id.is_empty());
  let confidence = match declared {
    Some(c) => c,
    None if has_id || troop_type.is_some() => config.default_confidence,
    None => 0.0,
  };

  HeroSlot {
    slot_index,
    hero_id,
    troop_type,
    confidence,
  }
}

pub fn extract_heroes(parsed: &Value, side: Side, config: &Config) -> SideExtraction {
  let mut slots = empty_slots();
  let mut filled = [false; SLOT_COUNT];
  let mut duplicate_slots = Vec::new();

  let (layout, candidates) = match ReportLayout::locate(parsed, side) {
    Some((layout, value)) => (Some(layout), value.as_array()),
    None => (None, None),
  };
  debug!(side = side.key(), ?layout, "hero list located");

  for entry in candidates.into_iter().flatten() {
    let Some(idx) = entry.get("slotIndex").and_then(parse_slot_index) else {
      continue;
    };
    let pos = usize::from(idx - 1);
    let slot = parse_slot(entry, idx, config);

    if filled[pos] {
      if !duplicate_slots.contains(&idx) {
        duplicate_slots.push(idx);
      }
      let keep_existing = config.slot_conflict == SlotConflictPolicy::HighestConfidence
        && slots[pos].confidence > slot.confidence;
      if keep_existing {
        continue;
      }
    }
    slots[pos] = slot;
    filled[pos] = true;
  }

  duplicate_slots.sort_unstable();
  if !duplicate_slots.is_empty() {
    debug!(side = side.key(), ?duplicate_slots, "duplicate slot indices");
  }

  SideExtraction {
    slots,
    layout,
    duplicate_slots,
  }
}
