//! Squad Assistant Battle Analyzer: deterministic, rule-based.
//!
//! Reads a loosely-typed parsed battle report, normalizes five hero slots per
//! side, and explains the fight with lineup bonuses, dominant troop types,
//! the type-advantage matchup and effect counts from the hero catalog.
//!
//! No DB, no network; pure computation over an immutable catalog.

pub mod analyzer;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod error;
pub mod extract;
pub mod keys;
pub mod lineup;
pub mod troop;
pub mod types;

/// Heroes per side.
pub const SLOT_COUNT: usize = 5;

pub use analyzer::Analyzer;
pub use catalog::{HeroCatalog, HeroFilter, HeroListing};
pub use config::{Config, SlotConflictPolicy};
pub use effects::{EffectKey, EffectSummary, SkillEffect};
pub use error::AnalyzerError;
pub use keys::{hero_order_key, hero_set_key};
pub use lineup::{compute_bonus, dominant_type, LineupBonus, LineupTier};
pub use troop::{relation, resolve, TroopType, TypeAdvantage};
pub use types::{BatchAnalysis, BattleAnalysis, ReportInput};

/// Analyze with default config and no hero catalog (effect summaries stay empty).
pub fn analyze(report_id: &str, parsed: &serde_json::Value) -> BattleAnalysis {
  let catalog = HeroCatalog::empty();
  Analyzer::with_defaults(&catalog).analyze(report_id, parsed)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn analyze_returns_valid_output_shape() {
    let out = analyze("r-1", &json!({"sides": {"A": {"heroes": [{"slotIndex": 1, "heroId": "x", "type": "tank"}]}}}));
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["reportId"], "r-1");
    assert_eq!(json["sides"]["A"]["heroes"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["sides"]["A"]["heroes"][0]["heroId"], "x");
    assert_eq!(json["sides"]["A"]["dominantType"], "tank");
    assert!(json["sides"]["B"]["dominantType"].is_null());
    assert!(json["matchup"]["dominantTypeVs"]["A_vs_B"].is_null());
    assert!(json["sides"]["A"]["effectSummary"]["byKey"].is_object());
  }
}
