//! Skill effect vocabulary and the count-only effect summary.
//!
//! Effect keys are game-wide facts, not player-specific. Magnitudes, durations
//! and chances are optional and may carry the `"scales"` placeholder; nothing
//! here interprets them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKey {
  // Offense
  PctAtkUp,
  PctDamageUp,
  PctSkillDamageUp,
  PctCritRateUp,
  PctCritDamageUp,

  // Defense / sustain
  PctDefUp,
  PctHpUp,
  PctDamageTakenDown,
  Shield,
  HealOverTime,
  HealBurst,

  // Control / debuffs
  Stun,
  Silence,
  Slow,
  Taunt,
  PctDefDown,
  PctAtkDown,
  PctDamageTakenUp,

  // Utility
  EnergyGainUp,
  EnergyDrain,
  Cleanse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectTarget {
  #[serde(rename = "self")]
  Caster,
  Ally,
  Allies,
  Enemy,
  Enemies,
  Squad,
  Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectStackRule {
  /// Reapplying has no additional effect.
  None,
  /// Reapplying refreshes duration.
  Refresh,
  StackAdd,
  StackMul,
  /// Stacks until a cap.
  Cap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placeholder {
  Scales,
}

/// A known number, or a marker that the value scales with level/stars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Magnitude {
  Value(f64),
  Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillEffect {
  pub key: EffectKey,
  pub target: EffectTarget,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub value: Option<Magnitude>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<Magnitude>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub chance: Option<Magnitude>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub stack: Option<EffectStackRule>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub note: Option<String>,
}

impl SkillEffect {
  pub fn new(key: EffectKey, target: EffectTarget) -> Self {
    Self {
      key,
      target,
      value: None,
      duration: None,
      chance: None,
      stack: None,
      note: None,
    }
  }
}

/// Occurrence counts per effect key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSummary {
  pub by_key: BTreeMap<EffectKey, u32>,
}

impl EffectSummary {
  pub fn add(&mut self, effect: &SkillEffect) {
    *self.by_key.entry(effect.key).or_insert(0) += 1;
  }

  pub fn merge(&self, other: &EffectSummary) -> EffectSummary {
    let mut out = self.clone();
    for (key, count) in &other.by_key {
      *out.by_key.entry(*key).or_insert(0) += count;
    }
    out
  }

  pub fn count(&self, key: EffectKey) -> u32 {
    self.by_key.get(&key).copied().unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.by_key.is_empty()
  }
}
