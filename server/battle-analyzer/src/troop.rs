//! Troop types and the cyclic type-advantage rule.
//!
//! Tank beats missile, missile beats air, air beats tank.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TroopType {
  Tank,
  Air,
  Missile,
}

impl TroopType {
  pub const ALL: [TroopType; 3] = [TroopType::Tank, TroopType::Air, TroopType::Missile];

  /// Exact literal match only ("tank", "air", "missile"); no case folding.
  pub fn from_literal(s: &str) -> Option<Self> {
    match s {
      "tank" => Some(Self::Tank),
      "air" => Some(Self::Air),
      "missile" => Some(Self::Missile),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Tank => "tank",
      Self::Air => "air",
      Self::Missile => "missile",
    }
  }

  /// The type this one has the advantage over.
  pub fn beats(self) -> TroopType {
    match self {
      Self::Tank => Self::Missile,
      Self::Missile => Self::Air,
      Self::Air => Self::Tank,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvantageLabel {
  Advantage,
  Disadvantage,
  Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAdvantage {
  pub attacker: TroopType,
  pub defender: TroopType,
  pub damage_dealt_multiplier: f64,
  pub damage_taken_multiplier: f64,
  /// Dealt / taken folded together (simplified).
  pub effective_power_multiplier: f64,
  pub label: AdvantageLabel,
}

pub fn relation(attacker: TroopType, defender: TroopType) -> AdvantageLabel {
  if attacker == defender {
    AdvantageLabel::Neutral
  } else if attacker.beats() == defender {
    AdvantageLabel::Advantage
  } else {
    AdvantageLabel::Disadvantage
  }
}

/// Resolve damage multipliers for `attacker` hitting `defender`.
pub fn resolve(attacker: TroopType, defender: TroopType) -> TypeAdvantage {
  let label = relation(attacker, defender);
  let (dealt, taken, power) = match label {
    AdvantageLabel::Advantage => (1.2, 0.8, 1.44),
    AdvantageLabel::Disadvantage => (0.8, 1.2, 0.64),
    AdvantageLabel::Neutral => (1.0, 1.0, 1.0),
  };
  TypeAdvantage {
    attacker,
    defender,
    damage_dealt_multiplier: dealt,
    damage_taken_multiplier: taken,
    effective_power_multiplier: power,
    label,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_type_is_neutral() {
    for t in TroopType::ALL {
      let adv = resolve(t, t);
      assert_eq!(adv.label, AdvantageLabel::Neutral);
      assert_eq!(adv.damage_dealt_multiplier, 1.0);
      assert_eq!(adv.damage_taken_multiplier, 1.0);
      assert_eq!(adv.effective_power_multiplier, 1.0);
    }
  }

  #[test]
  fn cyclic_pairs_have_advantage() {
    let pairs = [
      (TroopType::Tank, TroopType::Missile),
      (TroopType::Missile, TroopType::Air),
      (TroopType::Air, TroopType::Tank),
    ];
    for (a, d) in pairs {
      let adv = resolve(a, d);
      assert_eq!(adv.label, AdvantageLabel::Advantage);
      assert_eq!(
        (adv.damage_dealt_multiplier, adv.damage_taken_multiplier, adv.effective_power_multiplier),
        (1.2, 0.8, 1.44)
      );

      let rev = resolve(d, a);
      assert_eq!(rev.label, AdvantageLabel::Disadvantage);
      assert_eq!(
        (rev.damage_dealt_multiplier, rev.damage_taken_multiplier, rev.effective_power_multiplier),
        (0.8, 1.2, 0.64)
      );
    }
  }

  #[test]
  fn literal_parsing_is_exact() {
    assert_eq!(TroopType::from_literal("air"), Some(TroopType::Air));
    assert_eq!(TroopType::from_literal("Air"), None);
    assert_eq!(TroopType::from_literal(" tank"), None);
  }

  #[test]
  fn serializes_camel_case() {
    let json = serde_json::to_value(resolve(TroopType::Tank, TroopType::Missile)).unwrap();
    assert_eq!(json["attacker"], "tank");
    assert_eq!(json["defender"], "missile");
    assert_eq!(json["label"], "advantage");
    assert_eq!(json["effectivePowerMultiplier"], 1.44);
  }
}
