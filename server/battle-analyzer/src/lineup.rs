//! Lineup composition bonus and dominant troop type.

use serde::{Deserialize, Serialize};

use crate::troop::TroopType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineupTier {
  #[serde(rename = "none")]
  None,
  #[serde(rename = "3_same")]
  ThreeSame,
  #[serde(rename = "3_same_2_diff")]
  ThreeSameTwoDiff,
  #[serde(rename = "4_same")]
  FourSame,
  #[serde(rename = "5_same")]
  FiveSame,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupBonus {
  pub same_type_count: u8,
  pub total_heroes: u8,
  /// Flat HP/ATK/DEF bonus as a fraction (0.05 = +5%).
  pub stat_percent_bonus: f64,
  pub tier: LineupTier,
}

#[derive(Debug, Clone, Copy, Default)]
struct TypeCounts {
  tank: u8,
  air: u8,
  missile: u8,
}

impl TypeCounts {
  fn tally(types: &[TroopType]) -> Self {
    let mut counts = Self::default();
    for t in types {
      match t {
        TroopType::Tank => counts.tank = counts.tank.saturating_add(1),
        TroopType::Air => counts.air = counts.air.saturating_add(1),
        TroopType::Missile => counts.missile = counts.missile.saturating_add(1),
      }
    }
    counts
  }

  fn get(&self, t: TroopType) -> u8 {
    match t {
      TroopType::Tank => self.tank,
      TroopType::Air => self.air,
      TroopType::Missile => self.missile,
    }
  }

  fn max(&self) -> u8 {
    self.tank.max(self.air).max(self.missile)
  }
}

/// Step table; first match wins.
pub fn compute_bonus(types: &[TroopType]) -> LineupBonus {
  let total_heroes = types.len().min(u8::MAX as usize) as u8;
  let same_type_count = TypeCounts::tally(types).max();

  let (tier, stat_percent_bonus) = match same_type_count {
    n if n >= 5 => (LineupTier::FiveSame, 0.20),
    4 => (LineupTier::FourSame, 0.15),
    3 if total_heroes == 5 => (LineupTier::ThreeSameTwoDiff, 0.10),
    3 => (LineupTier::ThreeSame, 0.05),
    _ => (LineupTier::None, 0.0),
  };

  LineupBonus {
    same_type_count,
    total_heroes,
    stat_percent_bonus,
    tier,
  }
}

/// Type with a strict plurality, or `None` when empty or the top count is shared.
pub fn dominant_type(types: &[TroopType]) -> Option<TroopType> {
  let counts = TypeCounts::tally(types);
  let max = counts.max();
  if max == 0 {
    return None;
  }
  let mut leaders = TroopType::ALL.into_iter().filter(|t| counts.get(*t) == max);
  let first = leaders.next()?;
  match leaders.next() {
    Some(_) => None,
    None => Some(first),
  }
}
