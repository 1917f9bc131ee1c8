//! Analyzer configuration with sane defaults.

use std::str::FromStr;

use crate::error::AnalyzerError;

/// What to do when two hero entries claim the same slot index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotConflictPolicy {
  /// Later entries overwrite earlier ones (scanner order).
  #[default]
  LastWriteWins,
  /// Keep the entry with the higher confidence; ties go to the later entry.
  HighestConfidence,
}

impl SlotConflictPolicy {
  pub fn describe(self) -> &'static str {
    match self {
      Self::LastWriteWins => "kept the last entry",
      Self::HighestConfidence => "kept the most confident entry",
    }
  }
}

impl FromStr for SlotConflictPolicy {
  type Err = AnalyzerError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "last" | "last-write-wins" => Ok(Self::LastWriteWins),
      "highest-confidence" | "confidence" => Ok(Self::HighestConfidence),
      _ => Err(AnalyzerError::validation(
        "slot_conflict",
        "expected last|highest-confidence",
      )),
    }
  }
}

/// Tunables for extraction.
#[derive(Debug, Clone)]
pub struct Config {
  /// Confidence assigned to a slot with a hero id or type but no declared confidence.
  pub default_confidence: f64,
  pub slot_conflict: SlotConflictPolicy,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      default_confidence: 0.6,
      slot_conflict: SlotConflictPolicy::LastWriteWins,
    }
  }
}
