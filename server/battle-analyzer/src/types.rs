//! JSON contracts for the analyzer (what the web tier sends and reads back).

use serde::Serialize;
use serde_json::Value;

use crate::effects::EffectSummary;
use crate::error::AnalyzerError;
use crate::extract::HeroSlot;
use crate::lineup::LineupBonus;
use crate::troop::{TroopType, TypeAdvantage};
use crate::SLOT_COUNT;

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

/// One stored report: an opaque id plus whatever the scanner produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInput {
  pub report_id: String,
  pub parsed: Value,
}

impl ReportInput {
  pub fn new(report_id: impl Into<String>, parsed: Value) -> Self {
    Self {
      report_id: report_id.into(),
      parsed,
    }
  }

  /// Reads `{"reportId": ..., "parsed": ...}`; `id` is accepted for rows
  /// exported straight from the reports table. A missing `parsed` is `{}`.
  pub fn from_value(mut value: Value) -> Result<Self, AnalyzerError> {
    let obj = value
      .as_object_mut()
      .ok_or_else(|| AnalyzerError::validation("reportId", "expected a JSON object"))?;

    let non_null = |key: &str| obj.get(key).filter(|v| !v.is_null());
    let report_id = match non_null("reportId").or_else(|| non_null("id")) {
      Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
      Some(Value::Number(n)) => n.to_string(),
      Some(_) => return Err(AnalyzerError::validation("reportId", "must be a non-empty string")),
      None => return Err(AnalyzerError::validation("reportId", "missing")),
    };

    let parsed = match obj.remove("parsed") {
      Some(Value::Null) | None => Value::Object(Default::default()),
      Some(v) => v,
    };

    Ok(Self { report_id, parsed })
  }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSide {
  pub heroes: [HeroSlot; SLOT_COUNT],
  pub hero_set_key: String,
  pub hero_order_key: String,
  pub lineup: LineupBonus,
  pub dominant_type: Option<TroopType>,
  pub effect_summary: EffectSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sides {
  #[serde(rename = "A")]
  pub a: AnalysisSide,
  #[serde(rename = "B")]
  pub b: AnalysisSide,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominantTypeVs {
  #[serde(rename = "A_vs_B")]
  pub a_vs_b: Option<TypeAdvantage>,
  #[serde(rename = "B_vs_A")]
  pub b_vs_a: Option<TypeAdvantage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
  pub dominant_type_vs: DominantTypeVs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleAnalysis {
  pub ok: bool,
  pub report_id: String,
  pub sides: Sides,
  pub matchup: Matchup,
  pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchAnalysis {
  pub ok: bool,
  pub count: usize,
  pub analyses: Vec<BattleAnalysis>,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

impl From<&AnalyzerError> for ErrorOutput {
  fn from(e: &AnalyzerError) -> Self {
    match e {
      AnalyzerError::Validation { field, reason } => ErrorOutput::new(reason.clone()).with_field(field.clone()),
      _ => ErrorOutput::new(e.to_string()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn report_input_reads_id_and_parsed() {
    let input = ReportInput::from_value(json!({"reportId": "r-1", "parsed": {"sides": {}}})).unwrap();
    assert_eq!(input.report_id, "r-1");
    assert_eq!(input.parsed, json!({"sides": {}}));
  }

  #[test]
  fn report_input_accepts_row_shape() {
    let input = ReportInput::from_value(json!({"id": 42, "parsed": null})).unwrap();
    assert_eq!(input.report_id, "42");
    assert_eq!(input.parsed, json!({}));

    let input = ReportInput::from_value(json!({"reportId": null, "id": "r-9"})).unwrap();
    assert_eq!(input.report_id, "r-9");
  }

  #[test]
  fn report_input_requires_id() {
    let err = ReportInput::from_value(json!({"parsed": {}})).unwrap_err();
    let out = ErrorOutput::from(&err);
    assert_eq!(out.field.as_deref(), Some("reportId"));

    let err = ReportInput::from_value(json!({"reportId": ["x"]})).unwrap_err();
    assert!(err.to_string().contains("reportId"));

    assert!(ReportInput::from_value(json!("r-1")).is_err());
  }
}
