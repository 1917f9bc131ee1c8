//! Structured error types for the battle analyzer.
//!
//! Analysis itself never fails; these cover the fallible edges (catalog
//! loading, stdin lines).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("catalog: {0}")]
  Catalog(String),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl AnalyzerError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn catalog(msg: impl Into<String>) -> Self {
    Self::Catalog(msg.into())
  }
}
