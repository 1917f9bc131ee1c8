//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is `{"reportId": ..., "parsed": ...}`. Each output line is
//! either a BattleAnalysis or an ErrorOutput (for lines that aren't JSON or
//! lack a report id). Logs go to stderr.
//!
//! Environment:
//! - `BATTLE_ANALYZER_CATALOG`: hero catalog JSON path (no effect counts when unset).
//! - `BATTLE_ANALYZER_SLOT_CONFLICT`: `last` (default) or `highest-confidence`.
//! - `RUST_LOG`: log filter, default `info`.

use battle_analyzer::types::{ErrorOutput, ReportInput};
use battle_analyzer::{Analyzer, AnalyzerError, Config, HeroCatalog};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(io::stderr)
    .init();

  if let Err(e) = run_binary() {
    error!("battle-analyzer: {}", e);
    std::process::exit(1);
  }
}

fn load_config() -> Result<Config, AnalyzerError> {
  let mut config = Config::default();
  if let Ok(raw) = std::env::var("BATTLE_ANALYZER_SLOT_CONFLICT") {
    config.slot_conflict = raw.parse()?;
  }
  Ok(config)
}

fn load_catalog() -> Result<HeroCatalog, AnalyzerError> {
  match std::env::var("BATTLE_ANALYZER_CATALOG") {
    Ok(path) if !path.trim().is_empty() => {
      let catalog = HeroCatalog::load(&path)?;
      info!(path = %path, version = %catalog.version, heroes = catalog.len(), "hero catalog loaded");
      Ok(catalog)
    }
    _ => {
      warn!("BATTLE_ANALYZER_CATALOG not set; effect summaries will be empty");
      Ok(HeroCatalog::empty())
    }
  }
}

fn run_binary() -> Result<(), AnalyzerError> {
  let config = load_config()?;
  let catalog = load_catalog()?;
  let analyzer = Analyzer::new(config, &catalog);

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let mut analyzed = 0usize;
  let mut rejected = 0usize;

  for line in stdin.lock().lines() {
    let line = line?;

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let input = serde_json::from_str(trimmed)
      .map_err(AnalyzerError::from)
      .and_then(ReportInput::from_value);

    match input {
      Ok(report) => {
        let analysis = analyzer.analyze(&report.report_id, &report.parsed);
        serde_json::to_writer(&mut out, &analysis)?;
        analyzed += 1;
      }
      Err(e) => {
        warn!("rejected input line: {}", e);
        serde_json::to_writer(&mut out, &ErrorOutput::from(&e))?;
        rejected += 1;
      }
    }
    writeln!(out)?;
  }

  out.flush()?;
  info!(analyzed, rejected, "done");
  Ok(())
}
