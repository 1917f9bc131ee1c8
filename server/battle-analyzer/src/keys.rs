//! Composition identity keys for grouping reports by lineup.
//!
//! - set key: same heroes regardless of slot (sorted, pipe-joined).
//! - order key: same heroes in the same slots (positional, `_` for blanks).

use crate::SLOT_COUNT;

fn normalize_id(id: Option<&str>) -> Option<String> {
  let trimmed = id?.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_lowercase())
  }
}

pub fn hero_set_key<'a, I>(ids: I) -> String
where
  I: IntoIterator<Item = Option<&'a str>>,
{
  let mut present: Vec<String> = ids.into_iter().filter_map(normalize_id).collect();
  present.sort();
  present.join("|")
}

pub fn hero_order_key<'a, I>(ids_by_slot: I) -> String
where
  I: IntoIterator<Item = Option<&'a str>>,
{
  ids_by_slot
    .into_iter()
    .take(SLOT_COUNT)
    .map(|id| normalize_id(id).unwrap_or_else(|| "_".to_string()))
    .collect::<Vec<_>>()
    .join("|")
}
