//! Subject-scoped text aggregation
//!
//! Pulls every stored note file for a (subject, owner) selection, oldest
//! upload first, and concatenates them into one bounded string for
//! prompting. The result is ephemeral: computed fresh per request, never
//! cached.

use anyhow::Result;

use super::store::NoteStore;

/// Hard cap on the aggregated text, in characters (not tokens or bytes).
/// Truncation may cut a source segment mid-sentence; the limit is a
/// cost/simplicity bound, not a semantic boundary.
pub const MAX_AGGREGATE_CHARS: usize = 30_000;

/// Retrieve and concatenate extracted text for a subject, or for one
/// specific file when `file_name` is given.
///
/// Returns `None` when zero records match, distinct from an empty
/// string, which is never stored. Each record is prefixed with a
/// `--- Source: <fileName> ---` provenance header; records are joined by
/// a blank line and the whole string is truncated to
/// [`MAX_AGGREGATE_CHARS`].
pub async fn aggregate(
  store: &dyn NoteStore,
  subject_id: &str,
  user_id: &str,
  file_name: Option<&str>,
) -> Result<Option<String>> {
  let files = store.notes_for(subject_id, user_id, file_name).await?;
  if files.is_empty() {
    return Ok(None);
  }

  let combined = files
    .iter()
    .map(|file| format!("--- Source: {} ---\n{}", file.file_name, file.extracted_text))
    .collect::<Vec<_>>()
    .join("\n\n");

  Ok(Some(truncate_chars(combined, MAX_AGGREGATE_CHARS)))
}

/// Truncate to at most `max_chars` characters, on a char boundary.
fn truncate_chars(mut text: String, max_chars: usize) -> String {
  if let Some((byte_index, _)) = text.char_indices().nth(max_chars) {
    text.truncate(byte_index);
  }
  text
}
