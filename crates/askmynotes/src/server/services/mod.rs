pub mod aggregate;
pub mod model;
pub mod qa;
pub mod sqlite;
pub mod store;
pub mod study;

use anyhow::Result;

use store::NoteStore;

/// Resolve the display name for a subject: a non-empty caller hint wins,
/// then the stored subject name, then the literal "Subject".
pub async fn resolve_subject_name(
  store: &dyn NoteStore,
  subject_id: &str,
  user_id: &str,
  hint: Option<&str>,
) -> Result<String> {
  if let Some(name) = hint {
    if !name.is_empty() {
      return Ok(name.to_string());
    }
  }
  let stored = store.find_subject(subject_id, user_id).await?;
  Ok(stored.map(|subject| subject.name).unwrap_or_else(|| "Subject".to_string()))
}
