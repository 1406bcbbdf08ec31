//! Study dashboard generation
//!
//! Produces the summary + quiz + flashcard package for a subject or a
//! single file. Unlike chat, a subject without notes is a client error
//! here: the dashboard cannot render without a summary.

use crate::server::error::AssistError;
use crate::server::services::aggregate::aggregate;
use crate::server::services::resolve_subject_name;
use crate::server::types::{StudyDashboard, StudyRequestBody};
use crate::server::AppState;

/// Substituted when the model omits the mandatory summary.
pub const NOTES_FALLBACK: &str = "No summary could be generated from the text provided.";

/// Generate a study dashboard from the subject's stored notes.
pub async fn generate_dashboard(
  state: &AppState,
  user_id: &str,
  body: &StudyRequestBody,
) -> Result<StudyDashboard, AssistError> {
  let subject_text =
    aggregate(state.store.as_ref(), &body.subject_id, user_id, body.file_name.as_deref())
      .await?;

  let name = resolve_subject_name(
    state.store.as_ref(),
    &body.subject_id,
    user_id,
    body.subject_name.as_deref(),
  )
  .await?;

  let Some(subject_text) = subject_text else {
    return Err(AssistError::NoNotes);
  };

  tracing::info!("Generating dashboard for {name}");

  let prompt = build_prompt(&name, &subject_text);
  let raw = state.model.complete_json(&prompt).await?;
  let mut dashboard: StudyDashboard = serde_json::from_str(&raw)?;

  // The summary is mandatory for rendering; this is the one
  // normalization applied to model output.
  if dashboard.notes.trim().is_empty() {
    dashboard.notes = NOTES_FALLBACK.to_string();
  }

  Ok(dashboard)
}

/// Instruction block for dashboard generation. The counts (5 MCQs, 3
/// flashcards) are demanded of the model, not enforced locally.
fn build_prompt(subject_name: &str, subject_text: &str) -> String {
  format!(
    r#"Produce a study dashboard for "{subject_name}" based STRICTLY on these notes:
{subject_text}

REQUIREMENTS:
1. "notes": A beautiful, substantial Markdown summary with headers and bullets. MANDATORY.
2. "mcqs": 5 multiple choice questions with options and explanations.
3. "shortAnswer": 3 flashcard-style questions.

Respond ONLY in valid JSON:
{{
  "notes": "Full Markdown summary here...",
  "mcqs": [{{"question": "", "options": [], "correctKey": "", "explanation": "", "citation": ""}}],
  "shortAnswer": [{{"question": "", "answer": "", "citation": ""}}]
}}"#
  )
}
