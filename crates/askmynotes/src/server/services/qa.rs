//! Grounded question answering
//!
//! Builds a single instruction that confines the model to the aggregated
//! note text, requests a strict-JSON reply matching [`StructuredAnswer`],
//! and records the exchange as a best-effort audit trail after the
//! response is prepared.

use std::sync::Arc;

use crate::server::error::AssistError;
use crate::server::services::aggregate::aggregate;
use crate::server::services::resolve_subject_name;
use crate::server::services::store::{NewChatExchange, NoteStore};
use crate::server::types::{ChatReply, ChatRequestBody, NotFoundReply, StructuredAnswer};
use crate::server::AppState;

/// Answer a question strictly from the subject's stored notes.
///
/// When the subject has no notes the reply is the soft
/// `{notFound, subjectName}` shape and the model is never invoked:
/// there is nothing to ground an answer in.
pub async fn answer(
  state: &AppState,
  user_id: &str,
  body: &ChatRequestBody,
) -> Result<ChatReply, AssistError> {
  let subject_text =
    aggregate(state.store.as_ref(), &body.subject_id, user_id, None).await?;

  let name = resolve_subject_name(
    state.store.as_ref(),
    &body.subject_id,
    user_id,
    body.subject_name.as_deref(),
  )
  .await?;

  let Some(subject_text) = subject_text else {
    return Ok(ChatReply::NotFound(NotFoundReply::new(name)));
  };

  let prompt = build_prompt(&subject_text, &body.question);
  let raw = state.model.complete_json(&prompt).await?;
  let answer: StructuredAnswer = serde_json::from_str(&raw)?;

  record_history(Arc::clone(&state.store), &body.subject_id, &body.question, &answer);

  Ok(ChatReply::Answered(answer))
}

/// Instruction block for the Q&A task. The JSON shape in the text is the
/// behavioral contract with the model.
fn build_prompt(subject_text: &str, question: &str) -> String {
  format!(
    r#"You are "AskMyNotes" AI. Answer strictly based on the notes below.
NOTES:
{subject_text}

QUESTION: {question}

Respond in JSON:
{{
  "notFound": boolean,
  "answer": "markdown string",
  "confidence": "High"|"Medium"|"Low",
  "evidence": ["quotes"],
  "citations": ["filename"]
}}"#
  )
}

/// Fire-and-forget history write. A failure here is logged and swallowed;
/// the caller's response has already been decided.
fn record_history(
  store: Arc<dyn NoteStore>,
  subject_id: &str,
  question: &str,
  answer: &StructuredAnswer,
) {
  let exchange = NewChatExchange {
    subject_id: subject_id.to_string(),
    question: question.to_string(),
    response: serde_json::to_value(answer).unwrap_or(serde_json::Value::Null),
  };
  tokio::spawn(async move {
    if let Err(error) = store.record_exchange(exchange).await {
      tracing::warn!("chat history save failed: {error:#}");
    }
  });
}
