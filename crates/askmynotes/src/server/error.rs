//! Error types for the request path
//!
//! Every error surfaces to the client as a JSON object with a single
//! human-readable `error` string: 400 for the dashboard's missing-notes
//! case, 500 for everything else. Storage, model, and parse failures are
//! deliberately one category on the wire.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Failure modes of the Q&A and dashboard builders.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
  /// No stored notes matched the subject/file selection
  #[error("No notes found.")]
  NoNotes,

  /// The model's reply could not be parsed into the requested shape.
  /// Policy is fail closed: no repair prompt, no retry.
  #[error("model reply was not valid JSON: {0}")]
  MalformedReply(#[from] serde_json::Error),

  /// Storage or model collaborator failure
  #[error(transparent)]
  Upstream(#[from] anyhow::Error),
}

/// A client-visible failure: status code plus `{"error": "..."}` body.
#[derive(Debug)]
pub struct ApiFailure {
  pub status: StatusCode,
  pub message: String,
}

impl ApiFailure {
  pub fn bad_request(message: impl Into<String>) -> Self {
    Self { status: StatusCode::BAD_REQUEST, message: message.into() }
  }

  pub fn conflict(message: impl Into<String>) -> Self {
    Self { status: StatusCode::CONFLICT, message: message.into() }
  }

  pub fn server_error(message: impl Into<String>) -> Self {
    Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into() }
  }
}

impl IntoResponse for ApiFailure {
  fn into_response(self) -> Response {
    (self.status, Json(json!({ "error": self.message }))).into_response()
  }
}
