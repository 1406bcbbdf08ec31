//! Chat endpoint handler

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::Json as ResponseJson;

use crate::server::error::ApiFailure;
use crate::server::handlers::owner_id;
use crate::server::services::qa;
use crate::server::types::{ChatReply, ChatRequestBody};
use crate::server::AppState;

/// POST /api/chat - Answer a question strictly from the subject's notes.
///
/// A subject without notes is a successful response with
/// `notFound: true`, never an HTTP error. Every failure (storage, model,
/// malformed model output) is a 500 with `{"error": ...}`.
pub async fn chat(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<ChatRequestBody>,
) -> Result<ResponseJson<ChatReply>, ApiFailure> {
  let user_id = owner_id(&headers);

  match qa::answer(&state, &user_id, &body).await {
    Ok(reply) => Ok(ResponseJson(reply)),
    Err(error) => {
      tracing::error!("Chat route error: {error}");
      Err(ApiFailure::server_error(error.to_string()))
    }
  }
}
