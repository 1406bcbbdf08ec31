//! Study-mode endpoint handler

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::Json as ResponseJson;

use crate::server::error::{ApiFailure, AssistError};
use crate::server::handlers::owner_id;
use crate::server::services::study;
use crate::server::types::{StudyDashboard, StudyRequestBody};
use crate::server::AppState;

/// POST /api/study-mode - Generate a study dashboard.
///
/// Missing notes are a 400 here, an intentional asymmetry with the chat
/// endpoint: the dashboard cannot render without a summary.
pub async fn study_mode(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<StudyRequestBody>,
) -> Result<ResponseJson<StudyDashboard>, ApiFailure> {
  let user_id = owner_id(&headers);

  match study::generate_dashboard(&state, &user_id, &body).await {
    Ok(dashboard) => Ok(ResponseJson(dashboard)),
    Err(AssistError::NoNotes) => Err(ApiFailure::bad_request("No notes found.")),
    Err(error) => {
      tracing::error!("Dashboard generation error: {error}");
      Err(ApiFailure::server_error(error.to_string()))
    }
  }
}
