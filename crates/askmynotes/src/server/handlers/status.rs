//! Health endpoint handler

use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;

use crate::server::types::HealthResponse;
use crate::server::AppState;

/// GET /api/health - Liveness plus record counts.
///
/// A store failure drops the counts but the endpoint still reports ok;
/// the process being up is the signal here.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
  let uptime_secs = state.started.elapsed().as_secs();

  match state.store.counts().await {
    Ok(counts) => Json(HealthResponse {
      status: "ok".to_string(),
      subjects: Some(counts.subjects),
      files: Some(counts.files),
      uptime_secs,
    }),
    Err(error) => {
      tracing::warn!("Health count query failed: {error}");
      Json(HealthResponse { status: "ok".to_string(), subjects: None, files: None, uptime_secs })
    }
  }
}
