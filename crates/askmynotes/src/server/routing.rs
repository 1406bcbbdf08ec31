//! Axum router configuration for all endpoints

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::server::handlers::{chat, status, study, subjects};
use crate::server::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
  Router::new()
    // Health endpoint
    .route("/api/health", get(status::health))
    // AI-backed endpoints
    .route("/api/chat", post(chat::chat))
    .route("/api/study-mode", post(study::study_mode))
    // Subject and file management
    .route("/api/subjects", post(subjects::create_subject).get(subjects::list_subjects))
    .route("/api/subjects/{subjectId}/files", get(subjects::list_files))
    .route("/api/upload", post(subjects::upload))
    .route("/api/files", delete(subjects::remove_file))
    .with_state(state)
}
