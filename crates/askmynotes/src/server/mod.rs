//! REST API module for the AskMyNotes service
//!
//! Provides the HTTP endpoints consumed by the study-assistant frontend.
//! Uses axum for routing; persistence and model access live behind the
//! trait seams in [`services`].

pub mod error;
pub mod handlers;
pub mod routing;
pub mod services;
pub mod startup;
pub mod types;

use std::sync::Arc;
use std::time::Instant;

use services::model::ModelClient;
use services::store::NoteStore;

/// Process-lifetime shared state handed to axum as router state.
///
/// Both collaborators are opened once at startup and safe for concurrent
/// use; request handlers never hold state of their own.
pub struct AppState {
  /// Note and subject persistence
  pub store: Arc<dyn NoteStore>,
  /// External LLM provider
  pub model: Arc<dyn ModelClient>,
  /// Server start time, reported by the health endpoint
  pub started: Instant,
}

impl AppState {
  pub fn new(store: Arc<dyn NoteStore>, model: Arc<dyn ModelClient>) -> Self {
    Self { store, model, started: Instant::now() }
  }
}
