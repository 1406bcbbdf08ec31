//! Server startup and configuration

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::serve;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::routing::create_router;
use crate::server::services::model::{GroqClient, GroqConfig};
use crate::server::services::sqlite::SqliteStore;
use crate::server::AppState;

/// Startup configuration, resolved by the binary from flags and env.
#[derive(Debug, Clone)]
pub struct ServerConfig {
  pub bind: SocketAddr,
  pub database: PathBuf,
  pub model: GroqConfig,
}

/// Open the collaborators, wire the router, and serve until shutdown.
pub async fn start_server(config: ServerConfig) -> Result<()> {
  let store = SqliteStore::open(&config.database)?;
  let model = GroqClient::new(config.model);
  let state = Arc::new(AppState::new(Arc::new(store), Arc::new(model)));

  let app = create_router(state).layer(
    ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()),
  );

  let listener = TcpListener::bind(config.bind).await?;
  tracing::info!("AskMyNotes backend running at http://{}", config.bind);

  serve(listener, app).await.map_err(|error| anyhow!("Server error: {error}"))
}
