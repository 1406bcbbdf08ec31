//! AskMyNotes REST Server
//!
//! HTTP API server for the note-grounded study assistant. Answers
//! questions and generates study dashboards strictly from uploaded note
//! text via an external LLM provider.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use askmynotes::server::services::model::GroqConfig;
use askmynotes::server::startup::{start_server, ServerConfig};

#[derive(Parser)]
#[command(name = "askmynotes_server")]
#[command(about = "AskMyNotes study-assistant API server")]
#[command(version)]
struct Args {
  /// Server bind address
  #[arg(long, default_value = "127.0.0.1:3001")]
  bind: SocketAddr,

  /// Path to the SQLite database file
  #[arg(long, env = "ASKMYNOTES_DB", default_value = "askmynotes.db")]
  database: PathBuf,

  /// Groq API key
  #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, default_value = "")]
  groq_api_key: String,

  /// OpenAI-compatible base URL for the model provider
  #[arg(long, env = "GROQ_BASE_URL", default_value = "https://api.groq.com/openai/v1")]
  groq_base_url: String,

  /// Model identifier to request
  #[arg(long, env = "GROQ_MODEL", default_value = "llama-3.3-70b-versatile")]
  groq_model: String,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("debug,hyper=info,reqwest=info")
  } else {
    EnvFilter::new("askmynotes=info,tower_http=info,warn")
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  tracing::info!("Starting AskMyNotes server v{}", env!("CARGO_PKG_VERSION"));

  let config = ServerConfig {
    bind: args.bind,
    database: args.database,
    model: GroqConfig {
      api_key: args.groq_api_key,
      base_url: args.groq_base_url,
      model: args.groq_model,
    },
  };

  start_server(config).await
}
