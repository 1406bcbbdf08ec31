//! External model collaborator
//!
//! A thin client for an OpenAI-compatible chat-completions API (Groq by
//! default). The service only ever sends a single user instruction and
//! asks the provider for a strict-JSON reply; parsing and validation of
//! that reply belong to the callers.

use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Interface to the hosted LLM provider.
#[async_trait]
pub trait ModelClient: Send + Sync {
  /// Submit a single instruction and return the provider's raw text
  /// reply, which is requested (but not guaranteed) to be one
  /// well-formed JSON object.
  async fn complete_json(&self, prompt: &str) -> Result<String>;
}

/// Configuration for the Groq chat-completions client.
#[derive(Debug, Clone)]
pub struct GroqConfig {
  pub api_key: String,
  /// OpenAI-compatible base URL, e.g. "https://api.groq.com/openai/v1"
  pub base_url: String,
  /// Model identifier, e.g. "llama-3.3-70b-versatile"
  pub model: String,
}

impl Default for GroqConfig {
  fn default() -> Self {
    Self {
      api_key: String::new(),
      base_url: "https://api.groq.com/openai/v1".to_string(),
      model: "llama-3.3-70b-versatile".to_string(),
    }
  }
}

pub struct GroqClient {
  client: Client,
  config: GroqConfig,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
  model: &'a str,
  messages: Vec<RequestMessage<'a>>,
  response_format: ResponseFormat,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
  role: &'a str,
  content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
  #[serde(rename = "type")]
  kind: &'static str,
}

#[derive(Deserialize)]
struct CompletionResponse {
  choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
  message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
  content: String,
}

impl GroqClient {
  pub fn new(config: GroqConfig) -> Self {
    let client = Client::builder()
      .timeout(Duration::from_secs(120))
      .build()
      .expect("Failed to create HTTP client");
    Self { client, config }
  }
}

#[async_trait]
impl ModelClient for GroqClient {
  async fn complete_json(&self, prompt: &str) -> Result<String> {
    let body = CompletionRequest {
      model: &self.config.model,
      messages: vec![RequestMessage { role: "user", content: prompt }],
      response_format: ResponseFormat { kind: "json_object" },
    };

    let mut request = self
      .client
      .post(format!("{}/chat/completions", self.config.base_url))
      .header("Content-Type", "application/json")
      .json(&body);
    if !self.config.api_key.is_empty() {
      request = request.header("Authorization", format!("Bearer {}", self.config.api_key));
    }

    let response = request.send().await?;

    if !response.status().is_success() {
      let status = response.status().as_u16();
      let text = response.text().await.unwrap_or_default();
      return Err(anyhow!("model API error: {status} - {text}"));
    }

    let data: CompletionResponse = response.json().await?;
    data
      .choices
      .into_iter()
      .next()
      .map(|choice| choice.message.content)
      .ok_or_else(|| anyhow!("model reply contained no choices"))
  }
}
