//! Wire contracts for the AskMyNotes REST API
//!
//! Field names are camelCase on the wire to match the frontend contract.
//! The model-facing shapes (StructuredAnswer, StudyDashboard) double as
//! the schema validation for the provider's JSON replies: a reply that
//! does not deserialize is a hard failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::server::services::store::Subject;

// Request bodies
// ==============

/// Body for POST /api/chat
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequestBody {
  /// Frontend subject identifier
  pub subject_id: String,

  /// Verbatim user question
  pub question: String,

  /// Optional display-name hint; looked up from storage when absent
  #[serde(default)]
  pub subject_name: Option<String>,
}

/// Body for POST /api/study-mode
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRequestBody {
  /// Frontend subject identifier
  pub subject_id: String,

  /// Optional display-name hint
  #[serde(default)]
  pub subject_name: Option<String>,

  /// Restrict the dashboard to a single uploaded file
  #[serde(default)]
  pub file_name: Option<String>,
}

/// Body for POST /api/subjects
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
  pub subject_id: String,
  pub name: String,
  #[serde(default)]
  pub icon: Option<String>,
  #[serde(default)]
  pub color: Option<String>,
}

/// Body for POST /api/upload. The text arrives already extracted; file
/// parsing is an upstream collaborator's job.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
  pub subject_id: String,
  pub file_name: String,
  pub extracted_text: String,
}

/// Body for DELETE /api/files
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFileRequest {
  pub subject_id: String,
  pub file_name: String,
}

// Chat reply
// ==========

/// Outcome of a chat request.
///
/// The soft miss is its own variant rather than an optional-field soup:
/// when no notes exist for the subject the reply collapses to
/// `{"notFound": true, "subjectName": ...}` and the model is never called.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatReply {
  NotFound(NotFoundReply),
  Answered(StructuredAnswer),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundReply {
  pub not_found: bool,
  pub subject_name: String,
}

impl NotFoundReply {
  pub fn new(subject_name: String) -> Self {
    Self { not_found: true, subject_name }
  }
}

/// Model confidence in a grounded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
  High,
  Medium,
  Low,
}

/// The grounded Q&A contract returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredAnswer {
  /// Whether the model judged the notes insufficient to answer
  #[serde(default)]
  pub not_found: bool,

  /// Markdown answer text
  pub answer: String,

  /// Enumerated confidence level
  pub confidence: Confidence,

  /// Quoted supporting passages from the notes, in order
  #[serde(default)]
  pub evidence: Vec<String>,

  /// Source labels (file names) backing the answer
  #[serde(default)]
  pub citations: Vec<String>,
}

// Study dashboard
// ===============

/// The generated study package for a subject or file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyDashboard {
  /// Markdown summary; mandatory for rendering, so an empty value is
  /// replaced with a literal fallback sentence after parsing
  #[serde(default)]
  pub notes: String,

  /// Multiple-choice questions (the prompt demands exactly five)
  #[serde(default)]
  pub mcqs: Vec<Mcq>,

  /// Flashcard-style questions (the prompt demands exactly three)
  #[serde(default)]
  pub short_answer: Vec<ShortAnswerCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mcq {
  pub question: String,
  #[serde(default)]
  pub options: Vec<String>,
  pub correct_key: String,
  pub explanation: String,
  pub citation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortAnswerCard {
  pub question: String,
  pub answer: String,
  pub citation: String,
}

// Subject and file management
// ===========================

/// Response for GET /api/subjects
#[derive(Debug, Serialize)]
pub struct SubjectListResponse {
  pub subjects: Vec<Subject>,
}

/// Note file metadata, without the (possibly large) text body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
  pub file_name: String,
  pub uploaded_at: DateTime<Utc>,
}

/// Response for GET /api/subjects/{subjectId}/files
#[derive(Debug, Serialize)]
pub struct FileListResponse {
  pub files: Vec<FileSummary>,
}

/// Response for POST /api/upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
  pub subject_id: String,
  pub file_name: String,
  pub uploaded_at: DateTime<Utc>,
}

/// Response for DELETE /api/files
#[derive(Debug, Serialize)]
pub struct RemoveFileResponse {
  pub removed: bool,
}

// Health
// ======

/// Response for GET /api/health; counts are omitted when the store is
/// unreachable, but the endpoint itself still reports ok.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
  pub status: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub subjects: Option<u64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub files: Option<u64>,

  pub uptime_secs: u64,
}
