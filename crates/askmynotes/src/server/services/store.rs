//! Storage abstraction for subjects, note files, and chat history
//!
//! This module defines the persistence interface the service layer talks
//! to, allowing different backends (SQLite, in-memory test doubles) to be
//! swapped without changing the handlers or builders.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined topic grouping one or more uploaded note files.
///
/// `subject_id` is caller-supplied and only unique together with `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
  /// Internal record id
  pub id: String,
  /// Frontend subject identifier
  pub subject_id: String,
  /// Owner reference
  pub user_id: String,
  /// Display name
  pub name: String,
  /// Presentation icon
  pub icon: String,
  /// Presentation color key
  pub color: String,
  /// Creation timestamp
  pub created_at: DateTime<Utc>,
}

/// A single uploaded document's already-extracted plain text.
///
/// Extraction happens upstream; the stored text is required to be
/// non-empty at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteFile {
  /// Internal record id
  pub id: String,
  /// Owning subject identifier
  pub subject_id: String,
  /// Owner reference
  pub user_id: String,
  /// Original file name, used as the provenance label
  pub file_name: String,
  /// Extracted plain text (non-empty)
  pub extracted_text: String,
  /// Upload timestamp; per-subject ordering key
  pub uploaded_at: DateTime<Utc>,
}

/// Fields for inserting a new note file.
#[derive(Debug, Clone)]
pub struct NewNoteFile {
  pub subject_id: String,
  pub user_id: String,
  pub file_name: String,
  pub extracted_text: String,
  pub uploaded_at: DateTime<Utc>,
}

/// Fields for creating a new subject.
#[derive(Debug, Clone)]
pub struct NewSubject {
  pub subject_id: String,
  pub user_id: String,
  pub name: String,
  pub icon: String,
  pub color: String,
}

/// A recorded question/answer exchange, written as a best-effort audit
/// trail after a chat response has been produced. Never read back by the
/// service itself.
#[derive(Debug, Clone)]
pub struct NewChatExchange {
  pub subject_id: String,
  pub question: String,
  pub response: serde_json::Value,
}

/// Record counts reported by the health endpoint.
#[derive(Debug, Clone, Copy)]
pub struct StoreCounts {
  pub subjects: u64,
  pub files: u64,
}

/// Persistence interface for the study-assistant data model.
#[async_trait]
pub trait NoteStore: Send + Sync {
  /// Create a subject. Fails when (subject_id, user_id) already exists.
  async fn create_subject(&self, subject: NewSubject) -> Result<Subject>;

  /// Look up a subject by its (subject_id, user_id) pair.
  async fn find_subject(&self, subject_id: &str, user_id: &str) -> Result<Option<Subject>>;

  /// List all subjects owned by a user, newest first.
  async fn list_subjects(&self, user_id: &str) -> Result<Vec<Subject>>;

  /// Insert a note file. The extracted text must be non-empty.
  async fn insert_note(&self, note: NewNoteFile) -> Result<NoteFile>;

  /// All note files for a subject (optionally one specific file),
  /// ordered by upload timestamp ascending.
  async fn notes_for(
    &self,
    subject_id: &str,
    user_id: &str,
    file_name: Option<&str>,
  ) -> Result<Vec<NoteFile>>;

  /// Remove a note file by name. Returns whether a record was deleted.
  async fn remove_note(&self, subject_id: &str, user_id: &str, file_name: &str) -> Result<bool>;

  /// Append a chat exchange to the audit trail.
  async fn record_exchange(&self, exchange: NewChatExchange) -> Result<()>;

  /// Subject and file counts for the health endpoint.
  async fn counts(&self) -> Result<StoreCounts>;
}
