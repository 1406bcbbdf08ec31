//! In-memory mock collaborators for service and router tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use askmynotes::server::services::model::ModelClient;
use askmynotes::server::services::store::{
  NewChatExchange, NewNoteFile, NewSubject, NoteFile, NoteStore, StoreCounts, Subject,
};

/// In-memory note store with failure knobs.
pub struct MockStore {
  pub subjects: Mutex<Vec<Subject>>,
  pub notes: Mutex<Vec<NoteFile>>,
  pub exchanges: Mutex<Vec<NewChatExchange>>,
  pub fail_exchange: bool,
  pub fail_reads: bool,
}

impl Default for MockStore {
  fn default() -> Self {
    Self::new()
  }
}

impl MockStore {
  pub fn new() -> Self {
    Self {
      subjects: Mutex::new(Vec::new()),
      notes: Mutex::new(Vec::new()),
      exchanges: Mutex::new(Vec::new()),
      fail_exchange: false,
      fail_reads: false,
    }
  }

  pub fn add_subject(&self, subject_id: &str, user_id: &str, name: &str) {
    self.subjects.lock().unwrap().push(Subject {
      id: Uuid::new_v4().to_string(),
      subject_id: subject_id.to_string(),
      user_id: user_id.to_string(),
      name: name.to_string(),
      icon: "📘".to_string(),
      color: "s0".to_string(),
      created_at: Utc::now(),
    });
  }

  pub fn add_note(
    &self,
    subject_id: &str,
    user_id: &str,
    file_name: &str,
    text: &str,
    uploaded_at: DateTime<Utc>,
  ) {
    self.notes.lock().unwrap().push(NoteFile {
      id: Uuid::new_v4().to_string(),
      subject_id: subject_id.to_string(),
      user_id: user_id.to_string(),
      file_name: file_name.to_string(),
      extracted_text: text.to_string(),
      uploaded_at,
    });
  }
}

/// A fixed, strictly increasing timestamp for deterministic ordering.
pub fn timestamp(offset_secs: i64) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap() + chrono::Duration::seconds(offset_secs)
}

#[async_trait]
impl NoteStore for MockStore {
  async fn create_subject(&self, subject: NewSubject) -> Result<Subject> {
    let created = Subject {
      id: Uuid::new_v4().to_string(),
      subject_id: subject.subject_id,
      user_id: subject.user_id,
      name: subject.name,
      icon: subject.icon,
      color: subject.color,
      created_at: Utc::now(),
    };
    self.subjects.lock().unwrap().push(created.clone());
    Ok(created)
  }

  async fn find_subject(&self, subject_id: &str, user_id: &str) -> Result<Option<Subject>> {
    if self.fail_reads {
      return Err(anyhow!("mock storage unreachable"));
    }
    Ok(
      self
        .subjects
        .lock()
        .unwrap()
        .iter()
        .find(|s| s.subject_id == subject_id && s.user_id == user_id)
        .cloned(),
    )
  }

  async fn list_subjects(&self, user_id: &str) -> Result<Vec<Subject>> {
    Ok(self.subjects.lock().unwrap().iter().filter(|s| s.user_id == user_id).cloned().collect())
  }

  async fn insert_note(&self, note: NewNoteFile) -> Result<NoteFile> {
    let stored = NoteFile {
      id: Uuid::new_v4().to_string(),
      subject_id: note.subject_id,
      user_id: note.user_id,
      file_name: note.file_name,
      extracted_text: note.extracted_text,
      uploaded_at: note.uploaded_at,
    };
    self.notes.lock().unwrap().push(stored.clone());
    Ok(stored)
  }

  async fn notes_for(
    &self,
    subject_id: &str,
    user_id: &str,
    file_name: Option<&str>,
  ) -> Result<Vec<NoteFile>> {
    if self.fail_reads {
      return Err(anyhow!("mock storage unreachable"));
    }
    let mut matching: Vec<NoteFile> = self
      .notes
      .lock()
      .unwrap()
      .iter()
      .filter(|n| {
        n.subject_id == subject_id
          && n.user_id == user_id
          && file_name.map_or(true, |f| n.file_name == f)
      })
      .cloned()
      .collect();
    matching.sort_by_key(|n| n.uploaded_at);
    Ok(matching)
  }

  async fn remove_note(&self, subject_id: &str, user_id: &str, file_name: &str) -> Result<bool> {
    let mut notes = self.notes.lock().unwrap();
    let before = notes.len();
    notes.retain(|n| {
      !(n.subject_id == subject_id && n.user_id == user_id && n.file_name == file_name)
    });
    Ok(notes.len() < before)
  }

  async fn record_exchange(&self, exchange: NewChatExchange) -> Result<()> {
    if self.fail_exchange {
      return Err(anyhow!("mock history write failure"));
    }
    self.exchanges.lock().unwrap().push(exchange);
    Ok(())
  }

  async fn counts(&self) -> Result<StoreCounts> {
    if self.fail_reads {
      return Err(anyhow!("mock storage unreachable"));
    }
    Ok(StoreCounts {
      subjects: self.subjects.lock().unwrap().len() as u64,
      files: self.notes.lock().unwrap().len() as u64,
    })
  }
}

/// Mock model client returning a canned reply and counting invocations.
pub struct MockModel {
  pub reply: String,
  pub calls: AtomicUsize,
  pub fail: bool,
}

impl MockModel {
  pub fn replying(reply: &str) -> Self {
    Self { reply: reply.to_string(), calls: AtomicUsize::new(0), fail: false }
  }

  pub fn failing() -> Self {
    Self { reply: String::new(), calls: AtomicUsize::new(0), fail: true }
  }

  pub fn call_count(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ModelClient for MockModel {
  async fn complete_json(&self, _prompt: &str) -> Result<String> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.fail {
      return Err(anyhow!("model provider unavailable"));
    }
    Ok(self.reply.clone())
  }
}
