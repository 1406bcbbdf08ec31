//! SQLite-backed note store
//!
//! Single connection behind a mutex, migrated on open. Queries are short
//! and per-subject, so the coarse lock is not a contention point.

use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::store::{
  NewChatExchange, NewNoteFile, NewSubject, NoteFile, NoteStore, StoreCounts, Subject,
};

pub struct SqliteStore {
  conn: Mutex<Connection>,
}

impl SqliteStore {
  /// Open (or create) the database at `path` and run migrations.
  pub fn open(path: &Path) -> Result<Self> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).ok();
    }
    let conn = Connection::open(path)
      .with_context(|| format!("failed to open database at {}", path.display()))?;
    let store = Self { conn: Mutex::new(conn) };
    store.migrate()?;
    Ok(store)
  }

  /// In-memory database, used by tests.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    let store = Self { conn: Mutex::new(conn) };
    store.migrate()?;
    Ok(store)
  }

  fn migrate(&self) -> Result<()> {
    let conn = self.lock()?;
    conn.execute_batch(
      "
      PRAGMA journal_mode=WAL;
      PRAGMA foreign_keys=ON;

      CREATE TABLE IF NOT EXISTS subjects (
        id TEXT PRIMARY KEY,
        subject_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        name TEXT NOT NULL,
        icon TEXT NOT NULL DEFAULT '📘',
        color TEXT NOT NULL DEFAULT 's0',
        created_at TEXT NOT NULL,
        UNIQUE (subject_id, user_id)
      );

      CREATE TABLE IF NOT EXISTS note_files (
        id TEXT PRIMARY KEY,
        subject_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        file_name TEXT NOT NULL,
        extracted_text TEXT NOT NULL CHECK (length(extracted_text) > 0),
        uploaded_at TEXT NOT NULL
      );
      CREATE INDEX IF NOT EXISTS idx_note_files_subject
        ON note_files (subject_id, user_id, uploaded_at);

      CREATE TABLE IF NOT EXISTS chat_history (
        id TEXT PRIMARY KEY,
        subject_id TEXT NOT NULL,
        question TEXT NOT NULL,
        response TEXT NOT NULL,
        created_at TEXT NOT NULL
      );
      ",
    )?;
    Ok(())
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
    self.conn.lock().map_err(|_| anyhow!("store mutex poisoned"))
  }
}

fn subject_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Subject> {
  Ok(Subject {
    id: row.get(0)?,
    subject_id: row.get(1)?,
    user_id: row.get(2)?,
    name: row.get(3)?,
    icon: row.get(4)?,
    color: row.get(5)?,
    created_at: row.get::<_, DateTime<Utc>>(6)?,
  })
}

fn note_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteFile> {
  Ok(NoteFile {
    id: row.get(0)?,
    subject_id: row.get(1)?,
    user_id: row.get(2)?,
    file_name: row.get(3)?,
    extracted_text: row.get(4)?,
    uploaded_at: row.get::<_, DateTime<Utc>>(5)?,
  })
}

#[async_trait]
impl NoteStore for SqliteStore {
  async fn create_subject(&self, subject: NewSubject) -> Result<Subject> {
    let conn = self.lock()?;
    let id = Uuid::new_v4().to_string();
    let created_at = Utc::now();
    conn
      .execute(
        "INSERT INTO subjects (id, subject_id, user_id, name, icon, color, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
          id,
          subject.subject_id,
          subject.user_id,
          subject.name,
          subject.icon,
          subject.color,
          created_at
        ],
      )
      .with_context(|| {
        format!("failed to create subject {}/{}", subject.subject_id, subject.user_id)
      })?;
    Ok(Subject {
      id,
      subject_id: subject.subject_id,
      user_id: subject.user_id,
      name: subject.name,
      icon: subject.icon,
      color: subject.color,
      created_at,
    })
  }

  async fn find_subject(&self, subject_id: &str, user_id: &str) -> Result<Option<Subject>> {
    let conn = self.lock()?;
    let subject = conn
      .query_row(
        "SELECT id, subject_id, user_id, name, icon, color, created_at
         FROM subjects WHERE subject_id = ?1 AND user_id = ?2",
        params![subject_id, user_id],
        subject_from_row,
      )
      .optional()?;
    Ok(subject)
  }

  async fn list_subjects(&self, user_id: &str) -> Result<Vec<Subject>> {
    let conn = self.lock()?;
    let mut stmt = conn.prepare(
      "SELECT id, subject_id, user_id, name, icon, color, created_at
       FROM subjects WHERE user_id = ?1 ORDER BY created_at DESC",
    )?;
    let rows = stmt.query_map(params![user_id], subject_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
  }

  async fn insert_note(&self, note: NewNoteFile) -> Result<NoteFile> {
    if note.extracted_text.is_empty() {
      bail!("extracted text must not be empty");
    }
    let conn = self.lock()?;
    let id = Uuid::new_v4().to_string();
    conn.execute(
      "INSERT INTO note_files (id, subject_id, user_id, file_name, extracted_text, uploaded_at)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      params![
        id,
        note.subject_id,
        note.user_id,
        note.file_name,
        note.extracted_text,
        note.uploaded_at
      ],
    )?;
    Ok(NoteFile {
      id,
      subject_id: note.subject_id,
      user_id: note.user_id,
      file_name: note.file_name,
      extracted_text: note.extracted_text,
      uploaded_at: note.uploaded_at,
    })
  }

  async fn notes_for(
    &self,
    subject_id: &str,
    user_id: &str,
    file_name: Option<&str>,
  ) -> Result<Vec<NoteFile>> {
    let conn = self.lock()?;
    // Oldest first: aggregation favors chronological narrative continuity.
    let rows = match file_name {
      Some(name) => {
        let mut stmt = conn.prepare(
          "SELECT id, subject_id, user_id, file_name, extracted_text, uploaded_at
           FROM note_files
           WHERE subject_id = ?1 AND user_id = ?2 AND file_name = ?3
           ORDER BY uploaded_at ASC, rowid ASC",
        )?;
        let mapped = stmt.query_map(params![subject_id, user_id, name], note_from_row)?;
        mapped.collect::<rusqlite::Result<Vec<_>>>()?
      }
      None => {
        let mut stmt = conn.prepare(
          "SELECT id, subject_id, user_id, file_name, extracted_text, uploaded_at
           FROM note_files
           WHERE subject_id = ?1 AND user_id = ?2
           ORDER BY uploaded_at ASC, rowid ASC",
        )?;
        let mapped = stmt.query_map(params![subject_id, user_id], note_from_row)?;
        mapped.collect::<rusqlite::Result<Vec<_>>>()?
      }
    };
    Ok(rows)
  }

  async fn remove_note(&self, subject_id: &str, user_id: &str, file_name: &str) -> Result<bool> {
    let conn = self.lock()?;
    let removed = conn.execute(
      "DELETE FROM note_files WHERE subject_id = ?1 AND user_id = ?2 AND file_name = ?3",
      params![subject_id, user_id, file_name],
    )?;
    Ok(removed > 0)
  }

  async fn record_exchange(&self, exchange: NewChatExchange) -> Result<()> {
    let conn = self.lock()?;
    let id = Uuid::new_v4().to_string();
    conn.execute(
      "INSERT INTO chat_history (id, subject_id, question, response, created_at)
       VALUES (?1, ?2, ?3, ?4, ?5)",
      params![
        id,
        exchange.subject_id,
        exchange.question,
        exchange.response.to_string(),
        Utc::now()
      ],
    )?;
    Ok(())
  }

  async fn counts(&self) -> Result<StoreCounts> {
    let conn = self.lock()?;
    let subjects: i64 = conn.query_row("SELECT COUNT(*) FROM subjects", [], |row| row.get(0))?;
    let files: i64 = conn.query_row("SELECT COUNT(*) FROM note_files", [], |row| row.get(0))?;
    Ok(StoreCounts { subjects: subjects as u64, files: files as u64 })
  }
}
