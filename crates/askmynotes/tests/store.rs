//! SqliteStore behavior: ordering, invariants, history writes.

mod mocks;

use anyhow::Result;
use chrono::Utc;
use tempfile::TempDir;

use askmynotes::server::services::sqlite::SqliteStore;
use askmynotes::server::services::store::{NewChatExchange, NewNoteFile, NewSubject, NoteStore};
use mocks::timestamp;

fn new_subject(subject_id: &str, name: &str) -> NewSubject {
  NewSubject {
    subject_id: subject_id.to_string(),
    user_id: "local".to_string(),
    name: name.to_string(),
    icon: "📘".to_string(),
    color: "s0".to_string(),
  }
}

fn new_note(subject_id: &str, file_name: &str, text: &str, offset_secs: i64) -> NewNoteFile {
  NewNoteFile {
    subject_id: subject_id.to_string(),
    user_id: "local".to_string(),
    file_name: file_name.to_string(),
    extracted_text: text.to_string(),
    uploaded_at: timestamp(offset_secs),
  }
}

#[tokio::test]
async fn subject_roundtrip_on_disk() -> Result<()> {
  let dir = TempDir::new()?;
  let store = SqliteStore::open(&dir.path().join("notes.db"))?;

  let created = store.create_subject(new_subject("bio", "Biology")).await?;
  assert_eq!(created.subject_id, "bio");
  assert_eq!(created.icon, "📘");

  let found = store.find_subject("bio", "local").await?.expect("subject should exist");
  assert_eq!(found.name, "Biology");
  assert!(store.find_subject("bio", "someone-else").await?.is_none());
  Ok(())
}

#[tokio::test]
async fn duplicate_subject_identifier_per_owner_fails() -> Result<()> {
  let store = SqliteStore::open_in_memory()?;

  store.create_subject(new_subject("bio", "Biology")).await?;
  let duplicate = store.create_subject(new_subject("bio", "Biology again")).await;
  assert!(duplicate.is_err());

  // Same identifier under a different owner is fine.
  let mut other = new_subject("bio", "Someone else's biology");
  other.user_id = "other".to_string();
  store.create_subject(other).await?;
  Ok(())
}

#[tokio::test]
async fn notes_ordered_by_upload_time_not_insertion() -> Result<()> {
  let store = SqliteStore::open_in_memory()?;

  // Inserted b, a, c but timestamped a < b < c.
  store.insert_note(new_note("bio", "b.txt", "second", 1)).await?;
  store.insert_note(new_note("bio", "a.txt", "first", 0)).await?;
  store.insert_note(new_note("bio", "c.txt", "third", 2)).await?;

  let notes = store.notes_for("bio", "local", None).await?;
  let names: Vec<&str> = notes.iter().map(|n| n.file_name.as_str()).collect();
  assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
  Ok(())
}

#[tokio::test]
async fn notes_scoped_to_owner_and_file() -> Result<()> {
  let store = SqliteStore::open_in_memory()?;

  store.insert_note(new_note("bio", "ch1.txt", "cells", 0)).await?;
  store.insert_note(new_note("bio", "ch2.txt", "genetics", 1)).await?;
  let mut foreign = new_note("bio", "ch3.txt", "not yours", 2);
  foreign.user_id = "other".to_string();
  store.insert_note(foreign).await?;

  assert_eq!(store.notes_for("bio", "local", None).await?.len(), 2);

  let scoped = store.notes_for("bio", "local", Some("ch2.txt")).await?;
  assert_eq!(scoped.len(), 1);
  assert_eq!(scoped[0].extracted_text, "genetics");
  Ok(())
}

#[tokio::test]
async fn empty_extracted_text_is_rejected() -> Result<()> {
  let store = SqliteStore::open_in_memory()?;
  let result = store.insert_note(new_note("bio", "empty.txt", "", 0)).await;
  assert!(result.is_err());
  Ok(())
}

#[tokio::test]
async fn remove_note_reports_whether_anything_was_deleted() -> Result<()> {
  let store = SqliteStore::open_in_memory()?;
  store.insert_note(new_note("bio", "ch1.txt", "cells", 0)).await?;

  assert!(store.remove_note("bio", "local", "ch1.txt").await?);
  assert!(!store.remove_note("bio", "local", "ch1.txt").await?);
  assert!(store.notes_for("bio", "local", None).await?.is_empty());
  Ok(())
}

#[tokio::test]
async fn counts_and_history_writes() -> Result<()> {
  let store = SqliteStore::open_in_memory()?;
  store.create_subject(new_subject("bio", "Biology")).await?;
  store.insert_note(new_note("bio", "ch1.txt", "cells", 0)).await?;

  let counts = store.counts().await?;
  assert_eq!(counts.subjects, 1);
  assert_eq!(counts.files, 1);

  store
    .record_exchange(NewChatExchange {
      subject_id: "bio".to_string(),
      question: "What is a cell?".to_string(),
      response: serde_json::json!({"answer": "the unit of life"}),
    })
    .await?;
  Ok(())
}

#[tokio::test]
async fn upload_timestamps_roundtrip() -> Result<()> {
  let store = SqliteStore::open_in_memory()?;
  let before = Utc::now();
  store.insert_note(new_note("bio", "ch1.txt", "cells", 0)).await?;

  let notes = store.notes_for("bio", "local", None).await?;
  assert_eq!(notes[0].uploaded_at, timestamp(0));
  assert!(notes[0].uploaded_at < before);
  Ok(())
}
