//! Subject and note-file management handlers

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::HeaderMap;
use axum::response::Json as ResponseJson;
use chrono::Utc;

use crate::server::error::ApiFailure;
use crate::server::handlers::owner_id;
use crate::server::services::store::{NewNoteFile, NewSubject, Subject};
use crate::server::types::{
  CreateSubjectRequest, FileListResponse, FileSummary, RemoveFileRequest, RemoveFileResponse,
  SubjectListResponse, UploadRequest, UploadResponse,
};
use crate::server::AppState;

/// POST /api/subjects - Create a subject for the calling user.
pub async fn create_subject(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<CreateSubjectRequest>,
) -> Result<ResponseJson<Subject>, ApiFailure> {
  let user_id = owner_id(&headers);

  match state.store.find_subject(&body.subject_id, &user_id).await {
    Ok(Some(_)) => {
      return Err(ApiFailure::conflict(format!("Subject '{}' already exists.", body.subject_id)));
    }
    Ok(None) => {}
    Err(error) => return Err(ApiFailure::server_error(error.to_string())),
  }

  let new_subject = NewSubject {
    subject_id: body.subject_id,
    user_id,
    name: body.name,
    icon: body.icon.unwrap_or_else(|| "📘".to_string()),
    color: body.color.unwrap_or_else(|| "s0".to_string()),
  };

  match state.store.create_subject(new_subject).await {
    Ok(subject) => Ok(ResponseJson(subject)),
    Err(error) => {
      tracing::error!("Subject creation failed: {error}");
      Err(ApiFailure::server_error(error.to_string()))
    }
  }
}

/// GET /api/subjects - List the calling user's subjects.
pub async fn list_subjects(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<ResponseJson<SubjectListResponse>, ApiFailure> {
  let user_id = owner_id(&headers);

  match state.store.list_subjects(&user_id).await {
    Ok(subjects) => Ok(ResponseJson(SubjectListResponse { subjects })),
    Err(error) => Err(ApiFailure::server_error(error.to_string())),
  }
}

/// POST /api/upload - Store one file's already-extracted text.
pub async fn upload(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<UploadRequest>,
) -> Result<ResponseJson<UploadResponse>, ApiFailure> {
  let user_id = owner_id(&headers);

  if body.extracted_text.is_empty() {
    return Err(ApiFailure::bad_request("Extracted text must not be empty."));
  }

  let note = NewNoteFile {
    subject_id: body.subject_id,
    user_id,
    file_name: body.file_name,
    extracted_text: body.extracted_text,
    uploaded_at: Utc::now(),
  };

  match state.store.insert_note(note).await {
    Ok(stored) => Ok(ResponseJson(UploadResponse {
      subject_id: stored.subject_id,
      file_name: stored.file_name,
      uploaded_at: stored.uploaded_at,
    })),
    Err(error) => {
      tracing::error!("Note upload failed: {error}");
      Err(ApiFailure::server_error(error.to_string()))
    }
  }
}

/// GET /api/subjects/{subjectId}/files - List a subject's files, oldest
/// upload first, without the text bodies.
pub async fn list_files(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(subject_id): Path<String>,
) -> Result<ResponseJson<FileListResponse>, ApiFailure> {
  let user_id = owner_id(&headers);

  match state.store.notes_for(&subject_id, &user_id, None).await {
    Ok(notes) => {
      let files = notes
        .into_iter()
        .map(|note| FileSummary { file_name: note.file_name, uploaded_at: note.uploaded_at })
        .collect();
      Ok(ResponseJson(FileListResponse { files }))
    }
    Err(error) => Err(ApiFailure::server_error(error.to_string())),
  }
}

/// DELETE /api/files - Remove one uploaded file by name.
pub async fn remove_file(
  State(state): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(body): Json<RemoveFileRequest>,
) -> Result<ResponseJson<RemoveFileResponse>, ApiFailure> {
  let user_id = owner_id(&headers);

  match state.store.remove_note(&body.subject_id, &user_id, &body.file_name).await {
    Ok(removed) => Ok(ResponseJson(RemoveFileResponse { removed })),
    Err(error) => {
      tracing::error!("Note removal failed: {error}");
      Err(ApiFailure::server_error(error.to_string()))
    }
  }
}
