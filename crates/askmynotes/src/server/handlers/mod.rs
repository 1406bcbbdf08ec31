pub mod chat;
pub mod status;
pub mod study;
pub mod subjects;

use axum::http::HeaderMap;

/// Owner identity for the request. Authentication is an upstream
/// collaborator; the resolved user id arrives in the `x-user-id` header
/// and defaults to "local" for single-user deployments.
pub(crate) fn owner_id(headers: &HeaderMap) -> String {
  headers
    .get("x-user-id")
    .and_then(|value| value.to_str().ok())
    .filter(|value| !value.is_empty())
    .unwrap_or("local")
    .to_string()
}
