/* src/server/shell/rust/src/error.rs */

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
  #[error("shell document {} unavailable: {source}", path.display())]
  ShellUnavailable {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl IntoResponse for ServerError {
  fn into_response(self) -> Response {
    tracing::warn!("{self}");
    let body = serde_json::json!({ "error": self.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
  }
}
