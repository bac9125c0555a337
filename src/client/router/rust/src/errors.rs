/* src/client/router/rust/src/errors.rs */

/// Everything that can go wrong while loading a page.
///
/// All variants are caught at the page loader boundary and rendered as the
/// error view; none of them escapes `navigate`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
  #[error("Route not found: {0}")]
  RouteNotFound(String),

  #[error("Failed to load page '{page}': {reason}")]
  ContentLoadFailure { page: String, reason: String },

  #[error("Failed to initialize page '{page}': {reason}")]
  InitializerFailure { page: String, reason: String },

  #[error("Readiness signal was dropped before a value was produced")]
  NotReady,
}

impl RouterError {
  pub fn content_load(page: &str, err: &anyhow::Error) -> Self {
    Self::ContentLoadFailure { page: page.to_string(), reason: format!("{err:#}") }
  }

  pub fn initializer(page: &str, err: &anyhow::Error) -> Self {
    Self::InitializerFailure { page: page.to_string(), reason: format!("{err:#}") }
  }

  /// Page the error belongs to, if any.
  pub fn page(&self) -> Option<&str> {
    match self {
      Self::RouteNotFound(page)
      | Self::ContentLoadFailure { page, .. }
      | Self::InitializerFailure { page, .. } => Some(page),
      Self::NotReady => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_route_not_found() {
    let err = RouterError::RouteNotFound("missing".into());
    assert_eq!(err.to_string(), "Route not found: missing");
  }

  #[test]
  fn content_load_keeps_context_chain() {
    let source = anyhow::anyhow!("HTTP 404: Not Found").context("fetching pages/quiz.html");
    let err = RouterError::content_load("quiz", &source);
    assert_eq!(
      err.to_string(),
      "Failed to load page 'quiz': fetching pages/quiz.html: HTTP 404: Not Found"
    );
    assert_eq!(err.page(), Some("quiz"));
  }

  #[test]
  fn initializer_failure_names_page() {
    let err = RouterError::initializer("explorer", &anyhow::anyhow!("map container missing"));
    assert_eq!(err.page(), Some("explorer"));
    assert!(err.to_string().contains("map container missing"));
  }

  #[test]
  fn not_ready_has_no_page() {
    assert_eq!(RouterError::NotReady.page(), None);
  }
}
