/* src/server/shell/rust/src/server.rs */

// Shell server: every page route returns the same document so the client
// router can take over; anything else is a static file under the site root.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{SiteSection, TerraConfig};
use crate::error::ServerError;

struct ShellState {
  shell_path: PathBuf,
}

/// Read per request so edits to the shell show up without a restart.
async fn handle_shell(State(state): State<Arc<ShellState>>) -> Result<Html<String>, ServerError> {
  let html = tokio::fs::read_to_string(&state.shell_path)
    .await
    .map_err(|source| ServerError::ShellUnavailable { path: state.shell_path.clone(), source })?;
  Ok(Html(html))
}

async fn handle_health() -> impl IntoResponse {
  axum::Json(serde_json::json!({
    "status": "healthy",
    "timestamp": chrono::Utc::now().to_rfc3339(),
  }))
}

pub fn build_router(site: &SiteSection) -> Router {
  let state = Arc::new(ShellState { shell_path: site.shell_path() });

  let mut router = Router::new().route("/api/health", get(handle_health));
  for route in site.shell_routes() {
    router = router.route(&route, get(handle_shell));
  }

  router
    .with_state(state)
    .fallback_service(ServeDir::new(&site.root))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

pub async fn serve(config: &TerraConfig) -> anyhow::Result<()> {
  let router = build_router(&config.site);
  let addr = config.bind_addr();
  let listener = TcpListener::bind(&addr).await?;
  tracing::info!(
    addr = %addr,
    root = %config.site.root.display(),
    pages = ?config.site.pages,
    "terra server listening"
  );
  axum::serve(listener, router).await?;
  Ok(())
}
