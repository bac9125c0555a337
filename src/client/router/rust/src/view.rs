/* src/client/router/rust/src/view.rs */

// Markup the router itself renders into the content container.

pub const LOADING_VIEW: &str = r#"<div class="loading-spinner"><div class="spinner"></div><p>Loading...</p></div>"#;

/// Error view with the message and a reload action.
pub fn error_view(message: &str) -> String {
  format!(
    r#"<div class="error-message"><div class="container"><h2>Loading Error</h2><p>{}</p><button class="btn btn-primary" onclick="location.reload()">Reload</button></div></div>"#,
    escape_html(message)
  )
}

pub fn escape_html(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for ch in text.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(ch),
    }
  }
  out
}
