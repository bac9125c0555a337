/* src/server/shell/rust/src/config/types.rs */

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TerraConfig {
  #[serde(default)]
  pub server: ServerSection,
  #[serde(default)]
  pub site: SiteSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { host: default_host(), port: default_port() }
  }
}

fn default_host() -> String {
  "0.0.0.0".to_string()
}

fn default_port() -> u16 {
  3000
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  /// Directory holding the shell document, page fragments and assets.
  #[serde(default = "default_root")]
  pub root: PathBuf,
  /// Shell document served for every page route, relative to `root`.
  #[serde(default = "default_shell")]
  pub shell: PathBuf,
  #[serde(default = "default_home")]
  pub home: String,
  #[serde(default = "default_pages")]
  pub pages: Vec<String>,
}

impl Default for SiteSection {
  fn default() -> Self {
    Self { root: default_root(), shell: default_shell(), home: default_home(), pages: default_pages() }
  }
}

fn default_root() -> PathBuf {
  PathBuf::from(".")
}

fn default_shell() -> PathBuf {
  PathBuf::from("index.html")
}

fn default_home() -> String {
  "home".to_string()
}

fn default_pages() -> Vec<String> {
  ["home", "explorer", "quiz", "about"].into_iter().map(String::from).collect()
}

impl SiteSection {
  pub fn shell_path(&self) -> PathBuf {
    self.root.join(&self.shell)
  }

  /// URL paths that serve the shell: "/" plus "/<page>" for every page.
  pub fn shell_routes(&self) -> Vec<String> {
    let mut routes = vec!["/".to_string()];
    routes.extend(self.pages.iter().map(|page| format!("/{page}")));
    routes
  }

  pub fn validate(&self) -> Result<()> {
    if self.pages.is_empty() {
      bail!("site.pages must not be empty");
    }
    let mut seen = HashSet::new();
    for page in &self.pages {
      if !is_page_segment(page) {
        bail!(
          "site.pages entry \"{page}\" must be a single path segment of letters, digits, '-' or '_'"
        );
      }
      if page == "api" {
        bail!("site.pages entry \"api\" is reserved");
      }
      if !seen.insert(page.as_str()) {
        bail!("duplicate page in site.pages: {page}");
      }
    }
    if !self.pages.contains(&self.home) {
      bail!("site.home \"{}\" is not in site.pages {:?}", self.home, self.pages);
    }
    Ok(())
  }
}

/// Page names become literal route segments, so anything the router would read
/// as a capture (`:name`, `*rest`, `{id}`) or a second segment is refused.
fn is_page_segment(page: &str) -> bool {
  !page.is_empty() && page.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl TerraConfig {
  pub fn validate(&self) -> Result<()> {
    self.site.validate()
  }

  pub fn bind_addr(&self) -> String {
    format!("{}:{}", self.server.host, self.server.port)
  }
}
