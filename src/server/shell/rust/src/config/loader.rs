/* src/server/shell/rust/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::TerraConfig;

const CONFIG_FILE: &str = "terra.toml";

/// Nearest `name` file in `start` or one of its ancestors.
fn find_upward(start: &Path, name: &str) -> Option<PathBuf> {
  start.ancestors().map(|dir| dir.join(name)).find(|candidate| candidate.is_file())
}

/// Locates `terra.toml` for a site, looking in `start` first and then in each parent.
pub fn find_terra_config(start: &Path) -> Result<PathBuf> {
  let start = start
    .canonicalize()
    .with_context(|| format!("cannot resolve site directory {}", start.display()))?;
  find_upward(&start, CONFIG_FILE)
    .with_context(|| format!("no {CONFIG_FILE} in {} or any parent directory", start.display()))
}

/// Parses and validates a config file. A relative `site.root` is resolved
/// against the directory containing the file.
pub fn load_terra_config(path: &Path) -> Result<TerraConfig> {
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut config: TerraConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  if let Some(dir) = path.parent()
    && config.site.root.is_relative()
  {
    config.site.root = dir.join(&config.site.root);
  }
  config.validate().with_context(|| format!("invalid {}", path.display()))?;
  Ok(config)
}

/// Explicit path, else `terra.toml` found upward from `cwd`, else built-in defaults.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<TerraConfig> {
  if let Some(path) = explicit {
    return load_terra_config(path);
  }
  match find_terra_config(cwd) {
    Ok(path) => {
      tracing::info!(path = %path.display(), "using config");
      load_terra_config(&path)
    }
    Err(_) => {
      tracing::info!("no {CONFIG_FILE} found, using defaults");
      let config = TerraConfig::default();
      config.validate()?;
      Ok(config)
    }
  }
}
