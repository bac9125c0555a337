/* src/client/router/rust/src/options.rs */

use std::time::Duration;

use serde::Deserialize;

use crate::transition::{DEFAULT_ENTER_DURATION, DEFAULT_EXIT_DELAY, TransitionTiming};

/// Router settings a host can pass as JSON. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterOptions {
  #[serde(default = "default_home")]
  pub home: String,
  #[serde(default = "default_exit_delay_ms")]
  pub exit_delay_ms: u64,
  #[serde(default = "default_enter_duration_ms")]
  pub enter_duration_ms: u64,
  #[serde(default = "default_show_loading")]
  pub show_loading: bool,
}

fn default_home() -> String {
  "home".to_string()
}

fn default_exit_delay_ms() -> u64 {
  DEFAULT_EXIT_DELAY.as_millis() as u64
}

fn default_enter_duration_ms() -> u64 {
  DEFAULT_ENTER_DURATION.as_millis() as u64
}

fn default_show_loading() -> bool {
  true
}

impl Default for RouterOptions {
  fn default() -> Self {
    Self {
      home: default_home(),
      exit_delay_ms: default_exit_delay_ms(),
      enter_duration_ms: default_enter_duration_ms(),
      show_loading: default_show_loading(),
    }
  }
}

impl RouterOptions {
  /// Parses options; an empty or whitespace-only string yields the defaults.
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    if json.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_json::from_str(json)
  }

  pub fn timing(&self) -> TransitionTiming {
    TransitionTiming {
      exit_delay: Duration::from_millis(self.exit_delay_ms),
      enter_duration: Duration::from_millis(self.enter_duration_ms),
    }
  }
}
