/* src/client/router/wasm/src/browser.rs */

use std::time::Duration;

use js_sys::Promise;
use terra_router::{HistoryAdapter, HistoryEntry, LocalBoxFuture, Location, Timer};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Window;

use crate::js::js_message;

/// Session history of the page's window.
pub(crate) struct BrowserHistory {
  window: Window,
}

impl BrowserHistory {
  pub(crate) fn new(window: Window) -> Self {
    Self { window }
  }

  fn write(&self, entry: &HistoryEntry, url: &str, replace: bool) {
    let history = match self.window.history() {
      Ok(history) => history,
      Err(err) => {
        tracing::warn!("history unavailable: {}", js_message(&err));
        return;
      }
    };
    let state = entry_to_state(entry);
    let result = if replace {
      history.replace_state_with_url(&state, "", Some(url))
    } else {
      history.push_state_with_url(&state, "", Some(url))
    };
    if let Err(err) = result {
      tracing::warn!(url, "history update rejected: {}", js_message(&err));
    }
  }
}

impl HistoryAdapter for BrowserHistory {
  fn push(&self, entry: &HistoryEntry, url: &str) {
    self.write(entry, url, false);
  }

  fn replace(&self, entry: &HistoryEntry, url: &str) {
    self.write(entry, url, true);
  }

  fn location(&self) -> Location {
    let location = self.window.location();
    Location::new(location.pathname().unwrap_or_default(), location.search().unwrap_or_default())
  }
}

pub(crate) fn entry_to_state(entry: &HistoryEntry) -> JsValue {
  js_sys::JSON::parse(&entry.to_json()).unwrap_or(JsValue::NULL)
}

/// Reads a popstate `event.state`; foreign or missing state yields `None`.
pub(crate) fn entry_from_state(state: &JsValue) -> Option<HistoryEntry> {
  if state.is_null() || state.is_undefined() {
    return None;
  }
  let json = js_sys::JSON::stringify(state).ok().map(String::from)?;
  HistoryEntry::from_json(&json)
}

/// `setTimeout`-backed timer.
pub(crate) struct BrowserTimer {
  window: Window,
}

impl BrowserTimer {
  pub(crate) fn new(window: Window) -> Self {
    Self { window }
  }
}

impl Timer for BrowserTimer {
  fn sleep(&self, duration: Duration) -> LocalBoxFuture<()> {
    let window = self.window.clone();
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    Box::pin(async move {
      let promise = Promise::new(&mut |resolve, _reject| {
        if window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis).is_err() {
          let _ = resolve.call0(&JsValue::NULL);
        }
      });
      let _ = JsFuture::from(promise).await;
    })
  }
}
