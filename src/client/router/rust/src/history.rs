/* src/client/router/rust/src/history.rs */

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// State object stored with each session history entry: `{"page": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub page: String,
}

impl HistoryEntry {
  pub fn new(page: impl Into<String>) -> Self {
    Self { page: page.into() }
  }

  pub fn to_json(&self) -> String {
    serde_json::json!({ "page": self.page }).to_string()
  }

  /// Parses a popped state. Anything that is not `{"page": string}` yields `None`.
  pub fn from_json(json: &str) -> Option<Self> {
    serde_json::from_str(json).ok()
  }
}

/// Bridge between the router and the session history stack / address bar.
pub trait HistoryAdapter {
  /// Adds an entry and shows `url` in the address bar.
  fn push(&self, entry: &HistoryEntry, url: &str);
  /// Rewrites the current entry without growing the stack.
  fn replace(&self, entry: &HistoryEntry, url: &str);
  fn location(&self) -> Location;
}

struct Slot {
  entry: Option<HistoryEntry>,
  url: String,
}

struct MemoryStack {
  slots: Vec<Slot>,
  index: usize,
}

/// In-memory session history with back/forward support.
///
/// Clones share the same stack, so a host can keep one handle for driving
/// back/forward while the router owns another.
#[derive(Clone)]
pub struct MemoryHistory {
  inner: Rc<RefCell<MemoryStack>>,
}

impl MemoryHistory {
  /// Starts with a single entry for `initial_url` that carries no state,
  /// like a freshly loaded document.
  pub fn new(initial_url: &str) -> Self {
    let slot = Slot { entry: None, url: initial_url.to_string() };
    Self { inner: Rc::new(RefCell::new(MemoryStack { slots: vec![slot], index: 0 })) }
  }

  pub fn len(&self) -> usize {
    self.inner.borrow().slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn current_url(&self) -> String {
    let stack = self.inner.borrow();
    stack.slots[stack.index].url.clone()
  }

  pub fn current_entry(&self) -> Option<HistoryEntry> {
    let stack = self.inner.borrow();
    stack.slots[stack.index].entry.clone()
  }

  /// Moves one entry back. Returns the popped state as a browser would in a
  /// popstate event, or `None` when already at the oldest entry.
  pub fn back(&self) -> Option<Option<HistoryEntry>> {
    let mut stack = self.inner.borrow_mut();
    if stack.index == 0 {
      return None;
    }
    stack.index -= 1;
    Some(stack.slots[stack.index].entry.clone())
  }

  pub fn forward(&self) -> Option<Option<HistoryEntry>> {
    let mut stack = self.inner.borrow_mut();
    if stack.index + 1 >= stack.slots.len() {
      return None;
    }
    stack.index += 1;
    Some(stack.slots[stack.index].entry.clone())
  }
}

impl HistoryAdapter for MemoryHistory {
  fn push(&self, entry: &HistoryEntry, url: &str) {
    let mut stack = self.inner.borrow_mut();
    let keep = stack.index + 1;
    stack.slots.truncate(keep);
    stack.slots.push(Slot { entry: Some(entry.clone()), url: url.to_string() });
    stack.index = keep;
  }

  fn replace(&self, entry: &HistoryEntry, url: &str) {
    let mut stack = self.inner.borrow_mut();
    let index = stack.index;
    stack.slots[index] = Slot { entry: Some(entry.clone()), url: url.to_string() };
  }

  fn location(&self) -> Location {
    Location::parse(&self.current_url())
  }
}
