/* src/client/router/rust/src/tests/support.rs */

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;

use crate::history::MemoryHistory;
use crate::route::{LocalBoxFuture, PageHandler, PageInitializer, page_handler, page_initializer};
use crate::router::{Router, RouterBuilder};
use crate::surface::{ContentSurface, Timer};
use crate::view::LOADING_VIEW;

#[derive(Default)]
struct SurfaceLog {
  content: String,
  classes: BTreeSet<String>,
  events: Vec<String>,
  replacements: usize,
  active: Option<String>,
}

/// Surface that records every call instead of touching a DOM.
#[derive(Clone, Default)]
pub struct RecordingSurface {
  log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
  pub fn content(&self) -> String {
    self.log.borrow().content.clone()
  }

  pub fn classes(&self) -> Vec<String> {
    self.log.borrow().classes.iter().cloned().collect()
  }

  pub fn events(&self) -> Vec<String> {
    self.log.borrow().events.clone()
  }

  pub fn replacements(&self) -> usize {
    self.log.borrow().replacements
  }

  pub fn active(&self) -> Option<String> {
    self.log.borrow().active.clone()
  }

  pub fn shows_error(&self) -> bool {
    self.content().contains("error-message")
  }
}

impl ContentSurface for RecordingSurface {
  fn replace_content(&self, html: &str) {
    let mut log = self.log.borrow_mut();
    log.content = html.to_string();
    log.replacements += 1;
    let event = if html == LOADING_VIEW { "loading".to_string() } else { format!("replace {html}") };
    log.events.push(event);
  }

  fn add_class(&self, class: &str) {
    let mut log = self.log.borrow_mut();
    log.classes.insert(class.to_string());
    log.events.push(format!("+{class}"));
  }

  fn remove_class(&self, class: &str) {
    let mut log = self.log.borrow_mut();
    if log.classes.remove(class) {
      log.events.push(format!("-{class}"));
    }
  }

  fn flush_layout(&self) {
    self.log.borrow_mut().events.push("flush".to_string());
  }

  fn mark_active(&self, page: &str) {
    self.log.borrow_mut().active = Some(page.to_string());
  }
}

/// Timer that completes immediately and remembers the requested durations.
#[derive(Clone, Default)]
pub struct InstantTimer {
  sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl InstantTimer {
  pub fn sleeps(&self) -> Vec<Duration> {
    self.sleeps.borrow().clone()
  }
}

impl Timer for InstantTimer {
  fn sleep(&self, duration: Duration) -> LocalBoxFuture<()> {
    self.sleeps.borrow_mut().push(duration);
    Box::pin(async {})
  }
}

pub struct Harness {
  pub router: Router,
  pub history: MemoryHistory,
  pub surface: RecordingSurface,
  pub timer: InstantTimer,
}

pub fn harness(builder: RouterBuilder, url: &str) -> Harness {
  harness_on(builder, url, RecordingSurface::default())
}

/// Like `harness`, for tests that hand the surface to initializers before building.
pub fn harness_on(builder: RouterBuilder, url: &str, surface: RecordingSurface) -> Harness {
  let history = MemoryHistory::new(url);
  let timer = InstantTimer::default();
  let router = builder.build(history.clone(), surface.clone(), timer.clone());
  Harness { router, history, surface, timer }
}

pub fn static_page(html: &'static str) -> PageHandler {
  page_handler(move || async move { anyhow::Ok(html.to_string()) })
}

pub fn counting_page(html: &'static str, calls: Rc<Cell<usize>>) -> PageHandler {
  page_handler(move || {
    calls.set(calls.get() + 1);
    async move { anyhow::Ok(html.to_string()) }
  })
}

pub fn failing_page(reason: &'static str) -> PageHandler {
  page_handler(move || async move { Err::<String, _>(anyhow::anyhow!(reason)) })
}

/// Page whose first load waits until the returned sender fires (or is dropped).
pub fn gated_page(html: &'static str) -> (PageHandler, oneshot::Sender<()>) {
  let (tx, rx) = oneshot::channel::<()>();
  let gate = Rc::new(RefCell::new(Some(rx)));
  let handler = page_handler(move || {
    let pending = gate.borrow_mut().take();
    async move {
      if let Some(rx) = pending {
        let _ = rx.await;
      }
      anyhow::Ok(html.to_string())
    }
  });
  (handler, tx)
}

/// Initializer that counts its calls and records the surface content it saw.
pub fn recording_initializer(
  surface: RecordingSurface,
  seen: Rc<RefCell<Vec<String>>>,
) -> PageInitializer {
  page_initializer(move || {
    seen.borrow_mut().push(surface.content());
    async { anyhow::Ok(()) }
  })
}
