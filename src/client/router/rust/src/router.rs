/* src/client/router/rust/src/router.rs */

use std::cell::{Cell, Ref, RefCell};

use crate::errors::RouterError;
use crate::history::{HistoryAdapter, HistoryEntry};
use crate::location::{PageSource, canonical_path, page_from_location, requested_page};
use crate::options::RouterOptions;
use crate::route::{PageHandler, PageInitializer, RouteTable};
use crate::surface::{ContentSurface, Timer};
use crate::transition::{self, Swap, TransitionTiming};
use crate::view::{LOADING_VIEW, error_view};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Idle,
  Loading,
  Rendering,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
  /// Page of the last navigation that completed successfully.
  pub current_page: Option<String>,
  /// Page of the navigation that currently owns the content container.
  pub pending_page: Option<String>,
  /// `Error` while the error view is on screen, until the next navigation begins.
  pub phase: Phase,
  /// Failure shown by the error view, if any.
  pub last_error: Option<RouterError>,
}

impl Default for NavigationState {
  fn default() -> Self {
    Self { current_page: None, pending_page: None, phase: Phase::Idle, last_error: None }
  }
}

impl NavigationState {
  /// `page` is on screen and nothing else is loading or failed over it.
  fn is_showing(&self, page: &str) -> bool {
    self.current_page.as_deref() == Some(page)
      && self.pending_page.is_none()
      && self.phase != Phase::Error
  }
}

/// How a navigation request settled. Failures are already rendered as the
/// error view by the time this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
  Completed,
  /// The page is already displayed; nothing happened.
  AlreadyCurrent,
  /// A navigation to the same page is in flight; nothing happened.
  AlreadyPending,
  /// A newer navigation started before this one finished; its result was discarded.
  Superseded,
  Failed(RouterError),
}

impl NavigationOutcome {
  pub fn is_completed(&self) -> bool {
    matches!(self, Self::Completed)
  }
}

/// Collects routes and settings before the router starts.
/// Building consumes it, so the route table cannot change afterwards.
pub struct RouterBuilder {
  routes: RouteTable,
  home: String,
  timing: TransitionTiming,
  show_loading: bool,
}

impl RouterBuilder {
  pub fn new() -> Self {
    Self::with_options(&RouterOptions::default())
  }

  pub fn with_options(options: &RouterOptions) -> Self {
    Self {
      routes: RouteTable::new(),
      home: options.home.clone(),
      timing: options.timing(),
      show_loading: options.show_loading,
    }
  }

  pub fn home(mut self, page: impl Into<String>) -> Self {
    self.home = page.into();
    self
  }

  pub fn timing(mut self, timing: TransitionTiming) -> Self {
    self.timing = timing;
    self
  }

  pub fn show_loading(mut self, show: bool) -> Self {
    self.show_loading = show;
    self
  }

  pub fn route(mut self, name: impl Into<String>, handler: PageHandler) -> Self {
    self.add_route(name, handler);
    self
  }

  pub fn initializer(mut self, name: &str, initializer: PageInitializer) -> Self {
    if let Err(err) = self.set_initializer(name, initializer) {
      tracing::warn!(page = %name, "initializer ignored: {err}");
    }
    self
  }

  pub fn add_route(&mut self, name: impl Into<String>, handler: PageHandler) {
    self.routes.add_route(name, handler);
  }

  pub fn set_initializer(
    &mut self,
    name: &str,
    initializer: PageInitializer,
  ) -> Result<(), RouterError> {
    self.routes.set_initializer(name, initializer)
  }

  pub fn build(
    self,
    history: impl HistoryAdapter + 'static,
    surface: impl ContentSurface + 'static,
    timer: impl Timer + 'static,
  ) -> Router {
    tracing::debug!(routes = ?self.routes.names(), home = %self.home, "router built");
    Router {
      routes: self.routes,
      home: self.home,
      timing: self.timing,
      show_loading: self.show_loading,
      history: Box::new(history),
      surface: Box::new(surface),
      timer: Box::new(timer),
      state: RefCell::new(NavigationState::default()),
      generation: Cell::new(0),
    }
  }
}

impl Default for RouterBuilder {
  fn default() -> Self {
    Self::new()
  }
}

enum Loaded {
  Ready,
  Superseded,
}

/// Single-page navigation controller.
///
/// Every navigation takes a new generation number. A navigation that finds a
/// newer generation after any await point stops touching the surface and
/// leaves `current_page`, navigation highlight and history alone.
pub struct Router {
  routes: RouteTable,
  home: String,
  timing: TransitionTiming,
  show_loading: bool,
  history: Box<dyn HistoryAdapter>,
  surface: Box<dyn ContentSurface>,
  timer: Box<dyn Timer>,
  state: RefCell<NavigationState>,
  generation: Cell<u64>,
}

impl Router {
  pub fn builder() -> RouterBuilder {
    RouterBuilder::new()
  }

  pub fn home(&self) -> &str {
    &self.home
  }

  pub fn routes(&self) -> &RouteTable {
    &self.routes
  }

  pub fn state(&self) -> Ref<'_, NavigationState> {
    self.state.borrow()
  }

  pub fn current_page(&self) -> Option<String> {
    self.state.borrow().current_page.clone()
  }

  pub fn phase(&self) -> Phase {
    self.state.borrow().phase
  }

  pub fn last_error(&self) -> Option<RouterError> {
    self.state.borrow().last_error.clone()
  }

  /// Loads the page named by the current URL, or home if that page is not
  /// registered. A legacy `?/<path>` URL is rewritten in place to its canonical form.
  pub async fn start(&self) -> NavigationOutcome {
    let requested = requested_page(&self.history.location(), &self.home);
    let page = if self.routes.contains(&requested.page) {
      requested.page
    } else {
      tracing::warn!(page = %requested.page, "unknown initial page, falling back to {}", self.home);
      self.home.clone()
    };
    if requested.source == PageSource::LegacyRedirect {
      self.history.replace(&HistoryEntry::new(&page), &canonical_path(&page, &self.home));
    }
    tracing::info!(page = %page, "router starting");
    self.load_page(&page, true).await
  }

  /// Navigates to `page`. With `add_to_history` a history entry is pushed once
  /// the page has rendered; failed navigations never touch history.
  ///
  /// Returning to the current page while another page is loading, or while the
  /// error view covers it, reloads it without pushing: the URL already names it.
  pub async fn navigate(&self, page: &str, add_to_history: bool) -> NavigationOutcome {
    let push_history = {
      let state = self.state.borrow();
      if state.is_showing(page) {
        tracing::debug!(page, "already on page");
        return NavigationOutcome::AlreadyCurrent;
      }
      if state.pending_page.as_deref() == Some(page) {
        tracing::debug!(page, "navigation to page already in flight");
        return NavigationOutcome::AlreadyPending;
      }
      add_to_history && state.current_page.as_deref() != Some(page)
    };
    tracing::debug!(page, add_to_history, "navigate");
    self.run(page, true, push_history).await
  }

  /// Loads `page` unconditionally without touching history.
  pub async fn load_page(&self, page: &str, update_nav: bool) -> NavigationOutcome {
    self.run(page, update_nav, false).await
  }

  /// Back/forward: reloads the page carried by the popped state, or the page
  /// named by the URL when the entry has no state.
  pub async fn handle_pop_state(&self, entry: Option<HistoryEntry>) -> NavigationOutcome {
    let page = match entry {
      Some(entry) => entry.page,
      None => page_from_location(&self.history.location(), &self.home),
    };
    tracing::debug!(page = %page, "history pop");
    self.load_page(&page, true).await
  }

  async fn run(&self, page: &str, update_nav: bool, push_history: bool) -> NavigationOutcome {
    let generation = self.begin(page);

    match self.load_and_render(page, generation).await {
      Ok(Loaded::Ready) => {}
      Ok(Loaded::Superseded) => {
        tracing::debug!(page, "navigation superseded");
        return NavigationOutcome::Superseded;
      }
      Err(err) => return self.fail(generation, err),
    }

    {
      let mut state = self.state.borrow_mut();
      state.current_page = Some(page.to_string());
      state.pending_page = None;
      state.phase = Phase::Idle;
      state.last_error = None;
    }
    if update_nav {
      self.surface.mark_active(page);
    }
    if push_history {
      let url = canonical_path(page, &self.home);
      self.history.push(&HistoryEntry::new(page), &url);
      tracing::debug!(page, url = %url, "history updated");
    }
    tracing::info!(page, "page loaded");
    NavigationOutcome::Completed
  }

  fn begin(&self, page: &str) -> u64 {
    let generation = self.generation.get() + 1;
    self.generation.set(generation);
    {
      let mut state = self.state.borrow_mut();
      state.pending_page = Some(page.to_string());
      state.phase = Phase::Loading;
      state.last_error = None;
    }
    if self.show_loading {
      transition::reset_classes(self.surface.as_ref());
      self.surface.replace_content(LOADING_VIEW);
    }
    generation
  }

  fn is_stale(&self, generation: u64) -> bool {
    self.generation.get() != generation
  }

  async fn load_and_render(&self, page: &str, generation: u64) -> Result<Loaded, RouterError> {
    let handler = self.routes.resolve(page)?.clone();
    let content = handler().await.map_err(|err| RouterError::content_load(page, &err))?;
    if self.is_stale(generation) {
      return Ok(Loaded::Superseded);
    }
    tracing::debug!(page, len = content.len(), "content loaded");

    self.state.borrow_mut().phase = Phase::Rendering;
    let swap = transition::swap_content(
      self.surface.as_ref(),
      self.timer.as_ref(),
      self.timing,
      &content,
      || self.is_stale(generation),
    )
    .await;
    if swap == Swap::Abandoned {
      return Ok(Loaded::Superseded);
    }

    if let Some(initializer) = self.routes.initializer(page).cloned() {
      initializer().await.map_err(|err| RouterError::initializer(page, &err))?;
      if self.is_stale(generation) {
        return Ok(Loaded::Superseded);
      }
    }
    Ok(Loaded::Ready)
  }

  fn fail(&self, generation: u64, err: RouterError) -> NavigationOutcome {
    if self.is_stale(generation) {
      tracing::debug!("dropping failure of superseded navigation: {err}");
      return NavigationOutcome::Superseded;
    }
    tracing::warn!("error loading page: {err}");
    transition::reset_classes(self.surface.as_ref());
    self.surface.replace_content(&error_view(&err.to_string()));
    {
      let mut state = self.state.borrow_mut();
      state.pending_page = None;
      state.phase = Phase::Error;
      state.last_error = Some(err.clone());
    }
    NavigationOutcome::Failed(err)
  }
}
