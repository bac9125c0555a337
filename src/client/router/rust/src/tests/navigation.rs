/* src/client/router/rust/src/tests/navigation.rs */

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::executor::block_on;

use super::support::*;
use crate::errors::RouterError;
use crate::route::page_initializer;
use crate::router::{NavigationOutcome, Phase, Router};

fn site() -> Router {
  Router::builder()
    .route("home", static_page("<h1>Home</h1>"))
    .route("explorer", static_page("<h1>Explorer</h1>"))
    .route("quiz", static_page("<h1>Quiz</h1>"))
    .route("about", static_page("<h1>About</h1>"))
    .build(crate::MemoryHistory::new("/"), RecordingSurface::default(), InstantTimer::default())
}

#[test]
fn navigate_sets_current_page_for_every_route() {
  let router = site();
  for page in ["explorer", "quiz", "about", "home"] {
    assert_eq!(block_on(router.navigate(page, true)), NavigationOutcome::Completed);
    assert_eq!(router.current_page().as_deref(), Some(page));
    assert_eq!(router.phase(), Phase::Idle);
  }
}

#[test]
fn explorer_scenario() {
  let explorer_calls = Rc::new(Cell::new(0));
  let h = harness(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("explorer", counting_page("<h1>Explorer</h1>", explorer_calls.clone())),
    "/",
  );

  let outcome = block_on(h.router.navigate("explorer", true));

  assert!(outcome.is_completed());
  assert_eq!(h.history.current_url(), "/explorer");
  assert_eq!(h.router.current_page().as_deref(), Some("explorer"));
  assert_eq!(explorer_calls.get(), 1);
  assert_eq!(h.surface.content(), "<h1>Explorer</h1>");
  assert_eq!(h.surface.active().as_deref(), Some("explorer"));
}

#[test]
fn navigate_to_current_page_is_noop() {
  let calls = Rc::new(Cell::new(0));
  let seen = Rc::new(RefCell::new(Vec::new()));
  let surface = RecordingSurface::default();
  let h = harness_on(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("quiz", counting_page("<h1>Quiz</h1>", calls.clone()))
      .initializer("quiz", recording_initializer(surface.clone(), seen.clone())),
    "/",
    surface,
  );
  block_on(h.router.navigate("quiz", true));
  let entries = h.history.len();
  let replacements = h.surface.replacements();

  assert_eq!(block_on(h.router.navigate("quiz", true)), NavigationOutcome::AlreadyCurrent);

  assert_eq!(h.history.len(), entries);
  assert_eq!(h.surface.replacements(), replacements);
  assert_eq!(calls.get(), 1);
  assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn without_history_nothing_is_pushed() {
  let h = harness(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("about", static_page("<h1>About</h1>"))
      .route("quiz", failing_page("quiz data unavailable")),
    "/",
  );

  assert!(block_on(h.router.navigate("about", false)).is_completed());
  assert!(matches!(block_on(h.router.navigate("quiz", false)), NavigationOutcome::Failed(_)));
  assert!(matches!(block_on(h.router.navigate("video", false)), NavigationOutcome::Failed(_)));

  assert_eq!(h.history.len(), 1);
  assert_eq!(h.history.current_url(), "/");
}

#[test]
fn missing_route_renders_error_view() {
  let h = harness(Router::builder().route("home", static_page("<h1>Home</h1>")), "/");

  let outcome = block_on(h.router.navigate("missing", true));

  assert_eq!(outcome, NavigationOutcome::Failed(RouterError::RouteNotFound("missing".into())));
  assert!(h.surface.shows_error());
  assert!(h.surface.content().contains("Route not found: missing"));
  assert_eq!(h.router.current_page(), None);
  assert_eq!(h.history.len(), 1);
  assert_eq!(h.router.phase(), Phase::Error);
  assert_eq!(h.router.last_error(), Some(RouterError::RouteNotFound("missing".into())));
  assert_eq!(h.router.state().pending_page, None);
}

#[test]
fn current_page_link_recovers_from_error_view() {
  let h = harness(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("quiz", failing_page("HTTP 503: Service Unavailable")),
    "/",
  );
  block_on(h.router.start());
  assert!(matches!(block_on(h.router.navigate("quiz", true)), NavigationOutcome::Failed(_)));
  assert!(h.surface.shows_error());

  assert_eq!(block_on(h.router.navigate("home", true)), NavigationOutcome::Completed);

  assert_eq!(h.surface.content(), "<h1>Home</h1>");
  assert_eq!(h.router.phase(), Phase::Idle);
  assert_eq!(h.router.last_error(), None);
  assert_eq!(h.history.len(), 1);
  assert_eq!(h.history.current_url(), "/");
  assert_eq!(block_on(h.router.navigate("home", true)), NavigationOutcome::AlreadyCurrent);
}

#[test]
fn failing_handler_is_isolated() {
  let h = harness(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("quiz", failing_page("HTTP 500: Internal Server Error"))
      .route("about", static_page("<h1>About</h1>")),
    "/",
  );
  block_on(h.router.navigate("home", true));

  let outcome = block_on(h.router.navigate("quiz", true));
  let NavigationOutcome::Failed(err) = outcome else {
    panic!("quiz should fail");
  };
  assert!(matches!(err, RouterError::ContentLoadFailure { ref page, .. } if page == "quiz"));
  assert_eq!(h.router.current_page().as_deref(), Some("home"));
  assert_eq!(h.surface.active().as_deref(), Some("home"));
  assert!(h.surface.shows_error());
  assert_eq!(h.history.current_url(), "/");

  assert!(block_on(h.router.navigate("about", true)).is_completed());
  assert_eq!(h.router.current_page().as_deref(), Some("about"));
  assert_eq!(h.surface.content(), "<h1>About</h1>");
  assert_eq!(h.history.current_url(), "/about");
}

#[test]
fn initializer_sees_new_content() {
  let seen = Rc::new(RefCell::new(Vec::new()));
  let surface = RecordingSurface::default();
  let h = harness_on(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("explorer", static_page("<div id=\"map\"></div>"))
      .initializer("explorer", recording_initializer(surface.clone(), seen.clone())),
    "/",
    surface,
  );

  block_on(h.router.navigate("explorer", true));
  block_on(h.router.navigate("home", true));
  block_on(h.router.navigate("explorer", true));

  assert_eq!(*seen.borrow(), vec!["<div id=\"map\"></div>", "<div id=\"map\"></div>"]);
}

#[test]
fn initializer_failure_keeps_previous_state() {
  let h = harness(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("explorer", static_page("<h1>Explorer</h1>"))
      .initializer(
        "explorer",
        page_initializer(|| async { Err::<(), _>(anyhow::anyhow!("map library not loaded")) }),
      ),
    "/",
  );
  block_on(h.router.navigate("home", true));

  let outcome = block_on(h.router.navigate("explorer", true));

  assert_eq!(
    outcome,
    NavigationOutcome::Failed(RouterError::InitializerFailure {
      page: "explorer".into(),
      reason: "map library not loaded".into(),
    })
  );
  assert_eq!(h.router.current_page().as_deref(), Some("home"));
  assert_eq!(h.history.current_url(), "/");
  assert!(h.surface.shows_error());
}

#[test]
fn home_maps_to_root_url() {
  let h = harness(
    Router::builder()
      .route("home", static_page("<h1>Home</h1>"))
      .route("about", static_page("<h1>About</h1>")),
    "/",
  );
  block_on(h.router.navigate("about", true));
  block_on(h.router.navigate("home", true));
  assert_eq!(h.history.current_url(), "/");
  assert_eq!(h.history.len(), 3);
}

#[test]
fn loading_view_precedes_content() {
  let h = harness(Router::builder().route("home", static_page("<h1>Home</h1>")), "/");
  block_on(h.router.navigate("home", true));
  let events = h.surface.events();
  assert_eq!(events.first().map(String::as_str), Some("loading"));
  assert_eq!(h.surface.replacements(), 2);
}

#[test]
fn loading_view_can_be_disabled() {
  let h = harness(
    Router::builder().show_loading(false).route("home", static_page("<h1>Home</h1>")),
    "/",
  );
  block_on(h.router.navigate("home", true));
  assert!(!h.surface.events().contains(&"loading".to_string()));
  assert_eq!(h.surface.replacements(), 1);
}

#[test]
fn custom_home_page() {
  let h = harness(
    Router::builder()
      .home("landing")
      .route("landing", static_page("<h1>Landing</h1>"))
      .route("quiz", static_page("<h1>Quiz</h1>")),
    "/quiz",
  );
  block_on(h.router.start());
  block_on(h.router.navigate("landing", true));
  assert_eq!(h.history.current_url(), "/");
}
