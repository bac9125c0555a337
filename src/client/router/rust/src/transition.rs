/* src/client/router/rust/src/transition.rs */

use std::time::Duration;

use crate::surface::{ContentSurface, Timer};

pub const EXIT_CLASS: &str = "page-exit";
pub const ENTER_CLASS: &str = "page-enter";
pub const ENTER_ACTIVE_CLASS: &str = "page-enter-active";

/// Time the outgoing content keeps its exit class before being replaced.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(300);
/// Time the incoming content keeps its entering class.
pub const DEFAULT_ENTER_DURATION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
  pub exit_delay: Duration,
  pub enter_duration: Duration,
}

impl Default for TransitionTiming {
  fn default() -> Self {
    Self { exit_delay: DEFAULT_EXIT_DELAY, enter_duration: DEFAULT_ENTER_DURATION }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swap {
  /// New content is in place and the surface is in steady state.
  Done,
  /// A newer navigation took over the surface while waiting.
  Abandoned,
}

/// Runs the exit/enter class sequence around replacing the surface content.
/// `is_stale` is checked after every wait; once it returns true the surface is
/// left to the newer navigation.
pub async fn swap_content(
  surface: &dyn ContentSurface,
  timer: &dyn Timer,
  timing: TransitionTiming,
  content: &str,
  is_stale: impl Fn() -> bool,
) -> Swap {
  surface.remove_class(ENTER_CLASS);
  surface.remove_class(ENTER_ACTIVE_CLASS);
  surface.add_class(EXIT_CLASS);

  timer.sleep(timing.exit_delay).await;
  if is_stale() {
    return Swap::Abandoned;
  }

  surface.replace_content(content);
  surface.remove_class(EXIT_CLASS);
  surface.add_class(ENTER_CLASS);
  surface.flush_layout();
  surface.remove_class(ENTER_CLASS);
  surface.add_class(ENTER_ACTIVE_CLASS);

  timer.sleep(timing.enter_duration).await;
  if is_stale() {
    return Swap::Abandoned;
  }
  surface.remove_class(ENTER_ACTIVE_CLASS);
  Swap::Done
}

/// Drops every transition class, e.g. before showing the error view.
pub fn reset_classes(surface: &dyn ContentSurface) {
  for class in [EXIT_CLASS, ENTER_CLASS, ENTER_ACTIVE_CLASS] {
    surface.remove_class(class);
  }
}
