/* src/client/router/rust/src/surface.rs */

use std::time::Duration;

use crate::route::LocalBoxFuture;

/// The single content container the router swaps pages into, plus the
/// navigation UI that highlights the active page.
///
/// Only the page loader mutates the surface.
pub trait ContentSurface {
  fn replace_content(&self, html: &str);
  fn add_class(&self, class: &str);
  fn remove_class(&self, class: &str);
  /// Forces a synchronous layout so class changes made before and after are
  /// not coalesced by the host.
  fn flush_layout(&self);
  /// Marks `page` as active in the navigation UI.
  fn mark_active(&self, page: &str);
}

/// Timer used to pace transitions.
pub trait Timer {
  fn sleep(&self, duration: Duration) -> LocalBoxFuture<()>;
}
