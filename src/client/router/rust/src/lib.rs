/* src/client/router/rust/src/lib.rs */

pub mod errors;
pub mod history;
pub mod location;
pub mod options;
pub mod ready;
pub mod route;
pub mod router;
pub mod surface;
pub mod transition;
pub mod view;

#[cfg(test)]
mod tests;

// Re-exports for ergonomic use
pub use errors::RouterError;
pub use history::{HistoryAdapter, HistoryEntry, MemoryHistory};
pub use location::{Location, canonical_path, page_from_location};
pub use options::RouterOptions;
pub use ready::{ReadySignal, Readiness, readiness};
pub use route::{
  LocalBoxFuture, PageHandler, PageInitializer, RouteTable, page_handler, page_initializer,
};
pub use router::{NavigationOutcome, NavigationState, Phase, Router, RouterBuilder};
pub use surface::{ContentSurface, Timer};
pub use transition::TransitionTiming;
