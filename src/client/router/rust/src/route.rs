/* src/client/router/rust/src/route.rs */

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use crate::errors::RouterError;

/// Boxed future without a `Send` bound; the router runs on a single-threaded event loop.
pub type LocalBoxFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Produces the markup for a page. Invoked once per visit.
pub type PageHandler = Rc<dyn Fn() -> LocalBoxFuture<anyhow::Result<String>>>;

/// Page-specific setup, run after the page markup is in the content container.
pub type PageInitializer = Rc<dyn Fn() -> LocalBoxFuture<anyhow::Result<()>>>;

pub fn page_handler<F, Fut>(f: F) -> PageHandler
where
  F: Fn() -> Fut + 'static,
  Fut: Future<Output = anyhow::Result<String>> + 'static,
{
  Rc::new(move || Box::pin(f()))
}

pub fn page_initializer<F, Fut>(f: F) -> PageInitializer
where
  F: Fn() -> Fut + 'static,
  Fut: Future<Output = anyhow::Result<()>> + 'static,
{
  Rc::new(move || Box::pin(f()))
}

pub struct Route {
  pub name: String,
  pub handler: PageHandler,
  pub initializer: Option<PageInitializer>,
}

/// Page name -> route. Filled through `RouterBuilder` and frozen once the router is built.
#[derive(Default)]
pub struct RouteTable {
  routes: HashMap<String, Route>,
}

impl RouteTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers `handler` for `name`, replacing any previous handler.
  /// An initializer already attached to `name` is kept.
  pub fn add_route(&mut self, name: impl Into<String>, handler: PageHandler) {
    let name = name.into();
    match self.routes.get_mut(&name) {
      Some(route) => {
        tracing::debug!(page = %name, "replacing route handler");
        route.handler = handler;
      }
      None => {
        let route = Route { name: name.clone(), handler, initializer: None };
        self.routes.insert(name, route);
      }
    }
  }

  /// Attaches an initializer to a registered route.
  pub fn set_initializer(
    &mut self,
    name: &str,
    initializer: PageInitializer,
  ) -> Result<(), RouterError> {
    let route =
      self.routes.get_mut(name).ok_or_else(|| RouterError::RouteNotFound(name.to_string()))?;
    route.initializer = Some(initializer);
    Ok(())
  }

  pub fn resolve(&self, name: &str) -> Result<&PageHandler, RouterError> {
    self
      .routes
      .get(name)
      .map(|route| &route.handler)
      .ok_or_else(|| RouterError::RouteNotFound(name.to_string()))
  }

  pub fn initializer(&self, name: &str) -> Option<&PageInitializer> {
    self.routes.get(name).and_then(|route| route.initializer.as_ref())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.routes.contains_key(name)
  }

  /// Registered page names, sorted.
  pub fn names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.routes.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }

  pub fn len(&self) -> usize {
    self.routes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }
}
