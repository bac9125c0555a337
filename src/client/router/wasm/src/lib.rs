/* src/client/router/wasm/src/lib.rs */

mod browser;
mod console;
mod dom;
mod fetch;
mod js;

use std::collections::HashMap;
use std::rc::Rc;

use anyhow::anyhow;
use js_sys::{Function, Promise};
use serde::Deserialize;
use terra_router::{
  NavigationOutcome, ReadySignal, Readiness, Router, RouterBuilder, RouterOptions, page_handler,
  page_initializer, readiness,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use browser::{BrowserHistory, BrowserTimer};
use dom::DomSurface;

/// Options accepted by `new TerraApp(json)`; router options are inlined.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowserOptions {
  #[serde(flatten)]
  router: RouterOptions,
  #[serde(default = "default_content_id")]
  content_id: String,
  #[serde(default = "default_nav_selector")]
  nav_selector: String,
  #[serde(default = "default_page_attribute")]
  page_attribute: String,
  #[serde(default = "default_log_level")]
  log_level: String,
}

fn default_content_id() -> String {
  "app-content".to_string()
}

fn default_nav_selector() -> String {
  ".nav-link".to_string()
}

fn default_page_attribute() -> String {
  "data-page".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

impl BrowserOptions {
  fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    let json = if json.trim().is_empty() { "{}" } else { json };
    serde_json::from_str(json)
  }
}

/// A JSON document fetched once at start and shared by every data initializer using it.
struct Preload {
  signal: ReadySignal<JsValue>,
  readiness: Readiness<JsValue>,
  fallback: Option<String>,
}

/// Registration phase: pages and initializers are added, then `start()` hands
/// everything to the router.
#[wasm_bindgen]
pub struct TerraApp {
  options: BrowserOptions,
  builder: RouterBuilder,
  preloads: HashMap<String, Preload>,
}

#[wasm_bindgen]
impl TerraApp {
  #[wasm_bindgen(constructor)]
  pub fn new(options_json: &str) -> Result<TerraApp, JsError> {
    console_error_panic_hook::set_once();
    let options = BrowserOptions::from_json(options_json)
      .map_err(|err| JsError::new(&format!("invalid router options: {err}")))?;
    console::init(&options.log_level);
    let builder = RouterBuilder::with_options(&options.router);
    Ok(Self { options, builder, preloads: HashMap::new() })
  }

  /// Page whose markup is fetched from `url` on every visit.
  pub fn page(&mut self, name: &str, url: &str) {
    let url = url.to_string();
    self.builder.add_route(
      name,
      page_handler(move || {
        let url = url.clone();
        async move { fetch::fetch_text(&url).await }
      }),
    );
  }

  /// Page produced by a JS function returning markup or a promise of markup.
  pub fn route(&mut self, name: &str, handler: Function) {
    self.builder.add_route(
      name,
      page_handler(move || {
        let handler = handler.clone();
        async move {
          let value = js::call_and_settle(&handler, None).await?;
          value.as_string().ok_or_else(|| anyhow!("page handler did not return a string"))
        }
      }),
    );
  }

  /// JS function run after the page's markup is in place. Its return value is
  /// ignored; a throw or rejected promise shows the error view.
  pub fn initializer(&mut self, name: &str, init: Function) -> Result<(), JsError> {
    let initializer = page_initializer(move || {
      let init = init.clone();
      async move {
        js::call_and_settle(&init, None).await?;
        anyhow::Ok(())
      }
    });
    self.builder.set_initializer(name, initializer).map_err(|err| JsError::new(&err.to_string()))
  }

  /// Like `initializer`, but `init` receives the JSON document at `data_url`
  /// once it has loaded. `fallback_json` is used when the fetch fails.
  pub fn data_initializer(
    &mut self,
    name: &str,
    data_url: &str,
    fallback_json: Option<String>,
    init: Function,
  ) -> Result<(), JsError> {
    let preload = self.preloads.entry(data_url.to_string()).or_insert_with(|| {
      let (signal, readiness) = readiness();
      Preload { signal, readiness, fallback: None }
    });
    if fallback_json.is_some() {
      preload.fallback = fallback_json;
    }
    let data = preload.readiness.clone();
    let initializer = page_initializer(move || {
      let init = init.clone();
      let data = data.clone();
      async move {
        let value = data.wait().await?;
        js::call_and_settle(&init, Some(&value)).await?;
        anyhow::Ok(())
      }
    });
    self.builder.set_initializer(name, initializer).map_err(|err| JsError::new(&err.to_string()))
  }

  /// Binds to the document, wires navigation and loads the page named by the URL.
  pub fn start(self) -> Result<RouterHandle, JsError> {
    let TerraApp { options, builder, preloads } = self;
    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window.document().ok_or_else(|| JsError::new("no document"))?;

    let surface = DomSurface::find(
      document,
      &options.content_id,
      &options.nav_selector,
      &options.page_attribute,
    )
    .map_err(|err| JsError::new(&format!("{err:#}")))?;
    let nav_links = surface.nav_links().to_vec();

    let router = Rc::new(builder.build(
      BrowserHistory::new(window.clone()),
      surface,
      BrowserTimer::new(window.clone()),
    ));

    dom::wire_nav_links(&router, &nav_links, &options.page_attribute)
      .map_err(|err| JsError::new(&format!("{err:#}")))?;
    dom::listen_pop_state(&router, &window).map_err(|err| JsError::new(&format!("{err:#}")))?;

    for (url, preload) in preloads {
      spawn_local(resolve_preload(url, preload));
    }

    let starter = Rc::clone(&router);
    spawn_local(async move {
      starter.start().await;
    });
    Ok(RouterHandle { router })
  }
}

async fn resolve_preload(url: String, preload: Preload) {
  let Preload { signal, fallback, .. } = preload;
  match fetch::fetch_json(&url).await {
    Ok(value) => signal.resolve(value),
    Err(err) => {
      tracing::warn!(url = %url, "preload failed: {err:#}");
      match fallback.map(|json| js_sys::JSON::parse(&json)) {
        Some(Ok(value)) => signal.resolve(value),
        Some(Err(err)) => {
          tracing::warn!(url = %url, "invalid fallback data: {}", js::js_message(&err));
        }
        None => {}
      }
    }
  }
}

/// Running router, returned by `TerraApp.start()`.
#[wasm_bindgen]
pub struct RouterHandle {
  router: Rc<Router>,
}

#[wasm_bindgen]
impl RouterHandle {
  /// Resolves to "completed", "already-current", "already-pending",
  /// "superseded" or "failed". Never rejects.
  pub fn navigate(&self, page: String, add_to_history: Option<bool>) -> Promise {
    let router = Rc::clone(&self.router);
    future_to_promise(async move {
      let outcome = router.navigate(&page, add_to_history.unwrap_or(true)).await;
      Ok(JsValue::from_str(outcome_label(&outcome)))
    })
  }

  #[wasm_bindgen(getter, js_name = currentPage)]
  pub fn current_page(&self) -> Option<String> {
    self.router.current_page()
  }

  #[wasm_bindgen(getter)]
  pub fn home(&self) -> String {
    self.router.home().to_string()
  }
}

fn outcome_label(outcome: &NavigationOutcome) -> &'static str {
  match outcome {
    NavigationOutcome::Completed => "completed",
    NavigationOutcome::AlreadyCurrent => "already-current",
    NavigationOutcome::AlreadyPending => "already-pending",
    NavigationOutcome::Superseded => "superseded",
    NavigationOutcome::Failed(_) => "failed",
  }
}
