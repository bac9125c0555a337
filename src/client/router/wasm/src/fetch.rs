/* src/client/router/wasm/src/fetch.rs */

use anyhow::{Context, anyhow, bail};
use gloo_net::http::Request;
use wasm_bindgen::JsValue;

use crate::js::js_error;

/// GET `url` and return the body; non-2xx responses are errors.
pub(crate) async fn fetch_text(url: &str) -> anyhow::Result<String> {
  let response = Request::get(url)
    .send()
    .await
    .map_err(|err| anyhow!("{err}"))
    .with_context(|| format!("GET {url}"))?;
  if !response.ok() {
    bail!("GET {url}: HTTP {}: {}", response.status(), response.status_text());
  }
  response
    .text()
    .await
    .map_err(|err| anyhow!("{err}"))
    .with_context(|| format!("reading {url}"))
}

/// Fetches a JSON document as a JS value for page initializers.
pub(crate) async fn fetch_json(url: &str) -> anyhow::Result<JsValue> {
  let text = fetch_text(url).await?;
  js_sys::JSON::parse(&text).map_err(|err| js_error(&err)).with_context(|| format!("parsing {url}"))
}
