/* src/client/router/wasm/src/js.rs */

use js_sys::{Function, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Human-readable text for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
  if let Some(text) = value.as_string() {
    return text;
  }
  if let Some(err) = value.dyn_ref::<js_sys::Error>() {
    return String::from(err.message());
  }
  format!("{value:?}")
}

pub(crate) fn js_error(value: &JsValue) -> anyhow::Error {
  anyhow::anyhow!(js_message(value))
}

/// Calls `func` and awaits its result whether it returns a plain value or a promise.
pub(crate) async fn call_and_settle(
  func: &Function,
  arg: Option<&JsValue>,
) -> anyhow::Result<JsValue> {
  let returned = match arg {
    Some(arg) => func.call1(&JsValue::NULL, arg),
    None => func.call0(&JsValue::NULL),
  }
  .map_err(|err| js_error(&err))?;
  JsFuture::from(Promise::resolve(&returned)).await.map_err(|err| js_error(&err))
}
