/* src/client/router/wasm/src/dom.rs */

use std::rc::Rc;

use anyhow::{Context, anyhow};
use terra_router::{ContentSurface, Router};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, MouseEvent, PopStateEvent, Window};

use crate::browser::entry_from_state;
use crate::js::{js_error, js_message};

const ACTIVE_CLASS: &str = "active";

/// The `#app-content` container and the navigation links around it.
pub(crate) struct DomSurface {
  document: Document,
  content: HtmlElement,
  nav_links: Vec<Element>,
  page_attribute: String,
}

impl DomSurface {
  pub(crate) fn find(
    document: Document,
    content_id: &str,
    nav_selector: &str,
    page_attribute: &str,
  ) -> anyhow::Result<Self> {
    let content = document
      .get_element_by_id(content_id)
      .ok_or_else(|| anyhow!("#{content_id} element not found"))?
      .dyn_into::<HtmlElement>()
      .map_err(|_| anyhow!("#{content_id} is not an HTML element"))?;
    let nav_links = query_all(&document, nav_selector)?;
    if nav_links.is_empty() {
      tracing::warn!(selector = nav_selector, "no navigation links found");
    }
    Ok(Self { document, content, nav_links, page_attribute: page_attribute.to_string() })
  }

  pub(crate) fn nav_links(&self) -> &[Element] {
    &self.nav_links
  }
}

impl ContentSurface for DomSurface {
  fn replace_content(&self, html: &str) {
    self.content.set_inner_html(html);
  }

  fn add_class(&self, class: &str) {
    if let Err(err) = self.content.class_list().add_1(class) {
      tracing::warn!(class, "add class failed: {}", js_message(&err));
    }
  }

  fn remove_class(&self, class: &str) {
    if let Err(err) = self.content.class_list().remove_1(class) {
      tracing::warn!(class, "remove class failed: {}", js_message(&err));
    }
  }

  fn flush_layout(&self) {
    // Reading a layout property forces the browser to apply pending styles.
    let _ = self.content.offset_height();
  }

  fn mark_active(&self, page: &str) {
    for link in &self.nav_links {
      let is_active = link.get_attribute(&self.page_attribute).as_deref() == Some(page);
      let _ = link.class_list().toggle_with_force(ACTIVE_CLASS, is_active);
    }
    if let Some(body) = self.document.body() {
      let _ = body.set_attribute("data-page", page);
    }
  }
}

fn query_all(document: &Document, selector: &str) -> anyhow::Result<Vec<Element>> {
  let list = document
    .query_selector_all(selector)
    .map_err(|err| js_error(&err))
    .with_context(|| format!("invalid selector {selector}"))?;
  Ok(
    (0..list.length())
      .filter_map(|i| list.item(i))
      .filter_map(|node| node.dyn_into::<Element>().ok())
      .collect(),
  )
}

/// Clicking a nav link navigates to its page instead of following the href.
pub(crate) fn wire_nav_links(
  router: &Rc<Router>,
  links: &[Element],
  page_attribute: &str,
) -> anyhow::Result<()> {
  for link in links {
    let router = Rc::clone(router);
    let attribute = page_attribute.to_string();
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
      event.prevent_default();
      let page = event
        .current_target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.get_attribute(&attribute));
      if let Some(page) = page {
        tracing::debug!(page = %page, "navigation clicked");
        let router = Rc::clone(&router);
        spawn_local(async move {
          router.navigate(&page, true).await;
        });
      }
    });
    link
      .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
      .map_err(|err| js_error(&err))?;
    on_click.forget();
  }
  Ok(())
}

/// Back/forward gestures reload the popped page without pushing history.
pub(crate) fn listen_pop_state(router: &Rc<Router>, window: &Window) -> anyhow::Result<()> {
  let router = Rc::clone(router);
  let on_pop = Closure::<dyn FnMut(PopStateEvent)>::new(move |event: PopStateEvent| {
    let entry = entry_from_state(&event.state());
    let router = Rc::clone(&router);
    spawn_local(async move {
      router.handle_pop_state(entry).await;
    });
  });
  window
    .add_event_listener_with_callback("popstate", on_pop.as_ref().unchecked_ref())
    .map_err(|err| js_error(&err))?;
  on_pop.forget();
  Ok(())
}
