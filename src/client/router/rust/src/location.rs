/* src/client/router/rust/src/location.rs */

// URL scheme: the home page lives at "/", every other page at "/<page>".
// Static hosts without rewrite support redirect deep links to "/?/<path>&<query>"
// with literal '&' in the path written as "~and~".

const LEGACY_PREFIX: &str = "?/";
const LEGACY_AMPERSAND: &str = "~and~";

/// Address bar snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
  pub path: String,
  /// Query string including the leading '?', or empty.
  pub search: String,
}

impl Location {
  pub fn new(path: impl Into<String>, search: impl Into<String>) -> Self {
    Self { path: path.into(), search: search.into() }
  }

  /// Splits a relative URL ("/quiz?x=1#top") into path and search. The fragment is dropped.
  pub fn parse(url: &str) -> Self {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    match url.find('?') {
      Some(idx) => Self::new(&url[..idx], &url[idx..]),
      None => Self::new(url, ""),
    }
  }
}

/// Where the requested page name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSource {
  Path,
  LegacyRedirect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedPage {
  pub page: String,
  pub source: PageSource,
}

/// Page name requested by `location`, defaulting to `home` when the path is empty.
pub fn requested_page(location: &Location, home: &str) -> RequestedPage {
  if let Some(path) = legacy_redirect_path(&location.search) {
    return RequestedPage { page: first_segment(&path, home), source: PageSource::LegacyRedirect };
  }
  RequestedPage { page: first_segment(&location.path, home), source: PageSource::Path }
}

pub fn page_from_location(location: &Location, home: &str) -> String {
  requested_page(location, home).page
}

/// Decodes the path carried by a `?/<path>&<query>` redirect.
pub fn legacy_redirect_path(search: &str) -> Option<String> {
  let rest = search.strip_prefix(LEGACY_PREFIX)?;
  let path = rest.split('&').next().unwrap_or_default();
  Some(path.replace(LEGACY_AMPERSAND, "&"))
}

/// First path segment with leading slashes stripped; `home` if there is none.
pub fn first_segment(path: &str, home: &str) -> String {
  let segment = path.trim_start_matches('/').split('/').next().unwrap_or_default();
  if segment.is_empty() { home.to_string() } else { segment.to_string() }
}

pub fn canonical_path(page: &str, home: &str) -> String {
  if page == home { "/".to_string() } else { format!("/{page}") }
}
