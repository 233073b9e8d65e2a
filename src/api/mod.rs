//! Typed client for the admin backend.
//!
//! `http` is the transport, `requests` holds one method per endpoint on
//! [`Api`], `types` the wire model.

pub mod error;
pub mod http;
pub mod requests;
pub mod types;

pub use error::{ApiError, ApiResponseError};
pub use http::{Body, HttpClient, RequestOptions};

use std::sync::Arc;
use tracing::warn;
use url::form_urlencoded;

use crate::config::Config;
use crate::session::SessionStore;
use types::{Page, Paginator};

/// Backend API client.
///
/// Cheap to clone; all clones share the connection pool and session store.
#[derive(Clone)]
pub struct Api {
  http: HttpClient,
}

impl Api {
  pub fn new(http: HttpClient) -> Self {
    Self { http }
  }

  pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> Self {
    Self::new(HttpClient::from_config(config, session))
  }

  pub fn http(&self) -> &HttpClient {
    &self.http
  }

  pub fn session(&self) -> &Arc<dyn SessionStore> {
    self.http.session()
  }
}

/// Query string builder. Optional values are only serialized when present.
pub(crate) struct QueryParams {
  serializer: form_urlencoded::Serializer<'static, String>,
  empty: bool,
}

impl QueryParams {
  pub fn new() -> Self {
    Self {
      serializer: form_urlencoded::Serializer::new(String::new()),
      empty: true,
    }
  }

  pub fn add(mut self, name: &str, value: impl ToString) -> Self {
    self.serializer.append_pair(name, &value.to_string());
    self.empty = false;
    self
  }

  pub fn add_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
    match value {
      Some(v) => self.add(name, v),
      None => self,
    }
  }

  /// Skips `None` and empty strings.
  pub fn add_non_empty(self, name: &str, value: Option<&str>) -> Self {
    self.add_opt(name, value.filter(|v| !v.is_empty()))
  }

  /// `path?query`, or just `path` when nothing was added.
  pub fn apply(mut self, path: &str) -> String {
    if self.empty {
      path.to_string()
    } else {
      format!("{}?{}", path, self.serializer.finish())
    }
  }
}

/// Warn about a page that breaks its own pagination metadata. The page is
/// still returned as-is.
pub(crate) fn check_page<T, P: Paginator>(path: &str, page: &Page<T, P>) {
  if !page.is_consistent() {
    let info = page.info();
    warn!(
      path,
      items = page.items.len(),
      page = info.page,
      total_pages = info.total_pages,
      "page inconsistent with its pagination metadata"
    );
  }
}
