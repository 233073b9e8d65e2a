//! Client-side query cache.
//!
//! Inspired by TanStack Query: a [`QueryClient`] owns every cache slot, a
//! [`QueryObserver`] is the read side a view mounts, and a [`MutationSpec`]
//! declares which keys a write makes stale.
//!
//! ```ignore
//! let client = QueryClient::new();
//! let def = QueryDef::new(query_key!["students", 1u32, 10u32], QueryOptions::default(), move || {
//!   let api = api.clone();
//!   async move { api.fetch_students(1, 10).await }
//! });
//! let mut observer = QueryObserver::new(client.clone(), def);
//! observer.mount();
//!
//! // In event loop tick
//! if observer.poll() {
//!   // State changed, trigger re-render
//! }
//! ```

mod client;
mod key;
mod mutation;
mod observer;

pub use client::{QueryClient, QueryState};
pub use key::{KeyPart, QueryKey};
pub use mutation::MutationSpec;
pub use observer::{QueryDef, QueryObserver, QueryResult};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiError;
use crate::config::CacheConfig;

/// Fetch status of a cache slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStatus {
  /// Never fetched
  #[default]
  Idle,
  /// First fetch in flight, no data yet
  Loading,
  /// Last fetch failed
  Error,
  /// Data present
  Success,
}

pub type ErrorCallback = Arc<dyn Fn(&ApiError) + Send + Sync>;

/// Per-query behaviour.
#[derive(Clone)]
pub struct QueryOptions {
  /// When false no request is issued and the query stays idle
  pub enabled: bool,
  /// Keep showing the previous key's data while a new key loads
  pub keep_previous_data: bool,
  /// Extra attempts after the first failure
  pub retry: u32,
  /// Delay before the first retry, doubled for each further attempt
  pub retry_delay: Duration,
  /// How long fetched data counts as fresh
  pub stale_time: Duration,
  /// Called once per failed fetch, after retries are exhausted
  pub on_error: Option<ErrorCallback>,
}

impl Default for QueryOptions {
  fn default() -> Self {
    Self {
      enabled: true,
      keep_previous_data: false,
      retry: 3,
      retry_delay: Duration::from_secs(1),
      stale_time: Duration::ZERO,
      on_error: None,
    }
  }
}

impl QueryOptions {
  pub fn from_config(config: &CacheConfig) -> Self {
    Self {
      retry: config.retry,
      retry_delay: config.retry_delay(),
      stale_time: config.stale_time(),
      ..Self::default()
    }
  }

  pub fn enabled(mut self, enabled: bool) -> Self {
    self.enabled = enabled;
    self
  }

  pub fn keep_previous_data(mut self) -> Self {
    self.keep_previous_data = true;
    self
  }

  pub fn no_retry(mut self) -> Self {
    self.retry = 0;
    self
  }

  pub fn on_error(mut self, callback: impl Fn(&ApiError) + Send + Sync + 'static) -> Self {
    self.on_error = Some(Arc::new(callback));
    self
  }
}

impl fmt::Debug for QueryOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("QueryOptions")
      .field("enabled", &self.enabled)
      .field("keep_previous_data", &self.keep_previous_data)
      .field("retry", &self.retry)
      .field("retry_delay", &self.retry_delay)
      .field("stale_time", &self.stale_time)
      .field("on_error", &self.on_error.is_some())
      .finish()
  }
}
