use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::watch;

use super::client::{downcast, erase, Fetcher, Lookup};
use super::{QueryClient, QueryKey, QueryOptions, QueryStatus};
use crate::api::ApiError;

/// Everything needed to run one read query: key, options and fetcher.
pub struct QueryDef<T> {
  pub key: QueryKey,
  pub options: QueryOptions,
  fetcher: Fetcher,
  _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> QueryDef<T> {
  pub fn new<F, Fut>(key: QueryKey, options: QueryOptions, fetch: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
  {
    Self {
      key,
      options,
      fetcher: erase(fetch),
      _marker: PhantomData,
    }
  }

  /// Run once through the cache without mounting an observer.
  pub async fn fetch(&self, client: &QueryClient) -> Result<Arc<T>, Arc<ApiError>> {
    match client.lookup(&self.key, &self.options, &self.fetcher, false) {
      Lookup::Fresh(data) => downcast(&self.key, data),
      Lookup::Pending(fut) => downcast(&self.key, fut.await?),
    }
  }
}

impl<T> Clone for QueryDef<T> {
  fn clone(&self) -> Self {
    Self {
      key: self.key.clone(),
      options: self.options.clone(),
      fetcher: self.fetcher.clone(),
      _marker: PhantomData,
    }
  }
}

impl<T> std::fmt::Debug for QueryDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("QueryDef")
      .field("key", &self.key)
      .field("options", &self.options)
      .finish_non_exhaustive()
  }
}

/// What a view renders.
#[derive(Debug)]
pub struct QueryResult<T> {
  pub status: QueryStatus,
  pub data: Option<Arc<T>>,
  pub error: Option<Arc<ApiError>>,
  pub is_fetching: bool,
  /// `data` belongs to the previous key while the current one loads
  pub is_previous_data: bool,
}

impl<T> Clone for QueryResult<T> {
  fn clone(&self) -> Self {
    Self {
      status: self.status,
      data: self.data.clone(),
      error: self.error.clone(),
      is_fetching: self.is_fetching,
      is_previous_data: self.is_previous_data,
    }
  }
}

impl<T> QueryResult<T> {
  fn idle() -> Self {
    Self {
      status: QueryStatus::Idle,
      data: None,
      error: None,
      is_fetching: false,
      is_previous_data: false,
    }
  }

  pub fn is_loading(&self) -> bool {
    self.status == QueryStatus::Loading
  }

  pub fn is_error(&self) -> bool {
    self.status == QueryStatus::Error
  }

  pub fn is_success(&self) -> bool {
    self.status == QueryStatus::Success
  }

  pub fn data(&self) -> Option<&T> {
    self.data.as_deref()
  }
}

/// Read side of the cache, bound to one key at a time.
///
/// Created unmounted. `mount()` registers it with the client so
/// invalidations refetch it, and fetches when the data is stale. Dropping
/// the observer unmounts it; an in-flight request keeps running.
pub struct QueryObserver<T> {
  client: QueryClient,
  def: QueryDef<T>,
  rx: Option<watch::Receiver<u64>>,
  /// Caller asked for the observer to be mounted
  active: bool,
  /// Registered with the client (active and enabled)
  attached: bool,
  previous: Option<Arc<T>>,
}

impl<T: Send + Sync + 'static> QueryObserver<T> {
  pub fn new(client: QueryClient, def: QueryDef<T>) -> Self {
    Self {
      client,
      def,
      rx: None,
      active: false,
      attached: false,
      previous: None,
    }
  }

  pub fn key(&self) -> &QueryKey {
    &self.def.key
  }

  pub fn mount(&mut self) {
    self.active = true;
    self.attach();
  }

  pub fn unmount(&mut self) {
    self.active = false;
    self.detach();
  }

  fn attach(&mut self) {
    if self.attached || !self.active || !self.def.options.enabled {
      return;
    }
    self.rx = Some(self.client.subscribe(&self.def.key));
    self
      .client
      .mount(&self.def.key, self.def.fetcher.clone(), self.def.options.clone());
    self.attached = true;
    // Starts a request unless fresh data or one in flight already exists.
    let _ = self
      .client
      .lookup(&self.def.key, &self.def.options, &self.def.fetcher, false);
  }

  fn detach(&mut self) {
    if self.attached {
      self.client.unmount(&self.def.key);
      self.attached = false;
    }
    self.rx = None;
  }

  /// Switch to another query, e.g. the next page.
  ///
  /// With `keep_previous_data` the current data stays visible, flagged
  /// `is_previous_data`, until the new key has data of its own.
  pub fn set_query(&mut self, def: QueryDef<T>) {
    if def.key == self.def.key {
      let enabled_changed = def.options.enabled != self.def.options.enabled;
      self.def = def;
      if enabled_changed {
        self.detach();
        self.attach();
      }
      return;
    }

    self.previous = if def.options.keep_previous_data {
      self.current_data().or_else(|| self.previous.take())
    } else {
      None
    };
    self.detach();
    self.def = def;
    self.attach();
  }

  /// Toggle `enabled`, e.g. once a dependent id becomes known.
  pub fn set_enabled(&mut self, enabled: bool) {
    if self.def.options.enabled == enabled {
      return;
    }
    self.def.options.enabled = enabled;
    self.detach();
    self.attach();
  }

  /// Force a new request, superseding any in flight.
  pub fn refetch(&self) {
    if self.def.options.enabled {
      let _ = self
        .client
        .lookup(&self.def.key, &self.def.options, &self.def.fetcher, true);
    }
  }

  fn current_data(&self) -> Option<Arc<T>> {
    self.client.query_data::<T>(&self.def.key)
  }

  /// Returns `true` if the observed slot changed since the last poll.
  /// Call this in the event loop tick handler.
  pub fn poll(&mut self) -> bool {
    let changed = match self.rx.as_mut() {
      Some(rx) => match rx.has_changed() {
        Ok(true) => {
          rx.borrow_and_update();
          true
        }
        _ => false,
      },
      None => false,
    };
    if changed && self.previous.is_some() && self.current_data().is_some() {
      self.previous = None;
    }
    changed
  }

  pub fn result(&self) -> QueryResult<T> {
    let Some(state) = self.client.query_state(&self.def.key) else {
      return self.with_previous(QueryResult::idle());
    };

    let (data, error) = match state.data.clone().map(|d| downcast::<T>(&self.def.key, d)) {
      Some(Ok(data)) => (Some(data), state.error.clone()),
      Some(Err(err)) => (None, Some(err)),
      None => (None, state.error.clone()),
    };

    let status = if data.is_none() && error.is_some() && state.status == QueryStatus::Success {
      QueryStatus::Error
    } else {
      state.status
    };

    self.with_previous(QueryResult {
      status,
      data,
      error,
      is_fetching: state.is_fetching,
      is_previous_data: false,
    })
  }

  fn with_previous(&self, mut result: QueryResult<T>) -> QueryResult<T> {
    if result.data.is_none() && matches!(result.status, QueryStatus::Idle | QueryStatus::Loading) {
      if let Some(previous) = &self.previous {
        result.data = Some(previous.clone());
        result.status = QueryStatus::Success;
        result.is_previous_data = true;
      }
    }
    result
  }

  /// Wait until the observed key has no request in flight.
  pub async fn settled(&mut self) -> QueryResult<T> {
    loop {
      if let Some(rx) = self.rx.as_mut() {
        rx.borrow_and_update();
      }
      let result = self.result();
      if !self.attached || !result.is_fetching {
        if self.current_data().is_some() {
          self.previous = None;
        }
        return self.result();
      }
      let Some(rx) = self.rx.as_mut() else {
        return result;
      };
      if rx.changed().await.is_err() {
        return self.result();
      }
    }
  }
}

impl<T> Drop for QueryObserver<T> {
  fn drop(&mut self) {
    if self.attached {
      self.client.unmount(&self.def.key);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::query_key;
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::time::Duration;

  fn page_def(client_calls: Arc<AtomicU32>, page: u32, delay_ms: u64, keep: bool) -> QueryDef<Vec<String>> {
    let mut options = QueryOptions {
      retry: 0,
      ..QueryOptions::default()
    };
    options.keep_previous_data = keep;
    QueryDef::new(query_key!["merchants", page, 10u32], options, move || {
      let calls = client_calls.clone();
      async move {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        Ok((0..2).map(|i| format!("p{}-m{}", page, i)).collect())
      }
    })
  }

  #[tokio::test]
  async fn test_mount_fetches_and_settles() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let mut observer = QueryObserver::new(client.clone(), page_def(calls.clone(), 1, 5, false));

    assert_eq!(observer.result().status, QueryStatus::Idle);
    observer.mount();
    assert!(observer.result().is_loading());

    let result = observer.settled().await;
    assert!(result.is_success());
    assert_eq!(result.data().unwrap()[0], "p1-m0");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_two_observers_one_request() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let mut a = QueryObserver::new(client.clone(), page_def(calls.clone(), 1, 20, false));
    let mut b = QueryObserver::new(client.clone(), page_def(calls.clone(), 1, 20, false));
    a.mount();
    b.mount();

    a.settled().await;
    b.settled().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(client.query_state(a.key()).unwrap().observers, 2);

    drop(a);
    assert_eq!(client.query_state(b.key()).unwrap().observers, 1);
  }

  #[tokio::test]
  async fn test_disabled_observer_stays_idle() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let mut def = page_def(calls.clone(), 1, 1, false);
    def.options.enabled = false;

    let mut observer = QueryObserver::new(client.clone(), def);
    observer.mount();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(observer.result().status, QueryStatus::Idle);
    assert!(!observer.poll());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    observer.set_enabled(true);
    let result = observer.settled().await;
    assert!(result.is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_keep_previous_data_while_next_page_loads() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let mut observer = QueryObserver::new(client.clone(), page_def(calls.clone(), 1, 1, true));
    observer.mount();
    observer.settled().await;

    observer.set_query(page_def(calls.clone(), 2, 50, true));
    let during = observer.result();
    assert!(during.is_previous_data);
    assert!(during.is_fetching);
    assert_eq!(during.data().unwrap()[0], "p1-m0");

    let after = observer.settled().await;
    assert!(!after.is_previous_data);
    assert_eq!(after.data().unwrap()[0], "p2-m0");
  }

  #[tokio::test]
  async fn test_without_keep_previous_data_shows_loading() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let mut observer = QueryObserver::new(client.clone(), page_def(calls.clone(), 1, 1, false));
    observer.mount();
    observer.settled().await;

    observer.set_query(page_def(calls.clone(), 2, 50, false));
    let during = observer.result();
    assert!(during.is_loading());
    assert!(during.data.is_none());
  }

  #[tokio::test]
  async fn test_poll_reports_invalidation_refetch() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let mut observer = QueryObserver::new(client.clone(), page_def(calls.clone(), 1, 1, false));
    observer.mount();
    observer.settled().await;
    observer.poll();
    assert!(!observer.poll());

    client.invalidate_queries(&query_key!["merchants"]);
    assert!(observer.poll());
    observer.settled().await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
  }
}
