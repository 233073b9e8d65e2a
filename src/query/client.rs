use futures::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{ErrorCallback, QueryKey, QueryOptions, QueryStatus};
use crate::api::ApiError;

/// Type-erased cached value.
pub(crate) type AnyData = Arc<dyn Any + Send + Sync>;

/// Outcome shared between every caller joined on one request.
pub(crate) type SharedResult = Result<AnyData, Arc<ApiError>>;

type SharedFetch = Shared<BoxFuture<'static, SharedResult>>;

/// Produces a fresh request future on each call.
pub(crate) type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, Result<AnyData, ApiError>> + Send + Sync>;

const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

pub(crate) fn erase<T, F, Fut>(fetch: F) -> Fetcher
where
  T: Send + Sync + 'static,
  F: Fn() -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
  Arc::new(move || {
    let fut = fetch();
    async move { fut.await.map(|data| Arc::new(data) as AnyData) }.boxed()
  })
}

pub(crate) fn downcast<T: Send + Sync + 'static>(key: &QueryKey, data: AnyData) -> Result<Arc<T>, Arc<ApiError>> {
  data
    .downcast::<T>()
    .map_err(|_| Arc::new(ApiError::CacheType(key.to_string())))
}

/// Back-off before retry number `attempt + 1`.
pub(crate) fn retry_delay(base: Duration, attempt: u32) -> Duration {
  base
    .saturating_mul(2u32.saturating_pow(attempt))
    .min(MAX_RETRY_DELAY)
}

/// Snapshot of one cache slot.
#[derive(Clone)]
pub struct QueryState {
  pub status: QueryStatus,
  pub is_fetching: bool,
  /// Marked stale by an invalidation and not refetched since
  pub invalidated: bool,
  pub updated_at: Option<Instant>,
  pub error: Option<Arc<ApiError>>,
  pub observers: usize,
  pub(crate) data: Option<AnyData>,
}

impl QueryState {
  pub fn has_data(&self) -> bool {
    self.data.is_some()
  }

  pub fn is_stale(&self, stale_time: Duration) -> bool {
    self.invalidated
      || self
        .updated_at
        .map(|t| t.elapsed() >= stale_time)
        .unwrap_or(true)
  }
}

impl fmt::Debug for QueryState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("QueryState")
      .field("status", &self.status)
      .field("is_fetching", &self.is_fetching)
      .field("invalidated", &self.invalidated)
      .field("has_data", &self.has_data())
      .field("error", &self.error)
      .field("observers", &self.observers)
      .finish()
  }
}

struct Entry {
  data: Option<AnyData>,
  error: Option<Arc<ApiError>>,
  status: QueryStatus,
  updated_at: Option<Instant>,
  invalidated: bool,
  /// Sequence number of the latest request issued for this key
  seq: u64,
  in_flight: Option<SharedFetch>,
  observers: usize,
  /// How mounted observers refetch after an invalidation
  refetch: Option<(Fetcher, QueryOptions)>,
  notify: watch::Sender<u64>,
}

impl Entry {
  fn new() -> Self {
    let (notify, _) = watch::channel(0);
    Self {
      data: None,
      error: None,
      status: QueryStatus::Idle,
      updated_at: None,
      invalidated: false,
      seq: 0,
      in_flight: None,
      observers: 0,
      refetch: None,
      notify,
    }
  }

  fn changed(&self) {
    self.notify.send_modify(|v| *v = v.wrapping_add(1));
  }

  fn snapshot(&self) -> QueryState {
    QueryState {
      status: self.status,
      is_fetching: self.in_flight.is_some(),
      invalidated: self.invalidated,
      updated_at: self.updated_at,
      error: self.error.clone(),
      observers: self.observers,
      data: self.data.clone(),
    }
  }

  fn fresh_data(&self, stale_time: Duration) -> Option<AnyData> {
    if self.status != QueryStatus::Success || self.snapshot().is_stale(stale_time) {
      return None;
    }
    self.data.clone()
  }
}

pub(crate) enum Lookup {
  Fresh(AnyData),
  Pending(SharedFetch),
}

/// Process-wide query cache.
///
/// Cheap to clone; clones share the same slots. Construct one per test for
/// isolation. Methods that may start a request must run inside a tokio
/// runtime.
#[derive(Clone, Default)]
pub struct QueryClient {
  entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
  /// Source of request sequence numbers, shared by every key so a request
  /// issued before `clear` never matches a slot created after it
  next_seq: Arc<AtomicU64>,
}

impl QueryClient {
  pub fn new() -> Self {
    Self::default()
  }

  fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Return fresh cached data, join the in-flight request for `key`, or
  /// start one.
  pub async fn fetch_query<T, F, Fut>(
    &self,
    key: QueryKey,
    options: &QueryOptions,
    fetch: F,
  ) -> Result<Arc<T>, Arc<ApiError>>
  where
    T: Send + Sync + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
  {
    let fetcher = erase(fetch);
    match self.lookup(&key, options, &fetcher, false) {
      Lookup::Fresh(data) => downcast(&key, data),
      Lookup::Pending(fut) => downcast(&key, fut.await?),
    }
  }

  /// Resolve `key` to fresh data or a pending request. `force` skips both
  /// the freshness check and the in-flight request, superseding the latter.
  pub(crate) fn lookup(&self, key: &QueryKey, options: &QueryOptions, fetcher: &Fetcher, force: bool) -> Lookup {
    let mut entries = self.entries();
    let entry = entries.entry(key.clone()).or_insert_with(Entry::new);

    if !force {
      if let Some(data) = entry.fresh_data(options.stale_time) {
        return Lookup::Fresh(data);
      }
      if let Some(fut) = &entry.in_flight {
        debug!(%key, seq = entry.seq, "joining in-flight request");
        return Lookup::Pending(fut.clone());
      }
    }

    Lookup::Pending(self.begin_fetch(key, entry, fetcher.clone(), options))
  }

  fn begin_fetch(&self, key: &QueryKey, entry: &mut Entry, fetcher: Fetcher, options: &QueryOptions) -> SharedFetch {
    let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;
    entry.seq = seq;
    if entry.data.is_none() {
      entry.status = QueryStatus::Loading;
    }
    debug!(%key, seq, "fetching");

    let client = self.clone();
    let key = key.clone();
    let retry = options.retry;
    let base_delay = options.retry_delay;
    let on_error = options.on_error.clone();

    let fut = async move {
      let result = fetch_with_retry(&key, &fetcher, retry, base_delay)
        .await
        .map_err(Arc::new);
      client.complete(&key, seq, &result, on_error.as_ref());
      result
    }
    .boxed()
    .shared();

    entry.in_flight = Some(fut.clone());
    entry.changed();

    // Drive the request even when nobody awaits it.
    tokio::spawn(fut.clone());
    fut
  }

  /// Apply a finished request unless a newer one was issued meanwhile.
  fn complete(&self, key: &QueryKey, seq: u64, result: &SharedResult, on_error: Option<&ErrorCallback>) {
    let applied = {
      let mut entries = self.entries();
      match entries.get_mut(key) {
        Some(entry) if entry.seq == seq => {
          entry.in_flight = None;
          match result {
            Ok(data) => {
              entry.data = Some(data.clone());
              entry.error = None;
              entry.status = QueryStatus::Success;
              entry.updated_at = Some(Instant::now());
              entry.invalidated = false;
            }
            Err(err) => {
              warn!(%key, error = %err, "query failed");
              entry.error = Some(err.clone());
              entry.status = QueryStatus::Error;
            }
          }
          entry.changed();
          true
        }
        Some(entry) => {
          debug!(%key, seq, latest = entry.seq, "discarding superseded response");
          false
        }
        None => false,
      }
    };

    if let (true, Err(err), Some(callback)) = (applied, result, on_error) {
      callback(err);
    }
  }

  /// Mark every key starting with `prefix` stale and refetch the ones a
  /// mounted observer is watching. Returns the touched keys, sorted.
  pub fn invalidate_queries(&self, prefix: &QueryKey) -> Vec<QueryKey> {
    let mut touched = Vec::new();
    {
      let mut entries = self.entries();
      for (key, entry) in entries.iter_mut() {
        if !key.starts_with(prefix) {
          continue;
        }
        entry.invalidated = true;
        if entry.observers > 0 {
          if let Some((fetcher, options)) = entry.refetch.clone() {
            if options.enabled {
              self.begin_fetch(key, entry, fetcher, &options);
            }
          }
        }
        entry.changed();
        touched.push(key.clone());
      }
    }
    touched.sort();
    info!(prefix = %prefix, count = touched.len(), "invalidated queries");
    touched
  }

  /// Register an observer; invalidations refetch with `fetcher` while any
  /// observer is mounted.
  pub(crate) fn mount(&self, key: &QueryKey, fetcher: Fetcher, options: QueryOptions) {
    let mut entries = self.entries();
    let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
    entry.observers += 1;
    entry.refetch = Some((fetcher, options));
  }

  pub(crate) fn unmount(&self, key: &QueryKey) {
    let mut entries = self.entries();
    if let Some(entry) = entries.get_mut(key) {
      entry.observers = entry.observers.saturating_sub(1);
      if entry.observers == 0 {
        entry.refetch = None;
      }
    }
  }

  pub fn query_state(&self, key: &QueryKey) -> Option<QueryState> {
    self.entries().get(key).map(Entry::snapshot)
  }

  /// Cached data for `key`, if present and of type `T`.
  pub fn query_data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
    let data = self.entries().get(key)?.data.clone()?;
    downcast(key, data).ok()
  }

  pub fn set_query_data<T: Send + Sync + 'static>(&self, key: QueryKey, data: T) {
    let mut entries = self.entries();
    let entry = entries.entry(key).or_insert_with(Entry::new);
    entry.data = Some(Arc::new(data));
    entry.error = None;
    entry.status = QueryStatus::Success;
    entry.updated_at = Some(Instant::now());
    entry.invalidated = false;
    entry.changed();
  }

  /// Change notifications for `key`; the value is a revision counter.
  pub fn subscribe(&self, key: &QueryKey) -> watch::Receiver<u64> {
    self
      .entries()
      .entry(key.clone())
      .or_insert_with(Entry::new)
      .notify
      .subscribe()
  }

  pub fn keys(&self) -> Vec<QueryKey> {
    let mut keys: Vec<_> = self.entries().keys().cloned().collect();
    keys.sort();
    keys
  }

  /// Drop every slot, e.g. when the session ends.
  pub fn clear(&self) {
    self.entries().clear();
  }
}

async fn fetch_with_retry(
  key: &QueryKey,
  fetcher: &Fetcher,
  retry: u32,
  base_delay: Duration,
) -> Result<AnyData, ApiError> {
  let mut attempt = 0;
  loop {
    match fetcher().await {
      Ok(data) => return Ok(data),
      Err(err) if attempt < retry => {
        let delay = retry_delay(base_delay, attempt);
        debug!(%key, attempt = attempt + 1, ?delay, error = %err, "retrying query");
        tokio::time::sleep(delay).await;
        attempt += 1;
      }
      Err(err) => return Err(err),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::ApiResponseError;
  use crate::query_key;
  use std::sync::atomic::AtomicU32;

  fn failure(message: &str) -> ApiError {
    ApiResponseError::new(message, 500).into()
  }

  fn quick() -> QueryOptions {
    QueryOptions {
      retry: 0,
      retry_delay: Duration::from_millis(1),
      ..QueryOptions::default()
    }
  }

  #[tokio::test]
  async fn test_identical_keys_share_one_request() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let options = quick();

    let fetch = |calls: Arc<AtomicU32>| {
      move || {
        let calls = calls.clone();
        async move {
          calls.fetch_add(1, Ordering::SeqCst);
          tokio::time::sleep(Duration::from_millis(50)).await;
          Ok::<_, ApiError>(vec![1, 2, 3])
        }
      }
    };

    let (a, b) = tokio::join!(
      client.fetch_query(query_key!["students", 1u32, 10u32], &options, fetch(calls.clone())),
      client.fetch_query(query_key!["students", 1u32, 10u32], &options, fetch(calls.clone())),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(*a.unwrap(), vec![1, 2, 3]);
    assert_eq!(*b.unwrap(), vec![1, 2, 3]);
  }

  #[tokio::test]
  async fn test_distinct_keys_fetch_independently() {
    let client = QueryClient::new();
    let options = quick();

    let (a, b) = tokio::join!(
      client.fetch_query(query_key!["students", 1u32], &options, || async { Ok::<_, ApiError>(1) }),
      client.fetch_query(query_key!["students", 2u32], &options, || async { Ok::<_, ApiError>(2) }),
    );
    assert_eq!(*a.unwrap(), 1);
    assert_eq!(*b.unwrap(), 2);
    assert_eq!(client.keys().len(), 2);
  }

  #[tokio::test]
  async fn test_fresh_data_is_served_from_cache() {
    let client = QueryClient::new();
    let options = QueryOptions {
      stale_time: Duration::from_secs(60),
      ..quick()
    };
    let calls = Arc::new(AtomicU32::new(0));

    for _ in 0..3 {
      let calls = calls.clone();
      let value = client
        .fetch_query(query_key!["categories"], &options, move || {
          let calls = calls.clone();
          async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ApiError>("cafes")
          }
        })
        .await
        .unwrap();
      assert_eq!(*value, "cafes");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_superseded_response_is_discarded() {
    let client = QueryClient::new();
    let key = query_key!["merchants", 1u32, 10u32];
    let options = quick();
    let calls = Arc::new(AtomicU32::new(0));

    let fetcher = {
      let calls = calls.clone();
      erase(move || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
          if n == 0 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, ApiError>("old")
          } else {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok("new")
          }
        }
      })
    };

    let Lookup::Pending(first) = client.lookup(&key, &options, &fetcher, false) else {
      panic!("expected a request");
    };
    let Lookup::Pending(second) = client.lookup(&key, &options, &fetcher, true) else {
      panic!("expected a request");
    };

    second.await.unwrap();
    first.await.unwrap();

    assert_eq!(client.query_data::<&str>(&key).as_deref(), Some(&"new"));
    let state = client.query_state(&key).unwrap();
    assert!(!state.is_fetching);
    assert_eq!(state.status, QueryStatus::Success);
  }

  #[tokio::test]
  async fn test_request_from_before_clear_is_discarded() {
    let client = QueryClient::new();
    let key = query_key!["auth", "me"];
    let options = quick();

    let old = erase(|| async {
      tokio::time::sleep(Duration::from_millis(100)).await;
      Ok::<_, ApiError>("old-session")
    });
    let Lookup::Pending(first) = client.lookup(&key, &options, &old, false) else {
      panic!("expected a request");
    };

    client.clear();

    let fresh = client
      .fetch_query(key.clone(), &options, || async { Ok::<_, ApiError>("new-session") })
      .await
      .unwrap();
    assert_eq!(*fresh, "new-session");

    first.await.unwrap();
    assert_eq!(client.query_data::<&str>(&key).as_deref(), Some(&"new-session"));
    assert!(!client.query_state(&key).unwrap().is_fetching);
  }

  #[tokio::test]
  async fn test_failure_keeps_last_good_data() {
    let client = QueryClient::new();
    let key = query_key!["students", 1u32, 10u32];
    client.set_query_data(key.clone(), 41u32);

    let result = client
      .fetch_query::<u32, _, _>(key.clone(), &quick(), || async { Err(failure("boom")) })
      .await;

    assert_eq!(result.unwrap_err().user_message(), "boom");
    assert_eq!(client.query_data::<u32>(&key).as_deref(), Some(&41));
    let state = client.query_state(&key).unwrap();
    assert_eq!(state.status, QueryStatus::Error);
    assert!(state.error.is_some());
  }

  #[tokio::test]
  async fn test_retry_until_success() {
    let client = QueryClient::new();
    let calls = Arc::new(AtomicU32::new(0));
    let options = QueryOptions {
      retry: 3,
      retry_delay: Duration::from_millis(1),
      ..QueryOptions::default()
    };

    let value = {
      let calls = calls.clone();
      client
        .fetch_query(query_key!["kys", "s1"], &options, move || {
          let n = calls.fetch_add(1, Ordering::SeqCst);
          async move {
            if n < 2 {
              Err(failure("flaky"))
            } else {
              Ok(n)
            }
          }
        })
        .await
        .unwrap()
    };

    assert_eq!(*value, 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
  }

  #[tokio::test]
  async fn test_on_error_fires_once_after_retries() {
    let client = QueryClient::new();
    let errors = Arc::new(AtomicU32::new(0));
    let options = {
      let errors = errors.clone();
      QueryOptions {
        retry: 2,
        retry_delay: Duration::from_millis(1),
        ..QueryOptions::default()
      }
      .on_error(move |_| {
        errors.fetch_add(1, Ordering::SeqCst);
      })
    };

    let result = client
      .fetch_query::<u32, _, _>(query_key!["kys", "s1"], &options, || async { Err(failure("down")) })
      .await;
    assert!(result.is_err());
    assert_eq!(errors.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn test_retry_delay_doubles_and_caps() {
    let base = Duration::from_secs(1);
    assert_eq!(retry_delay(base, 0), Duration::from_secs(1));
    assert_eq!(retry_delay(base, 1), Duration::from_secs(2));
    assert_eq!(retry_delay(base, 3), Duration::from_secs(8));
    assert_eq!(retry_delay(base, 10), Duration::from_secs(30));
    assert_eq!(retry_delay(base, 40), Duration::from_secs(30));
  }

  #[tokio::test]
  async fn test_invalidate_touches_only_matching_keys() {
    let client = QueryClient::new();
    client.set_query_data(query_key!["merchants", 1u32, 10u32, None::<&str>], 1u32);
    client.set_query_data(query_key!["merchants", 2u32, 10u32, None::<&str>], 2u32);
    client.set_query_data(query_key!["merchant", "m1"], 3u32);
    client.set_query_data(query_key!["categories"], 4u32);

    let touched = client.invalidate_queries(&query_key!["merchants"]);
    assert_eq!(
      touched,
      vec![
        query_key!["merchants", 1u32, 10u32, None::<&str>],
        query_key!["merchants", 2u32, 10u32, None::<&str>],
      ]
    );

    for key in &touched {
      let state = client.query_state(key).unwrap();
      assert!(state.invalidated);
      assert!(!state.is_fetching, "no observer is mounted");
    }
    assert!(!client.query_state(&query_key!["merchant", "m1"]).unwrap().invalidated);
    assert!(!client.query_state(&query_key!["categories"]).unwrap().invalidated);
    assert_eq!(client.query_data::<u32>(&query_key!["categories"]).as_deref(), Some(&4));
  }

  #[tokio::test]
  async fn test_invalidate_refetches_mounted_key() {
    let client = QueryClient::new();
    let key = query_key!["categories"];
    let calls = Arc::new(AtomicU32::new(0));
    let fetcher = {
      let calls = calls.clone();
      erase(move || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move { Ok::<_, ApiError>(n + 100) }
      })
    };

    client.set_query_data(key.clone(), 0u32);
    client.mount(&key, fetcher, quick());
    let mut rx = client.subscribe(&key);

    client.invalidate_queries(&query_key!["categories"]);
    assert!(client.query_state(&key).unwrap().is_fetching);

    while client.query_state(&key).unwrap().is_fetching {
      rx.changed().await.unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(client.query_data::<u32>(&key).as_deref(), Some(&100));
    assert!(!client.query_state(&key).unwrap().invalidated);

    client.unmount(&key);
    client.invalidate_queries(&key);
    assert!(!client.query_state(&key).unwrap().is_fetching);
  }

  #[tokio::test]
  async fn test_type_mismatch_is_reported() {
    let client = QueryClient::new();
    let options = QueryOptions {
      stale_time: Duration::from_secs(60),
      ..quick()
    };
    client.set_query_data(query_key!["student", "s1"], "a string");

    let err = client
      .fetch_query::<u32, _, _>(query_key!["student", "s1"], &options, || async { Ok(1) })
      .await
      .unwrap_err();
    assert!(matches!(*err, ApiError::CacheType(_)));
    assert!(client.query_data::<u32>(&query_key!["student", "s1"]).is_none());
  }
}
