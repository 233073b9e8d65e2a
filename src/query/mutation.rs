use std::future::Future;
use tracing::{info, warn};

use super::{QueryClient, QueryKey};
use crate::api::ApiError;
use crate::notify::{Notification, Notifier};

type KeysFrom<R> = Box<dyn FnOnce(&R) -> Vec<QueryKey> + Send>;
type SuccessNote<R> = Box<dyn FnOnce(&R) -> Notification + Send>;
type ErrorNote = Box<dyn FnOnce(&ApiError) -> Notification + Send>;

/// Declaration of one write: the keys it makes stale and what the user sees.
///
/// Invalidations are listed by hand per mutation; nothing is inferred.
pub struct MutationSpec<R> {
  name: &'static str,
  invalidates: Vec<QueryKey>,
  invalidates_from: Option<KeysFrom<R>>,
  on_success: Option<SuccessNote<R>>,
  on_error: ErrorNote,
}

impl<R> MutationSpec<R> {
  /// A mutation with no invalidations and a generic error notification
  /// titled "`<name>` failed".
  pub fn new(name: &'static str) -> Self {
    Self {
      name,
      invalidates: Vec::new(),
      invalidates_from: None,
      on_success: None,
      on_error: Box::new(move |err| Notification::error(format!("{} failed", name), err.user_message())),
    }
  }

  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn invalidates(mut self, key: QueryKey) -> Self {
    self.invalidates.push(key);
    self
  }

  /// Keys that depend on the response, e.g. the id of the updated record.
  pub fn invalidates_from(mut self, keys: impl FnOnce(&R) -> Vec<QueryKey> + Send + 'static) -> Self {
    self.invalidates_from = Some(Box::new(keys));
    self
  }

  pub fn notify_success(mut self, note: impl FnOnce(&R) -> Notification + Send + 'static) -> Self {
    self.on_success = Some(Box::new(note));
    self
  }

  pub fn notify_error(mut self, note: impl FnOnce(&ApiError) -> Notification + Send + 'static) -> Self {
    self.on_error = Box::new(note);
    self
  }

  /// Keys declared up front, not counting response-derived ones.
  pub fn declared_keys(&self) -> &[QueryKey] {
    &self.invalidates
  }

  /// Await `request` to completion, then invalidate and notify.
  ///
  /// No retries. The error is returned after the error notification fires.
  pub async fn run<Fut>(self, client: &QueryClient, notifier: &dyn Notifier, request: Fut) -> Result<R, ApiError>
  where
    Fut: Future<Output = Result<R, ApiError>>,
  {
    match request.await {
      Ok(response) => {
        let mut keys = self.invalidates;
        if let Some(from) = self.invalidates_from {
          keys.extend(from(&response));
        }
        for key in &keys {
          client.invalidate_queries(key);
        }
        info!(mutation = self.name, invalidated = keys.len(), "mutation succeeded");
        if let Some(note) = self.on_success {
          notifier.notify(note(&response));
        }
        Ok(response)
      }
      Err(err) => {
        warn!(mutation = self.name, error = %err, "mutation failed");
        notifier.notify((self.on_error)(&err));
        Err(err)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::ApiResponseError;
  use crate::notify::{Level, RecordingNotifier};
  use crate::query_key;

  fn seeded() -> QueryClient {
    let client = QueryClient::new();
    client.set_query_data(query_key!["merchants", 1u32, 10u32], 1u32);
    client.set_query_data(query_key!["merchant", "m1"], 2u32);
    client.set_query_data(query_key!["categories"], 3u32);
    client
  }

  #[tokio::test]
  async fn test_success_invalidates_declared_and_derived_keys() {
    let client = seeded();
    let notifier = RecordingNotifier::new();

    let spec = MutationSpec::<String>::new("Toggle featured")
      .invalidates(query_key!["merchants"])
      .invalidates_from(|id| vec![query_key!["merchant", id.as_str()]])
      .notify_success(|_| Notification::success("Success", "Merchant updated"));

    let result = spec
      .run(&client, &notifier, async { Ok::<_, ApiError>("m1".to_string()) })
      .await
      .unwrap();
    assert_eq!(result, "m1");

    assert!(client.query_state(&query_key!["merchants", 1u32, 10u32]).unwrap().invalidated);
    assert!(client.query_state(&query_key!["merchant", "m1"]).unwrap().invalidated);
    assert!(!client.query_state(&query_key!["categories"]).unwrap().invalidated);
    assert_eq!(notifier.take(), vec![Notification::success("Success", "Merchant updated")]);
  }

  #[tokio::test]
  async fn test_failure_notifies_and_invalidates_nothing() {
    let client = seeded();
    let notifier = RecordingNotifier::new();

    let err = MutationSpec::<()>::new("Create category")
      .invalidates(query_key!["categories"])
      .run(&client, &notifier, async {
        Err(ApiResponseError::new("Name taken", 409).into())
      })
      .await
      .unwrap_err();

    assert_eq!(err.status(), Some(409));
    assert!(!client.query_state(&query_key!["categories"]).unwrap().invalidated);
    let notes = notifier.take();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].title, "Create category failed");
    assert_eq!(notes[0].message, "Name taken");
  }
}
