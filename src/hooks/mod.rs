//! Data-fetching hooks: resource requests bound to the query cache.
//!
//! Read hooks return a [`QueryDef`] for a view to mount through a
//! [`QueryObserver`]. Mutation hooks run the request, then invalidate the
//! keys they declare and notify the user.

pub mod keys;

mod auth;
mod institutions;
mod kys;
mod merchants;
mod social_events;
mod staff;
mod stores;
mod students;
mod subjects;
mod upload;

use std::future::Future;
use std::sync::Arc;

use crate::api::{Api, ApiError};
use crate::config::Config;
use crate::notify::{Notification, Notifier};
use crate::query::{MutationSpec, QueryClient, QueryDef, QueryKey, QueryObserver, QueryOptions};

/// API client, query cache and notifier wired together.
#[derive(Clone)]
pub struct Hooks {
  api: Api,
  queries: QueryClient,
  notifier: Arc<dyn Notifier>,
  defaults: QueryOptions,
}

impl Hooks {
  pub fn new(api: Api, queries: QueryClient, notifier: Arc<dyn Notifier>) -> Self {
    Self {
      api,
      queries,
      notifier,
      defaults: QueryOptions::default(),
    }
  }

  pub fn from_config(config: &Config, api: Api, notifier: Arc<dyn Notifier>) -> Self {
    Self::new(api, QueryClient::new(), notifier).with_defaults(QueryOptions::from_config(&config.cache))
  }

  pub fn with_defaults(mut self, defaults: QueryOptions) -> Self {
    self.defaults = defaults;
    self
  }

  pub fn api(&self) -> &Api {
    &self.api
  }

  pub fn queries(&self) -> &QueryClient {
    &self.queries
  }

  pub fn notifier(&self) -> &Arc<dyn Notifier> {
    &self.notifier
  }

  /// Unmounted observer for `def`.
  pub fn observe<T: Send + Sync + 'static>(&self, def: QueryDef<T>) -> QueryObserver<T> {
    QueryObserver::new(self.queries.clone(), def)
  }

  fn options(&self) -> QueryOptions {
    self.defaults.clone()
  }

  /// Options that also raise a notification when the query fails.
  fn notifying_options(&self, title: &'static str) -> QueryOptions {
    let notifier = self.notifier.clone();
    self
      .options()
      .on_error(move |err| notifier.notify(Notification::error(title, err.user_message())))
  }

  fn query<T, F, Fut>(&self, key: QueryKey, options: QueryOptions, fetch: F) -> QueryDef<T>
  where
    T: Send + Sync + 'static,
    F: Fn(Api) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
  {
    let api = self.api.clone();
    QueryDef::new(key, options, move || fetch(api.clone()))
  }

  async fn mutate<R, Fut>(&self, spec: MutationSpec<R>, request: Fut) -> Result<R, ApiError>
  where
    Fut: Future<Output = Result<R, ApiError>>,
  {
    spec.run(&self.queries, self.notifier.as_ref(), request).await
  }
}

#[cfg(test)]
pub(crate) mod test_support {
  use super::*;
  use crate::api::HttpClient;
  use crate::notify::RecordingNotifier;
  use crate::session::{MemorySessionStore, SessionStore};
  use serde_json::Value;
  use std::time::Duration;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  pub struct Fixture {
    pub server: MockServer,
    pub hooks: Hooks,
    pub notifier: Arc<RecordingNotifier>,
    pub session: Arc<MemorySessionStore>,
  }

  /// One key per read hook, so tests can see exactly what a mutation touches.
  pub fn universe() -> Vec<QueryKey> {
    vec![
      keys::merchants(1, 10, None),
      keys::merchants(2, 10, Some("chai")),
      keys::merchant("m1"),
      keys::merchant("m2"),
      keys::merchant_categories(),
      keys::categories(),
      keys::staffs(1, 10),
      keys::staffs_by_merchant("m1"),
      keys::staffs_by_store("st1"),
      keys::store_location("st1"),
      keys::store_locations("m1", 1, 10),
      keys::institutions(1, 10),
      keys::kys("s1"),
      keys::kys("s2"),
      keys::students(1, 10),
      keys::student("s1"),
      keys::student("s2"),
      keys::student_leads(1, 10),
      keys::job_applicants(1, 10),
      keys::contact_us(1, 10),
      keys::social_events(1, 10),
      keys::social_event_transactions("e1", Some(1), Some(10), None),
      keys::subjects(0, 10),
      keys::topics("sub1", 0, 10),
    ]
  }

  pub async fn fixture() -> Fixture {
    fixture_with_token(Some("abc123")).await
  }

  pub async fn fixture_with_token(token: Option<&str>) -> Fixture {
    let server = MockServer::start().await;
    let session = Arc::new(match token {
      Some(t) => MemorySessionStore::with_token(t),
      None => MemorySessionStore::new(),
    });
    let store: Arc<dyn SessionStore> = session.clone();
    let notifier = Arc::new(RecordingNotifier::new());
    let api = Api::new(HttpClient::new(server.uri(), store));
    let defaults = QueryOptions {
      retry: 0,
      retry_delay: Duration::from_millis(1),
      ..QueryOptions::default()
    };
    let hooks = Hooks::new(api, QueryClient::new(), notifier.clone()).with_defaults(defaults);

    Fixture {
      server,
      hooks,
      notifier,
      session,
    }
  }

  impl Fixture {
    pub fn seed(&self) {
      for key in universe() {
        self.hooks.queries().set_query_data(key, 0u8);
      }
    }

    /// Seeded keys currently marked stale by an invalidation.
    pub fn invalidated(&self) -> Vec<QueryKey> {
      universe()
        .into_iter()
        .filter(|key| {
          self
            .hooks
            .queries()
            .query_state(key)
            .map(|s| s.invalidated)
            .unwrap_or(false)
        })
        .collect()
    }

    pub async fn respond(&self, verb: &str, route: &str, status: u16, body: Value) {
      Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&self.server)
        .await;
    }
  }

  /// Universe keys covered by any of `prefixes`, in universe order.
  pub fn expect(prefixes: &[QueryKey]) -> Vec<QueryKey> {
    universe()
      .into_iter()
      .filter(|key| prefixes.iter().any(|p| key.starts_with(p)))
      .collect()
  }
}
