//! One method per backend endpoint, grouped by resource.
//!
//! These never catch: every failure propagates to the caller as an
//! [`ApiError`](super::ApiError). Inputs are forwarded unvalidated.

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

pub use upload::FileUpload;

#[cfg(test)]
pub(crate) mod test_support {
  use crate::api::{Api, HttpClient};
  use crate::session::{MemorySessionStore, SessionStore};
  use std::sync::Arc;
  use wiremock::MockServer;

  pub fn api(server: &MockServer) -> Api {
    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_token("abc123"));
    Api::new(HttpClient::new(server.uri(), session))
  }

  pub fn page(list: &str, items: serde_json::Value) -> serde_json::Value {
    let count = items.as_array().map(|a| a.len()).unwrap_or_default();
    serde_json::json!({
      "data": {
        list: items,
        "pagination": { "page": 1, "limit": 10, "totalPages": 1, "totalDocs": count }
      }
    })
  }
}
