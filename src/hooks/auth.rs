use tracing::info;

use super::Hooks;
use crate::api::types::{ApiResponse, LoginPayload};
use crate::api::ApiError;
use crate::notify::Notification;
use crate::query::MutationSpec;
use crate::session::{fingerprint, SessionCookie};

impl Hooks {
  /// Log in and persist the session cookie.
  ///
  /// The cookie is written before the success notification so that any
  /// request triggered by it already carries the token.
  pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<LoginPayload>, ApiError> {
    let spec = MutationSpec::<ApiResponse<LoginPayload>>::new("Login")
      .notify_success(|res| Notification::success("Login successful", format!("Welcome {}", res.data.user.first_name)))
      .notify_error(|err| Notification::error("Login failed", err.user_message()));

    let session = self.api.session().clone();
    let request = async {
      let response = self.api.login(email, password).await?;
      session.save(&SessionCookie::new(response.data.token.as_str()))?;
      info!(session = %fingerprint(&response.data.token), "session created");
      Ok(response)
    };
    self.mutate(spec, request).await
  }

  /// Drop the session cookie and everything cached under it.
  pub fn logout(&self) -> Result<(), ApiError> {
    if let Some(token) = self.api.session().token()? {
      info!(session = %fingerprint(&token), "session cleared");
    }
    self.api.session().clear()?;
    self.queries.clear();
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use crate::hooks::test_support::fixture_with_token;
  use crate::notify::{Level, Notification};
  use crate::session::SessionStore;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, ResponseTemplate};

  #[tokio::test]
  async fn test_login_stores_cookie_and_welcomes_user() {
    let fx = fixture_with_token(None).await;
    Mock::given(method("POST"))
      .and(path("/v1/api/users/login/"))
      .and(body_json(json!({ "email": "a@b.com", "password": "secret1" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "data": {
          "user": { "id": 1, "first_name": "Asha", "last_name": "Rao", "email": "a@b.com" },
          "token": "abc123"
        }
      })))
      .mount(&fx.server)
      .await;

    fx.hooks.login("a@b.com", "secret1").await.unwrap();

    let cookie = fx.session.load().unwrap().unwrap();
    assert!(cookie.to_set_cookie_header().starts_with("token=abc123"));
    assert_eq!(fx.session.token().unwrap().as_deref(), Some("abc123"));
    assert_eq!(
      fx.notifier.take(),
      vec![Notification::success("Login successful", "Welcome Asha")]
    );
  }

  #[tokio::test]
  async fn test_failed_login_keeps_session_empty() {
    let fx = fixture_with_token(None).await;
    fx.respond("POST", "/v1/api/users/login/", 401, json!({ "message": "Invalid credentials" }))
      .await;

    let err = fx.hooks.login("a@b.com", "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(fx.session.token().unwrap().is_none());

    let notes = fx.notifier.take();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, Level::Error);
    assert_eq!(notes[0].title, "Login failed");
    assert_eq!(notes[0].message, "Invalid credentials");
  }

  #[tokio::test]
  async fn test_logout_clears_session_and_cache() {
    let fx = fixture_with_token(Some("abc123")).await;
    fx.seed();

    fx.hooks.logout().unwrap();

    assert!(fx.session.token().unwrap().is_none());
    assert!(fx.hooks.queries().keys().is_empty());
  }
}
