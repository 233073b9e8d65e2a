//! Session gate for protected pages.
//!
//! The cookie's token is checked against the backend on every call; there is
//! no local cache of who is logged in. Any failure turns into a redirect to
//! the login page.

use std::future::Future;
use tracing::debug;

use crate::api::types::User;
use crate::api::Api;
use crate::config::{AuthScheme, Config};
use crate::session::{fingerprint, parse_cookies, COOKIE_NAME};

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/";

/// The verified user and the token that proved it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
  pub user: User,
  pub token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome<T = AuthContext> {
  Render(T),
  Redirect { destination: String, permanent: bool },
}

impl<T> GuardOutcome<T> {
  fn to_login() -> Self {
    GuardOutcome::Redirect {
      destination: LOGIN_PATH.to_string(),
      permanent: true,
    }
  }

  pub fn is_redirect(&self) -> bool {
    matches!(self, GuardOutcome::Redirect { .. })
  }
}

#[derive(Clone)]
pub struct SessionGuard {
  api: Api,
  scheme: AuthScheme,
}

impl SessionGuard {
  pub fn new(api: Api, scheme: AuthScheme) -> Self {
    Self { api, scheme }
  }

  pub fn from_config(config: &Config, api: Api) -> Self {
    Self::new(api, config.guard.auth_scheme)
  }

  /// Gate a request by its `Cookie:` header.
  pub async fn check(&self, cookie_header: Option<&str>) -> GuardOutcome {
    let token = cookie_header
      .map(parse_cookies)
      .and_then(|mut cookies| cookies.remove(COOKIE_NAME));
    self.check_token(token.as_deref()).await
  }

  /// Gate on a bare token, e.g. one read from the session store.
  pub async fn check_token(&self, token: Option<&str>) -> GuardOutcome {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
      debug!("no session cookie, redirecting to login");
      return GuardOutcome::to_login();
    };

    match self.api.verify_user(token, self.scheme).await {
      Ok(response) => GuardOutcome::Render(AuthContext {
        user: response.data.user,
        token: token.to_string(),
      }),
      Err(err) => {
        debug!(session = %fingerprint(token), error = %err, "session rejected, redirecting to login");
        GuardOutcome::to_login()
      }
    }
  }

  /// Run `handler` only for an authenticated request.
  pub async fn with_auth<R, F, Fut>(&self, cookie_header: Option<&str>, handler: F) -> GuardOutcome<R>
  where
    F: FnOnce(AuthContext) -> Fut,
    Fut: Future<Output = R>,
  {
    match self.check(cookie_header).await {
      GuardOutcome::Render(ctx) => GuardOutcome::Render(handler(ctx).await),
      GuardOutcome::Redirect { destination, permanent } => GuardOutcome::Redirect { destination, permanent },
    }
  }
}
