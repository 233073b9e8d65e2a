use reqwest::header::AUTHORIZATION;

use crate::api::types::{ApiResponse, LoginPayload, LoginRequest, UserPayload};
use crate::api::{Api, ApiError, Body, RequestOptions};
use crate::config::AuthScheme;

impl Api {
  /// Exchange credentials for a session token.
  pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<LoginPayload>, ApiError> {
    let body = Body::json(&LoginRequest {
      email: email.to_string(),
      password: password.to_string(),
    })?;
    self
      .http()
      .post("/v1/api/users/login/", body, RequestOptions::new())
      .await
  }

  /// Resolve the user behind `token`.
  ///
  /// The header is set explicitly so the check does not depend on the stored
  /// session.
  pub async fn verify_user(&self, token: &str, scheme: AuthScheme) -> Result<ApiResponse<UserPayload>, ApiError> {
    let options = RequestOptions::new().header(AUTHORIZATION.as_str(), &scheme.header_value(token))?;
    self.http().get("/v1/api/users/me/", options).await
  }
}
