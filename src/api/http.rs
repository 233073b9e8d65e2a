//! Request transport: one HTTP call in, a typed value or a typed failure out.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::error::{ApiError, ApiResponseError};
use crate::config::{AuthScheme, Config};
use crate::session::SessionStore;

/// Per-call overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
  /// Use this base URL instead of the configured one
  pub base_url: Option<String>,
  /// Use the configured mock base URL
  pub is_mocked_url: bool,
  /// Merged over the default headers
  pub headers: HeaderMap,
  /// Body is a multipart payload; no JSON content type
  pub has_files: bool,
}

impl RequestOptions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a caller header, replacing any earlier value for the same name.
  pub fn header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
    let name = HeaderName::from_bytes(name.as_bytes())
      .map_err(|e| ApiError::InvalidHeader(format!("{}: {}", name, e)))?;
    let value =
      HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader(format!("{}: {}", name, e)))?;
    self.headers.insert(name, value);
    Ok(self)
  }

  pub fn with_files(mut self) -> Self {
    self.has_files = true;
    self
  }

  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = Some(base_url.into());
    self
  }

  pub fn mocked(mut self) -> Self {
    self.is_mocked_url = true;
    self
  }
}

/// Request payload.
#[derive(Debug, Default)]
pub enum Body {
  #[default]
  Empty,
  /// Serialized as JSON unless the request has files
  Json(Value),
  /// Sent as-is; the caller builds the form
  Multipart(Form),
}

impl Body {
  pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
    serde_json::to_value(body)
      .map(Body::Json)
      .map_err(ApiError::Encode)
  }
}

/// Compose request headers.
///
/// Defaults first, caller headers replace same-named defaults, `Content-Type`
/// is dropped for file uploads, and the session token is attached unless the
/// caller already supplied an `Authorization` header.
pub fn compose_headers(
  caller: &HeaderMap,
  has_files: bool,
  token: Option<&str>,
  scheme: AuthScheme,
) -> Result<HeaderMap, ApiError> {
  let mut headers = HeaderMap::new();
  headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
  headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

  for name in caller.keys() {
    headers.remove(name);
  }
  for (name, value) in caller {
    headers.append(name.clone(), value.clone());
  }

  if has_files {
    headers.remove(CONTENT_TYPE);
  }

  if let Some(token) = token {
    if !headers.contains_key(AUTHORIZATION) {
      let value = HeaderValue::from_str(&scheme.header_value(token))
        .map_err(|e| ApiError::InvalidHeader(format!("authorization: {}", e)))?;
      headers.insert(AUTHORIZATION, value);
    }
  }

  Ok(headers)
}

/// Status policy: anything outside 200..=399 is a failure.
pub fn check_status(status: u16, body: &Value) -> Result<(), ApiResponseError> {
  if (200..=399).contains(&status) {
    return Ok(());
  }
  let message = body.get("message").and_then(Value::as_str);
  Err(ApiResponseError::from_parts(Some(status), message))
}

/// HTTP client bound to a base URL and a session store.
#[derive(Clone)]
pub struct HttpClient {
  client: reqwest::Client,
  base_url: String,
  mock_url: String,
  auth_scheme: AuthScheme,
  session: Arc<dyn SessionStore>,
}

impl HttpClient {
  pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
    let base_url = base_url.into();
    Self {
      client: reqwest::Client::new(),
      mock_url: base_url.clone(),
      base_url,
      auth_scheme: AuthScheme::default(),
      session,
    }
  }

  pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> Self {
    Self::new(config.api.url.clone(), session)
      .with_mock_url(config.mock_url())
      .with_auth_scheme(config.api.auth_scheme)
  }

  pub fn with_mock_url(mut self, mock_url: impl Into<String>) -> Self {
    self.mock_url = mock_url.into();
    self
  }

  pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
    self.auth_scheme = scheme;
    self
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn session(&self) -> &Arc<dyn SessionStore> {
    &self.session
  }

  /// Resolve the full URL: mock base, then per-call base, then configured base.
  pub fn url(&self, path: &str, options: &RequestOptions) -> String {
    let base = if options.is_mocked_url {
      self.mock_url.as_str()
    } else if let Some(base) = options.base_url.as_deref() {
      base
    } else {
      self.base_url.as_str()
    };
    format!("{}{}", base, path)
  }

  pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
    self.request(Method::GET, path, Body::Empty, options).await
  }

  pub async fn post<T: DeserializeOwned>(
    &self,
    path: &str,
    body: Body,
    options: RequestOptions,
  ) -> Result<T, ApiError> {
    self.request(Method::POST, path, body, options).await
  }

  pub async fn put<T: DeserializeOwned>(
    &self,
    path: &str,
    body: Body,
    options: RequestOptions,
  ) -> Result<T, ApiError> {
    self.request(Method::PUT, path, body, options).await
  }

  pub async fn patch<T: DeserializeOwned>(
    &self,
    path: &str,
    body: Body,
    options: RequestOptions,
  ) -> Result<T, ApiError> {
    self.request(Method::PATCH, path, body, options).await
  }

  pub async fn delete<T: DeserializeOwned>(
    &self,
    path: &str,
    body: Body,
    options: RequestOptions,
  ) -> Result<T, ApiError> {
    self.request(Method::DELETE, path, body, options).await
  }

  /// Issue one request and decode the response.
  pub async fn request<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    body: Body,
    options: RequestOptions,
  ) -> Result<T, ApiError> {
    let url = self.url(path, &options);
    let has_files = options.has_files || matches!(body, Body::Multipart(_));
    let token = self.session.token()?;
    let headers = compose_headers(&options.headers, has_files, token.as_deref(), self.auth_scheme)?;

    let mut builder = self.client.request(method.clone(), &url).headers(headers);
    builder = match body {
      Body::Empty => builder,
      Body::Json(value) => builder.body(value.to_string()),
      Body::Multipart(form) => builder.multipart(form),
    };

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let bytes = response.bytes().await?;

    debug!(%method, path, status, "request completed");

    let value: Value = if bytes.is_empty() {
      Value::Null
    } else {
      match serde_json::from_slice(&bytes) {
        Ok(value) => value,
        Err(source) => {
          check_status(status, &Value::Null)?;
          return Err(ApiError::Decode { status, source });
        }
      }
    };

    check_status(status, &value)?;

    serde_json::from_value(value).map_err(|source| ApiError::Decode { status, source })
  }
}
