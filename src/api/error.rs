//! Error types for the request pipeline.

use thiserror::Error;

use crate::session::SessionError;

/// Message used when an error is constructed without one.
pub const DEFAULT_MESSAGE: &str = "Oops! Something went wrong";

/// Message used when a failed response body carries no `message` field.
pub const MISSING_BODY_MESSAGE: &str = "Something went wrong!";

/// Status assumed when a failure carries no status code.
pub const DEFAULT_CODE: u16 = 400;

/// A response whose status fell outside 200..=399.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiResponseError {
  pub code: u16,
  pub message: String,
}

impl ApiResponseError {
  pub fn new(message: impl Into<String>, code: u16) -> Self {
    let message = message.into();
    Self {
      message: if message.is_empty() {
        DEFAULT_MESSAGE.to_string()
      } else {
        message
      },
      code,
    }
  }

  /// Build the error for a failed response.
  ///
  /// `code` falls back to 400 and `message` to the "missing body" text.
  pub fn from_parts(code: Option<u16>, message: Option<&str>) -> Self {
    let message = message
      .filter(|m| !m.is_empty())
      .unwrap_or(MISSING_BODY_MESSAGE);
    Self::new(message, code.unwrap_or(DEFAULT_CODE))
  }
}

/// Everything a request can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Backend answered with a non 2xx/3xx status.
  #[error(transparent)]
  Response(#[from] ApiResponseError),

  /// Connection, DNS, TLS or timeout failure from the HTTP stack.
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),

  /// A successful response whose body did not match the declared type.
  #[error("failed to decode response (status {status}): {source}")]
  Decode {
    status: u16,
    #[source]
    source: serde_json::Error,
  },

  /// Request body could not be serialized.
  #[error("failed to encode request body: {0}")]
  Encode(#[source] serde_json::Error),

  /// A header name or value could not be encoded.
  #[error("invalid header: {0}")]
  InvalidHeader(String),

  /// Reading or writing the session cookie failed.
  #[error(transparent)]
  Session(#[from] SessionError),

  /// A cache slot held a value of a different type than the one requested.
  #[error("cache entry {0} holds a different type")]
  CacheType(String),
}

impl ApiError {
  /// HTTP status of a backend rejection, if this is one.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Response(e) => Some(e.code),
      ApiError::Decode { status, .. } => Some(*status),
      ApiError::Network(e) => e.status().map(|s| s.as_u16()),
      _ => None,
    }
  }

  /// The backend-provided message when there is one, otherwise the display text.
  pub fn user_message(&self) -> String {
    match self {
      ApiError::Response(e) => e.message.clone(),
      other => other.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_message_uses_default() {
    let err = ApiResponseError::new("", 500);
    assert_eq!(err.message, DEFAULT_MESSAGE);
    assert_eq!(err.code, 500);
  }

  #[test]
  fn test_from_parts_defaults() {
    let err = ApiResponseError::from_parts(None, None);
    assert_eq!(err.code, 400);
    assert_eq!(err.message, MISSING_BODY_MESSAGE);

    let err = ApiResponseError::from_parts(Some(404), Some("Merchant not found"));
    assert_eq!(err.code, 404);
    assert_eq!(err.message, "Merchant not found");
  }

  #[test]
  fn test_user_message_prefers_backend_text() {
    let err: ApiError = ApiResponseError::new("Email already taken", 409).into();
    assert_eq!(err.user_message(), "Email already taken");
    assert_eq!(err.status(), Some(409));
  }
}
