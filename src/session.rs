//! Session cookie persistence.
//!
//! The backend issues an opaque token on login. It is kept the way a browser
//! keeps the `token` cookie: path `/`, `SameSite=Strict`, 30 day lifetime.
//! Every outgoing request reads it; only login and logout write it.

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Name of the session cookie.
pub const COOKIE_NAME: &str = "token";

/// Cookie lifetime in days.
pub const SESSION_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("session storage error: {0}")]
  Storage(#[from] rusqlite::Error),
  #[error("failed to prepare session directory: {0}")]
  Io(#[from] std::io::Error),
  #[error("could not determine data directory")]
  NoDataDir,
  #[error("session lock poisoned")]
  Poisoned,
  #[error("corrupt session record: {0}")]
  Corrupt(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
  #[default]
  Strict,
  Lax,
  None,
}

impl SameSite {
  pub fn as_str(&self) -> &'static str {
    match self {
      SameSite::Strict => "Strict",
      SameSite::Lax => "Lax",
      SameSite::None => "None",
    }
  }

  fn parse(s: &str) -> Option<Self> {
    match s {
      "Strict" => Some(SameSite::Strict),
      "Lax" => Some(SameSite::Lax),
      "None" => Some(SameSite::None),
      _ => None,
    }
  }
}

/// The `token` cookie and its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
  pub value: String,
  pub path: String,
  pub same_site: SameSite,
  pub expires_at: DateTime<Utc>,
}

impl SessionCookie {
  /// A fresh session cookie valid for 30 days from now.
  pub fn new(token: impl Into<String>) -> Self {
    Self::issued_at(token, Utc::now())
  }

  pub fn issued_at(token: impl Into<String>, now: DateTime<Utc>) -> Self {
    Self {
      value: token.into(),
      path: "/".to_string(),
      same_site: SameSite::Strict,
      expires_at: now + Duration::days(SESSION_LIFETIME_DAYS),
    }
  }

  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    now >= self.expires_at
  }

  /// Render as a `Set-Cookie` header value.
  pub fn to_set_cookie_header(&self) -> String {
    format!(
      "{}={}; Path={}; Expires={}; SameSite={}",
      COOKIE_NAME,
      self.value,
      self.path,
      self.expires_at.format("%a, %d %b %Y %H:%M:%S GMT"),
      self.same_site.as_str()
    )
  }

  /// `Set-Cookie` value that removes the session cookie.
  pub fn removal_header() -> String {
    format!(
      "{}=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; SameSite=Strict",
      COOKIE_NAME
    )
  }
}

/// Parse a `Cookie:` request header into name/value pairs.
///
/// The first occurrence of a name wins; quoted values are unquoted.
pub fn parse_cookies(header: &str) -> HashMap<String, String> {
  let mut cookies = HashMap::new();
  for pair in header.split(';') {
    let Some((name, value)) = pair.split_once('=') else {
      continue;
    };
    let name = name.trim();
    if name.is_empty() {
      continue;
    }
    let value = value.trim();
    let value = value
      .strip_prefix('"')
      .and_then(|v| v.strip_suffix('"'))
      .unwrap_or(value);
    cookies
      .entry(name.to_string())
      .or_insert_with(|| value.to_string());
  }
  cookies
}

/// Short, log-safe fingerprint of a token.
pub fn fingerprint(token: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(token.as_bytes());
  let digest = hex::encode(hasher.finalize());
  digest[..12].to_string()
}

/// Where the session cookie lives between requests.
pub trait SessionStore: Send + Sync {
  /// The stored cookie, expired or not.
  fn load(&self) -> Result<Option<SessionCookie>, SessionError>;

  fn save(&self, cookie: &SessionCookie) -> Result<(), SessionError>;

  fn clear(&self) -> Result<(), SessionError>;

  /// Current token; expired cookies count as absent.
  fn token(&self) -> Result<Option<String>, SessionError> {
    let now = Utc::now();
    Ok(
      self
        .load()?
        .filter(|c| !c.is_expired(now))
        .map(|c| c.value),
    )
  }
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
  cookie: Mutex<Option<SessionCookie>>,
}

impl MemorySessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_token(token: impl Into<String>) -> Self {
    Self {
      cookie: Mutex::new(Some(SessionCookie::new(token))),
    }
  }
}

impl SessionStore for MemorySessionStore {
  fn load(&self) -> Result<Option<SessionCookie>, SessionError> {
    let cookie = self.cookie.lock().map_err(|_| SessionError::Poisoned)?;
    Ok(cookie.clone())
  }

  fn save(&self, cookie: &SessionCookie) -> Result<(), SessionError> {
    let mut slot = self.cookie.lock().map_err(|_| SessionError::Poisoned)?;
    *slot = Some(cookie.clone());
    Ok(())
  }

  fn clear(&self) -> Result<(), SessionError> {
    let mut slot = self.cookie.lock().map_err(|_| SessionError::Poisoned)?;
    *slot = None;
    Ok(())
  }
}

/// SQLite-backed session store so the cookie survives restarts.
pub struct SqliteSessionStore {
  conn: Mutex<Connection>,
}

const SESSION_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS session_cookie (
    name TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    path TEXT NOT NULL DEFAULT '/',
    same_site TEXT NOT NULL DEFAULT 'Strict',
    expires_at TEXT NOT NULL
);
"#;

impl SqliteSessionStore {
  /// Open the store at the default location.
  pub fn open_default() -> Result<Self, SessionError> {
    Self::open(&Self::default_path()?)
  }

  pub fn open(path: &Path) -> Result<Self, SessionError> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    conn.execute_batch(SESSION_SCHEMA)?;

    Ok(Self {
      conn: Mutex::new(conn),
    })
  }

  pub fn default_path() -> Result<PathBuf, SessionError> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or(SessionError::NoDataDir)?;

    Ok(data_dir.join("sconto-admin").join("session.db"))
  }
}

impl SessionStore for SqliteSessionStore {
  fn load(&self) -> Result<Option<SessionCookie>, SessionError> {
    let conn = self.conn.lock().map_err(|_| SessionError::Poisoned)?;

    let row: Option<(String, String, String, String)> = conn
      .query_row(
        "SELECT value, path, same_site, expires_at FROM session_cookie WHERE name = ?",
        params![COOKIE_NAME],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
      )
      .optional()?;

    let Some((value, path, same_site, expires_at)) = row else {
      return Ok(None);
    };

    let expires_at = DateTime::parse_from_rfc3339(&expires_at)
      .map_err(|e| SessionError::Corrupt(format!("expires_at '{}': {}", expires_at, e)))?
      .with_timezone(&Utc);
    let same_site = SameSite::parse(&same_site)
      .ok_or_else(|| SessionError::Corrupt(format!("same_site '{}'", same_site)))?;

    Ok(Some(SessionCookie {
      value,
      path,
      same_site,
      expires_at,
    }))
  }

  fn save(&self, cookie: &SessionCookie) -> Result<(), SessionError> {
    let conn = self.conn.lock().map_err(|_| SessionError::Poisoned)?;
    conn.execute(
      "INSERT OR REPLACE INTO session_cookie (name, value, path, same_site, expires_at)
       VALUES (?, ?, ?, ?, ?)",
      params![
        COOKIE_NAME,
        cookie.value,
        cookie.path,
        cookie.same_site.as_str(),
        cookie.expires_at.to_rfc3339()
      ],
    )?;
    Ok(())
  }

  fn clear(&self) -> Result<(), SessionError> {
    let conn = self.conn.lock().map_err(|_| SessionError::Poisoned)?;
    conn.execute(
      "DELETE FROM session_cookie WHERE name = ?",
      params![COOKIE_NAME],
    )?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_cookie_lifetime_is_thirty_days() {
    let now = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
    let cookie = SessionCookie::issued_at("abc123", now);

    assert_eq!(cookie.path, "/");
    assert_eq!(cookie.same_site, SameSite::Strict);
    assert!(!cookie.is_expired(now + Duration::days(29)));
    assert!(cookie.is_expired(now + Duration::days(30)));
  }

  #[test]
  fn test_set_cookie_header() {
    let now = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
    let cookie = SessionCookie::issued_at("abc123", now);

    assert_eq!(
      cookie.to_set_cookie_header(),
      "token=abc123; Path=/; Expires=Sat, 31 Oct 2026 12:00:00 GMT; SameSite=Strict"
    );
  }

  #[test]
  fn test_parse_cookies() {
    let cookies = parse_cookies("theme=dark; token=abc123;  lang=\"en\"; token=other");
    assert_eq!(cookies.get("token").map(String::as_str), Some("abc123"));
    assert_eq!(cookies.get("lang").map(String::as_str), Some("en"));
    assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
  }

  #[test]
  fn test_parse_cookies_ignores_garbage() {
    assert!(parse_cookies("").is_empty());
    assert!(parse_cookies(";;=x; novalue").is_empty());
  }

  #[test]
  fn test_memory_store_roundtrip() {
    let store = MemorySessionStore::new();
    assert_eq!(store.token().unwrap(), None);

    store.save(&SessionCookie::new("abc123")).unwrap();
    assert_eq!(store.token().unwrap().as_deref(), Some("abc123"));

    store.clear().unwrap();
    assert_eq!(store.token().unwrap(), None);
  }

  #[test]
  fn test_expired_cookie_is_absent() {
    let store = MemorySessionStore::new();
    let long_ago = Utc::now() - Duration::days(60);
    store
      .save(&SessionCookie::issued_at("stale", long_ago))
      .unwrap();

    assert!(store.load().unwrap().is_some());
    assert_eq!(store.token().unwrap(), None);
  }

  #[test]
  fn test_sqlite_store_persists_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.db");

    {
      let store = SqliteSessionStore::open(&path).unwrap();
      store.save(&SessionCookie::new("persisted")).unwrap();
    }

    let store = SqliteSessionStore::open(&path).unwrap();
    let cookie = store.load().unwrap().unwrap();
    assert_eq!(cookie.value, "persisted");
    assert_eq!(cookie.same_site, SameSite::Strict);

    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());
  }

  #[test]
  fn test_fingerprint_hides_token() {
    let fp = fingerprint("abc123");
    assert_eq!(fp.len(), 12);
    assert!(!fp.contains("abc123"));
    assert_eq!(fp, fingerprint("abc123"));
  }
}
