use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub api: ApiConfig,
  #[serde(default)]
  pub guard: GuardConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  #[serde(default)]
  pub ui: UiConfig,
  #[serde(default)]
  pub session: SessionConfig,
}

/// How the session token is presented in the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
  /// `Authorization: Token <token>`
  #[default]
  Token,
  /// `Authorization: Bearer <token>`
  Bearer,
}

impl AuthScheme {
  pub fn header_value(&self, token: &str) -> String {
    match self {
      AuthScheme::Token => format!("Token {}", token),
      AuthScheme::Bearer => format!("Bearer {}", token),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  pub url: String,
  /// Alternate base for requests flagged `is_mocked_url`
  pub mock_url: Option<String>,
  #[serde(default)]
  pub auth_scheme: AuthScheme,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuardConfig {
  /// Scheme used by the session check, independent of `api.auth_scheme`
  #[serde(default)]
  pub auth_scheme: AuthScheme,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  #[serde(default)]
  pub stale_time_secs: u64,
  #[serde(default = "default_retry")]
  pub retry: u32,
  #[serde(default = "default_retry_delay_ms")]
  pub retry_delay_ms: u64,
}

fn default_retry() -> u32 {
  3
}

fn default_retry_delay_ms() -> u64 {
  1000
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      stale_time_secs: 0,
      retry: default_retry(),
      retry_delay_ms: default_retry_delay_ms(),
    }
  }
}

impl CacheConfig {
  pub fn stale_time(&self) -> Duration {
    Duration::from_secs(self.stale_time_secs)
  }

  pub fn retry_delay(&self) -> Duration {
    Duration::from_millis(self.retry_delay_ms)
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
  #[serde(default = "default_page_size")]
  pub page_size: u32,
}

fn default_page_size() -> u32 {
  10
}

impl Default for UiConfig {
  fn default() -> Self {
    Self {
      page_size: default_page_size(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
  /// Override for the session database location
  pub path: Option<PathBuf>,
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./sconto-admin.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/sconto-admin/config.yaml
  ///
  /// `SCONTO_API_URL` overrides `api.url` afterwards.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => return Err(eyre!(Self::missing_config_message())),
    };

    if let Ok(url) = std::env::var("SCONTO_API_URL") {
      config.api.url = url;
    }

    Ok(config)
  }

  /// Implicit locations, in search order.
  fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("sconto-admin.yaml")];
    if let Some(config_dir) = dirs::config_dir() {
      paths.push(config_dir.join("sconto-admin").join("config.yaml"));
    }
    paths
  }

  fn find_config_file() -> Option<PathBuf> {
    Self::search_paths().into_iter().find(|p| p.exists())
  }

  fn missing_config_message() -> String {
    let searched: Vec<String> = Self::search_paths()
      .iter()
      .map(|p| format!("  {}", p.display()))
      .collect();
    format!(
      "No configuration file found. Create one of:\n{}\nSee config.example.yaml for the format.",
      searched.join("\n")
    )
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents).map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn parse(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Base URL for `is_mocked_url` requests; the main URL when none is set.
  pub fn mock_url(&self) -> &str {
    self.api.mock_url.as_deref().unwrap_or(&self.api.url)
  }

  /// Get the login password from the environment.
  ///
  /// Checks SCONTO_ADMIN_PASSWORD.
  pub fn get_password() -> Result<String> {
    std::env::var("SCONTO_ADMIN_PASSWORD").map_err(|_| {
      eyre!("Password not provided. Pass --password or set SCONTO_ADMIN_PASSWORD.")
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_config_names_every_searched_path() {
    let message = Config::missing_config_message();
    for path in Config::search_paths() {
      assert!(message.contains(&path.display().to_string()), "{}", message);
    }
    assert!(message.contains("sconto-admin.yaml"));
  }

  #[test]
  fn test_minimal_config_uses_defaults() {
    let config = Config::parse("api:\n  url: https://api.example.com\n").unwrap();

    assert_eq!(config.api.url, "https://api.example.com");
    assert_eq!(config.api.auth_scheme, AuthScheme::Token);
    assert_eq!(config.guard.auth_scheme, AuthScheme::Token);
    assert_eq!(config.cache.retry, 3);
    assert_eq!(config.cache.stale_time(), Duration::ZERO);
    assert_eq!(config.ui.page_size, 10);
    assert_eq!(config.mock_url(), "https://api.example.com");
  }

  #[test]
  fn test_full_config() {
    let yaml = r#"
api:
  url: https://api.example.com
  mock_url: http://localhost:4000
  auth_scheme: bearer
guard:
  auth_scheme: bearer
cache:
  stale_time_secs: 30
  retry: 0
  retry_delay_ms: 10
ui:
  page_size: 25
"#;
    let config = Config::parse(yaml).unwrap();

    assert_eq!(config.mock_url(), "http://localhost:4000");
    assert_eq!(config.api.auth_scheme, AuthScheme::Bearer);
    assert_eq!(config.guard.auth_scheme, AuthScheme::Bearer);
    assert_eq!(config.cache.retry, 0);
    assert_eq!(config.cache.retry_delay(), Duration::from_millis(10));
    assert_eq!(config.ui.page_size, 25);
  }

  #[test]
  fn test_missing_explicit_path_is_error() {
    let err = Config::load(Some(Path::new("/nonexistent/sconto.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
  }

  #[test]
  fn test_auth_scheme_header_value() {
    assert_eq!(AuthScheme::Token.header_value("abc"), "Token abc");
    assert_eq!(AuthScheme::Bearer.header_value("abc"), "Bearer abc");
  }
}
