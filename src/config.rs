//! Client Configuration - Connection Tunables
//!
//! Externalizes everything the transport wrapper needs: credentials,
//! host, per-attempt timeout, and retry budget. All fields are fixed
//! at client construction and safe for concurrent reads.

use std::env;
use std::time::Duration;

use crate::error::{Result, SongstatsError};

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://data.songstats.com";

/// Default per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default `user-agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("songstats-rs/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "SONGSTATS_API_KEY";

/// Environment variable overriding the API host.
pub const ENV_BASE_URL: &str = "SONGSTATS_BASE_URL";

/// Configuration for `SongstatsClient`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Enterprise API key, sent as the `apikey` header on every
  /// request. Must be non-empty.
  pub api_key: String,
  /// API host, without the `/enterprise/v1` prefix. Trailing slashes
  /// are trimmed at client construction.
  pub base_url: String,
  /// Per-attempt timeout, covering connect through body read.
  pub timeout: Duration,
  /// Retries after the first attempt on transient failures. Zero
  /// disables retrying.
  pub max_retries: u32,
  /// Value of the `user-agent` header.
  pub user_agent: String,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_key: String::new(),
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout: DEFAULT_TIMEOUT,
      max_retries: DEFAULT_MAX_RETRIES,
      user_agent: DEFAULT_USER_AGENT.to_string(),
    }
  }
}

impl ClientConfig {
  /// Defaults with the given API key.
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key: api_key.into(),
      ..Self::default()
    }
  }

  /// Read configuration from the environment: `SONGSTATS_API_KEY`
  /// (required) and `SONGSTATS_BASE_URL` (optional host override).
  ///
  /// # Errors
  /// Returns a validation error when `SONGSTATS_API_KEY` is unset or
  /// empty.
  pub fn from_env() -> Result<Self> {
    let api_key = env::var(ENV_API_KEY)
      .ok()
      .filter(|key| !key.is_empty())
      .ok_or_else(|| SongstatsError::validation(format!("{ENV_API_KEY} is not set")))?;

    let mut config = Self::new(api_key);
    if let Some(base_url) = env::var(ENV_BASE_URL).ok().filter(|url| !url.is_empty()) {
      config.base_url = base_url;
    }
    Ok(config)
  }

  /// Override the API host.
  #[must_use]
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Override the per-attempt timeout.
  #[must_use]
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Override the retry budget.
  #[must_use]
  pub fn with_max_retries(mut self, max_retries: u32) -> Self {
    self.max_retries = max_retries;
    self
  }

  /// Override the `user-agent` header value.
  #[must_use]
  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.base_url, "https://data.songstats.com");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 2);
    assert!(config.api_key.is_empty());
    assert!(config.user_agent.starts_with("songstats-rs/"));
  }

  #[test]
  fn test_builder_overrides() {
    let config = ClientConfig::new("sk_test")
      .with_base_url("https://staging.songstats.com")
      .with_timeout(Duration::from_secs(5))
      .with_max_retries(0)
      .with_user_agent("custom-agent/1.0");
    assert_eq!(config.api_key, "sk_test");
    assert_eq!(config.base_url, "https://staging.songstats.com");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 0);
    assert_eq!(config.user_agent, "custom-agent/1.0");
  }
}
