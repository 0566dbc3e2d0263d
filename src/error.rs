//! Error Types - Uniform Failure Classification
//!
//! Every fallible operation in the crate resolves to one of three
//! kinds: a validation failure raised before any network traffic, a
//! transport failure that survived retries, or a non-2xx API response.
//! Retries are invisible to callers; nothing is suppressed.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Boxed error carried by transports as the underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SongstatsError>;

/// Errors produced by the Songstats client.
#[derive(Debug, Error)]
pub enum SongstatsError {
  /// A required parameter was missing or empty. Raised locally,
  /// before any request is sent, and never retried.
  #[error("{message}")]
  Validation {
    /// Description of the failed rule.
    message: String,
  },

  /// The transport failed or timed out on every attempt.
  #[error("transport error: {message}")]
  Transport {
    /// Description of the last failure.
    message: String,
    /// Underlying cause reported by the transport, when one exists.
    #[source]
    source: Option<BoxError>,
  },

  /// The API answered with a non-2xx status that was not eligible
  /// for retry, or kept failing after retries.
  #[error("Songstats API error ({status}): {message}")]
  Api {
    /// HTTP status code.
    status: u16,
    /// Message extracted from the response payload.
    message: String,
    /// Parsed response payload.
    payload: Value,
    /// Response headers, lowercased names, last value wins.
    headers: HashMap<String, String>,
  },
}

impl SongstatsError {
  /// Build a validation error.
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation {
      message: message.into(),
    }
  }

  /// HTTP status for API errors, `None` for the other kinds.
  #[must_use]
  pub fn status_code(&self) -> Option<u16> {
    match self {
      Self::Api { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// Whether this is a pre-network validation failure.
  #[must_use]
  pub fn is_validation(&self) -> bool {
    matches!(self, Self::Validation { .. })
  }

  /// Whether this is a transport-level failure.
  #[must_use]
  pub fn is_transport(&self) -> bool {
    matches!(self, Self::Transport { .. })
  }

  /// Whether this is a non-2xx API response.
  #[must_use]
  pub fn is_api(&self) -> bool {
    matches!(self, Self::Api { .. })
  }
}
