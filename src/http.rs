//! HTTP Engine - Request Assembly, Retry, and Classification
//!
//! Drives an injected transport through the full request lifecycle:
//! URL and header assembly, per-attempt timeout, exponential backoff
//! on transient failures, payload parsing, and mapping of non-2xx
//! responses into typed errors. Resource façades all funnel through
//! `HttpClient::request`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::time::{sleep, timeout};
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Result, SongstatsError};
use crate::params::Params;
use crate::transport::{HttpTransport, Method, TransportRequest, TransportResponse};

/// Path prefix shared by every endpoint.
const API_PREFIX: &str = "/enterprise/v1/";

/// Base delay for exponential backoff between attempts.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

/// Statuses eligible for retry: rate limiting and transient server
/// errors.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

fn is_retryable_status(status: u16) -> bool {
  RETRYABLE_STATUSES.contains(&status)
}

/// Per-request options beyond method and path.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
  /// Query parameters.
  pub params: Params,
  /// JSON body. Mutation endpoints carry their arguments in the
  /// query string, so this stays `None` for every built-in façade.
  pub json: Option<Value>,
  /// Extra headers, replacing same-name defaults.
  pub headers: Vec<(String, String)>,
}

/// Transport wrapper shared by all resource façades.
pub struct HttpClient {
  /// Immutable connection settings.
  config: ClientConfig,
  /// Injected HTTP primitive.
  transport: Arc<dyn HttpTransport>,
}

impl HttpClient {
  /// Create a client over the given transport.
  ///
  /// # Errors
  /// Returns a validation error when the API key is empty.
  pub fn new(mut config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
    if config.api_key.is_empty() {
      return Err(SongstatsError::validation("api_key is required"));
    }
    config.base_url = config.base_url.trim_end_matches('/').to_string();
    Ok(Self { config, transport })
  }

  /// The active configuration.
  #[must_use]
  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  /// Issue a request and return the parsed payload.
  ///
  /// Transient failures (transport errors, timeouts, and the 429 /
  /// 500 / 502 / 503 / 504 statuses) are retried with exponential
  /// backoff, up to `max_retries` additional attempts. A 2xx
  /// response short-circuits immediately.
  ///
  /// # Errors
  /// `Transport` when every attempt failed to produce a response,
  /// `Api` for a non-2xx response.
  #[instrument(skip(self, options), fields(method = %method))]
  pub async fn request(
    &self,
    method: Method,
    path: &str,
    options: RequestOptions,
  ) -> Result<Value> {
    let url = self.build_url(path, &options.params);
    let body = options.json.as_ref().map(Value::to_string);
    let headers = self.build_headers(&options.headers, body.is_some());

    let mut last_error = None;

    for attempt in 0..=self.config.max_retries {
      if attempt > 0 {
        let delay = RETRY_BASE_DELAY * 2u32.saturating_pow(attempt - 1);
        debug!(attempt, delay_ms = delay.as_millis(), "Retrying request");
        sleep(delay).await;
      }

      let request = TransportRequest {
        method,
        url: url.clone(),
        headers: headers.clone(),
        body: body.clone(),
      };

      let response = match timeout(self.config.timeout, self.transport.execute(request)).await {
        Ok(Ok(response)) => response,
        Ok(Err(cause)) => {
          warn!(error = %cause, attempt, "Transport error");
          last_error = Some(SongstatsError::Transport {
            message: cause.to_string(),
            source: Some(cause),
          });
          continue;
        }
        Err(_) => {
          let timeout_ms = self.config.timeout.as_millis();
          warn!(attempt, timeout_ms, "Request timed out");
          last_error = Some(SongstatsError::Transport {
            message: format!("request timed out after {timeout_ms}ms"),
            source: None,
          });
          continue;
        }
      };

      if is_retryable_status(response.status) && attempt < self.config.max_retries {
        warn!(status = response.status, attempt, "Retryable status");
        continue;
      }

      let payload = parse_payload(&response);
      if (200..=299).contains(&response.status) {
        return Ok(payload);
      }
      return Err(api_error(&response, payload));
    }

    Err(last_error.unwrap_or_else(|| SongstatsError::Transport {
      message: "Request failed without response".to_string(),
      source: None,
    }))
  }

  /// GET with query parameters.
  pub async fn get(&self, path: &str, params: Params) -> Result<Value> {
    let options = RequestOptions {
      params,
      ..RequestOptions::default()
    };
    self.request(Method::Get, path, options).await
  }

  /// POST with query parameters.
  pub async fn post(&self, path: &str, params: Params) -> Result<Value> {
    let options = RequestOptions {
      params,
      ..RequestOptions::default()
    };
    self.request(Method::Post, path, options).await
  }

  /// DELETE with query parameters.
  pub async fn delete(&self, path: &str, params: Params) -> Result<Value> {
    let options = RequestOptions {
      params,
      ..RequestOptions::default()
    };
    self.request(Method::Delete, path, options).await
  }

  /// Release transport resources.
  pub async fn shutdown(&self) {
    self.transport.shutdown().await;
  }

  /// Absolute URL for an endpoint path, query string included.
  fn build_url(&self, path: &str, params: &Params) -> String {
    let path = path.trim_start_matches('/');
    let mut url = format!("{}{API_PREFIX}{path}", self.config.base_url);
    let query = params.to_query_string();
    if !query.is_empty() {
      url.push('?');
      url.push_str(&query);
    }
    url
  }

  /// Default headers, caller overrides, then content-type when a
  /// body is present.
  fn build_headers(&self, extra: &[(String, String)], has_body: bool) -> Vec<(String, String)> {
    let mut headers = vec![
      ("accept".to_string(), "application/json".to_string()),
      ("user-agent".to_string(), self.config.user_agent.clone()),
      ("apikey".to_string(), self.config.api_key.clone()),
    ];
    for (name, value) in extra {
      set_header(&mut headers, name, value);
    }
    if has_body {
      set_header(&mut headers, "content-type", "application/json");
    }
    headers
  }
}

impl fmt::Debug for HttpClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HttpClient")
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

/// Insert or replace a header by case-insensitive name.
fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
  if let Some(entry) = headers
    .iter_mut()
    .find(|(key, _)| key.eq_ignore_ascii_case(name))
  {
    entry.1 = value.to_string();
  } else {
    headers.push((name.to_string(), value.to_string()));
  }
}

/// Parse a response body according to its content type.
///
/// JSON bodies parse to their value, with unparseable text wrapped
/// as `{"raw": <text>}`. Non-JSON bodies are always wrapped. Empty
/// bodies become `Null` either way.
fn parse_payload(response: &TransportResponse) -> Value {
  let is_json = response
    .header("content-type")
    .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"));

  if response.body.is_empty() {
    return Value::Null;
  }

  if is_json {
    serde_json::from_str(&response.body).unwrap_or_else(|_| json!({ "raw": response.body }))
  } else {
    json!({ "raw": response.body })
  }
}

/// Pick the most specific error message available: a non-empty
/// string under `message`, then `error`, then the canonical reason
/// for the status.
fn error_message(payload: &Value, status: u16) -> String {
  for key in ["message", "error"] {
    if let Some(text) = payload.get(key).and_then(Value::as_str) {
      if !text.is_empty() {
        return text.to_string();
      }
    }
  }
  StatusCode::from_u16(status)
    .ok()
    .and_then(|code| code.canonical_reason())
    .unwrap_or("Request failed")
    .to_string()
}

/// Map a non-2xx response into an API error.
fn api_error(response: &TransportResponse, payload: Value) -> SongstatsError {
  let message = error_message(&payload, response.status);
  let headers: HashMap<String, String> = response
    .headers
    .iter()
    .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
    .collect();
  SongstatsError::Api {
    status: response.status,
    message,
    payload,
    headers,
  }
}
