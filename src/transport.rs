//! Transport Port - Injectable HTTP Primitive
//!
//! Defines the minimal interface the client drives: one call per
//! request attempt, returning a status/headers/body triple. Retries,
//! timeouts, and error classification all live above this seam, so a
//! transport only reports whether it produced a response. A pooled
//! reqwest implementation ships as the default; anything else is
//! injected through `SongstatsClient::with_transport`.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{BoxError, SongstatsError};

/// HTTP methods the API uses. Reads map to GET, add mutations to
/// POST, remove mutations to DELETE; nothing else is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  /// Read endpoints.
  Get,
  /// Add / create mutations.
  Post,
  /// Remove mutations.
  Delete,
}

impl Method {
  /// Canonical uppercase name.
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Delete => "DELETE",
    }
  }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A fully-assembled request handed to the transport.
#[derive(Debug, Clone)]
pub struct TransportRequest {
  /// HTTP method.
  pub method: Method,
  /// Absolute URL, query string included.
  pub url: String,
  /// Header name/value pairs in send order.
  pub headers: Vec<(String, String)>,
  /// Serialized JSON body, when the request carries one.
  pub body: Option<String>,
}

impl TransportRequest {
  /// Look up a header value by case-insensitive name.
  #[must_use]
  pub fn header(&self, name: &str) -> Option<&str> {
    lookup_header(&self.headers, name)
  }
}

/// The transport's view of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
  /// HTTP status code.
  pub status: u16,
  /// Response header name/value pairs.
  pub headers: Vec<(String, String)>,
  /// Raw response body.
  pub body: String,
}

impl TransportResponse {
  /// A JSON response with the matching content-type header.
  #[must_use]
  pub fn json(status: u16, payload: &Value) -> Self {
    Self {
      status,
      headers: vec![(
        "content-type".to_string(),
        "application/json".to_string(),
      )],
      body: payload.to_string(),
    }
  }

  /// Look up a header value by case-insensitive name.
  #[must_use]
  pub fn header(&self, name: &str) -> Option<&str> {
    lookup_header(&self.headers, name)
  }
}

fn lookup_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
  headers
    .iter()
    .find(|(key, _)| key.eq_ignore_ascii_case(name))
    .map(|(_, value)| value.as_str())
}

/// Trait for HTTP transports.
///
/// Implementations perform exactly one exchange per call and surface
/// every failure to produce a response (DNS, connect, TLS, read) as
/// an error. Status codes are never interpreted here.
#[async_trait]
pub trait HttpTransport: Send + Sync + 'static {
  /// Perform one HTTP exchange.
  async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError>;

  /// Release held resources such as connection pools.
  ///
  /// Called from `SongstatsClient::close`. The default is a no-op.
  async fn shutdown(&self) {}
}

/// Default transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  /// Shared connection pool.
  client: reqwest::Client,
}

impl ReqwestTransport {
  /// Build a transport with the crate's pool defaults.
  ///
  /// # Errors
  /// Returns a transport error when the underlying client cannot be
  /// constructed (TLS backend initialization).
  pub fn new() -> crate::error::Result<Self> {
    let client = reqwest::Client::builder()
      .pool_max_idle_per_host(5)
      .build()
      .map_err(|cause| SongstatsError::Transport {
        message: format!("failed to build HTTP client: {cause}"),
        source: Some(Box::new(cause)),
      })?;
    Ok(Self { client })
  }

  /// Wrap an existing `reqwest` client, sharing its pool and TLS
  /// settings.
  #[must_use]
  pub fn from_client(client: reqwest::Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
    let method = match request.method {
      Method::Get => reqwest::Method::GET,
      Method::Post => reqwest::Method::POST,
      Method::Delete => reqwest::Method::DELETE,
    };

    let mut builder = self.client.request(method, &request.url);
    for (name, value) in &request.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
      builder = builder.body(body);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let headers = response
      .headers()
      .iter()
      .map(|(name, value)| {
        (
          name.as_str().to_string(),
          String::from_utf8_lossy(value.as_bytes()).into_owned(),
        )
      })
      .collect();
    let body = response.text().await?;

    Ok(TransportResponse {
      status,
      headers,
      body,
    })
  }
}
