//! Songstats Client - Crate Entry Point
//!
//! Owns the shared transport wrapper and exposes one façade per
//! endpoint family. Construction validates credentials; after that
//! the client is immutable, cheap to clone, and safe to share
//! across tasks.

use std::fmt;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::resources::{
  ARTISTS, COLLABORATORS, EntityResource, InfoResource, LABELS, TracksResource,
};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Async client for the Songstats Enterprise API.
#[derive(Clone)]
pub struct SongstatsClient {
  http: Arc<HttpClient>,
  info: InfoResource,
  tracks: TracksResource,
  artists: EntityResource,
  collaborators: EntityResource,
  labels: EntityResource,
}

impl SongstatsClient {
  /// Create a client over the bundled reqwest transport.
  ///
  /// # Errors
  /// Validation error when the API key is empty; transport error
  /// when the HTTP client cannot be built.
  pub fn new(config: ClientConfig) -> Result<Self> {
    let transport = Arc::new(ReqwestTransport::new()?);
    Self::with_transport(config, transport)
  }

  /// Create a client over a caller-supplied transport.
  ///
  /// # Errors
  /// Validation error when the API key is empty.
  pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
    let http = Arc::new(HttpClient::new(config, transport)?);
    Ok(Self {
      info: InfoResource::new(Arc::clone(&http)),
      tracks: TracksResource::new(Arc::clone(&http)),
      artists: EntityResource::new(Arc::clone(&http), ARTISTS),
      collaborators: EntityResource::new(Arc::clone(&http), COLLABORATORS),
      labels: EntityResource::new(Arc::clone(&http), LABELS),
      http,
    })
  }

  /// Create a client configured from `SONGSTATS_API_KEY` and the
  /// optional `SONGSTATS_BASE_URL` override.
  ///
  /// # Errors
  /// Validation error when `SONGSTATS_API_KEY` is unset or empty.
  pub fn from_env() -> Result<Self> {
    Self::new(ClientConfig::from_env()?)
  }

  /// API metadata endpoints.
  #[must_use]
  pub fn info(&self) -> &InfoResource {
    &self.info
  }

  /// Track endpoints.
  #[must_use]
  pub fn tracks(&self) -> &TracksResource {
    &self.tracks
  }

  /// Artist endpoints.
  #[must_use]
  pub fn artists(&self) -> &EntityResource {
    &self.artists
  }

  /// Collaborator endpoints.
  #[must_use]
  pub fn collaborators(&self) -> &EntityResource {
    &self.collaborators
  }

  /// Label endpoints.
  #[must_use]
  pub fn labels(&self) -> &EntityResource {
    &self.labels
  }

  /// Low-level request access, for endpoints without a façade.
  #[must_use]
  pub fn http(&self) -> &HttpClient {
    &self.http
  }

  /// Release transport resources. Safe to call more than once.
  pub async fn close(&self) {
    self.http.shutdown().await;
  }
}

impl fmt::Debug for SongstatsClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SongstatsClient")
      .field("config", self.http.config())
      .finish_non_exhaustive()
  }
}
