//! API Metadata Endpoints
//!
//! Root-level endpoints with no resource segment and no parameters:
//! source listing, service status, liveness, and metric definitions.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::http::HttpClient;
use crate::params::Params;

/// Façade over the root-level metadata endpoints.
#[derive(Clone)]
pub struct InfoResource {
  http: Arc<HttpClient>,
}

impl InfoResource {
  pub(crate) fn new(http: Arc<HttpClient>) -> Self {
    Self { http }
  }

  /// Data sources available to the account.
  pub async fn sources(&self) -> Result<Value> {
    self.http.get("sources", Params::new()).await
  }

  /// Current API status.
  pub async fn status(&self) -> Result<Value> {
    self.http.get("status", Params::new()).await
  }

  /// Liveness probe.
  pub async fn uptime_check(&self) -> Result<Value> {
    self.http.get("uptime_check", Params::new()).await
  }

  /// Definitions of the metrics returned by stats endpoints.
  pub async fn definitions(&self) -> Result<Value> {
    self.http.get("definitions", Params::new()).await
  }
}
