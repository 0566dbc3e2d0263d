//! Track Endpoints
//!
//! Read endpoints accept any one of the track identifier keys;
//! `search` takes a free-text `q` instead. Link mutations go through
//! the shared `tracks/link_request` path with POST for add and
//! DELETE for remove.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::http::HttpClient;
use crate::params::Params;

use super::{require_any_identifier, require_param};

/// Identifier keys accepted by the track endpoints.
pub const TRACK_IDENTIFIER_KEYS: &[&str] = &[
  "songstats_track_id",
  "spotify_track_id",
  "apple_music_track_id",
  "isrc",
];

/// Façade over the `tracks/*` endpoints.
#[derive(Clone)]
pub struct TracksResource {
  http: Arc<HttpClient>,
}

impl TracksResource {
  pub(crate) fn new(http: Arc<HttpClient>) -> Self {
    Self { http }
  }

  fn require_identifier(params: &Params) -> Result<()> {
    require_any_identifier(params, TRACK_IDENTIFIER_KEYS)
  }

  /// Track metadata and links for one identifier.
  pub async fn info(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self.http.get("tracks/info", params).await
  }

  /// Current cross-source stats.
  pub async fn stats(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self.http.get("tracks/stats", params).await
  }

  /// Daily time-series stats.
  pub async fn historic_stats(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self.http.get("tracks/historic_stats", params).await
  }

  /// Recent activity feed.
  pub async fn activities(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self.http.get("tracks/activities", params).await
  }

  /// Comments left on the track across sources.
  pub async fn comments(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self.http.get("tracks/comments", params).await
  }

  /// Songshare page payload.
  pub async fn songshare(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self.http.get("tracks/songshare", params).await
  }

  /// Geographic listening breakdown.
  pub async fn locations(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self.http.get("tracks/locations", params).await
  }

  /// Title search. Requires `q`; no identifier.
  pub async fn search(&self, params: Params) -> Result<Value> {
    require_param(&params, "q")?;
    self.http.get("tracks/search", params).await
  }

  /// Request that a link be attached to the track. Requires `link`
  /// on top of an identifier.
  pub async fn add_link_request(&self, params: Params) -> Result<Value> {
    require_param(&params, "link")?;
    Self::require_identifier(&params)?;
    self.http.post("tracks/link_request", params).await
  }

  /// Request that a link be detached from the track. Requires
  /// `link` on top of an identifier.
  pub async fn remove_link_request(&self, params: Params) -> Result<Value> {
    require_param(&params, "link")?;
    Self::require_identifier(&params)?;
    self.http.delete("tracks/link_request", params).await
  }

  /// Add the track to the member's relevant list.
  pub async fn add_to_member_relevant_list(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self
      .http
      .post("tracks/add_to_member_relevant_list", params)
      .await
  }

  /// Remove the track from the member's relevant list.
  pub async fn remove_from_member_relevant_list(&self, params: Params) -> Result<Value> {
    Self::require_identifier(&params)?;
    self
      .http
      .delete("tracks/remove_from_member_relevant_list", params)
      .await
  }
}
