//! Entity Endpoints - Artists, Collaborators, and Labels
//!
//! The three entity families expose the same endpoint surface and
//! differ only in path segment and accepted identifier keys, so one
//! table-driven façade covers all of them. `SongstatsClient` binds
//! an instance per family from the descriptors below.

use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::http::HttpClient;
use crate::params::Params;

use super::{require_any_identifier, require_one_of, require_param};

/// Static description of one entity family.
#[derive(Debug, Clone, Copy)]
pub struct EntityDescriptor {
  /// Path segment (`artists`, `collaborators`, `labels`).
  pub resource: &'static str,
  /// Identifier keys accepted by this family.
  pub identifier_keys: &'static [&'static str],
}

/// Artists family.
pub const ARTISTS: EntityDescriptor = EntityDescriptor {
  resource: "artists",
  identifier_keys: &[
    "songstats_artist_id",
    "spotify_artist_id",
    "apple_music_artist_id",
  ],
};

/// Collaborators family (writers, producers, remixers).
pub const COLLABORATORS: EntityDescriptor = EntityDescriptor {
  resource: "collaborators",
  identifier_keys: &[
    "songstats_collaborator_id",
    "spotify_artist_id",
    "apple_music_artist_id",
    "tidal_artist_id",
  ],
};

/// Labels family.
pub const LABELS: EntityDescriptor = EntityDescriptor {
  resource: "labels",
  identifier_keys: &["songstats_label_id", "beatport_label_id"],
};

/// Façade over one entity family's endpoints.
#[derive(Clone)]
pub struct EntityResource {
  http: Arc<HttpClient>,
  descriptor: EntityDescriptor,
}

impl EntityResource {
  pub(crate) fn new(http: Arc<HttpClient>, descriptor: EntityDescriptor) -> Self {
    Self { http, descriptor }
  }

  /// Identifier keys accepted by this family.
  #[must_use]
  pub fn identifier_keys(&self) -> &'static [&'static str] {
    self.descriptor.identifier_keys
  }

  fn path(&self, action: &str) -> String {
    format!("{}/{action}", self.descriptor.resource)
  }

  fn require_identifier(&self, params: &Params) -> Result<()> {
    require_any_identifier(params, self.descriptor.identifier_keys)
  }

  /// Entity metadata and links for one identifier.
  pub async fn info(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("info"), params).await
  }

  /// Current cross-source stats.
  pub async fn stats(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("stats"), params).await
  }

  /// Daily time-series stats.
  pub async fn historic_stats(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("historic_stats"), params).await
  }

  /// Audience summary across sources.
  pub async fn audience(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("audience"), params).await
  }

  /// Per-country audience breakdown. Requires `country_code` on top
  /// of an identifier.
  pub async fn audience_details(&self, params: Params) -> Result<Value> {
    require_param(&params, "country_code")?;
    self.require_identifier(&params)?;
    self.http.get(&self.path("audience/details"), params).await
  }

  /// Catalog of tracks attributed to the entity.
  pub async fn catalog(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("catalog"), params).await
  }

  /// Name search within this family. Requires `q`; no identifier.
  pub async fn search(&self, params: Params) -> Result<Value> {
    require_param(&params, "q")?;
    self.http.get(&self.path("search"), params).await
  }

  /// Recent activity feed.
  pub async fn activities(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("activities"), params).await
  }

  /// Songshare page payload.
  pub async fn songshare(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("songshare"), params).await
  }

  /// Top tracks for the entity.
  pub async fn top_tracks(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("top_tracks"), params).await
  }

  /// Top playlists featuring the entity.
  pub async fn top_playlists(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("top_playlists"), params).await
  }

  /// Top playlist curators for the entity.
  pub async fn top_curators(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("top_curators"), params).await
  }

  /// Top commentors across the entity's catalog.
  pub async fn top_commentors(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self.http.get(&self.path("top_commentors"), params).await
  }

  /// Request that a link be attached to the entity. Requires `link`
  /// on top of an identifier.
  pub async fn add_link_request(&self, params: Params) -> Result<Value> {
    require_param(&params, "link")?;
    self.require_identifier(&params)?;
    self.http.post(&self.path("link_request"), params).await
  }

  /// Request that a link be detached from the entity. Requires
  /// `link` on top of an identifier.
  pub async fn remove_link_request(&self, params: Params) -> Result<Value> {
    require_param(&params, "link")?;
    self.require_identifier(&params)?;
    self.http.delete(&self.path("link_request"), params).await
  }

  /// Request that a track be attributed to the entity. Requires one
  /// of `link`, `spotify_track_id`, or `isrc` on top of an
  /// identifier.
  pub async fn add_track_request(&self, params: Params) -> Result<Value> {
    require_one_of(
      &params,
      &["link", "spotify_track_id", "isrc"],
      "One of link, spotify_track_id, or isrc is required",
    )?;
    self.require_identifier(&params)?;
    self.http.post(&self.path("track_request"), params).await
  }

  /// Request that a track attribution be removed. Requires
  /// `songstats_track_id` or `spotify_track_id` on top of an
  /// identifier.
  pub async fn remove_track_request(&self, params: Params) -> Result<Value> {
    require_one_of(
      &params,
      &["songstats_track_id", "spotify_track_id"],
      "songstats_track_id or spotify_track_id is required",
    )?;
    self.require_identifier(&params)?;
    self.http.delete(&self.path("track_request"), params).await
  }

  /// Add the entity to the member's relevant list.
  pub async fn add_to_member_relevant_list(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self
      .http
      .post(&self.path("add_to_member_relevant_list"), params)
      .await
  }

  /// Remove the entity from the member's relevant list.
  pub async fn remove_from_member_relevant_list(&self, params: Params) -> Result<Value> {
    self.require_identifier(&params)?;
    self
      .http
      .delete(&self.path("remove_from_member_relevant_list"), params)
      .await
  }
}
