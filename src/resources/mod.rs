//! Resource Façades - Endpoint Families
//!
//! One façade per API family (tracks, artists, collaborators,
//! labels, info), all funneling through the shared `HttpClient`.
//! Required-parameter checks happen here, before any network
//! traffic; the three entity families share a single table-driven
//! façade.

pub mod entities;
pub mod info;
pub mod tracks;

pub use entities::{ARTISTS, COLLABORATORS, EntityDescriptor, EntityResource, LABELS};
pub use info::InfoResource;
pub use tracks::TracksResource;

use crate::error::{Result, SongstatsError};
use crate::params::Params;

/// Require at least one identifier key to hold a usable value.
fn require_any_identifier(params: &Params, keys: &[&str]) -> Result<()> {
  if keys.iter().any(|key| params.has_value(key)) {
    return Ok(());
  }
  Err(SongstatsError::validation(format!(
    "One identifier is required. Supported keys: {}",
    keys.join(", ")
  )))
}

/// Require one named parameter, failing with `{key} is required`.
fn require_param(params: &Params, key: &str) -> Result<()> {
  if params.has_value(key) {
    Ok(())
  } else {
    Err(SongstatsError::validation(format!("{key} is required")))
  }
}

/// Require at least one of the keys, failing with a fixed message.
fn require_one_of(params: &Params, keys: &[&str], message: &str) -> Result<()> {
  if keys.iter().any(|key| params.has_value(key)) {
    Ok(())
  } else {
    Err(SongstatsError::validation(message))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_require_any_identifier_lists_supported_keys() {
    let err = require_any_identifier(&Params::new(), &["songstats_label_id", "beatport_label_id"])
      .unwrap_err();
    assert_eq!(
      err.to_string(),
      "One identifier is required. Supported keys: songstats_label_id, beatport_label_id"
    );
  }

  #[test]
  fn test_require_any_identifier_accepts_any_key() {
    let params = Params::new().set("beatport_label_id", 4321);
    assert!(require_any_identifier(&params, &["songstats_label_id", "beatport_label_id"]).is_ok());
  }

  #[test]
  fn test_require_any_identifier_ignores_empty_strings() {
    let params = Params::new().set("songstats_label_id", "");
    let result = require_any_identifier(&params, &["songstats_label_id"]);
    assert!(result.is_err(), "empty identifiers must not satisfy the rule");
  }

  #[test]
  fn test_require_param_message_names_the_key() {
    let err = require_param(&Params::new(), "country_code").unwrap_err();
    assert_eq!(err.to_string(), "country_code is required");
    assert!(err.is_validation());
  }

  #[test]
  fn test_require_one_of_uses_fixed_message() {
    let err = require_one_of(
      &Params::new(),
      &["link", "spotify_track_id", "isrc"],
      "One of link, spotify_track_id, or isrc is required",
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "One of link, spotify_track_id, or isrc is required");

    let params = Params::new().set("isrc", "US7VG1846811");
    assert!(
      require_one_of(
        &params,
        &["link", "spotify_track_id", "isrc"],
        "One of link, spotify_track_id, or isrc is required",
      )
      .is_ok()
    );
  }
}
