//! Async client for the Songstats Enterprise API.
//!
//! Maps the documented REST endpoints under `/enterprise/v1` to
//! typed façades, with `apikey` header authentication, parameter
//! normalization, bounded retries with exponential backoff, and
//! uniform error classification. The HTTP primitive is injectable
//! behind the [`HttpTransport`] trait; a pooled reqwest transport
//! ships as the default.
//!
//! ```no_run
//! use songstats::{ClientConfig, Params, SongstatsClient};
//!
//! # async fn run() -> songstats::Result<()> {
//! let client = SongstatsClient::new(ClientConfig::new("<api key>"))?;
//!
//! let track = client
//!   .tracks()
//!   .info(Params::new().set("isrc", "US7VG1846811").set("with_links", true))
//!   .await?;
//! println!("{track}");
//!
//! client.close().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod resources;
pub mod transport;

pub use client::SongstatsClient;
pub use config::ClientConfig;
pub use error::{BoxError, Result, SongstatsError};
pub use http::{HttpClient, RequestOptions};
pub use params::{ParamValue, Params};
pub use resources::{EntityResource, InfoResource, TracksResource};
pub use transport::{
  HttpTransport, Method, ReqwestTransport, TransportRequest, TransportResponse,
};
