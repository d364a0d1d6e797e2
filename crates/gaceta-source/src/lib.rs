//! Source layer: pulling raw notices from a gazette section endpoint.

use async_trait::async_trait;
use gaceta_core::RawNotice;
use thiserror::Error;

mod http;
pub use http::HttpGazetteSource;

/// Whole-page fetch failure. Fatal for the run — there is no per-notice
/// granularity at this stage.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gazette returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("could not decode gazette payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Produces the raw notices of one gazette section page.
///
/// Zero notices is a valid, non-error outcome (nothing published that day).
#[async_trait]
pub trait NoticeSource {
    async fn fetch_notices(&self) -> Result<Vec<RawNotice>, FetchError>;
}
