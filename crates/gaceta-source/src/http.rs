//! HTTP client for a gazette section endpoint serving notices as JSON.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use gaceta_core::RawNotice;
use serde::Deserialize;
use tracing::info;

use crate::{FetchError, NoticeSource};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// One notice as served by the section endpoint.
#[derive(Debug, Deserialize)]
struct WireNotice {
    publication_date: NaiveDate,
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    link: String,
}

impl From<WireNotice> for RawNotice {
    fn from(w: WireNotice) -> Self {
        Self {
            publication_date: w.publication_date,
            title: w.title,
            body: w.body,
            link: w.link,
        }
    }
}

/// Fetches a gazette section page over HTTP.
pub struct HttpGazetteSource {
    client: reqwest::Client,
    section_url: String,
}

impl HttpGazetteSource {
    /// Create a source for the given section URL.
    pub fn new(section_url: String) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            section_url,
        })
    }
}

#[async_trait]
impl NoticeSource for HttpGazetteSource {
    async fn fetch_notices(&self) -> Result<Vec<RawNotice>, FetchError> {
        info!(url = %self.section_url, "fetching gazette section");
        let resp = self.client.get(&self.section_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp.text().await?;
        let wire: Vec<WireNotice> = serde_json::from_str(&text)?;
        let notices: Vec<RawNotice> = wire.into_iter().map(RawNotice::from).collect();
        info!(count = notices.len(), "fetched notices");
        Ok(notices)
    }
}
