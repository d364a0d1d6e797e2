//! Notice types flowing through the ingestion pipeline.
//!
//! A [`RawNotice`] comes straight from the gazette fetch. Classification
//! attaches a [`ClassificationResult`]; notices above the relevance
//! threshold additionally get an [`EnrichmentResult`] before persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A notice as published on a gazette section page.
///
/// `link` is the natural key within a single source page; it may be empty
/// when the source did not expose a detail URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNotice {
    pub publication_date: NaiveDate,
    pub title: String,
    pub body: String,
    pub link: String,
}

/// Relevance verdict for one notice.
///
/// The score is guaranteed to be in `0..=100`; construct through
/// [`ClassificationResult::new`] so an out-of-range value from a backend is
/// rejected instead of silently clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub relevance_score: u8,
    pub reasoning: String,
}

/// Score outside the `0..=100` contract.
#[derive(Debug, Error)]
#[error("relevance score {0} outside 0..=100")]
pub struct ScoreError(pub i64);

impl ClassificationResult {
    /// Validate and build a classification result.
    pub fn new(relevance_score: i64, reasoning: String) -> Result<Self, ScoreError> {
        if !(0..=100).contains(&relevance_score) {
            return Err(ScoreError(relevance_score));
        }
        Ok(Self {
            relevance_score: relevance_score as u8,
            reasoning,
        })
    }
}

/// Summary material produced only for notices above the relevance threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub generated_title: String,
    pub category: String,
}

/// Dedup identity for a notice or stored record.
///
/// The detail link when present, otherwise `(publication_date, title)`.
/// Total order makes it usable as a deterministic tie-breaker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdentityKey {
    Link(String),
    DateTitle(NaiveDate, String),
}

impl IdentityKey {
    /// Build a key from the link/date/title triple, preferring the link.
    pub fn from_parts(link: &str, date: NaiveDate, title: &str) -> Self {
        if link.trim().is_empty() {
            Self::DateTitle(date, title.to_string())
        } else {
            Self::Link(link.to_string())
        }
    }
}

impl RawNotice {
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::from_parts(&self.link, self.publication_date, &self.title)
    }
}
