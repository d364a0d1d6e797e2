use thiserror::Error;

/// Backend failure for a single notice. The ingestion loop catches these at
/// the per-item boundary; the batch continues.
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// Network-level failure, including timeouts.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Server { status: u16, body: String },

    /// Structurally malformed response: unparseable JSON, missing fields,
    /// or an out-of-range score. Treated identically to a backend error.
    #[error("malformed backend response: {0}")]
    Schema(String),
}
