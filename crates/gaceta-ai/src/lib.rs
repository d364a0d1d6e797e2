//! Analysis layer: relevance gate, enrichment, and report digest behind one
//! capability trait, so any compliant backend (cloud LLM, local model, rule
//! engine) can substitute without touching pipeline logic.

use async_trait::async_trait;
use gaceta_core::{ClassificationResult, EnrichmentResult, RawNotice, StoredRecord};

mod error;
pub use error::ClassificationError;

mod openai;
pub use openai::OpenAiAnalyst;

pub mod prompt;

/// Scores, summarises, and digests gazette notices.
///
/// `classify` is the cheap gate run on every fetched notice; `summarize` is
/// the expensive enrichment paid only for notices above the relevance
/// threshold. Implementations return fully-populated results or fail —
/// never a partial result.
#[async_trait]
pub trait Analyst {
    /// Score a notice for relevance, `0..=100`.
    ///
    /// An empty body is weak evidence, not an error: implementations must
    /// still return a valid (typically low) score.
    async fn classify(&self, notice: &RawNotice)
    -> Result<ClassificationResult, ClassificationError>;

    /// Produce summary, key points, title, and category for a notice that
    /// passed the relevance gate.
    async fn summarize(&self, notice: &RawNotice)
    -> Result<EnrichmentResult, ClassificationError>;

    /// One narrative executive summary over the report window's top slice,
    /// returned as an HTML snippet.
    async fn digest(
        &self,
        records: &[StoredRecord],
        period_label: &str,
    ) -> Result<String, ClassificationError>;
}
