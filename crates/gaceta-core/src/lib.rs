pub mod config;
pub mod notice;
pub mod record;

pub use config::Config;
pub use notice::{ClassificationResult, EnrichmentResult, IdentityKey, RawNotice, ScoreError};
pub use record::StoredRecord;
