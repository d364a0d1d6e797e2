//! The persisted row: union of raw notice identity, classification, and
//! enrichment fields.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::notice::{ClassificationResult, EnrichmentResult, IdentityKey, RawNotice};

/// Delimiter used for the persisted rendering of `key_points`.
const KEY_POINT_SEP: &str = "; ";

/// One row of the regulation table.
///
/// Field order is the stable column order of the persisted table. Every
/// stored record was above the relevance threshold in force when it was
/// ingested; threshold changes do not retroactively affect stored rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub publication_date: NaiveDate,
    pub generated_title: String,
    pub category: String,
    pub relevance_score: u8,
    pub reasoning: String,
    pub summary: String,
    /// Ordered key points; persisted as a `"; "`-delimited string.
    #[serde(
        serialize_with = "join_key_points",
        deserialize_with = "split_key_points"
    )]
    pub key_points: Vec<String>,
    pub link: String,
}

impl StoredRecord {
    /// Assemble a row from the pipeline's three stages.
    pub fn assemble(
        raw: &RawNotice,
        classification: ClassificationResult,
        enrichment: EnrichmentResult,
    ) -> Self {
        Self {
            publication_date: raw.publication_date,
            generated_title: enrichment.generated_title,
            category: enrichment.category,
            relevance_score: classification.relevance_score,
            reasoning: classification.reasoning,
            summary: enrichment.summary,
            key_points: enrichment.key_points,
            link: raw.link.clone(),
        }
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::from_parts(&self.link, self.publication_date, &self.generated_title)
    }
}

fn join_key_points<S: Serializer>(points: &[String], ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&points.join(KEY_POINT_SEP))
}

fn split_key_points<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    let joined = String::deserialize(de)?;
    if joined.is_empty() {
        return Ok(Vec::new());
    }
    Ok(joined.split(KEY_POINT_SEP).map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, link: &str) -> StoredRecord {
        StoredRecord {
            publication_date: date.parse().unwrap(),
            generated_title: "Export registry update".into(),
            category: "Exports".into(),
            relevance_score: 85,
            reasoning: "Changes export declarations for grain".into(),
            summary: "New export registry rules.".into(),
            key_points: vec!["registry".into(), "grain exports".into()],
            link: link.into(),
        }
    }

    #[test]
    fn key_points_persist_as_delimited_text() {
        let rec = record("2026-08-20", "https://gazette.example/n/1");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["key_points"], "registry; grain exports");

        let back: StoredRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.key_points, rec.key_points);
    }

    #[test]
    fn empty_key_points_round_trip() {
        let mut rec = record("2026-08-20", "l");
        rec.key_points.clear();
        let json = serde_json::to_string(&rec).unwrap();
        let back: StoredRecord = serde_json::from_str(&json).unwrap();
        assert!(back.key_points.is_empty());
    }

    #[test]
    fn date_serialises_iso() {
        let rec = record("2026-08-05", "l");
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["publication_date"], "2026-08-05");
    }

    #[test]
    fn identity_uses_generated_title_fallback() {
        let rec = record("2026-08-20", "");
        assert_eq!(
            rec.identity_key(),
            IdentityKey::DateTitle("2026-08-20".parse().unwrap(), "Export registry update".into())
        );
    }
}
