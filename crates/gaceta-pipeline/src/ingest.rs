//! Daily ingestion: fetch → classify → filter → enrich → persist.

use std::collections::HashMap;

use anyhow::Context;
use gaceta_ai::Analyst;
use gaceta_core::{ClassificationResult, Config, IdentityKey, RawNotice, StoredRecord};
use gaceta_source::NoticeSource;
use gaceta_store::RegulationStore;
use tracing::{info, warn};

/// Reportable outcome of one ingest run.
///
/// `failed` counts per-notice classification and enrichment failures; they
/// never abort the run. `persisted` is the size of the batch handed to the
/// store (dedup against earlier runs happens inside the store).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestOutcome {
    pub fetched: usize,
    pub classified: usize,
    pub relevant: usize,
    pub persisted: usize,
    pub failed: usize,
}

/// Run one daily ingestion pass.
///
/// Per-notice backend failures are logged and skipped; fetch and store
/// failures are fatal for the run and propagate.
pub async fn run_ingest<S, A, R>(
    source: &S,
    analyst: &A,
    store: &R,
    config: &Config,
) -> anyhow::Result<IngestOutcome>
where
    S: NoticeSource + Sync,
    A: Analyst + Sync,
    R: RegulationStore + Sync,
{
    let mut outcome = IngestOutcome::default();

    let notices = source
        .fetch_notices()
        .await
        .context("fetching gazette section")?;
    outcome.fetched = notices.len();
    if notices.is_empty() {
        info!("no notices published, nothing to ingest");
        return Ok(outcome);
    }

    // Classify sequentially; an in-run cache avoids paying twice for a
    // link repeated on the same page.
    let mut cache: HashMap<IdentityKey, ClassificationResult> = HashMap::new();
    let mut scored: Vec<(&RawNotice, ClassificationResult)> = Vec::new();
    for notice in &notices {
        let key = notice.identity_key();
        if let Some(hit) = cache.get(&key) {
            // Cache hit still flows through the gate with its cached score.
            scored.push((notice, hit.clone()));
            continue;
        }
        match analyst.classify(notice).await {
            Ok(classification) => {
                outcome.classified += 1;
                cache.insert(key, classification.clone());
                scored.push((notice, classification));
            }
            Err(e) => {
                warn!(key = ?key, stage = "classify", error = %e, "skipping notice");
                outcome.failed += 1;
            }
        }
    }

    // Relevance gate, then cap the enrichment spend to the top scores.
    let mut qualifying: Vec<(&RawNotice, ClassificationResult)> = scored
        .into_iter()
        .filter(|(_, c)| c.relevance_score > config.relevance_threshold)
        .collect();
    outcome.relevant = qualifying.len();
    qualifying.sort_by(|a, b| b.1.relevance_score.cmp(&a.1.relevance_score));
    qualifying.truncate(config.max_per_run);

    if qualifying.is_empty() {
        info!(
            threshold = config.relevance_threshold,
            fetched = outcome.fetched,
            "no notices above relevance threshold"
        );
        return Ok(outcome);
    }

    // Enrich the survivors; only fully-enriched records reach the store.
    let mut batch: Vec<StoredRecord> = Vec::with_capacity(qualifying.len());
    for (notice, classification) in qualifying {
        match analyst.summarize(notice).await {
            Ok(enrichment) => {
                batch.push(StoredRecord::assemble(notice, classification, enrichment));
            }
            Err(e) => {
                warn!(key = ?notice.identity_key(), stage = "summarize", error = %e, "skipping notice");
                outcome.failed += 1;
            }
        }
    }

    outcome.persisted = batch.len();
    let inserted = store.append(&batch).context("persisting ingest batch")?;

    info!(
        fetched = outcome.fetched,
        classified = outcome.classified,
        relevant = outcome.relevant,
        persisted = outcome.persisted,
        inserted,
        failed = outcome.failed,
        "ingest run complete"
    );
    Ok(outcome)
}
