//! Mock collaborators for pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use gaceta_ai::{Analyst, ClassificationError};
use gaceta_core::{ClassificationResult, EnrichmentResult, RawNotice, StoredRecord};
use gaceta_mail::{MailPayload, MailTransport, TransportError};
use gaceta_source::{FetchError, NoticeSource};
use gaceta_store::JsonTableStore;

pub fn store_in(dir: &tempfile::TempDir) -> JsonTableStore {
    JsonTableStore::open(dir.path().join("table.json"))
}

pub fn notice(date: &str, link: &str) -> RawNotice {
    RawNotice {
        publication_date: date.parse().unwrap(),
        title: format!("Notice {link}"),
        body: format!("Body of {link}"),
        link: link.into(),
    }
}

pub fn record(date: &str, link: &str, score: u8) -> StoredRecord {
    StoredRecord {
        publication_date: date.parse().unwrap(),
        generated_title: format!("Notice {link}"),
        category: "Exports".into(),
        relevance_score: score,
        reasoning: "reason".into(),
        summary: format!("Summary of {link}"),
        key_points: vec!["point".into()],
        link: link.into(),
    }
}

fn backend_error() -> ClassificationError {
    ClassificationError::Server {
        status: 500,
        body: "backend unavailable".into(),
    }
}

/// Source serving a fixed page, or failing wholesale.
pub struct MockSource {
    notices: Vec<RawNotice>,
    error: Mutex<Option<FetchError>>,
}

impl MockSource {
    pub fn with_notices(notices: Vec<RawNotice>) -> Self {
        Self {
            notices,
            error: Mutex::new(None),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            notices: Vec::new(),
            error: Mutex::new(Some(error)),
        }
    }
}

#[async_trait]
impl NoticeSource for MockSource {
    async fn fetch_notices(&self) -> Result<Vec<RawNotice>, FetchError> {
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self.notices.clone())
    }
}

/// Analyst with per-link scripted scores and failures.
pub struct MockAnalyst {
    scores: HashMap<String, u8>,
    classify_failures: HashSet<String>,
    summarize_failures: HashSet<String>,
    digest: Option<String>,
    classify_calls: Mutex<usize>,
}

impl MockAnalyst {
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
            classify_failures: HashSet::new(),
            summarize_failures: HashSet::new(),
            digest: None,
            classify_calls: Mutex::new(0),
        }
    }

    pub fn score(mut self, link: &str, score: u8) -> Self {
        self.scores.insert(link.into(), score);
        self
    }

    pub fn fail_classify(mut self, link: &str) -> Self {
        self.classify_failures.insert(link.into());
        self
    }

    pub fn fail_summarize(mut self, link: &str) -> Self {
        self.summarize_failures.insert(link.into());
        self
    }

    pub fn digest_html(mut self, html: &str) -> Self {
        self.digest = Some(html.into());
        self
    }

    pub fn fail_digest(mut self) -> Self {
        self.digest = None;
        self
    }

    pub fn classify_calls(&self) -> usize {
        *self.classify_calls.lock().unwrap()
    }
}

#[async_trait]
impl Analyst for MockAnalyst {
    async fn classify(
        &self,
        notice: &RawNotice,
    ) -> Result<ClassificationResult, ClassificationError> {
        *self.classify_calls.lock().unwrap() += 1;
        if self.classify_failures.contains(&notice.link) {
            return Err(backend_error());
        }
        let score = self.scores.get(&notice.link).copied().unwrap_or(0);
        Ok(ClassificationResult::new(i64::from(score), "scripted".into()).unwrap())
    }

    async fn summarize(
        &self,
        notice: &RawNotice,
    ) -> Result<EnrichmentResult, ClassificationError> {
        if self.summarize_failures.contains(&notice.link) {
            return Err(backend_error());
        }
        Ok(EnrichmentResult {
            summary: format!("Summary of {}", notice.link),
            key_points: vec!["point".into()],
            generated_title: notice.title.clone(),
            category: "Exports".into(),
        })
    }

    async fn digest(
        &self,
        _records: &[StoredRecord],
        _period_label: &str,
    ) -> Result<String, ClassificationError> {
        self.digest.clone().ok_or_else(backend_error)
    }
}

/// Transport recording sent payloads, or failing every send.
pub struct MockTransport {
    fail: bool,
    sent: Mutex<Vec<MailPayload>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            fail: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<MailPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for MockTransport {
    async fn send(&self, payload: &MailPayload) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::Server {
                status: 502,
                body: "relay refused".into(),
            });
        }
        self.sent.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
