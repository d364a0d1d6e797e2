//! JSON-table implementation of the regulation store.
//!
//! One JSON array of rows, rewritten atomically (temp file + rename) on
//! every mutation. The table stays small — a handful of qualifying notices
//! per day, archived weekly — so full read-modify-write keeps the
//! invariants simple: a reader never sees a torn file, and a crash after
//! `append` returns leaves durable state.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use gaceta_core::{IdentityKey, StoredRecord};
use tracing::{debug, info};

use crate::{RegulationStore, StoreError};

/// File-backed regulation table.
///
/// The backing file is created on first write; reading a missing file
/// yields an empty table.
pub struct JsonTableStore {
    path: PathBuf,
}

impl JsonTableStore {
    /// Open a table backed by the given path. The file itself is only
    /// touched on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of live rows.
    pub fn count(&self) -> Result<usize, StoreError> {
        Ok(self.load()?.len())
    }

    fn load(&self) -> Result<Vec<StoredRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Atomically replace the backing file with the given rows.
    fn write_all(&self, rows: &[StoredRecord]) -> Result<(), StoreError> {
        let dir = self.path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            fs::create_dir_all(dir)?;
        }
        let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))?;
        serde_json::to_writer_pretty(&mut tmp, rows).map_err(std::io::Error::from)?;
        tmp.write_all(b"\n")?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

impl RegulationStore for JsonTableStore {
    fn append(&self, records: &[StoredRecord]) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut rows = self.load()?;
        let mut by_key: HashMap<IdentityKey, usize> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.identity_key(), i))
            .collect();

        let mut inserted = 0usize;
        for record in records {
            match by_key.get(&record.identity_key()) {
                Some(&i) => {
                    // Later append wins; the row keeps its position.
                    debug!(key = ?record.identity_key(), "overwriting existing row");
                    rows[i] = record.clone();
                }
                None => {
                    by_key.insert(record.identity_key(), rows.len());
                    rows.push(record.clone());
                    inserted += 1;
                }
            }
        }

        self.write_all(&rows)?;
        info!(
            inserted,
            overwritten = records.len() - inserted,
            total = rows.len(),
            "appended to regulation table"
        );
        Ok(inserted)
    }

    fn read_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let mut rows: Vec<StoredRecord> = self
            .load()?
            .into_iter()
            .filter(|r| start <= r.publication_date && r.publication_date <= end)
            .collect();
        rows.sort_by(|a, b| {
            a.publication_date
                .cmp(&b.publication_date)
                .then_with(|| a.identity_key().cmp(&b.identity_key()))
        });
        Ok(rows)
    }

    fn read_top_n(&self, n: usize) -> Result<Vec<StoredRecord>, StoreError> {
        let mut rows = self.load()?;
        rows.sort_by(|a, b| {
            b.relevance_score
                .cmp(&a.relevance_score)
                .then_with(|| b.publication_date.cmp(&a.publication_date))
                .then_with(|| a.identity_key().cmp(&b.identity_key()))
        });
        rows.truncate(n);
        Ok(rows)
    }

    fn archive(&self, before: NaiveDate) -> Result<usize, StoreError> {
        let rows = self.load()?;
        let kept: Vec<StoredRecord> = rows
            .iter()
            .filter(|r| r.publication_date >= before)
            .cloned()
            .collect();
        let removed = rows.len() - kept.len();
        if removed > 0 {
            self.write_all(&kept)?;
            info!(removed, kept = kept.len(), %before, "archived old rows");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(d: &str, link: &str, score: u8) -> StoredRecord {
        StoredRecord {
            publication_date: date(d),
            generated_title: format!("Notice {link}"),
            category: "Exports".into(),
            relevance_score: score,
            reasoning: "affects grain exports".into(),
            summary: "summary".into(),
            key_points: vec!["a".into(), "b".into()],
            link: link.into(),
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> JsonTableStore {
        JsonTableStore::open(dir.path().join("table.json"))
    }

    #[test]
    fn missing_file_reads_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        let rows = store
            .read_window(date("2026-01-01"), date("2026-12-31"))
            .unwrap();
        assert!(rows.is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn empty_append_is_noop() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert_eq!(store.append(&[]).unwrap(), 0);
        // No file created either.
        assert!(!store.path().exists());
    }

    #[test]
    fn append_then_window_round_trips() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        let recs = vec![record("2026-08-18", "a", 80), record("2026-08-19", "b", 90)];
        assert_eq!(store.append(&recs).unwrap(), 2);

        let rows = store
            .read_window(date("2026-08-18"), date("2026-08-19"))
            .unwrap();
        assert_eq!(rows, recs);
    }

    #[test]
    fn append_same_key_twice_keeps_one_row() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        let first = record("2026-08-18", "a", 80);
        assert_eq!(store.append(std::slice::from_ref(&first)).unwrap(), 1);

        // Same identity key, refreshed fields: no new row, later wins.
        let mut second = first.clone();
        second.relevance_score = 95;
        assert_eq!(store.append(std::slice::from_ref(&second)).unwrap(), 0);

        let rows = store
            .read_window(date("2026-08-18"), date("2026-08-18"))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].relevance_score, 95);
    }

    #[test]
    fn window_bounds_are_inclusive_and_sorted() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        store
            .append(&[
                record("2026-08-21", "c", 70),
                record("2026-08-19", "a", 80),
                record("2026-08-20", "b", 90),
                record("2026-08-22", "d", 60),
            ])
            .unwrap();

        let rows = store
            .read_window(date("2026-08-19"), date("2026-08-21"))
            .unwrap();
        let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, ["a", "b", "c"]);
    }

    #[test]
    fn window_ties_break_by_identity_key() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        store
            .append(&[
                record("2026-08-19", "z", 70),
                record("2026-08-19", "a", 80),
            ])
            .unwrap();

        let rows = store
            .read_window(date("2026-08-19"), date("2026-08-19"))
            .unwrap();
        let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, ["a", "z"]);
    }

    #[test]
    fn top_n_orders_by_score_then_recency() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        store
            .append(&[
                record("2026-08-18", "old-high", 90),
                record("2026-08-20", "recent-high", 90),
                record("2026-08-21", "low", 75),
            ])
            .unwrap();

        let rows = store.read_top_n(2).unwrap();
        let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, ["recent-high", "old-high"]);
    }

    #[test]
    fn archive_removes_strictly_before_cutoff() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        store
            .append(&[
                record("2026-08-10", "a", 80),
                record("2026-08-14", "b", 80),
                record("2026-08-15", "c", 80),
            ])
            .unwrap();

        let removed = store.archive(date("2026-08-15")).unwrap();
        assert_eq!(removed, 2);

        let rows = store
            .read_window(date("2026-01-01"), date("2026-12-31"))
            .unwrap();
        let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
        assert_eq!(links, ["c"]);
    }

    #[test]
    fn archive_of_empty_range_is_noop() {
        let tmp = tempfile::TempDir::new().unwrap();
        let store = store_in(&tmp);
        store.append(&[record("2026-08-20", "a", 80)]).unwrap();
        assert_eq!(store.archive(date("2026-08-01")).unwrap(), 0);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn rows_survive_reopen() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("table.json");

        let store = JsonTableStore::open(&path);
        store.append(&[record("2026-08-20", "a", 80)]).unwrap();
        drop(store);

        let store = JsonTableStore::open(&path);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn corrupt_file_is_fatal() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("table.json");
        fs::write(&path, "not a table").unwrap();

        let store = JsonTableStore::open(&path);
        let result = store.read_window(date("2026-01-01"), date("2026-12-31"));
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn append_creates_parent_directories() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("table.json");
        let store = JsonTableStore::open(&path);
        store.append(&[record("2026-08-20", "a", 80)]).unwrap();
        assert!(path.exists());
    }
}
