//! Storage layer: the durable, deduplicated regulation table.

use chrono::NaiveDate;
use gaceta_core::StoredRecord;

mod error;
pub use error::StoreError;

mod table;
pub use table::JsonTableStore;

/// Durable table of accepted notices, keyed by identity.
///
/// The store exclusively owns its on-disk representation; pipelines hold
/// records only transiently in memory. At most one writer process at a time
/// is assumed.
pub trait RegulationStore {
    /// Append a batch, deduplicating by identity key against existing rows.
    ///
    /// Later append wins on conflict: the existing row's fields are
    /// overwritten in place and the row keeps its position. An empty batch
    /// is a no-op. Returns the number of newly inserted keys; state is
    /// durable once this returns.
    fn append(&self, records: &[StoredRecord]) -> Result<usize, StoreError>;

    /// All rows with `start <= publication_date <= end`, ascending by date,
    /// ties broken by identity key.
    fn read_window(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StoredRecord>, StoreError>;

    /// The `n` highest-relevance rows, ties broken by publication date
    /// descending (most recent first), then identity key.
    fn read_top_n(&self, n: usize) -> Result<Vec<StoredRecord>, StoreError>;

    /// Remove every row with `publication_date < before` from the live
    /// table. Returns the number of rows removed; removing nothing is a
    /// no-op, not an error.
    fn archive(&self, before: NaiveDate) -> Result<usize, StoreError>;
}
