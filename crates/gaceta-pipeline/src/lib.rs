//! Pipeline layer: the two run types of the system.
//!
//! Each run is a separate process invocation with no shared in-memory
//! state; the store's backing file is the only durable state. Runs are
//! single-threaded and sequential — external calls happen one notice at a
//! time, bounded by the collaborators' timeouts.

mod ingest;
pub use ingest::{IngestOutcome, run_ingest};

mod report;
pub use report::{ReportOutcome, run_report};

#[cfg(test)]
pub(crate) mod testutil;
