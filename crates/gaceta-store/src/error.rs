use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file exists but cannot be parsed; fatal for the run.
    #[error("corrupt regulation table at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("regulation table io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to replace regulation table: {0}")]
    Persist(#[from] tempfile::PersistError),
}
