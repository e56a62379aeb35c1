use std::path::PathBuf;
use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Enum representing all possible errors in the stardict_sqlite library.
///
/// Each variant corresponds to one stage of a conversion run, so a failed
/// run can report whether setup, insertion, or persistence broke. Close
/// failures are logged rather than returned and therefore have no variant.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to open database or create schema: {0}")]
    Setup(#[source] rusqlite::Error),

    #[error("failed to insert row: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("failed to write database to {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}
