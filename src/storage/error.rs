//! Storage error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Which part of a key/value round trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum StorageErrorKind {
    /// The backend could not be reached, opened or migrated.
    #[display("backend unavailable")]
    Unavailable,
    /// A read or write against a reachable backend failed.
    #[display("query failed")]
    Query,
    /// A value could not be encoded for storage.
    #[display("encoding failed")]
    Encoding,
}

/// Key/value store failure with location tracking.
///
/// Callers above the store layer treat it as "storage unavailable" and
/// degrade to defaults for reads, but never write defaults back.
#[derive(Debug, Clone, Display, Error)]
#[display("Store {}: {} at {}:{}", kind, message, file, line)]
pub struct StorageError {
    /// Failure category.
    pub kind: StorageErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StorageError {
    /// Creates a storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StorageErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Backend could not be reached.
    #[track_caller]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::Unavailable, message)
    }

    /// Value could not be encoded.
    #[track_caller]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::new(StorageErrorKind::Encoding, message)
    }
}

impl From<diesel::result::Error> for StorageError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(StorageErrorKind::Query, format!("SQLite statement failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for StorageError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::unavailable(format!("SQLite connection refused: {}", err))
    }
}
