//! Error types exposed by this crate.
//!
//! Every error here signals corrupted or inconsistent quorum bookkeeping.
//! None of them is recoverable at this layer: silently skipping a bad entry
//! would understate confirmed data and break the agreement between replicas,
//! so callers must treat them as hard failures and stop the affected
//! partition until the durable state is repaired.

use anyerror::AnyError;

/// A part name that matches neither naming grammar of its
/// [`FormatVersion`](crate::FormatVersion).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
#[error("malformed part name {name:?}: {reason}")]
pub struct MalformedPartName {
    pub name: String,
    pub reason: String,
}

impl MalformedPartName {
    pub fn new(name: impl ToString, reason: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The set of errors which may take place when decoding a durable quorum
/// state byte string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum DecodeError {
    #[error(transparent)]
    MalformedPartName(#[from] MalformedPartName),

    /// The multi-entry header declared more records than the input contains.
    #[error("truncated input: {declared} records declared, only {found} present")]
    TruncatedInput { declared: usize, found: usize },

    /// A record (or the header, as record 0) is missing a required delimiter
    /// or carries an unparseable field.
    #[error("malformed record {index}: {source}")]
    MalformedRecord { index: usize, source: AnyError },

    /// The input carries no multi-entry marker and is not a bare part name
    /// either, e.g. it is empty or not valid UTF-8.
    #[error("input matches no known quorum state format")]
    UnrecognizedFormat,
}

impl DecodeError {
    pub(crate) fn malformed_record(
        index: usize,
        reason: impl std::fmt::Display + 'static,
    ) -> Self {
        Self::MalformedRecord {
            index,
            source: AnyError::error(reason),
        }
    }
}
