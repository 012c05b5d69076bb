use std::io;

use thiserror::Error;

use crate::types::PathString;

/// Error type for path-list loading, configuration, and run-level failures.
///
/// Per-path problems (unknown board, unresolved date) are never errors; they
/// are routed to the report diagnostics instead.
#[derive(Debug, Error)]
pub enum TrioError {
    /// The path list could not be opened or read.
    #[error("path list '{path}' is missing or unreadable: {source}")]
    PathListUnavailable {
        /// Path list location, or `-` for stdin.
        path: PathString,
        /// Underlying read failure.
        source: io::Error,
    },
    /// A non-empty input produced no complete trio.
    #[error(
        "no complete trios resolved from {inputs} input paths ({classified} classified, {groups} groups)"
    )]
    NoCompleteTrios {
        /// Non-blank input paths.
        inputs: usize,
        /// Records that entered aggregation.
        classified: usize,
        /// Groups formed.
        groups: usize,
    },
    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A report row could not be serialized.
    #[error("serialization failure: {0}")]
    Serialization(String),
    /// Output write failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}
