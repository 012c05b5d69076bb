#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Trio aggregation and tie-breaking.
pub mod aggregate;
/// Command-line runners shared by the binaries.
pub mod apps;
/// Per-path board, type, and date classification.
pub mod classify;
/// Correlation configuration.
pub mod config;
/// Centralized constants for boards, date patterns, and report layout.
pub mod constants;
/// File records, trio keys, and trio groups.
pub mod data;
mod hash;
/// Classify, aggregate, and validate in one run.
pub mod pipeline;
/// TSV and JSON Lines writers.
pub mod report;
/// Input transports for path lists (filesystem and stdin).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Trio completeness partitioning.
pub mod validate;

mod errors;

pub use classify::{Classifier, DateCascade, FallbackResolver, classify_path, classify_paths};
pub use config::CorrelatorConfig;
pub use data::{
    BoardCode, DateGranularity, DateSource, FileRecord, FileType, TrioGroup, TrioKey,
};
pub use errors::TrioError;
pub use pipeline::{Correlator, RunSummary, TrioReport};
pub use report::OutputFormat;
pub use transport::{PathList, read_path_list, read_path_list_from};
pub use types::{DateToken, FileName, HashPart, PathString};
pub use validate::{TrioStatus, ValidatedTrios};
