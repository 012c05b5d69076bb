//! End-to-end correlation: classify every path, aggregate, then validate.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::classify::classify_paths;
use crate::config::CorrelatorConfig;
use crate::constants::messages::{
    SKIP_UNKNOWN_BOARD_MSG, SKIP_UNRESOLVED_DATE_MSG, SKIP_UNTYPED_MSG,
};
use crate::data::{DateGranularity, FileRecord, FileType};
use crate::errors::TrioError;
use crate::hash::{FINGERPRINT_SEED, fingerprint_parts};
use crate::report::hash_part;
use crate::transport::PathList;
use crate::types::{HashPart, PathString};
use crate::validate::{ValidatedTrios, partition};

/// Per-run counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Non-blank input paths.
    pub inputs: usize,
    /// Blank lines dropped by the path-list reader.
    pub blank_lines: usize,
    /// Paths without an enabled board code.
    pub unknown_board: usize,
    /// Known-board paths with no recoverable date.
    pub unresolved_date: usize,
    /// Dated, known-board paths with no agenda/minutes/transcript type.
    pub untyped: usize,
    /// Records that entered aggregation.
    pub classified: usize,
    /// Distinct `(board, year, month)` keys.
    pub groups: usize,
    /// Groups with all three documents.
    pub complete: usize,
    /// Groups with agenda and minutes only.
    pub missing_transcript: usize,
    /// Groups missing agenda or minutes.
    pub incomplete: usize,
}

/// Everything produced by one correlation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrioReport {
    /// Every classified input, in input order.
    pub records: Vec<FileRecord>,
    /// Groups split by completeness.
    pub trios: ValidatedTrios,
    /// Raw paths with a known board but no recoverable date, in input order.
    pub unresolved_dates: Vec<PathString>,
    /// Run counters.
    pub summary: RunSummary,
}

impl TrioReport {
    /// Order-sensitive digest of every emitted row.
    ///
    /// Two runs over the same ordered input produce the same value.
    pub fn fingerprint(&self) -> u64 {
        let rows: Vec<HashPart> = [
            &self.trios.complete,
            &self.trios.missing_transcript,
            &self.trios.incomplete,
        ]
        .into_iter()
        .flatten()
        .map(hash_part)
        .chain(self.unresolved_dates.iter().cloned())
        .collect();
        fingerprint_parts(FINGERPRINT_SEED, &rows)
    }

    /// Fail with [`TrioError::NoCompleteTrios`] when a non-empty input
    /// produced no complete trio.
    pub fn ensure_complete(&self) -> Result<(), TrioError> {
        if self.summary.inputs > 0 && self.summary.complete == 0 {
            return Err(TrioError::NoCompleteTrios {
                inputs: self.summary.inputs,
                classified: self.summary.classified,
                groups: self.summary.groups,
            });
        }
        Ok(())
    }
}

/// Runs the classify → aggregate → validate pipeline under one config.
pub struct Correlator {
    config: CorrelatorConfig,
}

impl Correlator {
    /// Validate `config` and build a correlator.
    pub fn new(config: CorrelatorConfig) -> Result<Self, TrioError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    pub fn config(&self) -> &CorrelatorConfig {
        &self.config
    }

    /// Classify every path, keeping input order.
    pub fn classify_all<S: AsRef<str>>(&self, paths: &[S]) -> Vec<FileRecord> {
        classify_paths(paths, &self.config)
    }

    /// Build the report without applying the fatal completeness check.
    pub fn build_report<S: AsRef<str>>(&self, paths: &[S]) -> TrioReport {
        let started = Instant::now();
        let records = self.classify_all(paths);

        let mut summary = RunSummary {
            inputs: records.len(),
            ..RunSummary::default()
        };
        let mut unresolved_dates = Vec::new();
        for record in &records {
            if !record.board_code.is_known() {
                summary.unknown_board += 1;
                debug!("[trios:pipeline] {}: {}", SKIP_UNKNOWN_BOARD_MSG, record.raw_path);
            } else if record.date_granularity == DateGranularity::Unresolved {
                summary.unresolved_date += 1;
                unresolved_dates.push(record.raw_path.clone());
                debug!("[trios:pipeline] {}: {}", SKIP_UNRESOLVED_DATE_MSG, record.raw_path);
            } else if record.file_type == FileType::Unknown {
                summary.untyped += 1;
                debug!("[trios:pipeline] {}: {}", SKIP_UNTYPED_MSG, record.raw_path);
            } else {
                summary.classified += 1;
            }
        }

        let trios = partition(aggregate(&records));
        summary.groups = trios.group_count();
        summary.complete = trios.complete.len();
        summary.missing_transcript = trios.missing_transcript.len();
        summary.incomplete = trios.incomplete.len();

        let report = TrioReport {
            records,
            trios,
            unresolved_dates,
            summary,
        };
        info!(
            "[trios:pipeline] correlated {} paths in {:.3}s (classified={}, groups={}, complete={}, missing_transcript={}, incomplete={}, unresolved={}, fingerprint={:016x})",
            summary.inputs,
            started.elapsed().as_secs_f64(),
            summary.classified,
            summary.groups,
            summary.complete,
            summary.missing_transcript,
            summary.incomplete,
            summary.unresolved_date,
            report.fingerprint()
        );
        report
    }

    /// Build the report for a [`PathList`], carrying its blank-line count.
    pub fn build_list_report(&self, list: &PathList) -> TrioReport {
        if list.blank_lines > 0 {
            warn!(
                "[trios:pipeline] skipped {} blank lines in the path list",
                list.blank_lines
            );
        }
        let mut report = self.build_report(&list.paths);
        report.summary.blank_lines = list.blank_lines;
        report
    }

    /// Apply the run-level failure rules to a finished report.
    ///
    /// An empty input only warns. Zero complete trios from a non-empty input
    /// fails when `require_complete` is set and warns otherwise.
    pub fn check(&self, report: &TrioReport) -> Result<(), TrioError> {
        let summary = &report.summary;
        if summary.inputs == 0 {
            warn!("[trios:pipeline] path list is empty; nothing to correlate");
            return Ok(());
        }
        if summary.complete == 0 {
            if self.config.require_complete {
                return report.ensure_complete();
            }
            warn!(
                "[trios:pipeline] no complete trios among {} paths ({} groups)",
                summary.inputs, summary.groups
            );
        }
        Ok(())
    }

    /// Correlate `paths` and apply [`Correlator::check`].
    pub fn correlate<S: AsRef<str>>(&self, paths: &[S]) -> Result<TrioReport, TrioError> {
        let report = self.build_report(paths);
        self.check(&report)?;
        Ok(report)
    }

    /// Correlate a [`PathList`] and apply [`Correlator::check`].
    pub fn correlate_list(&self, list: &PathList) -> Result<TrioReport, TrioError> {
        let report = self.build_list_report(list);
        self.check(&report)?;
        Ok(report)
    }
}
