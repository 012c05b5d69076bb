use serde::Serialize;

use crate::data::{FileType, TrioGroup};

/// Completeness bucket of a trio group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrioStatus {
    /// Agenda, minutes, and transcript are all present.
    Complete,
    /// Agenda and minutes are present; the transcript is absent.
    MissingTranscript,
    /// Agenda or minutes is absent.
    Incomplete,
}

/// Classify a single group.
pub fn trio_status(group: &TrioGroup) -> TrioStatus {
    if group.is_complete() {
        TrioStatus::Complete
    } else if group.path_for(FileType::Agenda).is_some()
        && group.path_for(FileType::Minutes).is_some()
    {
        TrioStatus::MissingTranscript
    } else {
        TrioStatus::Incomplete
    }
}

/// Disjoint partition of the aggregated groups.
///
/// Each bucket keeps the key order of the input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidatedTrios {
    /// Agenda, minutes, and transcript present.
    pub complete: Vec<TrioGroup>,
    /// Transcript absent.
    pub missing_transcript: Vec<TrioGroup>,
    /// Agenda or minutes absent.
    pub incomplete: Vec<TrioGroup>,
}

impl ValidatedTrios {
    /// Total number of groups across the three buckets.
    pub fn group_count(&self) -> usize {
        self.complete.len() + self.missing_transcript.len() + self.incomplete.len()
    }

    /// Groups in `status`'s bucket.
    pub fn bucket(&self, status: TrioStatus) -> &[TrioGroup] {
        match status {
            TrioStatus::Complete => &self.complete,
            TrioStatus::MissingTranscript => &self.missing_transcript,
            TrioStatus::Incomplete => &self.incomplete,
        }
    }
}

/// Split `groups` into complete, missing-transcript, and incomplete buckets.
pub fn partition(groups: Vec<TrioGroup>) -> ValidatedTrios {
    let mut validated = ValidatedTrios::default();
    for group in groups {
        match trio_status(&group) {
            TrioStatus::Complete => validated.complete.push(group),
            TrioStatus::MissingTranscript => validated.missing_transcript.push(group),
            TrioStatus::Incomplete => validated.incomplete.push(group),
        }
    }
    validated
}
