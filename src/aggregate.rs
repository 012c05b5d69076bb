//! Single-pass reduction of classified records into one trio per month.
//!
//! Every candidate for a `(board, year, month)` key competes for its slot
//! using [`CandidateRank`]; the reduction runs only after all records are
//! classified, so the winner never depends on arrival order.

use std::collections::BTreeMap;

use tracing::debug;

use crate::constants::messages::TIE_BREAK_MSG;
use crate::data::{FileRecord, FileType, TrioGroup, TrioKey};

/// Ordering key for competing candidates; the smaller rank wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CandidateRank {
    granularity: u8,
    filename_len: usize,
    input_index: usize,
}

impl CandidateRank {
    /// Full dates first, then shorter filenames, then earlier input.
    pub fn of(record: &FileRecord) -> Self {
        Self {
            granularity: record.date_granularity.rank(),
            filename_len: record.filename_len(),
            input_index: record.input_index,
        }
    }
}

type Slots<'r> = [Option<&'r FileRecord>; 3];

/// Group dated, typed, known-board records into [`TrioGroup`]s.
///
/// Records without a trio key or document type are ignored. Groups come back
/// sorted by key.
pub fn aggregate(records: &[FileRecord]) -> Vec<TrioGroup> {
    let mut table: BTreeMap<TrioKey, Slots<'_>> = BTreeMap::new();

    for record in records {
        let (Some(key), Some(slot)) = (record.trio_key(), record.file_type.slot()) else {
            continue;
        };
        let slots = table.entry(key).or_default();
        match slots[slot] {
            None => slots[slot] = Some(record),
            Some(current) => {
                if CandidateRank::of(record) < CandidateRank::of(current) {
                    debug!(
                        "[trios:aggregate] {} {} {}: {} -> {}",
                        TIE_BREAK_MSG, key, record.file_type, current.raw_path, record.raw_path
                    );
                    slots[slot] = Some(record);
                }
            }
        }
    }

    table
        .into_iter()
        .map(|(key, slots)| {
            let path = |file_type: FileType| {
                file_type
                    .slot()
                    .and_then(|idx| slots[idx])
                    .map(|record| record.raw_path.clone())
            };
            TrioGroup {
                key,
                agenda_path: path(FileType::Agenda),
                minutes_path: path(FileType::Minutes),
                transcript_path: path(FileType::Transcript),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_paths;
    use crate::config::CorrelatorConfig;
    use crate::data::BoardCode;

    fn groups_for(paths: &[&str]) -> Vec<TrioGroup> {
        aggregate(&classify_paths(paths, &CorrelatorConfig::default()))
    }

    #[test]
    fn full_date_beats_month_year_regardless_of_order() {
        for paths in [
            ["2024_03_14_EB_agenda.docx", "EBAgenda_March2024.docx"],
            ["EBAgenda_March2024.docx", "2024_03_14_EB_agenda.docx"],
        ] {
            let groups = groups_for(&paths);
            assert_eq!(groups.len(), 1);
            assert_eq!(
                groups[0].agenda_path.as_deref(),
                Some("2024_03_14_EB_agenda.docx")
            );
            assert_eq!(
                groups[0].key,
                TrioKey {
                    board: BoardCode::EB,
                    year: 2024,
                    month: 3
                }
            );
        }
    }

    #[test]
    fn shorter_filename_wins_between_full_dates() {
        let groups = groups_for(&[
            "S:/EB/EB_minutes_2024-03-14_final_v2.docx",
            "S:/EB/archive/deep/EB_minutes_2024-03-14.docx",
        ]);
        assert_eq!(
            groups[0].minutes_path.as_deref(),
            Some("S:/EB/archive/deep/EB_minutes_2024-03-14.docx")
        );
    }

    #[test]
    fn equal_length_filenames_keep_the_earliest_input() {
        let groups = groups_for(&[
            "a/EB_minutes_2024-03-14.docx",
            "b/EB_minutes_2024-03-15.docx",
        ]);
        assert_eq!(
            groups[0].minutes_path.as_deref(),
            Some("a/EB_minutes_2024-03-14.docx")
        );

        let groups = groups_for(&[
            "b/EB_minutes_2024-03-15.docx",
            "a/EB_minutes_2024-03-14.docx",
        ]);
        assert_eq!(
            groups[0].minutes_path.as_deref(),
            Some("b/EB_minutes_2024-03-15.docx")
        );
    }

    #[test]
    fn unusable_records_never_form_groups() {
        let groups = groups_for(&[
            "randomnotes_2024.docx",
            "EB_notes_2024-03-14.docx",
            "agenda_2024-03-14.docx",
            "EB_agenda_undated.docx",
        ]);
        assert!(groups.is_empty());
    }

    #[test]
    fn groups_are_sorted_by_board_then_month() {
        let groups = groups_for(&[
            "TPB_agenda_2024-01-10.docx",
            "EB_agenda_2024-02-10.docx",
            "EB_agenda_2023-12-10.docx",
            "EB_2024-02-10.vtt",
        ]);
        let keys: Vec<String> = groups.iter().map(|group| group.key.to_string()).collect();
        assert_eq!(keys, vec!["EB/2023-12", "EB/2024-02", "TPB/2024-01"]);
        assert_eq!(groups[1].transcript_path.as_deref(), Some("EB_2024-02-10.vtt"));
        assert_eq!(groups[1].minutes_path, None);
    }
}
