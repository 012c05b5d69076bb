//! Separator normalization, board detection, and file-type defaults.

use crate::classify::date_helpers::{month_number, word_token_spans};
use crate::config::CorrelatorConfig;
use crate::constants::file_types::{AGENDA_KEYWORD, MINUTES_KEYWORD};
use crate::data::{BoardCode, FileType};
use crate::types::{FileName, PathString};

/// A path split into forward-slash form, directory prefix, and filename.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedPath {
    /// Whole path with forward slashes.
    pub normalized: PathString,
    /// Everything before the last separator.
    pub directory: PathString,
    /// Segment after the last separator.
    pub filename: FileName,
}

impl NormalizedPath {
    /// Normalize `raw` and split it at the last separator.
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_separators(raw);
        let (directory, filename) = match normalized.rfind('/') {
            Some(idx) => (normalized[..idx].to_string(), normalized[idx + 1..].to_string()),
            None => (String::new(), normalized.clone()),
        };
        Self {
            normalized,
            directory,
            filename,
        }
    }

    /// Extension after the last dot of the filename, if any.
    pub fn extension(&self) -> Option<&str> {
        file_extension(&self.filename)
    }
}

/// Convert backslashes to forward slashes and collapse repeated separators.
///
/// A leading `//` (UNC share) is preserved.
pub fn normalize_separators(raw: &str) -> PathString {
    let mut normalized = String::with_capacity(raw.len());
    let mut previous_slash = false;
    for ch in raw.trim().chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' {
            if previous_slash && normalized != "/" {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        normalized.push(ch);
    }
    normalized
}

/// Extension after the last dot; dotfiles and dot-less names have none.
pub fn file_extension(filename: &str) -> Option<&str> {
    match filename.rfind('.') {
        Some(0) | None => None,
        Some(idx) => Some(&filename[idx + 1..]).filter(|ext| !ext.is_empty()),
    }
}

/// Earliest enabled board code in the filename, else in the directory.
///
/// Matching is case-sensitive. An occurrence is skipped when an uppercase
/// letter precedes it (`FEB` is not `EB`) or when its whole word is a month
/// name (`OCT_2024` is not `OC`, `OCTranscript` is).
pub fn extract_board(filename: &str, directory: &str, boards: &[BoardCode]) -> BoardCode {
    find_board(filename, boards)
        .or_else(|| find_board(directory, boards))
        .unwrap_or(BoardCode::Unknown)
}

fn find_board(text: &str, boards: &[BoardCode]) -> Option<BoardCode> {
    boards
        .iter()
        .filter_map(|board| board_position(text, board.as_str()).map(|pos| (pos, *board)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, board)| board)
}

fn board_position(text: &str, code: &str) -> Option<usize> {
    let spans = word_token_spans(text);
    text.match_indices(code)
        .map(|(pos, _)| pos)
        .find(|&pos| is_standalone_code(text, pos, &spans))
}

fn is_standalone_code(text: &str, pos: usize, spans: &[(usize, usize)]) -> bool {
    let glued = text[..pos]
        .chars()
        .next_back()
        .is_some_and(|ch| ch.is_ascii_uppercase());
    let month_word = spans
        .iter()
        .find(|&&(start, end)| start <= pos && pos < end)
        .is_some_and(|&(start, end)| month_number(&text[start..end]).is_some());
    !glued && !month_word
}

/// Decide the document type of `filename`.
///
/// Caption extensions default to transcript; an `agenda` keyword overrides
/// that, and a `minutes` keyword overrides both.
pub fn classify_file_type(filename: &str, config: &CorrelatorConfig) -> FileType {
    let lowered = filename.to_lowercase();
    if lowered.contains(MINUTES_KEYWORD) {
        FileType::Minutes
    } else if lowered.contains(AGENDA_KEYWORD) {
        FileType::Agenda
    } else if file_extension(filename).is_some_and(|ext| config.is_caption_extension(ext)) {
        FileType::Transcript
    } else {
        FileType::Unknown
    }
}
