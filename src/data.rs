use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub use crate::types::{DateToken, FileName, PathString};

/// Committee identifier recovered from a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BoardCode {
    /// `OC` board.
    OC,
    /// `EB` board.
    EB,
    /// `GMPB` board.
    GMPB,
    /// `TPB` board.
    TPB,
    /// `EDD` board.
    EDD,
    /// No enabled board code was found; the record is filtered out downstream.
    #[serde(rename = "unknown")]
    Unknown,
}

impl BoardCode {
    /// Every known board, in canonical order.
    pub const KNOWN: [BoardCode; 5] = [
        BoardCode::OC,
        BoardCode::EB,
        BoardCode::GMPB,
        BoardCode::TPB,
        BoardCode::EDD,
    ];

    /// Return the code as it appears in filenames.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BoardCode::OC => "OC",
            BoardCode::EB => "EB",
            BoardCode::GMPB => "GMPB",
            BoardCode::TPB => "TPB",
            BoardCode::EDD => "EDD",
            BoardCode::Unknown => "unknown",
        }
    }

    /// Look up a known board by its exact (case-sensitive) code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|board| board.as_str() == code)
    }

    /// True for every board except `Unknown`.
    pub const fn is_known(&self) -> bool {
        !matches!(self, BoardCode::Unknown)
    }
}

impl fmt::Display for BoardCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document role inside a meeting trio.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    /// Meeting agenda.
    Agenda,
    /// Approved or draft minutes.
    Minutes,
    /// Caption file (`.vtt`, `.srt`) or anything typed as a transcript.
    Transcript,
    /// Neither keyword nor caption extension matched.
    Unknown,
}

impl FileType {
    /// Return the lowercase type label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FileType::Agenda => "agenda",
            FileType::Minutes => "minutes",
            FileType::Transcript => "transcript",
            FileType::Unknown => "unknown",
        }
    }

    /// Slot index inside a trio, `None` for untyped records.
    pub(crate) const fn slot(&self) -> Option<usize> {
        match self {
            FileType::Agenda => Some(0),
            FileType::Minutes => Some(1),
            FileType::Transcript => Some(2),
            FileType::Unknown => None,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How precisely a meeting date was recovered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateGranularity {
    /// Year, month, and day came from a single cascade token.
    Full,
    /// Only month and year were found; the day is the 1st.
    MonthYear,
    /// No usable date; the record is routed to the no-date diagnostics.
    #[serde(rename = "none")]
    Unresolved,
}

impl DateGranularity {
    /// Sort rank used by tie-breaks (lower is preferred).
    pub(crate) const fn rank(&self) -> u8 {
        match self {
            DateGranularity::Full => 0,
            DateGranularity::MonthYear => 1,
            DateGranularity::Unresolved => 2,
        }
    }
}

/// Stage of the date chain that produced a record's meeting date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// A full-date cascade rule matched the filename.
    Cascade,
    /// A combined month+year token matched.
    MonthYearToken,
    /// Separate month and year tokens were combined.
    SplitTokens,
}

/// A path after normalization, board/type classification, and date resolution.
///
/// Records are built once from the input list and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Zero-based position in the input list (final tie-break key).
    pub input_index: usize,
    /// Path exactly as it appeared in the input.
    pub raw_path: PathString,
    /// Path with forward-slash separators.
    pub normalized_path: PathString,
    /// Normalized directory prefix (empty for bare filenames).
    pub directory: PathString,
    /// Segment after the last separator.
    pub filename: FileName,
    /// Detected board, `Unknown` when none matched.
    pub board_code: BoardCode,
    /// Document role.
    pub file_type: FileType,
    /// Substring that produced `meeting_date`, when one was found.
    pub date_token: Option<DateToken>,
    /// Resolved date; the 1st for month/year matches.
    pub meeting_date: Option<NaiveDate>,
    /// Precision of `meeting_date`.
    pub date_granularity: DateGranularity,
    /// Which stage resolved the date.
    pub date_source: Option<DateSource>,
}

impl FileRecord {
    /// Grouping key for records that can join a trio.
    ///
    /// Returns `None` when the board is unknown or the date is unresolved.
    pub fn trio_key(&self) -> Option<TrioKey> {
        if !self.board_code.is_known() || self.date_granularity == DateGranularity::Unresolved {
            return None;
        }
        let date = self.meeting_date?;
        Some(TrioKey {
            board: self.board_code,
            year: date.year(),
            month: date.month(),
        })
    }

    /// Filename length in characters (not bytes).
    pub fn filename_len(&self) -> usize {
        self.filename.chars().count()
    }
}

/// Grouping key for one committee meeting month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrioKey {
    /// Committee.
    pub board: BoardCode,
    /// Meeting year.
    pub year: i32,
    /// Meeting month (1-12).
    pub month: u32,
}

impl fmt::Display for TrioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:04}-{:02}", self.board, self.year, self.month)
    }
}

/// Resolved documents for one `(board, year, month)` key.
///
/// Built once per aggregation pass and read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrioGroup {
    /// Board and month shared by every slot.
    pub key: TrioKey,
    /// Winning agenda, if any.
    pub agenda_path: Option<PathString>,
    /// Winning minutes, if any.
    pub minutes_path: Option<PathString>,
    /// Winning transcript, if any.
    pub transcript_path: Option<PathString>,
}

impl TrioGroup {
    /// Path stored for `file_type`, if any.
    pub fn path_for(&self, file_type: FileType) -> Option<&str> {
        match file_type {
            FileType::Agenda => self.agenda_path.as_deref(),
            FileType::Minutes => self.minutes_path.as_deref(),
            FileType::Transcript => self.transcript_path.as_deref(),
            FileType::Unknown => None,
        }
    }

    /// True when agenda, minutes, and transcript are all present.
    pub fn is_complete(&self) -> bool {
        self.agenda_path.is_some() && self.minutes_path.is_some() && self.transcript_path.is_some()
    }
}
