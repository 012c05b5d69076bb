/// Constants describing the closed set of committee boards.
pub mod boards {
    /// Board codes enabled by default, in declaration order.
    pub const DEFAULT_BOARD_CODES: [&str; 5] = ["OC", "EB", "GMPB", "TPB", "EDD"];
}

/// Constants used by file-type classification.
pub mod file_types {
    /// Caption-file extensions that default a record to the transcript type.
    pub const DEFAULT_CAPTION_EXTENSIONS: [&str; 2] = ["vtt", "srt"];
    /// Case-insensitive filename keyword marking an agenda.
    pub const AGENDA_KEYWORD: &str = "agenda";
    /// Case-insensitive filename keyword marking minutes (checked after agenda).
    pub const MINUTES_KEYWORD: &str = "minutes";
}

/// Constants used by the date cascade and fallback resolver.
pub mod dates {
    /// Earliest accepted meeting year.
    pub const MIN_YEAR: i32 = 2000;
    /// Latest accepted meeting year.
    pub const MAX_YEAR: i32 = 2099;
    /// Day assigned to month/year-only dates.
    pub const FALLBACK_DAY: u32 = 1;
    /// Regex fragment for a four-digit year in the accepted range.
    pub const YEAR_PATTERN: &str = "(20[0-9]{2})";
    /// Regex fragment for a two-digit month (compact variants).
    pub const MONTH_COMPACT_PATTERN: &str = "(0[1-9]|1[0-2])";
    /// Regex fragment for a two-digit day (compact variants).
    pub const DAY_COMPACT_PATTERN: &str = "(0[1-9]|[12][0-9]|3[01])";
    /// Regex fragment for a month with optional leading zero.
    pub const MONTH_PATTERN: &str = "(1[0-2]|0?[1-9])";
    /// Regex fragment for a day with optional leading zero.
    pub const DAY_PATTERN: &str = "(3[01]|[12][0-9]|0?[1-9])";
    /// Regex fragment for the single separator allowed between delimited fields.
    pub const SEPARATOR_PATTERN: &str = "[-_ .]";
    /// Month names and abbreviations, longest alternatives first so that
    /// leftmost-first alternation never stops at a prefix.
    pub const MONTH_NAME_PATTERN: &str = "(january|february|march|april|may|june|july|august|september|october|november|december|sept|jan|feb|mar|apr|jun|jul|aug|sep|oct|nov|dec)";
}

/// Constants used by report writers.
pub mod report {
    /// Column order shared by every trio table.
    pub const TRIO_COLUMNS: [&str; 6] = [
        "board",
        "year",
        "month",
        "agenda_path",
        "minutes_path",
        "transcript_path",
    ];
    /// File stem for the complete-trio table.
    pub const COMPLETE_STEM: &str = "trios";
    /// File stem for the missing-transcript diagnostic table.
    pub const MISSING_TRANSCRIPT_STEM: &str = "missing_transcript";
    /// File stem for the incomplete diagnostic table.
    pub const INCOMPLETE_STEM: &str = "incomplete";
    /// Filename for the unresolved-date path list.
    pub const UNRESOLVED_FILENAME: &str = "unresolved_dates.txt";
    /// Marker for stdin in place of an input path.
    pub const STDIN_MARKER: &str = "-";
}

/// Log messages shared by the pipeline stages.
pub mod messages {
    /// Logged when a path carries no enabled board code.
    pub const SKIP_UNKNOWN_BOARD_MSG: &str = "skipping path without a known board code";
    /// Logged when no date could be resolved for a path.
    pub const SKIP_UNRESOLVED_DATE_MSG: &str = "routing path with unresolved date to diagnostics";
    /// Logged when a dated path has no agenda/minutes/transcript type.
    pub const SKIP_UNTYPED_MSG: &str = "skipping dated path without a document type";
    /// Logged when a better candidate replaces a trio slot.
    pub const TIE_BREAK_MSG: &str = "replacing trio slot candidate";
}
