//! Per-path classification: board, document type, and meeting date.
//!
//! Dates come from an ordered chain of stages. The first stage that yields a
//! date wins and later stages never run for that path.

pub mod cascade;
pub mod date_helpers;
pub mod fallback;
pub mod path;

use chrono::NaiveDate;

use crate::config::CorrelatorConfig;
use crate::data::{BoardCode, DateGranularity, DateSource, FileRecord};
use crate::types::DateToken;

pub use cascade::{DateCascade, DateFamily, DateRule, FieldOrder, MonthStyle, PatternVariant};
pub use fallback::FallbackResolver;
pub use path::NormalizedPath;

/// Date stages in the order they are attempted.
pub const DATE_CHAIN: [DateSource; 3] = [
    DateSource::Cascade,
    DateSource::MonthYearToken,
    DateSource::SplitTokens,
];

/// A date recovered by one stage of the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDate {
    /// Substring the date was read from.
    pub token: DateToken,
    /// Resolved meeting date.
    pub date: NaiveDate,
    /// Full date or month/year only.
    pub granularity: DateGranularity,
    /// Stage that produced the date.
    pub source: DateSource,
}

/// Turns raw paths into immutable [`FileRecord`]s.
pub struct Classifier<'c> {
    config: &'c CorrelatorConfig,
    boards: Vec<BoardCode>,
    cascade: &'static DateCascade,
    fallback: &'static FallbackResolver,
}

impl<'c> Classifier<'c> {
    /// Classifier over `config`'s enabled boards and caption extensions.
    pub fn new(config: &'c CorrelatorConfig) -> Self {
        Self {
            config,
            boards: config.enabled_boards(),
            cascade: DateCascade::standard(),
            fallback: FallbackResolver::standard(),
        }
    }

    /// Classify one input path.
    pub fn classify(&self, input_index: usize, raw: &str) -> FileRecord {
        let parsed = NormalizedPath::parse(raw);
        let board_code = path::extract_board(&parsed.filename, &parsed.directory, &self.boards);
        let file_type = path::classify_file_type(&parsed.filename, self.config);
        let resolved = self.resolve_date(&parsed);

        FileRecord {
            input_index,
            raw_path: raw.to_string(),
            board_code,
            file_type,
            date_granularity: resolved
                .as_ref()
                .map_or(DateGranularity::Unresolved, |found| found.granularity),
            date_source: resolved.as_ref().map(|found| found.source),
            meeting_date: resolved.as_ref().map(|found| found.date),
            date_token: resolved.map(|found| found.token),
            normalized_path: parsed.normalized,
            directory: parsed.directory,
            filename: parsed.filename,
        }
    }

    /// Run the date chain, stopping at the first stage that succeeds.
    pub fn resolve_date(&self, parsed: &NormalizedPath) -> Option<ResolvedDate> {
        DATE_CHAIN
            .iter()
            .find_map(|stage| self.attempt(*stage, parsed))
    }

    /// Run a single stage of the date chain.
    pub fn attempt(&self, stage: DateSource, parsed: &NormalizedPath) -> Option<ResolvedDate> {
        let mut sources = vec![parsed.filename.as_str()];
        if self.config.search_directory_for_dates && !parsed.directory.is_empty() {
            sources.push(parsed.directory.as_str());
        }

        let fallback = match stage {
            DateSource::Cascade => {
                return self
                    .cascade
                    .extract(&parsed.filename)
                    .map(|found| ResolvedDate {
                        token: found.token,
                        date: found.date,
                        granularity: DateGranularity::Full,
                        source: stage,
                    });
            }
            DateSource::MonthYearToken => self.fallback.resolve_month_year(&sources),
            DateSource::SplitTokens => self.fallback.resolve_split(&sources),
        };
        fallback.map(|found| ResolvedDate {
            token: found.token,
            date: found.date,
            granularity: DateGranularity::MonthYear,
            source: found.source,
        })
    }
}

/// Classify a single path under `config`.
pub fn classify_path(input_index: usize, raw: &str, config: &CorrelatorConfig) -> FileRecord {
    Classifier::new(config).classify(input_index, raw)
}

/// Classify `paths` in order; each record keeps its input position.
pub fn classify_paths<S: AsRef<str>>(paths: &[S], config: &CorrelatorConfig) -> Vec<FileRecord> {
    let classifier = Classifier::new(config);
    paths
        .iter()
        .enumerate()
        .map(|(idx, raw)| classifier.classify(idx, raw.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FileType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn full_date_and_month_year_agendas_share_a_key() {
        let config = CorrelatorConfig::default();
        let records = classify_paths(
            &["2024_03_14_EB_agenda.docx", "EBAgenda_March2024.docx"],
            &config,
        );

        let full = &records[0];
        assert_eq!(full.board_code, BoardCode::EB);
        assert_eq!(full.file_type, FileType::Agenda);
        assert_eq!(full.meeting_date, Some(ymd(2024, 3, 14)));
        assert_eq!(full.date_granularity, DateGranularity::Full);
        assert_eq!(full.date_token.as_deref(), Some("2024_03_14"));
        assert_eq!(full.date_source, Some(DateSource::Cascade));

        let partial = &records[1];
        assert_eq!(partial.board_code, BoardCode::EB);
        assert_eq!(partial.file_type, FileType::Agenda);
        assert_eq!(partial.meeting_date, Some(ymd(2024, 3, 1)));
        assert_eq!(partial.date_granularity, DateGranularity::MonthYear);
        assert_eq!(partial.input_index, 1);
        assert_eq!(full.trio_key(), partial.trio_key());
    }

    #[test]
    fn board_glued_filenames_keep_board_and_date() {
        let config = CorrelatorConfig::default();
        let classifier = Classifier::new(&config);

        let transcript = classifier.classify(0, "OCTranscript_2024-03-14.vtt");
        assert_eq!(transcript.board_code, BoardCode::OC);
        assert_eq!(transcript.file_type, FileType::Transcript);
        assert_eq!(transcript.meeting_date, Some(ymd(2024, 3, 14)));
        assert_eq!(transcript.date_granularity, DateGranularity::Full);

        let agenda = classifier.classify(1, "EBMARCH2024_agenda.docx");
        assert_eq!(agenda.board_code, BoardCode::EB);
        assert_eq!(agenda.file_type, FileType::Agenda);
        assert_eq!(agenda.meeting_date, Some(ymd(2024, 3, 1)));
        assert_eq!(agenda.date_granularity, DateGranularity::MonthYear);
        assert_eq!(agenda.date_token.as_deref(), Some("MARCH2024"));
    }

    #[test]
    fn year_only_paths_stay_unresolved() {
        let config = CorrelatorConfig::default();
        let classifier = Classifier::new(&config);
        let record = classifier.classify(0, "randomnotes_2024.docx");
        assert_eq!(record.board_code, BoardCode::Unknown);
        assert_eq!(record.file_type, FileType::Unknown);
        assert_eq!(record.date_granularity, DateGranularity::Unresolved);
        assert_eq!(record.meeting_date, None);
        assert_eq!(record.date_token, None);
        assert_eq!(record.trio_key(), None);
    }

    #[test]
    fn cascade_ignores_directory_dates() {
        let config = CorrelatorConfig::default();
        let classifier = Classifier::new(&config);
        let record = classifier.classify(0, r"S:\Boards\OC\2024-05-09\OC_minutes_May2024.docx");
        assert_eq!(record.directory, "S:/Boards/OC/2024-05-09");
        assert_eq!(record.meeting_date, Some(ymd(2024, 5, 1)));
        assert_eq!(record.date_source, Some(DateSource::MonthYearToken));
    }

    #[test]
    fn directory_search_can_be_disabled() {
        let config = CorrelatorConfig {
            search_directory_for_dates: false,
            ..CorrelatorConfig::default()
        };
        let classifier = Classifier::new(&config);
        let record = classifier.classify(0, "S:/Boards/TPB/March 2024/TPB_minutes.docx");
        assert_eq!(record.date_granularity, DateGranularity::Unresolved);

        let config = CorrelatorConfig::default();
        let classifier = Classifier::new(&config);
        let record = classifier.classify(0, "S:/Boards/TPB/March 2024/TPB_minutes.docx");
        assert_eq!(record.meeting_date, Some(ymd(2024, 3, 1)));
        assert_eq!(record.date_token.as_deref(), Some("March 2024"));
    }

    #[test]
    fn stages_can_be_attempted_individually() {
        let config = CorrelatorConfig::default();
        let classifier = Classifier::new(&config);
        let parsed = NormalizedPath::parse("S:/Boards/EDD/2023/EDD_transcript_Nov.vtt");
        assert_eq!(classifier.attempt(DateSource::Cascade, &parsed), None);
        assert_eq!(classifier.attempt(DateSource::MonthYearToken, &parsed), None);
        let split = classifier.attempt(DateSource::SplitTokens, &parsed).unwrap();
        assert_eq!(split.date, ymd(2023, 11, 1));
        assert_eq!(split.token, "Nov 2023");
        assert_eq!(split.granularity, DateGranularity::MonthYear);
    }
}
