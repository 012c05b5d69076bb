//! Table writers for trios, diagnostics, and unresolved paths.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::report::{
    COMPLETE_STEM, INCOMPLETE_STEM, MISSING_TRANSCRIPT_STEM, TRIO_COLUMNS, UNRESOLVED_FILENAME,
};
use crate::data::TrioGroup;
use crate::errors::TrioError;
use crate::pipeline::{RunSummary, TrioReport};
use crate::types::{HashPart, PathString};
use crate::validate::TrioStatus;

/// Serialization used for trio tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-separated values with a header row.
    #[default]
    Tsv,
    /// One JSON object per line.
    JsonLines,
}

impl OutputFormat {
    /// File extension used in output-directory mode.
    pub const fn extension(self) -> &'static str {
        match self {
            OutputFormat::Tsv => "tsv",
            OutputFormat::JsonLines => "jsonl",
        }
    }
}

/// One JSON Lines manifest row.
#[derive(Debug, Serialize)]
struct TrioRow<'g> {
    board: &'static str,
    year: i32,
    month: u32,
    agenda: Option<&'g str>,
    minutes: Option<&'g str>,
    transcript: Option<&'g str>,
}

impl<'g> From<&'g TrioGroup> for TrioRow<'g> {
    fn from(group: &'g TrioGroup) -> Self {
        Self {
            board: group.key.board.as_str(),
            year: group.key.year,
            month: group.key.month,
            agenda: group.agenda_path.as_deref(),
            minutes: group.minutes_path.as_deref(),
            transcript: group.transcript_path.as_deref(),
        }
    }
}

/// Cells of a TSV row, in [`TRIO_COLUMNS`] order; absent paths are empty.
pub fn row_fields(group: &TrioGroup) -> [String; 6] {
    let cell = |path: &Option<PathString>| path.clone().unwrap_or_default();
    [
        group.key.board.to_string(),
        format!("{:04}", group.key.year),
        format!("{:02}", group.key.month),
        cell(&group.agenda_path),
        cell(&group.minutes_path),
        cell(&group.transcript_path),
    ]
}

/// Fingerprint fragment for a group; absent paths hash as `-`.
pub fn hash_part(group: &TrioGroup) -> HashPart {
    let slot = |path: &Option<PathString>| path.as_deref().unwrap_or("-").to_string();
    format!(
        "{}|{}|{}|{}|{}|{}",
        group.key.board,
        group.key.year,
        group.key.month,
        slot(&group.agenda_path),
        slot(&group.minutes_path),
        slot(&group.transcript_path)
    )
}

/// Write `groups` as a table in `format`.
pub fn write_trio_table<W: Write>(
    mut writer: W,
    groups: &[TrioGroup],
    format: OutputFormat,
) -> Result<(), TrioError> {
    match format {
        OutputFormat::Tsv => {
            writeln!(writer, "{}", TRIO_COLUMNS.join("\t"))?;
            for group in groups {
                writeln!(writer, "{}", row_fields(group).join("\t"))?;
            }
        }
        OutputFormat::JsonLines => {
            for group in groups {
                serde_json::to_writer(&mut writer, &TrioRow::from(group))
                    .map_err(|err| TrioError::Serialization(err.to_string()))?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write one raw path per line.
pub fn write_unresolved<W: Write>(mut writer: W, paths: &[PathString]) -> Result<(), TrioError> {
    for path in paths {
        writeln!(writer, "{path}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every table of `report` into `dir`, creating it if needed.
///
/// Returns the written file paths in a fixed order.
pub fn write_report_dir(
    dir: impl AsRef<Path>,
    report: &TrioReport,
    format: OutputFormat,
) -> Result<Vec<PathBuf>, TrioError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(4);
    for (stem, status) in [
        (COMPLETE_STEM, TrioStatus::Complete),
        (MISSING_TRANSCRIPT_STEM, TrioStatus::MissingTranscript),
        (INCOMPLETE_STEM, TrioStatus::Incomplete),
    ] {
        let path = dir.join(format!("{stem}.{}", format.extension()));
        let file = BufWriter::new(File::create(&path)?);
        write_trio_table(file, report.trios.bucket(status), format)?;
        written.push(path);
    }

    let path = dir.join(UNRESOLVED_FILENAME);
    write_unresolved(BufWriter::new(File::create(&path)?), &report.unresolved_dates)?;
    written.push(path);
    Ok(written)
}

/// Human-readable run summary.
pub fn format_summary(summary: &RunSummary, fingerprint: u64) -> String {
    let mut out = String::new();
    let rows = [
        ("inputs", summary.inputs),
        ("blank lines skipped", summary.blank_lines),
        ("unknown board", summary.unknown_board),
        ("unresolved date", summary.unresolved_date),
        ("untyped", summary.untyped),
        ("classified", summary.classified),
        ("groups", summary.groups),
        ("complete", summary.complete),
        ("missing transcript", summary.missing_transcript),
        ("incomplete", summary.incomplete),
    ];
    out.push_str("=== trio summary ===\n");
    for (label, value) in rows {
        out.push_str(&format!("{label:<20} {value}\n"));
    }
    out.push_str(&format!("{:<20} {fingerprint:016x}\n", "fingerprint"));
    out
}
