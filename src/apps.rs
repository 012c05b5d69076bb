//! Command-line runners backing the `match_trios` binary.

use std::error::Error;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Parser, ValueEnum, error::ErrorKind};
use tracing::info;

use crate::config::CorrelatorConfig;
use crate::constants::report::STDIN_MARKER;
use crate::errors::TrioError;
use crate::pipeline::Correlator;
use crate::report::{OutputFormat, format_summary, write_report_dir, write_trio_table};
use crate::transport::{PathList, read_path_list, read_path_list_from};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Tsv,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Tsv => OutputFormat::Tsv,
            FormatArg::Jsonl => OutputFormat::JsonLines,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "match_trios",
    disable_help_subcommand = true,
    about = "Match meeting agendas, minutes, and transcripts into monthly trios",
    long_about = "Read a newline-delimited list of file paths, classify each by board, document type, and meeting date, and emit one agenda/minutes/transcript trio per board and month.",
    after_help = "Set RUST_LOG=debug to see every skipped path and tie-break decision on stderr."
)]
struct MatchTriosCli {
    #[arg(
        long,
        value_name = "PATH",
        help = "Newline-delimited path list; '-' or omitted reads stdin"
    )]
    input: Option<PathBuf>,
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        help = "Write trios, diagnostics, and unresolved paths into DIR instead of printing complete trios to stdout"
    )]
    output_dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "tsv", help = "Table format")]
    format: FormatArg,
    #[arg(long, value_name = "JSON", help = "Optional JSON config file")]
    config: Option<PathBuf>,
    #[arg(
        long = "caption-ext",
        value_name = "EXT",
        help = "Caption extension treated as transcript, repeat as needed (replaces the configured list)"
    )]
    caption_extensions: Vec<String>,
    #[arg(
        long = "allow-incomplete",
        help = "Do not fail when no complete trio is found"
    )]
    allow_incomplete: bool,
    #[arg(
        long = "no-directory-dates",
        help = "Only search filenames when recovering month/year dates"
    )]
    no_directory_dates: bool,
}

impl MatchTriosCli {
    fn resolve_config(&self) -> Result<CorrelatorConfig, TrioError> {
        let mut config = match &self.config {
            Some(path) => CorrelatorConfig::from_json_file(path)?,
            None => CorrelatorConfig::default(),
        };
        if !self.caption_extensions.is_empty() {
            config.caption_extensions = self.caption_extensions.clone();
        }
        if self.allow_incomplete {
            config.require_complete = false;
        }
        if self.no_directory_dates {
            config.search_directory_for_dates = false;
        }
        Ok(config)
    }

    fn read_input(&self) -> Result<PathList, TrioError> {
        match &self.input {
            Some(path) if path.as_os_str() != STDIN_MARKER => read_path_list(path),
            _ => read_path_list_from(io::stdin().lock()).map_err(|source| {
                TrioError::PathListUnavailable {
                    path: STDIN_MARKER.to_string(),
                    source,
                }
            }),
        }
    }
}

/// Run `match_trios` with the provided CLI args (program name excluded).
///
/// Diagnostics are written before the completeness check, so a failing run
/// still leaves its incomplete groups on disk when `--output-dir` is set.
pub fn run_match_trios<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();

    let Some(cli) = parse_cli::<MatchTriosCli, _>(
        std::iter::once("match_trios".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let config = cli.resolve_config()?;
    let correlator = Correlator::new(config)?;
    let list = cli.read_input()?;
    let report = correlator.build_list_report(&list);
    let format = OutputFormat::from(cli.format);

    match &cli.output_dir {
        Some(dir) => {
            for path in write_report_dir(dir, &report, format)? {
                info!("[trios:cli] wrote {}", path.display());
            }
        }
        None => {
            let stdout = io::stdout();
            write_trio_table(BufWriter::new(stdout.lock()), &report.trios.complete, format)?;
        }
    }
    eprint!("{}", format_summary(&report.summary, report.fingerprint()));

    correlator.check(&report)?;
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}
