use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::boards::DEFAULT_BOARD_CODES;
use crate::constants::file_types::DEFAULT_CAPTION_EXTENSIONS;
use crate::data::BoardCode;
use crate::errors::TrioError;

/// Top-level correlation configuration.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// overrides (for example `{"caption_extensions": ["vtt"]}`).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CorrelatorConfig {
    /// Board codes searched for in paths; must be a subset of the known boards.
    pub board_codes: Vec<String>,
    /// Extensions (without the dot) that default a record to the transcript type.
    pub caption_extensions: Vec<String>,
    /// Fail the run when a non-empty input yields zero complete trios.
    pub require_complete: bool,
    /// Let the fallback resolver consult the directory path after the filename.
    pub search_directory_for_dates: bool,
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            board_codes: DEFAULT_BOARD_CODES.iter().map(|code| code.to_string()).collect(),
            caption_extensions: DEFAULT_CAPTION_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            require_complete: true,
            search_directory_for_dates: true,
        }
    }
}

impl CorrelatorConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TrioError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| {
            TrioError::Configuration(format!("config '{}' is unreadable: {err}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|err| {
            TrioError::Configuration(format!("config '{}' is malformed: {err}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty or unknown board lists and blank caption extensions.
    pub fn validate(&self) -> Result<(), TrioError> {
        if self.board_codes.is_empty() {
            return Err(TrioError::Configuration(
                "board_codes must name at least one board".to_string(),
            ));
        }
        for code in &self.board_codes {
            if BoardCode::from_code(code).is_none() {
                return Err(TrioError::Configuration(format!(
                    "unknown board code '{code}' (expected one of {})",
                    DEFAULT_BOARD_CODES.join(", ")
                )));
            }
        }
        if let Some(blank) = self
            .caption_extensions
            .iter()
            .find(|ext| ext.trim_start_matches('.').is_empty())
        {
            return Err(TrioError::Configuration(format!(
                "caption extension '{blank}' is empty"
            )));
        }
        Ok(())
    }

    /// Enabled boards, deduplicated, in configured order.
    pub fn enabled_boards(&self) -> Vec<BoardCode> {
        let mut boards: Vec<BoardCode> = Vec::with_capacity(self.board_codes.len());
        for board in self
            .board_codes
            .iter()
            .filter_map(|code| BoardCode::from_code(code))
        {
            if !boards.contains(&board) {
                boards.push(board);
            }
        }
        boards
    }

    /// True if `extension` (without the dot) is a configured caption extension.
    pub fn is_caption_extension(&self, extension: &str) -> bool {
        self.caption_extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}
