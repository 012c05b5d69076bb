use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::errors::TrioError;
use crate::types::PathString;

/// Paths read from a newline-delimited list, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathList {
    /// Trimmed, non-blank paths.
    pub paths: Vec<PathString>,
    /// Lines that were empty after trimming.
    pub blank_lines: usize,
}

/// Read a path list from a file.
///
/// A missing or unreadable file is reported as
/// [`TrioError::PathListUnavailable`].
pub fn read_path_list(path: impl AsRef<Path>) -> Result<PathList, TrioError> {
    let path = path.as_ref();
    let unavailable = |source: io::Error| TrioError::PathListUnavailable {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    read_path_list_from(BufReader::new(file)).map_err(unavailable)
}

/// Read a path list from any buffered reader (stdin, in-memory buffers).
///
/// Lines are trimmed (including a trailing `\r`), blank lines are skipped and
/// counted, and invalid UTF-8 is replaced rather than rejected.
pub fn read_path_list_from<R: BufRead>(mut reader: R) -> io::Result<PathList> {
    let mut list = PathList::default();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            list.blank_lines += 1;
        } else {
            list.paths.push(trimmed.to_string());
        }
    }
    Ok(list)
}
