//! Reading filter files line by line.

use crate::error::FileError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A non-blank line of a filter file, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Blank means empty or whitespace only.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Reads the non-blank lines of the file at `path`.
pub fn read_filter_lines<P: AsRef<Path>>(path: P) -> Result<Vec<SourceLine>, FileError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = Vec::new();
    for (i, line) in BufReader::new(file).lines().enumerate() {
        let text = line.map_err(|source| FileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if !is_blank(&text) {
            lines.push(SourceLine { number: i + 1, text });
        }
    }
    log::info!("read {} filter line(s) from {}", lines.len(), path.display());
    Ok(lines)
}
