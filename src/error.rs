//! Error types shared by the lexer, the parser and the line driver.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// An unrecognised character (or an unterminated string, reported at its
/// opening quote). Lexing continues after the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("unexpected character '{character}'")]
pub struct LexError {
    pub position: usize,
    pub character: char,
    /// Set when `character` opened a string that never closed.
    pub unterminated: bool,
}

impl LexError {
    pub fn new(position: usize, character: char) -> Self {
        Self { position, character, unterminated: false }
    }

    pub fn unterminated(position: usize, quote: char) -> Self {
        Self { position, character: quote, unterminated: true }
    }
}

/// A token that does not fit the grammar at its position.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("expected {expected}, found {found}")]
pub struct SyntaxError {
    pub position: usize,
    pub expected: String,
    pub found: String,
}

impl SyntaxError {
    pub fn new(position: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self { position, expected: expected.into(), found: found.into() }
    }
}

/// A recoverable problem found while processing one line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    #[error("{0}")]
    Lex(LexError),
    #[error("{0}")]
    Syntax(SyntaxError),
}

impl Diagnostic {
    /// Byte offset of the problem within its line.
    pub fn position(&self) -> usize {
        match self {
            Diagnostic::Lex(e) => e.position,
            Diagnostic::Syntax(e) => e.position,
        }
    }

    /// 0-based character column of the problem within `line`.
    pub fn column(&self, line: &str) -> usize {
        let pos = self.position().min(line.len());
        line.char_indices().take_while(|(i, _)| *i < pos).count()
    }

    /// Message with an unterminated-string hint where that applies.
    pub fn message(&self) -> String {
        match self {
            Diagnostic::Lex(e) if e.unterminated => {
                format!("unterminated string starting with {}", e.character)
            }
            other => other.to_string(),
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(e: LexError) -> Self {
        Diagnostic::Lex(e)
    }
}

impl From<SyntaxError> for Diagnostic {
    fn from(e: SyntaxError) -> Self {
        Diagnostic::Syntax(e)
    }
}

/// The filter file could not be opened or read. Fatal for the driver.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to open filter file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read filter file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file does not exist: {}", .path.display())]
    Missing { path: PathBuf },
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
