//! Front end for "ACM filter" expressions.
//!
//! A line such as `(role = 'admin' OR role = 'owner') AND tenant_id = 42`
//! is tokenized by [`lexer`], parsed into a [`ast::Filter`] by [`parser`],
//! and walked by [`extract`] to list the field names and literal values it
//! references, each in first-occurrence order:
//!
//! ```
//! let report = acm_filter::process_line(1, "(role = 'admin' OR role = 'owner') AND tenant_id = 42");
//! assert_eq!(report.fields, ["role", "tenant_id"]);
//! assert_eq!(report.values, ["'admin'", "'owner'", "42"]);
//! assert!(report.diagnostics.is_empty());
//! ```
//!
//! Lexical and syntax errors never abort a line: they are returned as
//! [`Diagnostic`]s next to whatever the walker could still extract.

pub mod ast;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod repl;
pub mod source;
pub mod token;

pub use error::{ConfigError, Diagnostic, FileError, LexError, SyntaxError};
pub use extract::{extract, Extraction, FieldValueWalker};
pub use pipeline::{process_line, LineReport};
