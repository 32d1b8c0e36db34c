//! The line driver: a filter file in, one rendered block per non-blank line out.

use crate::config::{DriverConfig, OutputFormat};
use crate::pipeline::{process_line, LineReport};
use crate::render::{render_diagnostic, render_json, render_text, RenderOptions};
use crate::source::{read_filter_lines, SourceLine};
use std::io::Write;
use std::path::Path;

/// Counts for one processed file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub lines_with_errors: usize,
}

/// Processes every line on its own; diagnostics never stop later lines.
pub fn process_lines(lines: &[SourceLine]) -> Vec<LineReport> {
    lines.iter().map(|line| process_line(line.number, &line.text)).collect()
}

/// Writes each report to `out` and its diagnostics to `err`.
pub fn write_reports<W: Write, E: Write>(
    reports: &[LineReport],
    config: &DriverConfig,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<RunSummary> {
    let options = RenderOptions::from(config);
    let mut summary = RunSummary::default();

    for report in reports {
        summary.lines += 1;
        if !report.is_clean() {
            summary.lines_with_errors += 1;
        }
        for diagnostic in &report.diagnostics {
            writeln!(err, "{}", render_diagnostic(report, diagnostic, options))?;
        }
        match config.format {
            OutputFormat::Text => writeln!(out, "{}", render_text(report, options))?,
            OutputFormat::Json => writeln!(out, "{}", render_json(report, options)?)?,
        }
    }

    log::info!(
        "processed {} line(s), {} with diagnostics",
        summary.lines,
        summary.lines_with_errors
    );
    Ok(summary)
}

/// Reads `path` and writes the reports. A [`crate::error::FileError`] is the only fatal
/// outcome coming from the input itself.
pub fn run_file<P: AsRef<Path>, W: Write, E: Write>(
    path: P,
    config: &DriverConfig,
    out: &mut W,
    err: &mut E,
) -> anyhow::Result<RunSummary> {
    let lines = read_filter_lines(path)?;
    let reports = process_lines(&lines);
    write_reports(&reports, config, out, err)
}
