//! Interactive mode: each entered line is processed like a line of a filter file.

use crate::config::{DriverConfig, OutputFormat};
use crate::pipeline::process_line;
use crate::render::{render_diagnostic, render_json, render_text, RenderOptions};
use crate::source::is_blank;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const PROMPT: &str = "acm> ";

pub fn run(config: &DriverConfig) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let options = RenderOptions::from(config);
    let mut line_number = 0;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                line_number += 1;
                if is_blank(&line) {
                    continue;
                }
                editor.add_history_entry(line.as_str())?;

                let report = process_line(line_number, &line);
                for diagnostic in &report.diagnostics {
                    eprintln!("{}", render_diagnostic(&report, diagnostic, options));
                }
                match config.format {
                    OutputFormat::Text => println!("{}", render_text(&report, options)),
                    OutputFormat::Json => println!("{}", render_json(&report, options)?),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
