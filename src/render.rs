//! Text and JSON rendering of line reports.

use crate::ast::ValueLit;
use crate::config::DriverConfig;
use crate::error::Diagnostic;
use crate::pipeline::LineReport;
use colored::Colorize;

/// How reports are rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub unquote_values: bool,
    pub color: bool,
}

impl From<&DriverConfig> for RenderOptions {
    fn from(config: &DriverConfig) -> Self {
        RenderOptions {
            unquote_values: config.unquote_values,
            color: config.color,
        }
    }
}

fn shown_value(value: &str, options: RenderOptions) -> String {
    if options.unquote_values {
        ValueLit(value.to_string()).unquoted()
    } else {
        value.to_string()
    }
}

fn bracketed(items: &[String]) -> String {
    format!("[{}]", items.join(" "))
}

/// The per-line block:
///
/// ```text
/// Filter: f1 = 'v1' AND f2 = 'v2'
/// Fields: [f1 f2]
/// Values: ['v1' 'v2']
/// ---
/// ```
pub fn render_text(report: &LineReport, options: RenderOptions) -> String {
    let values: Vec<String> = report.values.iter().map(|v| shown_value(v, options)).collect();
    let (filter_label, fields_label, values_label) = if options.color {
        ("Filter:".bold().to_string(), "Fields:".cyan().to_string(), "Values:".green().to_string())
    } else {
        ("Filter:".to_string(), "Fields:".to_string(), "Values:".to_string())
    };
    format!(
        "{} {}\n{} {}\n{} {}\n---",
        filter_label,
        report.filter,
        fields_label,
        bracketed(&report.fields),
        values_label,
        bracketed(&values)
    )
}

/// One JSON object, on a single line.
pub fn render_json(report: &LineReport, options: RenderOptions) -> Result<String, serde_json::Error> {
    if !options.unquote_values {
        return serde_json::to_string(report);
    }
    let mut shown = report.clone();
    for value in shown.values.iter_mut() {
        *value = shown_value(value, options);
    }
    for condition in shown.conditions.iter_mut() {
        condition.value = shown_value(&condition.value, options);
    }
    serde_json::to_string(&shown)
}

/// `line <n>:<col> <message>`, with a 0-based column as ANTLR-style tools print it.
pub fn render_diagnostic(report: &LineReport, diagnostic: &Diagnostic, options: RenderOptions) -> String {
    let text = format!(
        "line {}:{} {}",
        report.line_number,
        diagnostic.column(&report.filter),
        diagnostic.message()
    );
    if options.color {
        text.red().to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process_line;

    const PLAIN: RenderOptions = RenderOptions { unquote_values: false, color: false };

    #[test]
    fn test_render_text() {
        let report = process_line(1, "f1 = 'v1' AND f2 = 'v2'");
        assert_eq!(
            render_text(&report, PLAIN),
            "Filter: f1 = 'v1' AND f2 = 'v2'\nFields: [f1 f2]\nValues: ['v1' 'v2']\n---"
        );
        let unquoted = RenderOptions { unquote_values: true, ..PLAIN };
        assert!(render_text(&report, unquoted).contains("Values: [v1 v2]"));
    }

    #[test]
    fn test_render_empty_lists() {
        let report = process_line(2, ")");
        assert!(render_text(&report, PLAIN).contains("Fields: []\nValues: []"));
    }

    #[test]
    fn test_render_json() {
        let report = process_line(1, "a = 'x'");
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&report, RenderOptions { unquote_values: true, color: false }).unwrap())
                .unwrap();
        assert_eq!(json["fields"], serde_json::json!(["a"]));
        assert_eq!(json["values"], serde_json::json!(["x"]));
        assert_eq!(json["conditions"][0]["operator"], "=");
        assert_eq!(json["conditions"][0]["value"], "x");
        assert_eq!(json["diagnostics"], serde_json::json!([]));
    }

    #[test]
    fn test_render_diagnostic() {
        let report = process_line(7, "f1 =");
        let diag = &report.diagnostics[0];
        assert_eq!(render_diagnostic(&report, diag, PLAIN), "line 7:4 expected value, found end of input");
    }
}
