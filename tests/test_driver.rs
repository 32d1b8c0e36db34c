use acm_filter::config::{DriverConfig, OutputFormat};
use acm_filter::driver::{run_file, RunSummary};
use acm_filter::FileError;
use std::io::Write;
use tempfile::NamedTempFile;

fn plain_config() -> DriverConfig {
    DriverConfig { color: false, ..DriverConfig::default() }
}

fn filter_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

fn run(content: &str, config: &DriverConfig) -> (RunSummary, String, String) {
    let file = filter_file(content);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = run_file(file.path(), config, &mut out, &mut err).expect("run succeeds");
    (
        summary,
        String::from_utf8(out).expect("utf8 stdout"),
        String::from_utf8(err).expect("utf8 stderr"),
    )
}

#[test]
fn test_blank_lines_produce_no_output() {
    let (summary, out, err) = run("\n   \n\t\n", &plain_config());
    assert_eq!(summary, RunSummary { lines: 0, lines_with_errors: 0 });
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn test_text_output_per_line() {
    let (summary, out, err) = run("f1 = 'v1' AND f2 = 'v2'\n\nf1 = 'a' OR f1 = 'b'\n", &plain_config());
    assert_eq!(summary.lines, 2);
    assert!(err.is_empty());
    assert_eq!(
        out,
        "Filter: f1 = 'v1' AND f2 = 'v2'\nFields: [f1 f2]\nValues: ['v1' 'v2']\n---\n\
         Filter: f1 = 'a' OR f1 = 'b'\nFields: [f1]\nValues: ['a' 'b']\n---\n"
    );
}

#[test]
fn test_malformed_line_does_not_stop_later_lines() {
    let (summary, out, err) = run("f1 =\nf2 = 'ok'\n", &plain_config());
    assert_eq!(summary, RunSummary { lines: 2, lines_with_errors: 1 });
    assert_eq!(err, "line 1:4 expected value, found end of input\n");
    assert!(out.contains("Filter: f2 = 'ok'\nFields: [f2]\nValues: ['ok']"));
}

#[test]
fn test_line_numbers_count_blank_lines() {
    let (_, _, err) = run("\n\na = 1 b\n", &plain_config());
    assert!(err.starts_with("line 3:6 "), "got: {}", err);
}

#[test]
fn test_json_output() {
    let config = DriverConfig { format: OutputFormat::Json, unquote_values: true, color: false };
    let (_, out, _) = run("a = 'x' OR b < 10\n", &config);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    let json: serde_json::Value = serde_json::from_str(lines[0]).expect("valid json");
    assert_eq!(json["line_number"], 1);
    assert_eq!(json["fields"], serde_json::json!(["a", "b"]));
    assert_eq!(json["values"], serde_json::json!(["x", "10"]));
}

#[test]
fn test_missing_file_is_fatal() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = run_file("definitely/not/here.acm", &plain_config(), &mut out, &mut err);
    let error = result.expect_err("missing file must fail");
    assert!(matches!(error.downcast_ref::<FileError>(), Some(FileError::Open { .. })));
}
