//! End-to-end pipeline tests.
//!
//! Tests verify the full pipeline: source → lex → parse → check → lower → .wasm
//! and the structured result of in-memory compilation.

use std::fs;

use indie_compiler::{build, check_files, compile_source, CompileOptions, CompileResult};
use indie_types::{DiagnosticBuffer, Level, Reporter};

fn buffered() -> (Reporter, DiagnosticBuffer) {
    let buffer = DiagnosticBuffer::new();
    (Reporter::new(buffer.clone()), buffer)
}

// ══════════════════════════════════════════════════════════════════════════════
// 1. In-memory compilation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn literal_compiles_successfully() {
    let result = compile_source("42", "answer.indie", CompileOptions::default());
    assert!(result.success);
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.entry_point.as_deref(), Some("main"));

    let wasm = result.wasm.expect("wasm bytes");
    assert_eq!(&wasm[..4], b"\0asm");
    let digest = result.wasm_sha256.expect("digest");
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn literal_zero_divisor_is_rejected_by_checker() {
    let result = compile_source("7 / 0", "div.indie", CompileOptions::default());
    assert!(!result.success);
    assert!(result.wasm.is_none());
    assert_eq!(result.total_errors, 1);
    assert_eq!(result.total_warnings, 0);

    let diagnostic = &result.diagnostics[0];
    assert_eq!(diagnostic.level, Level::Error);
    assert_eq!(diagnostic.message, "division by zero");
    assert_eq!(diagnostic.path.as_deref(), Some("div.indie"));
    assert_eq!((diagnostic.line, diagnostic.column), (Some(1), Some(1)));
}

#[test]
fn syntax_error_produces_structured_json() {
    let result = compile_source("1 +", "bad.indie", CompileOptions::default());
    assert!(!result.success);
    assert!(result.total_errors > 0);

    let json = serde_json::to_string(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["success"], false);
    assert!(parsed["wasm"].is_null());
    assert_eq!(parsed["diagnostics"][0]["level"], "error");
    assert_eq!(parsed["diagnostics"][0]["line"], 1);
}

#[test]
fn compile_result_json_roundtrip() {
    let result = compile_source("1 << 2\n3 ^ 5", "shift.indie", CompileOptions::default());
    let json = serde_json::to_string(&result).unwrap();
    let rt: CompileResult = serde_json::from_str(&json).unwrap();
    assert_eq!(rt, result);
}

#[test]
fn warning_and_error_are_both_counted() {
    let result = compile_source("1 << 64\n7 % 0", "mixed.indie", CompileOptions::default());
    assert!(!result.success);
    assert_eq!(result.total_errors, 1);
    assert_eq!(result.total_warnings, 1);
    let levels: Vec<_> = result.diagnostics.iter().map(|d| d.level).collect();
    assert_eq!(levels, vec![Level::Warning, Level::Error]);
}

#[test]
fn warnings_are_fatal_only_when_strict() {
    let source = "9223372036854775807 + 1";

    let lenient = compile_source(source, "wrap.indie", CompileOptions::default());
    assert!(lenient.success);
    assert_eq!(lenient.total_warnings, 1);

    let strict = compile_source(source, "wrap.indie", CompileOptions::strict());
    assert!(!strict.success);
    assert!(strict.wasm.is_none());
    assert_eq!(strict.total_warnings, 1);
}

#[test]
fn overly_deep_expression_fails_cleanly() {
    let deepest = compile_source(
        &format!("1{}", " + 1".repeat(255)),
        "deep.indie",
        CompileOptions::default(),
    );
    assert!(deepest.success);
    assert_eq!(deepest.total_errors, 0);

    for operators in [256, 5_000, 30_000] {
        let source = format!("1{}", " + 1".repeat(operators));
        let result = compile_source(&source, "deep.indie", CompileOptions::default());
        assert!(!result.success, "{operators} operators");
        assert!(result.wasm.is_none());
        assert_eq!(result.total_errors, 1);
        assert_eq!(
            result.diagnostics[0].message,
            "maximum expression nesting depth is 256"
        );
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// 2. Files on disk
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn build_reads_and_lowers_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.indie");
    fs::write(&path, "2 + 3 * 4\n").unwrap();

    let (reporter, buffer) = buffered();
    let unit = build(&reporter, &path, CompileOptions::default()).expect("build failed");
    assert!(buffer.is_empty());
    assert_eq!(unit.source_map.file, path.display().to_string());
    assert_eq!(unit.source_map.entries.len(), 1);
}

#[test]
fn build_nonexistent_path_reports_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.indie");

    let (reporter, buffer) = buffered();
    assert!(build(&reporter, &path, CompileOptions::default()).is_none());
    assert_eq!(reporter.count(Level::Error), 1);

    let diagnostics = buffer.diagnostics();
    assert!(diagnostics[0].location.is_none());
    assert!(diagnostics[0].message.starts_with("Cannot open"));
}

#[test]
fn check_files_processes_every_path() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.indie");
    let bad = dir.path().join("bad.indie");
    let missing = dir.path().join("missing.indie");
    fs::write(&good, "1 + 1").unwrap();
    fs::write(&bad, "1 / 0").unwrap();

    let (reporter, buffer) = buffered();
    let ok = check_files(&reporter, [&bad, &missing, &good], CompileOptions::default());
    assert!(!ok);
    assert_eq!(reporter.count(Level::Error), 2);
    assert_eq!(buffer.len(), 2);
}

#[test]
fn check_files_strict_fails_on_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shift.indie");
    fs::write(&path, "1 >> 100").unwrap();

    let (reporter, _buffer) = buffered();
    assert!(check_files(&reporter, [&path], CompileOptions::default()));

    let (reporter, _buffer) = buffered();
    assert!(!check_files(&reporter, [&path], CompileOptions::strict()));
    assert_eq!(reporter.count(Level::Warning), 1);
    assert_eq!(reporter.count(Level::Error), 0);
}

#[test]
fn display_filter_does_not_change_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.indie");
    fs::write(&path, "1 << 64\n1 / 0").unwrap();

    let buffer = DiagnosticBuffer::new();
    let reporter = Reporter::new(buffer.clone()).with_min_level(Level::Error);
    assert!(!check_files(&reporter, [&path], CompileOptions::default()));
    assert_eq!(reporter.count(Level::Warning), 2);
    assert_eq!(reporter.count(Level::Error), 1);
    assert_eq!(buffer.messages(), vec!["division by zero"]);
}
