//! indie compiler: orchestrates the full compilation pipeline.
//!
//! ```text
//! indie Source → Lexer → Parser → Checker → IR Lowering → .wasm
//! ```

mod checker;
mod options;

use std::path::Path;
use std::sync::Arc;

use indie_types::ast::Module;
use indie_types::{Diagnostic, DiagnosticBuffer, DiagnosticRecord, File, Level, Reporter};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use checker::{check, Symbols};
pub use indie_codegen::IrUnit;
pub use options::CompileOptions;

// ══════════════════════════════════════════════════════════════════════════════
// Commands
// ══════════════════════════════════════════════════════════════════════════════

/// Parse and check every path in order, sharing one reporter.
///
/// Every file is processed even after a failure. Succeeds iff each file
/// parsed and checked and nothing at or above the fail level was reported.
pub fn check_files<P: AsRef<Path>>(
    reporter: &Reporter,
    paths: impl IntoIterator<Item = P>,
    options: CompileOptions,
) -> bool {
    let mut success = true;
    for path in paths {
        let checked = indie_parser::parse(reporter, path)
            .and_then(|module| check(reporter, &module));
        success &= checked.is_some();
    }
    success && reporter.count(options.fail_level()) == 0
}

/// Parse, check, and lower the file at `path`.
pub fn build(reporter: &Reporter, path: impl AsRef<Path>, options: CompileOptions) -> Option<IrUnit> {
    let module = indie_parser::parse(reporter, path)?;
    build_module(reporter, &module, options)
}

/// [`build`] for a file that is already in memory.
pub fn build_file(reporter: &Reporter, file: Arc<File>, options: CompileOptions) -> Option<IrUnit> {
    let module = indie_parser::parse_file(reporter, file)?;
    build_module(reporter, &module, options)
}

#[tracing::instrument(skip_all, fields(path = %module.file.path().display(), strict = options.strict))]
fn build_module(reporter: &Reporter, module: &Module, options: CompileOptions) -> Option<IrUnit> {
    if reporter.count(Level::Error) > 0 {
        return None;
    }
    check(reporter, module)?;
    if reporter.count(options.fail_level()) > 0 {
        return None;
    }

    match indie_codegen::compile(module) {
        Ok(unit) => Some(unit),
        Err(err) => {
            reporter.report(Level::Error, err.to_string());
            None
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// In-memory compilation
// ══════════════════════════════════════════════════════════════════════════════

/// Serializable summary of one in-memory compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    /// The IR module, when compilation succeeded.
    pub wasm: Option<Vec<u8>>,
    /// Hex SHA-256 of `wasm`.
    pub wasm_sha256: Option<String>,
    /// Exported entry routine of `wasm`.
    pub entry_point: Option<String>,
    pub diagnostics: Vec<DiagnosticRecord>,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// Compile `source` as if it were the file `name`, buffering all diagnostics.
pub fn compile_source(source: &str, name: &str, options: CompileOptions) -> CompileResult {
    let buffer = DiagnosticBuffer::new();
    let reporter = Reporter::new(buffer.clone());
    let unit = build_file(&reporter, File::in_memory(name, source), options);

    let total_errors = reporter.count(Level::Error);
    let total_warnings = reporter.count(Level::Warning) - total_errors;
    let diagnostics = buffer.diagnostics().iter().map(Diagnostic::to_record).collect();

    match unit {
        Some(unit) => CompileResult {
            success: true,
            wasm_sha256: Some(format!("{:x}", Sha256::digest(&unit.bytes))),
            entry_point: Some(unit.entry_point().to_string()),
            wasm: Some(unit.bytes),
            diagnostics,
            total_errors,
            total_warnings,
        },
        None => CompileResult {
            success: false,
            wasm: None,
            wasm_sha256: None,
            entry_point: None,
            diagnostics,
            total_errors,
            total_warnings,
        },
    }
}
