//! Shared types for the indie compiler.
//!
//! This crate defines source files and locations, the diagnostic reporter
//! and its renderers, and the AST node types used across all compiler
//! stages.

mod config;
mod location;
mod reporter;
pub mod ast;
pub mod terminal;
mod trace;

pub use config::ReporterConfig;
pub use location::{File, Location, Position, SourceError};
pub use reporter::{
    Diagnostic, DiagnosticBuffer, DiagnosticBuilder, DiagnosticRecord, DiagnosticSink, Level,
    Reporter,
};
pub use terminal::TerminalSink;
pub use trace::TracingSink;
