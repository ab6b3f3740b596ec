use crate::config::ReporterConfig;
use crate::location::Location;
use crate::terminal::TerminalSink;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt::{self, Write as _};
use std::rc::Rc;

/// Diagnostic severity. `Warning < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    /// Capitalized label used as a message prefix.
    pub fn label(self) -> &'static str {
        match self {
            Level::Warning => "Warning",
            Level::Error => "Error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// A single reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// `None` for file-less diagnostics such as "Cannot open".
    pub location: Option<Location>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: Level, location: Option<Location>, message: impl Into<String>) -> Self {
        Self {
            level,
            location,
            message: message.into(),
        }
    }

    /// A flat, serializable form of this diagnostic.
    pub fn to_record(&self) -> DiagnosticRecord {
        let location = self.location.as_ref();
        DiagnosticRecord {
            level: self.level,
            path: location.map(|l| l.file().path().display().to_string()),
            line: location.map(|l| l.begin().line),
            column: location.map(|l| l.begin().column),
            end_line: location.map(|l| l.end().line),
            end_column: location.map(|l| l.end().column),
            message: self.message.clone(),
        }
    }
}

/// Structured diagnostic output (one JSON object per diagnostic).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub level: Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
    pub message: String,
}

/// Rendering strategy for diagnostics that pass the reporter's display filter.
pub trait DiagnosticSink {
    fn display(&mut self, diagnostic: &Diagnostic);
}

/// Collects diagnostics in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBuffer(Rc<RefCell<Vec<Diagnostic>>>);

impl DiagnosticBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything collected so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.0.borrow().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.borrow().iter().map(|d| d.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn display(&mut self, diagnostic: &Diagnostic) {
        self.0.borrow_mut().push(diagnostic.clone());
    }
}

/// Counts and displays diagnostics for one compilation invocation.
///
/// The reporter is shared by reference between phases. Counters only
/// ever increase, and diagnostics below the minimum display level are
/// counted but not displayed.
pub struct Reporter {
    warnings: Cell<usize>,
    errors: Cell<usize>,
    min_level: Level,
    sink: RefCell<Box<dyn DiagnosticSink>>,
}

impl Reporter {
    /// A reporter that displays every diagnostic through `sink`.
    pub fn new(sink: impl DiagnosticSink + 'static) -> Self {
        Self {
            warnings: Cell::new(0),
            errors: Cell::new(0),
            min_level: Level::Warning,
            sink: RefCell::new(Box::new(sink)),
        }
    }

    /// A reporter writing to stderr, configured explicitly by the caller.
    pub fn terminal(config: ReporterConfig) -> Self {
        Self::new(TerminalSink::stderr(config.interactive)).with_min_level(config.min_level)
    }

    /// Set the minimum level that reaches the sink.
    pub fn with_min_level(mut self, min_level: Level) -> Self {
        self.min_level = min_level;
        self
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Report a diagnostic that is not tied to a source location.
    pub fn report(&self, level: Level, message: impl Into<String>) {
        self.emit(Diagnostic::new(level, None, message));
    }

    /// Report a diagnostic anchored at `location`.
    pub fn report_at(&self, level: Level, location: &Location, message: impl Into<String>) {
        self.emit(Diagnostic::new(level, Some(location.clone()), message));
    }

    /// Start a diagnostic whose message is built incrementally.
    ///
    /// The diagnostic is emitted exactly once, when the builder is dropped.
    pub fn build(&self, level: Level, location: Option<Location>) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            reporter: self,
            diagnostic: Some(Diagnostic::new(level, location, String::new())),
        }
    }

    /// Count and, if it passes the display filter, render a diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        let counter = match diagnostic.level {
            Level::Warning => &self.warnings,
            Level::Error => &self.errors,
        };
        counter.set(counter.get() + 1);

        if diagnostic.level >= self.min_level {
            self.sink.borrow_mut().display(&diagnostic);
        }
    }

    /// Number of diagnostics at or above `min_level` reported so far.
    pub fn count(&self, min_level: Level) -> usize {
        match min_level {
            Level::Error => self.errors.get(),
            Level::Warning => self.errors.get() + self.warnings.get(),
        }
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("warnings", &self.warnings.get())
            .field("errors", &self.errors.get())
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

/// A diagnostic under construction. Emitted when dropped.
pub struct DiagnosticBuilder<'r> {
    reporter: &'r Reporter,
    diagnostic: Option<Diagnostic>,
}

impl DiagnosticBuilder<'_> {
    /// Append the textual form of `value` to the message.
    pub fn append(&mut self, value: impl fmt::Display) -> &mut Self {
        if let Some(diagnostic) = &mut self.diagnostic {
            let _ = write!(diagnostic.message, "{value}");
        }
        self
    }

    /// Emit now instead of at the end of the scope.
    pub fn emit(self) {}
}

impl fmt::Write for DiagnosticBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(diagnostic) = &mut self.diagnostic {
            diagnostic.message.push_str(s);
        }
        Ok(())
    }
}

impl Drop for DiagnosticBuilder<'_> {
    fn drop(&mut self) {
        if let Some(diagnostic) = self.diagnostic.take() {
            self.reporter.emit(diagnostic);
        }
    }
}
