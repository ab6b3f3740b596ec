use crate::reporter::Level;
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

/// How diagnostics are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Render colored headers and source excerpts instead of plain lines.
    pub interactive: bool,
    /// Diagnostics below this level are counted but not displayed.
    pub min_level: Level,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            interactive: false,
            min_level: Level::Warning,
        }
    }
}

impl ReporterConfig {
    /// Pick interactive rendering when stderr is a terminal.
    pub fn detect() -> Self {
        Self {
            interactive: std::io::stderr().is_terminal(),
            ..Self::default()
        }
    }
}
