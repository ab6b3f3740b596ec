use indie_types::Level;
use serde::{Deserialize, Serialize};

/// Pipeline settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    /// Treat warnings as fatal errors.
    pub strict: bool,
}

impl CompileOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Lowest level that fails the pipeline.
    pub fn fail_level(&self) -> Level {
        if self.strict {
            Level::Warning
        } else {
            Level::Error
        }
    }
}
