//! Source mapping: printed value index → source location.
//!
//! The n-th value printed by `main` comes from the n-th top-level
//! expression. Each entry records that expression's source span, so a
//! host can relate output lines or traps back to the source.

use indie_types::Location;
use serde::{Deserialize, Serialize};

/// A complete source map for a compiled module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMap {
    /// Path of the source file.
    pub file: String,
    pub entries: Vec<SourceMapEntry>,
}

/// One top-level expression → one source region (1-based, end exclusive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMapEntry {
    /// Index of the expression, and of the value it prints.
    pub expression: u32,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceMap {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            entries: Vec::new(),
        }
    }

    /// Push a new entry.
    pub fn push(&mut self, expression: u32, location: &Location) {
        self.entries.push(SourceMapEntry {
            expression,
            line: location.begin().line,
            column: location.begin().column,
            end_line: location.end().line,
            end_column: location.end().column,
        });
    }

    /// Look up the entry for the n-th top-level expression.
    pub fn find_by_expression(&self, expression: u32) -> Option<&SourceMapEntry> {
        self.entries.iter().find(|e| e.expression == expression)
    }

    /// Serialize to JSON bytes for embedding in a WASM custom section.
    pub fn to_json(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    /// Deserialize from JSON bytes.
    pub fn from_json(data: &[u8]) -> Option<Self> {
        serde_json::from_slice(data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indie_types::{File, Position};

    #[test]
    fn find_by_expression() {
        let file = File::in_memory("t.indie", "1\n2 + 3");
        let mut sm = SourceMap::new("t.indie");
        sm.push(0, &Location::point(file.clone(), 1, 1));
        sm.push(
            1,
            &Location::new(file, Position::new(2, 1), Position::new(2, 6)),
        );

        let entry = sm.find_by_expression(1).unwrap();
        assert_eq!((entry.line, entry.column, entry.end_column), (2, 1, 6));
        assert!(sm.find_by_expression(2).is_none());
        assert_eq!(SourceMap::from_json(&sm.to_json()), Some(sm));
    }
}
