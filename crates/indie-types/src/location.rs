use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Why a source file could not be loaded.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid UTF-8 at byte {valid_up_to}")]
    InvalidUtf8 { path: PathBuf, valid_up_to: usize },
}

/// A source file, read once and immutable afterwards.
///
/// Files are shared through `Arc<File>`; every [`Location`] pointing into a
/// file holds a handle to it.
pub struct File {
    path: PathBuf,
    contents: String,
    regular: bool,
    /// Cached line start byte offsets for fast line lookup.
    line_starts: Vec<usize>,
}

impl File {
    /// Read the whole file at `path`.
    ///
    /// Fails without constructing anything if the path cannot be opened,
    /// cannot be fully read, or does not hold UTF-8 text.
    pub fn read(path: impl AsRef<Path>) -> Result<Arc<File>, SourceError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let contents = String::from_utf8(bytes).map_err(|e| SourceError::InvalidUtf8 {
            path: path.to_path_buf(),
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;
        // Pseudo-files such as /dev/stdin read fine but cannot be excerpted later.
        let regular = std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        Ok(Arc::new(Self::build(path.to_path_buf(), contents, regular)))
    }

    /// Wrap text that is already in memory. In-memory files count as regular.
    pub fn in_memory(path: impl Into<PathBuf>, contents: impl Into<String>) -> Arc<File> {
        Arc::new(Self::build(path.into(), contents.into(), true))
    }

    fn build(path: PathBuf, contents: String, regular: bool) -> Self {
        let mut line_starts: Vec<usize> = std::iter::once(0)
            .chain(contents.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        // A trailing newline terminates the last line rather than starting one.
        if line_starts.len() > 1 && contents.ends_with('\n') {
            line_starts.pop();
        }
        Self {
            path,
            contents,
            regular,
            line_starts,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Whether the file was a regular file when it was read.
    pub fn is_regular(&self) -> bool {
        self.regular
    }

    /// Extract a source line by 1-based line number.
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line(&self, line_number: u32) -> Option<&str> {
        let idx = line_number.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or_else(|| {
                let contents = self.contents.as_str();
                contents.strip_suffix('\n').unwrap_or(contents).len()
            });
        Some(self.contents[start..end].trim_end_matches('\r'))
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.contents == other.contents
    }
}

impl Eq for File {}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File")
            .field("path", &self.path)
            .field("len", &self.contents.len())
            .field("regular", &self.regular)
            .finish()
    }
}

/// A point in a file. Both fields are 1-based; columns count codepoints.
///
/// Ordering is lexicographic on (line, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range `[begin, end)` of positions within one file.
#[derive(Clone)]
pub struct Location {
    file: Arc<File>,
    begin: Position,
    end: Position,
}

impl Location {
    /// Create a location. A reversed pair is swapped so that `begin <= end`.
    pub fn new(file: Arc<File>, begin: Position, end: Position) -> Self {
        let (begin, end) = if end < begin { (end, begin) } else { (begin, end) };
        Self { file, begin, end }
    }

    /// Create an empty location at a single position.
    pub fn point(file: Arc<File>, line: u32, column: u32) -> Self {
        let at = Position::new(line, column);
        Self::new(file, at, at)
    }

    pub fn file(&self) -> &Arc<File> {
        &self.file
    }

    pub fn begin(&self) -> Position {
        self.begin
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn is_same_file(&self, other: &Location) -> bool {
        Arc::ptr_eq(&self.file, &other.file) || self.file.path == other.file.path
    }

    /// Merge two locations into the smallest one that covers both.
    ///
    /// Both locations must lie in the same file; see [`Location::try_merge`]
    /// for a checked variant.
    pub fn merge(&self, other: &Location) -> Location {
        debug_assert!(
            self.is_same_file(other),
            "merging locations from {} and {}",
            self.file.path.display(),
            other.file.path.display()
        );
        Location {
            file: Arc::clone(&self.file),
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }

    /// Like [`Location::merge`], but returns `None` for locations in different files.
    pub fn try_merge(&self, other: &Location) -> Option<Location> {
        self.is_same_file(other).then(|| self.merge(other))
    }

    /// Whether `other` lies entirely within this location.
    pub fn contains(&self, other: &Location) -> bool {
        self.is_same_file(other) && self.begin <= other.begin && other.end <= self.end
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_file(other) && self.begin == other.begin && self.end == other.end
    }
}

impl Eq for Location {}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.file.path.display(),
            self.begin,
            self.end
        )
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.path.display(), self.begin)
    }
}
