//! Terminal rendering of diagnostics.
//!
//! Two modes: *plain* (one line per diagnostic, no escape codes) and
//! *interactive* (ANSI colors plus an excerpt of the offending source with
//! the erroneous columns highlighted). The mode is chosen by the caller, see
//! [`crate::ReporterConfig::detect`].

use crate::location::Location;
use crate::reporter::{Diagnostic, DiagnosticSink, Level};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

/// Lines of context shown above and below the erroneous line.
pub const EXCERPT_WINDOW: u32 = 2;

/// Width of the line-number gutter, excluding the trailing tab.
const GUTTER_WIDTH: usize = 6;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";

/// Writes rendered diagnostics to a byte stream.
pub struct TerminalSink {
    out: Box<dyn Write>,
    interactive: bool,
}

impl TerminalSink {
    pub fn new(out: impl Write + 'static, interactive: bool) -> Self {
        Self {
            out: Box::new(out),
            interactive,
        }
    }

    pub fn stderr(interactive: bool) -> Self {
        Self::new(io::stderr(), interactive)
    }
}

impl DiagnosticSink for TerminalSink {
    fn display(&mut self, diagnostic: &Diagnostic) {
        let text = if self.interactive {
            render_interactive(diagnostic)
        } else {
            render_plain(diagnostic)
        };
        // A diagnostic that cannot be written is still counted.
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

/// `Error: path:line: message`, or `Error: message` when file-less.
pub fn render_plain(diagnostic: &Diagnostic) -> String {
    let label = diagnostic.level.label();
    match &diagnostic.location {
        Some(location) => format!(
            "{label}: {}:{}: {}\n",
            display_path(location.file().path()),
            location.begin().line,
            diagnostic.message
        ),
        None => format!("{label}: {}\n", diagnostic.message),
    }
}

/// Colored header, followed by a source excerpt when the file is regular.
pub fn render_interactive(diagnostic: &Diagnostic) -> String {
    let color = Color(diagnostic.level);
    let mut out = String::new();
    match &diagnostic.location {
        Some(location) => {
            let header = format!(
                "{}:{}",
                display_path(location.file().path()),
                location.begin().line
            );
            let _ = writeln!(
                out,
                "{}{}",
                color.underline(&header),
                color.colorful(&format!(" · {}", diagnostic.message))
            );
            if location.file().is_regular() {
                write_excerpt(&mut out, location, color);
            }
        }
        None => {
            let _ = writeln!(
                out,
                "{}{}",
                color.underline(&format!("{}:", diagnostic.level.label())),
                color.colorful(&format!(" {}", diagnostic.message))
            );
        }
    }
    out
}

fn write_excerpt(out: &mut String, location: &Location, color: Color) {
    let file = location.file();
    let target = location.begin().line;
    let Some(line) = file.line(target) else {
        return;
    };

    let first = target.saturating_sub(EXCERPT_WINDOW).max(1);
    let last = target
        .saturating_add(EXCERPT_WINDOW)
        .min(file.line_count() as u32);

    out.push('\n');
    for number in first..=last {
        if number == target {
            out.push_str(&gutter(number, &color.bold("→ "), 2));
            let (start, end) = highlight_range(line, location);
            let _ = writeln!(
                out,
                "{}{}{}",
                &line[..start],
                color.colorful(&line[start..end]),
                &line[end..]
            );
        } else if let Some(context) = file.line(number) {
            out.push_str(&gutter(number, "", 0));
            let _ = writeln!(out, "{}", light(context));
        }
    }
    out.push('\n');
}

/// Right-aligned, dimmed line number followed by a tab.
fn gutter(number: u32, marker: &str, marker_width: usize) -> String {
    let digits = number.to_string();
    let pad = GUTTER_WIDTH
        .saturating_sub(marker_width)
        .saturating_sub(digits.len());
    format!("{}{marker}{}\t", " ".repeat(pad), light(&digits))
}

/// Byte range of `line` covered by `location`, computed on codepoint columns.
///
/// Spans reaching past the first line are highlighted to its end; an empty
/// span highlights the single codepoint under it.
fn highlight_range(line: &str, location: &Location) -> (usize, usize) {
    let length = line.chars().count();
    let start = (location.begin().column as usize)
        .saturating_sub(1)
        .min(length);
    let end = if location.end().line > location.begin().line {
        length
    } else {
        (location.end().column as usize).saturating_sub(1).min(length)
    };
    let end = if end <= start { (start + 1).min(length) } else { end };
    (byte_offset(line, start), byte_offset(line, end))
}

fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(offset, _)| offset)
        .unwrap_or(line.len())
}

/// Path relative to the working directory when it lies beneath it.
fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

fn light(value: &str) -> String {
    format!("{DIM}{value}{RESET}")
}

#[derive(Clone, Copy)]
struct Color(Level);

impl Color {
    fn code(self) -> &'static str {
        match self.0 {
            Level::Warning => "33",
            Level::Error => "31",
        }
    }

    fn underline(self, value: &str) -> String {
        format!("\x1b[{};1;4m{value}{RESET}", self.code())
    }

    fn bold(self, value: &str) -> String {
        format!("\x1b[{};1m{value}{RESET}", self.code())
    }

    fn colorful(self, value: &str) -> String {
        format!("\x1b[{}m{value}{RESET}", self.code())
    }
}
