//! Core indie lexer: converts source text to a token stream.
//!
//! Features:
//! - Integer literals in decimal, `0x` hex and `0b` binary, with `_` separators
//! - Arithmetic, shift and bitwise operators, parentheses
//! - Single-line comments stripped (`//`)
//! - Newline-separated expressions; newlines inside parentheses are skipped
//! - Error recovery: every bad character or literal is reported and skipped
//!
//! Columns count codepoints, not bytes.

use indie_types::{File, Level, Location, Position, Reporter};
use std::sync::Arc;

use crate::token::{Token, TokenKind};

/// The indie lexer.
pub struct Lexer<'a> {
    file: &'a Arc<File>,
    reporter: &'a Reporter,
    chars: Vec<char>,
    /// Current index into `chars`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Open parentheses; newlines are insignificant while non-zero.
    depth: u32,
    errors: usize,
}

/// Result of lexing: tokens + the number of errors reported.
pub struct LexResult {
    /// The token stream (always ends with [`TokenKind::Eof`]).
    pub tokens: Vec<Token>,
    pub errors: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a Arc<File>, reporter: &'a Reporter) -> Self {
        Self {
            file,
            reporter,
            chars: file.contents().chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            depth: 0,
            errors: 0,
        }
    }

    /// Lex the entire file into a token stream.
    #[tracing::instrument(skip_all, fields(path = %self.file.path().display()))]
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tracing::debug!(tokens = tokens.len(), errors = self.errors, "lexed");
        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn here(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn location_from(&self, start: Position) -> Location {
        Location::new(self.file.clone(), start, self.here())
    }

    fn token_from(&self, kind: TokenKind, start: Position) -> Token {
        Token::new(kind, self.location_from(start))
    }

    fn emit_error(&mut self, location: &Location, message: impl Into<String>) {
        self.errors += 1;
        self.reporter.report_at(Level::Error, location, message);
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip blanks and comments. Newlines are skipped only inside parentheses.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' if self.depth > 0 => {
                    self.advance();
                }
                '/' if self.peek_at(1) == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    fn scan(&mut self) -> Token {
        loop {
            self.skip_trivia();
            let start = self.here();
            let Some(ch) = self.advance() else {
                return self.token_from(TokenKind::Eof, start);
            };

            let kind = match ch {
                '\n' => TokenKind::Newline,
                '0'..='9' => return self.scan_integer(ch, start),
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '&' => TokenKind::Ampersand,
                '|' => TokenKind::Pipe,
                '^' => TokenKind::Caret,
                ';' => TokenKind::Semicolon,
                '(' => {
                    self.depth += 1;
                    TokenKind::LParen
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    TokenKind::RParen
                }
                '<' if self.peek() == Some('<') => {
                    self.advance();
                    TokenKind::ShiftLeft
                }
                '>' if self.peek() == Some('>') => {
                    self.advance();
                    TokenKind::ShiftRight
                }
                _ => {
                    let location = self.location_from(start);
                    let message = match ch {
                        '<' => "Unexpected character '<' (did you mean '<<'?)".to_string(),
                        '>' => "Unexpected character '>' (did you mean '>>'?)".to_string(),
                        _ => format!("Unexpected character '{ch}'"),
                    };
                    self.emit_error(&location, message);
                    continue;
                }
            };
            return self.token_from(kind, start);
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Integer literals
    // ─────────────────────────────────────────────────────────────

    /// Scan an integer literal whose first digit was already consumed.
    ///
    /// Hex and binary literals may use all 64 bits and are reinterpreted
    /// as two's complement, so `0xFFFF_FFFF_FFFF_FFFF` is `-1`.
    fn scan_integer(&mut self, first: char, start: Position) -> Token {
        let mut text = String::from(first);
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        let location = self.location_from(start);

        let (digits, radix) = match text.get(..2) {
            Some("0x" | "0X") => (&text[2..], 16),
            Some("0b" | "0B") => (&text[2..], 2),
            _ => (text.as_str(), 10),
        };
        let digits: String = digits.chars().filter(|&c| c != '_').collect();

        let value = if digits.is_empty() {
            Err(format!("Missing digits in integer literal '{text}'"))
        } else if let Some(bad) = digits.chars().find(|c| !c.is_digit(radix)) {
            Err(format!("Invalid digit '{bad}' in integer literal '{text}'"))
        } else if radix == 10 {
            digits
                .parse::<i64>()
                .map_err(|_| format!("Integer literal '{text}' does not fit in 64 bits"))
        } else {
            u64::from_str_radix(&digits, radix)
                .map(|bits| bits as i64)
                .map_err(|_| format!("Integer literal '{text}' does not fit in 64 bits"))
        };

        match value {
            Ok(value) => Token::new(TokenKind::Integer(value), location),
            Err(message) => {
                self.emit_error(&location, message);
                // Keep the token so the parser does not report a second error here.
                Token::new(TokenKind::Integer(0), location)
            }
        }
    }
}
