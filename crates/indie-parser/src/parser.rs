//! Core parser infrastructure: token cursor, error reporting, helpers.

use indie_lexer::token::{Token, TokenKind};
use indie_types::ast::Module;
use indie_types::{File, Level, Location, Reporter};
use std::sync::Arc;

/// Maximum depth of a single expression, counting both parentheses and the
/// height of its operator tree.
pub const MAX_NESTING: u32 = 256;

/// The indie parser.
///
/// Consumes a token stream produced by the lexer and builds a [`Module`].
/// Reports every syntax error and recovers at the next expression separator.
pub struct Parser<'a> {
    /// The token stream.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    file: &'a Arc<File>,
    reporter: &'a Reporter,
    errors: usize,
    /// Current expression nesting depth.
    pub(crate) depth: u32,
}

/// Result of parsing.
pub struct ParseResult {
    /// `None` if any syntax error was reported.
    pub module: Option<Module>,
    pub errors: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser from a token stream and its file.
    pub fn new(tokens: Vec<Token>, file: &'a Arc<File>, reporter: &'a Reporter) -> Self {
        Self {
            tokens,
            pos: 0,
            file,
            reporter,
            errors: 0,
            depth: 0,
        }
    }

    /// Parse every top-level expression.
    #[tracing::instrument(skip_all, fields(path = %self.file.path().display()))]
    pub fn parse(mut self) -> ParseResult {
        let mut module = Module::new(self.file.clone());
        self.skip_separators();
        while !self.at_end() {
            match self.parse_expression() {
                Some(expression) => {
                    module.push(expression);
                    if !self.peek_kind().is_separator() {
                        self.error_at_current(format!(
                            "expected newline or ';' after expression, got '{}'",
                            self.peek_kind()
                        ));
                        self.synchronize();
                    }
                }
                None => self.synchronize(),
            }
            self.skip_separators();
        }

        tracing::debug!(
            expressions = module.expressions.len(),
            errors = self.errors,
            "parsed"
        );
        ParseResult {
            module: (self.errors == 0).then_some(module),
            errors: self.errors,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).or_else(|| self.tokens.last())
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().map(|t| t.kind).unwrap_or(TokenKind::Eof)
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.peek().cloned();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Location of the current token.
    pub(crate) fn current_location(&self) -> Location {
        self.peek()
            .map(|t| t.location.clone())
            .unwrap_or_else(|| Location::point(self.file.clone(), 1, 1))
    }

    pub(crate) fn at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Expect a specific token kind. Returns the token if matched, or reports an error.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> Option<Token> {
        if self.peek_kind() == expected {
            self.advance()
        } else {
            self.error_at_current(format!(
                "expected '{}', got '{}'",
                expected,
                self.peek_kind()
            ));
            None
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek_kind(), TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    pub(crate) fn error_at(&mut self, location: &Location, message: impl Into<String>) {
        self.errors += 1;
        self.reporter.report_at(Level::Error, location, message);
    }

    pub(crate) fn error_at_current(&mut self, message: impl Into<String>) {
        let location = self.current_location();
        self.error_at(&location, message);
    }

    /// Skip to the end of the current top-level expression.
    fn synchronize(&mut self) {
        while !self.peek_kind().is_separator() {
            self.advance();
        }
    }
}
