//! Lexer tests: operators, literals, comments, newline handling, error
//! recovery, and determinism.

use indie_lexer::{Lexer, TokenKind};
use indie_types::{DiagnosticBuffer, File, Level, Reporter};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Lex source text and return the token kinds (excluding final Eof) and
/// the diagnostics reported.
fn lex(source: &str) -> (Vec<TokenKind>, Vec<String>) {
    let buffer = DiagnosticBuffer::new();
    let reporter = Reporter::new(buffer.clone());
    let file = File::in_memory("test.indie", source);
    let result = Lexer::new(&file, &reporter).lex();
    assert_eq!(result.errors, reporter.count(Level::Error));
    let kinds = result
        .tokens
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| *k != TokenKind::Eof)
        .collect();
    (kinds, buffer.messages())
}

fn kinds(source: &str) -> Vec<TokenKind> {
    let (kinds, errors) = lex(source);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    kinds
}

fn first_error(source: &str) -> String {
    lex(source).1.into_iter().next().unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn all_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("+ - * / % << >> & | ^ ( ) ;"),
        vec![
            Plus, Minus, Star, Slash, Percent, ShiftLeft, ShiftRight, Ampersand, Pipe, Caret,
            LParen, RParen, Semicolon
        ]
    );
}

#[test]
fn operators_without_spaces() {
    use TokenKind::*;
    assert_eq!(
        kinds("1<<2>>3"),
        vec![Integer(1), ShiftLeft, Integer(2), ShiftRight, Integer(3)]
    );
}

#[test]
fn single_angle_bracket_is_an_error() {
    assert_eq!(first_error("1 < 2"), "Unexpected character '<' (did you mean '<<'?)");
    assert_eq!(first_error("1 > 2"), "Unexpected character '>' (did you mean '>>'?)");
}

// ─────────────────────────────────────────────────────────────────────
// Integer literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn decimal_literals() {
    use TokenKind::*;
    assert_eq!(kinds("0"), vec![Integer(0)]);
    assert_eq!(kinds("42"), vec![Integer(42)]);
    assert_eq!(kinds("1_000_000"), vec![Integer(1_000_000)]);
    assert_eq!(kinds("9223372036854775807"), vec![Integer(i64::MAX)]);
}

#[test]
fn hex_and_binary_literals() {
    use TokenKind::*;
    assert_eq!(kinds("0xff"), vec![Integer(255)]);
    assert_eq!(kinds("0b1010"), vec![Integer(10)]);
    assert_eq!(kinds("0xFFFF_FFFF_FFFF_FFFF"), vec![Integer(-1)]);
    assert_eq!(kinds("0x8000000000000000"), vec![Integer(i64::MIN)]);
}

#[test]
fn out_of_range_literal() {
    let (kinds, errors) = lex("9223372036854775808");
    assert_eq!(kinds, vec![TokenKind::Integer(0)]);
    assert_eq!(
        errors,
        vec!["Integer literal '9223372036854775808' does not fit in 64 bits"]
    );
}

#[test]
fn malformed_literals() {
    assert_eq!(first_error("12abc"), "Invalid digit 'a' in integer literal '12abc'");
    assert_eq!(first_error("0b102"), "Invalid digit '2' in integer literal '0b102'");
    assert_eq!(first_error("0x"), "Missing digits in integer literal '0x'");
}

// ─────────────────────────────────────────────────────────────────────
// Newlines & comments
// ─────────────────────────────────────────────────────────────────────

#[test]
fn newlines_separate_top_level_expressions() {
    use TokenKind::*;
    assert_eq!(
        kinds("1\n2\r\n"),
        vec![Integer(1), Newline, Integer(2), Newline]
    );
}

#[test]
fn newlines_inside_parentheses_are_skipped() {
    use TokenKind::*;
    assert_eq!(
        kinds("(1 +\n 2)\n3"),
        vec![LParen, Integer(1), Plus, Integer(2), RParen, Newline, Integer(3)]
    );
}

#[test]
fn comments_are_stripped() {
    use TokenKind::*;
    assert_eq!(
        kinds("// header\n1 // trailing\n"),
        vec![Newline, Integer(1), Newline]
    );
}

#[test]
fn empty_source() {
    assert!(kinds("").is_empty());
}

// ─────────────────────────────────────────────────────────────────────
// Error recovery
// ─────────────────────────────────────────────────────────────────────

#[test]
fn every_bad_character_is_reported() {
    let (kinds, errors) = lex("1 @ 2 # 3");
    use TokenKind::*;
    assert_eq!(kinds, vec![Integer(1), Integer(2), Integer(3)]);
    assert_eq!(
        errors,
        vec!["Unexpected character '@'", "Unexpected character '#'"]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn determinism_100_iterations() {
    let source = "(1 << 3) | 0x0f\n7 % 2 ^ 5 // done\n";
    let first = kinds(source);
    for _ in 0..100 {
        assert_eq!(kinds(source), first);
    }
}
