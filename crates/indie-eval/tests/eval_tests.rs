//! Integration tests for the indie tree-walking evaluator.

use indie_eval::{render_output, run, EvalError};
use indie_parser::parse_file;
use indie_types::ast::Module;
use indie_types::{DiagnosticBuffer, File, Position, Reporter};
use proptest::prelude::*;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// Parse source into a Module (panics on parse errors).
fn parse(source: &str) -> Module {
    let buffer = DiagnosticBuffer::new();
    let reporter = Reporter::new(buffer.clone());
    parse_file(&reporter, File::in_memory("test.indie", source))
        .unwrap_or_else(|| panic!("parse errors: {:?}", buffer.messages()))
}

fn output(source: &str) -> String {
    render_output(&run(&parse(source)).expect("evaluation failed"))
}

// ══════════════════════════════════════════════════════════════════════════════
// Programs
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn single_literal() {
    assert_eq!(output("42"), "42\n");
}

#[test]
fn precedence() {
    assert_eq!(output("2 + 3 * 4"), "14\n");
    assert_eq!(output("(2 + 3) * 4"), "20\n");
}

#[test]
fn several_expressions_print_in_order() {
    assert_eq!(output("1\n10 - 20\n7 / 2\n(0 - 7) % 3"), "1\n-10\n3\n-1\n");
}

#[test]
fn bitwise_and_shifts() {
    assert_eq!(output("1 << 10"), "1024\n");
    assert_eq!(output("0xff & 0x0f | 0x100"), "271\n");
    assert_eq!(output("6 ^ 3"), "5\n");
    assert_eq!(output("0xFFFF_FFFF_FFFF_FFFF >> 60"), "15\n");
}

#[test]
fn wrapping() {
    assert_eq!(output("9223372036854775807 + 1"), "-9223372036854775808\n");
    assert_eq!(output("0x8000000000000000 / (0 - 1)"), "-9223372036854775808\n");
}

#[test]
fn division_by_zero_stops_evaluation() {
    let module = parse("1\n7 / (3 - 3)\n2");
    let err = run(&module).unwrap_err();
    assert!(matches!(err, EvalError::DivisionByZero { .. }));
    assert_eq!(err.location().begin(), Position::new(2, 1));
    assert_eq!(err.location().end(), Position::new(2, 12));
}

proptest! {
    #[test]
    fn matches_native_wrapping_ops(a in any::<i64>(), b in any::<i64>()) {
        let source = format!("{:#x} + {:#x}\n{:#x} - {:#x}\n{:#x} * {:#x}", a, b, a, b, a, b);
        let values = run(&parse(&source)).unwrap();
        prop_assert_eq!(values, vec![a.wrapping_add(b), a.wrapping_sub(b), a.wrapping_mul(b)]);
    }
}
