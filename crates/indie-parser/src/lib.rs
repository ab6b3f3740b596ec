//! indie parser: converts a token stream into an AST.
//!
//! [`parse`] is the driver used by the rest of the pipeline: it reads a
//! file, lexes and parses it, and reports every problem through the
//! [`indie_types::Reporter`].

mod driver;
mod parse_expr;
mod parser;

pub use driver::{parse, parse_file};
pub use parser::{ParseResult, Parser, MAX_NESTING};
