use indie_lexer::Lexer;
use indie_types::ast::Module;
use indie_types::{File, Level, Reporter};
use std::path::Path;
use std::sync::Arc;

use crate::parser::Parser;

/// Read and parse the file at `path`.
///
/// Returns `None` after reporting if the file cannot be read or contains
/// any lexical or syntax error. An unreadable file produces exactly one
/// file-less error.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse(reporter: &Reporter, path: impl AsRef<Path>) -> Option<Module> {
    let path = path.as_ref();
    let file = match File::read(path) {
        Ok(file) => file,
        Err(err) => {
            reporter
                .build(Level::Error, None)
                .append("Cannot open ")
                .append(path.display())
                .append(": ")
                .append(err);
            return None;
        }
    };
    parse_file(reporter, file)
}

/// Parse a file that is already loaded.
pub fn parse_file(reporter: &Reporter, file: Arc<File>) -> Option<Module> {
    let lexed = Lexer::new(&file, reporter).lex();
    let parsed = Parser::new(lexed.tokens, &file, reporter).parse();
    if lexed.errors > 0 {
        return None;
    }
    parsed.module
}
