//! Command handlers for the Quill CLI.
//!
//! Each submodule implements one group of commands. Shared helpers like
//! `read_file` live here in the module root.

use quill_grammar::Grammar;
use quill_ir::Position;

mod context;
mod debug;

pub use context::{complete_file, signature_file};
pub use debug::{lex_file, parse_file, render_tree};

/// Read a source file, exiting with a readable message on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// The bundled grammar, exiting if its tables cannot be built.
pub(crate) fn grammar() -> &'static Grammar {
    match Grammar::bundled() {
        Ok(grammar) => grammar,
        Err(e) => {
            eprintln!("internal error: bundled grammar is invalid: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse a 1-based line and 0-based column from the command line.
pub fn parse_position(line: &str, column: &str) -> Result<Position, String> {
    let line: u32 = line
        .parse()
        .map_err(|_| format!("invalid line number '{line}'"))?;
    let column: u32 = column
        .parse()
        .map_err(|_| format!("invalid column '{column}'"))?;
    if line == 0 {
        return Err("line numbers start at 1".to_owned());
    }
    Ok(Position::new(line, column))
}

#[cfg(test)]
mod tests;
