//! Tokenizer for the Python subset quill understands.
//!
//! Produces [`Token`]s with their preceding whitespace and comments attached
//! as a prefix, synthesizes INDENT / DEDENT from leading whitespace, and
//! never fails: anything it cannot lex becomes an ERRORTOKEN.
//!
//! The stream always ends with exactly one ENDMARKER.

mod cursor;
mod tokenizer;

use quill_ir::Token;

pub use tokenizer::{Tokenizer, TokenizerOptions};

/// Tokenize a whole document with default options.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Vec<Token> {
    let tokens: Vec<Token> = Tokenizer::new(source).collect();
    tracing::debug!(count = tokens.len(), "tokenized");
    tokens
}
