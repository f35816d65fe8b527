//! Pushdown parser driven by [`quill_grammar`] tables.
//!
//! Tokens are fed one at a time with [`Parser::add_token`]. In
//! [`Mode::Recover`] the parser never fails: a token that does not fit is
//! handled by discarding partial rules up to the innermost enclosing block
//! (flattening them into an error node) and, failing that, by keeping the
//! token as an error leaf. [`Mode::Strict`] reports the first such token.
//!
//! Feeding can stop at any point; [`Parser::into_stack`] then hands out the
//! live stack of partially recognized rules.

mod error;
mod parser;
mod recovery;
mod stack;

#[cfg(test)]
mod test_helpers;

use quill_grammar::Grammar;
use quill_ir::SyntaxTree;
use quill_lexer::Tokenizer;
use tracing::debug;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{Feed, Mode, Parser};
pub use stack::{ParseStack, StackFrame};

/// Parse a whole document, recovering from every error.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_document(grammar: &Grammar, source: &str) -> SyntaxTree {
    let mut parser = Parser::new(grammar, Mode::Recover);
    for token in Tokenizer::new(source) {
        match parser.add_token(token) {
            Ok(Feed::Continue) => {}
            Ok(Feed::Accepted) => break,
            Err(error) => {
                debug!(%error, "recovering parse stopped early");
                break;
            }
        }
    }
    parser.finish_recovered()
}

/// Parse a whole document, failing on the first token that does not fit.
pub fn parse_strict(grammar: &Grammar, source: &str) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new(grammar, Mode::Strict);
    for token in Tokenizer::new(source) {
        if parser.add_token(token)? == Feed::Accepted {
            break;
        }
    }
    parser.finish()
}
