//! Token stream for a code prefix that stops cleanly at end of input.

use quill_ir::{Token, TokenKind};
use quill_lexer::{Tokenizer, TokenizerOptions};

/// One step of a [`BoundedTokens`] stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Token(Token),
    /// The prefix is exhausted. Always the last step.
    EndOfInput,
}

/// Tokens of a code prefix, ending in [`Step::EndOfInput`] instead of an
/// end marker.
///
/// No NEWLINE is synthesized for an unterminated last line, and DEDENT
/// tokens are dropped: a prefix cut at the cursor ends wherever the cursor
/// is, not at a statement boundary.
pub struct BoundedTokens<'a> {
    inner: Tokenizer<'a>,
    done: bool,
}

impl<'a> BoundedTokens<'a> {
    pub fn new(code: &'a str) -> Self {
        let options = TokenizerOptions {
            implicit_newline: false,
        };
        BoundedTokens {
            inner: Tokenizer::with_options(code, options),
            done: false,
        }
    }
}

impl Iterator for BoundedTokens<'_> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if self.done {
            return None;
        }
        loop {
            match self.inner.next() {
                Some(token) if token.kind == TokenKind::Dedent => {}
                Some(token) if token.kind != TokenKind::EndMarker => return Some(Step::Token(token)),
                _ => {
                    self.done = true;
                    return Some(Step::EndOfInput);
                }
            }
        }
    }
}
