//! Parse errors, reported only in strict mode.

use std::fmt;

use quill_ir::{Position, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The token cannot continue any rule on the stack.
    UnexpectedToken { kind: TokenKind, text: String },
    /// Input ended before the start rule was complete.
    UnexpectedEnd,
    /// A token arrived after the start rule was complete.
    TrailingInput,
}

/// A strict-mode parse failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        ParseError { kind, position }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { kind, text } if text.is_empty() => {
                format!("unexpected {kind}")
            }
            ParseErrorKind::UnexpectedToken { text, .. } => format!("unexpected {text:?}"),
            ParseErrorKind::UnexpectedEnd => "unexpected end of input".to_owned(),
            ParseErrorKind::TrailingInput => "input continues after the end of the document".to_owned(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message())
    }
}

impl std::error::Error for ParseError {}
