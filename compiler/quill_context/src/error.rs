//! Errors surfaced by context resolution.

use std::fmt;

use quill_ir::Position;
use thiserror::Error;

/// Why the context at a cursor cannot be analysed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnresolvableReason {
    /// The cursor is inside a string literal.
    InsideString,
    /// The cursor is on text the tokenizer could not classify.
    ErrorLeaf,
}

impl fmt::Display for UnresolvableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvableReason::InsideString => f.write_str("inside a string literal"),
            UnresolvableReason::ErrorLeaf => f.write_str("inside unparseable text"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContextError {
    /// No completion or signature analysis is possible at this position.
    #[error("no suggestions available at {position}: {reason}")]
    Unresolvable {
        position: Position,
        reason: UnresolvableReason,
    },

    #[error("position {position} is outside the document")]
    PositionOutOfRange { position: Position },
}

impl ContextError {
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, ContextError::Unresolvable { .. })
    }
}
