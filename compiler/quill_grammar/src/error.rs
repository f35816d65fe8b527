//! Grammar generation errors.

use thiserror::Error;

/// Why rule text could not be turned into parse tables.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("line {line}: {message}")]
    Syntax { line: u32, message: String },

    #[error("grammar text defines no rules")]
    Empty,

    #[error("rule `{0}` does not name a known symbol")]
    UnknownRule(String),

    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),

    #[error("`{name}` in rule `{rule}` is neither a rule nor a token")]
    UnknownName { rule: String, name: String },

    #[error("{text} in rule `{rule}` is not a known operator")]
    UnknownOperator { rule: String, text: String },

    #[error("rule `{0}` is left-recursive")]
    LeftRecursion(String),

    #[error("rule `{rule}` is ambiguous: {label} can start both {first} and {second}")]
    Ambiguous {
        rule: String,
        label: String,
        first: String,
        second: String,
    },
}
