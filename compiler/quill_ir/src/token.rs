//! Token types for the quill tokenizer.
//!
//! Tokens carry their full text and the whitespace/comment prefix that
//! precedes them, so a tree built from tokens reproduces the source exactly.

use std::fmt;

use crate::Position;

/// A token with its prefix and location.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token itself. Empty for INDENT, DEDENT, ENDMARKER
    /// and a synthesized trailing NEWLINE.
    pub text: String,
    /// Whitespace, comments and line continuations before the token.
    pub prefix: String,
    /// Where `prefix` begins.
    pub prefix_start: Position,
    pub start: Position,
    pub end: Position,
}

impl Token {
    /// A token with an empty prefix starting at `start`.
    pub fn new(kind: TokenKind, text: impl Into<String>, start: Position, end: Position) -> Self {
        Token {
            kind,
            text: text.into(),
            prefix: String::new(),
            prefix_start: start,
            start,
            end,
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>, prefix_start: Position) -> Self {
        self.prefix = prefix.into();
        self.prefix_start = prefix_start;
        self
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?}) @ {}..{}", self.kind, self.text, self.start, self.end)
    }
}

macro_rules! token_kinds {
    (
        named { $($named:ident => $named_str:literal),* $(,)? }
        operators { $($op:ident => $op_str:literal),* $(,)? }
    ) => {
        /// Lexical category of a token.
        ///
        /// Keywords are not a separate kind: they lex as [`TokenKind::Name`]
        /// and the grammar decides which names are reserved.
        #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
        pub enum TokenKind {
            $($named,)*
            $($op,)*
        }

        impl TokenKind {
            /// Every operator kind paired with its exact text.
            pub const OPERATORS: &'static [(&'static str, TokenKind)] = &[
                $(($op_str, TokenKind::$op),)*
            ];

            /// Upper-case name used by grammar files and diagnostics.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$named => $named_str,)*
                    $(TokenKind::$op => stringify!($op),)*
                }
            }

            /// Exact text of an operator, `None` for the named kinds.
            pub const fn operator_text(self) -> Option<&'static str> {
                match self {
                    $(TokenKind::$op => Some($op_str),)*
                    _ => None,
                }
            }

            /// Look up an operator by its exact text.
            pub fn from_operator(text: &str) -> Option<Self> {
                match text {
                    $($op_str => Some(TokenKind::$op),)*
                    _ => None,
                }
            }

            /// Look up a named kind by the name a grammar file uses for it.
            pub fn from_token_name(name: &str) -> Option<Self> {
                match name {
                    $($named_str => Some(TokenKind::$named),)*
                    _ => None,
                }
            }
        }
    };
}

token_kinds! {
    named {
        EndMarker => "ENDMARKER",
        Name => "NAME",
        Number => "NUMBER",
        String => "STRING",
        Newline => "NEWLINE",
        Indent => "INDENT",
        Dedent => "DEDENT",
        ErrorToken => "ERRORTOKEN",
    }
    operators {
        LPar => "(",
        RPar => ")",
        LSqb => "[",
        RSqb => "]",
        LBrace => "{",
        RBrace => "}",
        Colon => ":",
        Comma => ",",
        Semi => ";",
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        VBar => "|",
        Amper => "&",
        Less => "<",
        Greater => ">",
        Equal => "=",
        Dot => ".",
        Percent => "%",
        EqEqual => "==",
        NotEqual => "!=",
        LessEqual => "<=",
        GreaterEqual => ">=",
        Tilde => "~",
        Circumflex => "^",
        LeftShift => "<<",
        RightShift => ">>",
        DoubleStar => "**",
        PlusEqual => "+=",
        MinEqual => "-=",
        StarEqual => "*=",
        SlashEqual => "/=",
        PercentEqual => "%=",
        AmperEqual => "&=",
        VBarEqual => "|=",
        CircumflexEqual => "^=",
        LeftShiftEqual => "<<=",
        RightShiftEqual => ">>=",
        DoubleStarEqual => "**=",
        DoubleSlash => "//",
        DoubleSlashEqual => "//=",
        At => "@",
        AtEqual => "@=",
        RArrow => "->",
        Ellipsis => "...",
    }
}

impl TokenKind {
    /// Longest operator text, in bytes.
    pub const MAX_OPERATOR_LEN: usize = 3;

    #[inline]
    pub const fn is_operator(self) -> bool {
        self.operator_text().is_some()
    }

    /// Opening bracket: `(`, `[` or `{`.
    #[inline]
    pub const fn opens_bracket(self) -> bool {
        matches!(self, TokenKind::LPar | TokenKind::LSqb | TokenKind::LBrace)
    }

    /// Closing bracket: `)`, `]` or `}`.
    #[inline]
    pub const fn closes_bracket(self) -> bool {
        matches!(self, TokenKind::RPar | TokenKind::RSqb | TokenKind::RBrace)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operator_text() {
            Some(text) => write!(f, "'{text}'"),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests;
