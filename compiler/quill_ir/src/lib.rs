//! Quill IR - shared data types for cursor-context resolution.
//!
//! This crate holds the vocabulary every other quill crate speaks:
//! - [`Position`] for 1-based line / 0-based byte column locations
//! - [`CodeLines`] for the immutable, line-split view of a document
//! - [`TokenKind`] and [`Token`] for lexer output
//! - [`Symbol`] for grammar nonterminals
//! - [`SyntaxArena`] / [`SyntaxTree`] for the concrete syntax tree
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: tree nodes live in one arena and refer to each
//!   other through [`NodeId`] indices, parents included.
//! - **Immutable Once Built**: consumers only ever navigate a finished tree.

mod lines;
mod position;
mod symbol;
mod token;
mod tree;

pub use lines::CodeLines;
pub use position::Position;
pub use symbol::Symbol;
pub use token::{Token, TokenKind};
pub use tree::{Leaf, Leaves, NodeId, NodeKind, SyntaxArena, SyntaxTree};
