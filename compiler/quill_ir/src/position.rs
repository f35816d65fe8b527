//! Source positions.
//!
//! Lines are 1-based, columns are 0-based byte offsets within the line.
//! Ordering is lexicographic on `(line, column)`.

use std::fmt;

/// A location in a document.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// The first position of every document.
    pub const START: Position = Position { line: 1, column: 0 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    /// Zero-based index of the line, for slice access.
    #[inline]
    pub const fn line_index(self) -> usize {
        self.line.saturating_sub(1) as usize
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<(u32, u32)> for Position {
    fn from((line, column): (u32, u32)) -> Self {
        Position::new(line, column)
    }
}

#[cfg(test)]
mod tests;
