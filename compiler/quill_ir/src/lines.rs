//! Line-split view of a document.

use crate::Position;

/// The document as an ordered sequence of lines, without terminators.
///
/// A document ending in a newline has a final empty line, so the position
/// just past the last newline is addressable. A trailing `\r` before each
/// `\n` is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeLines {
    lines: Vec<String>,
}

impl CodeLines {
    pub fn new(source: &str) -> Self {
        let lines = source
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_owned())
            .collect();
        CodeLines { lines }
    }

    /// Number of lines. Never zero: the empty document has one empty line.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line `line` (1-based).
    pub fn line(&self, line: u32) -> Option<&str> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        self.lines.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Whether `position` addresses a character boundary of the document.
    ///
    /// The column may equal the line length (end of line).
    pub fn contains(&self, position: Position) -> bool {
        self.line(position.line)
            .is_some_and(|line| line.is_char_boundary(position.column as usize))
    }

    /// Position just past the last character.
    pub fn end(&self) -> Position {
        let last = self.lines.last().map_or(0, String::len);
        Position::new(
            u32::try_from(self.lines.len()).unwrap_or(u32::MAX),
            u32::try_from(last).unwrap_or(u32::MAX),
        )
    }
}

#[cfg(test)]
mod tests;
