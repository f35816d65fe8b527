//! Character cursor with line/column tracking.
//!
//! Columns are byte offsets from the start of the current line. Only `\n`
//! starts a new line; a `\r` before it belongs to the line it ends.

use quill_ir::Position;

pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
    line: u32,
    line_start: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn position(&self) -> Position {
        let column = u32::try_from(self.pos - self.line_start).unwrap_or(u32::MAX);
        Position::new(self.line, column)
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    pub(crate) fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Source text from byte offset `start` up to the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.pos]
    }

    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The `n`th character after the current one.
    #[inline]
    pub(crate) fn nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        self.nth(1)
    }

    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    /// Skip `n` bytes known to be ASCII and not newlines.
    pub(crate) fn advance_ascii(&mut self, n: usize) {
        self.pos += n;
    }

    pub(crate) fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }

    /// Move to the next `\n` (not consuming it), or to the end of input.
    pub(crate) fn eat_to_line_end(&mut self) {
        match memchr::memchr(b'\n', self.rest().as_bytes()) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.source.len(),
        }
    }

    /// Consume `\n` or `\r\n` if the cursor is on one.
    pub(crate) fn eat_newline(&mut self) -> bool {
        if self.rest().starts_with("\r\n") {
            self.pos += 1;
        }
        if self.current() == Some('\n') {
            self.advance();
            return true;
        }
        false
    }

    /// Whether the cursor sits on `\n` or `\r\n`.
    pub(crate) fn at_newline(&self) -> bool {
        let rest = self.rest();
        rest.starts_with('\n') || rest.starts_with("\r\n")
    }
}
