//! Token stream over a source string.
//!
//! # Layout rules
//!
//! - NEWLINE is emitted for a line break that ends a logical line with
//!   content, outside brackets. Blank lines, comments, backslash
//!   continuations and breaks inside brackets become part of the next
//!   token's prefix.
//! - Leading whitespace of a logical line is measured (tabs advance to the
//!   next multiple of 8). A deeper level pushes and emits INDENT, a
//!   shallower one pops and emits one DEDENT per level.
//! - At end of input: an optional synthesized NEWLINE, one DEDENT per open
//!   level, then ENDMARKER carrying the trailing prefix.

use std::collections::VecDeque;

use quill_ir::{Position, Token, TokenKind};

use crate::cursor::Cursor;

const TAB_SIZE: u32 = 8;

/// Tokenizer configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Emit an empty NEWLINE before ENDMARKER when the last logical line
    /// has content but no line break.
    pub implicit_newline: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            implicit_newline: true,
        }
    }
}

/// Lazily produces tokens; see the module docs for the layout rules.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
    options: TokenizerOptions,
    /// Open indentation levels, innermost last. Level 0 is implicit.
    indents: Vec<u32>,
    paren_depth: u32,
    at_line_start: bool,
    line_has_tokens: bool,
    /// Byte offset where the pending prefix begins.
    prefix_offset: usize,
    prefix_start: Position,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, TokenizerOptions::default())
    }

    pub fn with_options(source: &'a str, options: TokenizerOptions) -> Self {
        Tokenizer {
            cursor: Cursor::new(source),
            source,
            options,
            indents: Vec::new(),
            paren_depth: 0,
            at_line_start: true,
            line_has_tokens: false,
            prefix_offset: 0,
            prefix_start: Position::START,
            pending: VecDeque::new(),
            finished: false,
        }
    }

    fn scan(&mut self) -> Option<Token> {
        loop {
            if self.at_line_start && self.paren_depth == 0 {
                let indent = self.measure_indent();
                if self.cursor.current() == Some('#') || self.cursor.at_newline() {
                    // Blank or comment-only line: all prefix.
                    self.cursor.eat_to_line_end();
                    self.cursor.eat_newline();
                    continue;
                }
                if !self.cursor.is_eof() {
                    self.at_line_start = false;
                    self.adjust_indent(indent);
                    if let Some(token) = self.pending.pop_front() {
                        return Some(token);
                    }
                }
            }

            self.skip_whitespace();
            let start_offset = self.cursor.pos();
            let start = self.cursor.position();
            let Some(c) = self.cursor.current() else {
                return self.end_of_input();
            };

            if c == '#' {
                self.cursor.eat_to_line_end();
                continue;
            }
            if c == '\\' && self.continues_line() {
                self.cursor.advance();
                self.cursor.eat_newline();
                continue;
            }
            if self.cursor.at_newline() {
                self.cursor.eat_newline();
                if self.paren_depth > 0 || !self.line_has_tokens {
                    self.at_line_start = self.paren_depth == 0;
                    continue;
                }
                self.line_has_tokens = false;
                self.at_line_start = true;
                return Some(self.emit(TokenKind::Newline, start_offset, start));
            }

            let kind = self.scan_token(c);
            self.line_has_tokens = true;
            return Some(self.emit(kind, start_offset, start));
        }
    }

    /// Build a token from `start_offset` to the cursor, taking the pending
    /// prefix with it.
    fn emit(&mut self, kind: TokenKind, start_offset: usize, start: Position) -> Token {
        let end = self.cursor.position();
        let token = Token {
            kind,
            text: self.cursor.slice_from(start_offset).to_owned(),
            prefix: self.source[self.prefix_offset..start_offset].to_owned(),
            prefix_start: self.prefix_start,
            start,
            end,
        };
        self.prefix_offset = self.cursor.pos();
        self.prefix_start = end;
        tracing::trace!(?token, "token");
        token
    }

    fn end_of_input(&mut self) -> Option<Token> {
        let offset = self.cursor.pos();
        let position = self.cursor.position();
        if self.options.implicit_newline && self.line_has_tokens && self.paren_depth == 0 {
            let newline = self.emit(TokenKind::Newline, offset, position);
            self.pending.push_back(newline);
            self.line_has_tokens = false;
        }
        let levels = self.indents.len();
        self.indents.clear();
        for _ in 0..levels {
            self.pending
                .push_back(Token::new(TokenKind::Dedent, "", position, position));
        }
        let end = self.emit(TokenKind::EndMarker, offset, position);
        self.pending.push_back(end);
        self.finished = true;
        self.pending.pop_front()
    }

    // ─── Layout ─────────────────────────────────────────────────

    fn measure_indent(&mut self) -> u32 {
        let mut column = 0;
        loop {
            match self.cursor.current() {
                Some(' ') => column += 1,
                Some('\t') => column = (column / TAB_SIZE + 1) * TAB_SIZE,
                Some('\x0c') => column = 0,
                _ => return column,
            }
            self.cursor.advance();
        }
    }

    fn adjust_indent(&mut self, indent: u32) {
        let position = self.cursor.position();
        let current = self.indents.last().copied().unwrap_or(0);
        if indent > current {
            self.indents.push(indent);
            self.pending
                .push_back(Token::new(TokenKind::Indent, "", position, position));
            return;
        }
        // An indent between two open levels closes down to the enclosing
        // one and stays there.
        while indent < self.indents.last().copied().unwrap_or(0) {
            self.indents.pop();
            self.pending
                .push_back(Token::new(TokenKind::Dedent, "", position, position));
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.cursor.current() {
                Some(' ' | '\t' | '\x0c') => {}
                Some('\r') if self.cursor.peek() != Some('\n') => {}
                _ => return,
            }
            self.cursor.advance();
        }
    }

    fn continues_line(&self) -> bool {
        match self.cursor.peek() {
            Some('\n') => true,
            Some('\r') => self.cursor.nth(2) == Some('\n'),
            _ => false,
        }
    }

    // ─── Tokens ─────────────────────────────────────────────────

    fn scan_token(&mut self, c: char) -> TokenKind {
        if is_identifier_start(c) {
            let word_start = self.cursor.pos();
            self.cursor.eat_while(is_identifier_continue);
            let word = self.cursor.slice_from(word_start);
            if is_string_prefix(word) && matches!(self.cursor.current(), Some('\'' | '"')) {
                return self.scan_string();
            }
            return TokenKind::Name;
        }
        if c.is_ascii_digit() || (c == '.' && self.cursor.peek().is_some_and(|n| n.is_ascii_digit())) {
            return self.scan_number();
        }
        if c == '\'' || c == '"' {
            return self.scan_string();
        }
        if let Some(kind) = self.scan_operator() {
            if kind.opens_bracket() {
                self.paren_depth += 1;
            } else if kind.closes_bracket() {
                self.paren_depth = self.paren_depth.saturating_sub(1);
            }
            return kind;
        }
        self.cursor.advance();
        TokenKind::ErrorToken
    }

    /// Longest operator match at the cursor.
    fn scan_operator(&mut self) -> Option<TokenKind> {
        let rest = self.cursor.rest();
        for len in (1..=TokenKind::MAX_OPERATOR_LEN).rev() {
            if let Some(kind) = rest.get(..len).and_then(TokenKind::from_operator) {
                self.cursor.advance_ascii(len);
                return Some(kind);
            }
        }
        None
    }

    fn scan_number(&mut self) -> TokenKind {
        let radix_prefix = self.cursor.current() == Some('0')
            && matches!(self.cursor.peek(), Some('x' | 'X' | 'o' | 'O' | 'b' | 'B'));
        if radix_prefix {
            self.cursor.advance();
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
            return TokenKind::Number;
        }
        self.cursor.eat_while(is_digit);
        if self.cursor.current() == Some('.') {
            self.cursor.advance();
            self.cursor.eat_while(is_digit);
        }
        if matches!(self.cursor.current(), Some('e' | 'E')) {
            let exponent = match self.cursor.peek() {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.cursor.nth(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent {
                self.cursor.advance();
                if matches!(self.cursor.current(), Some('+' | '-')) {
                    self.cursor.advance();
                }
                self.cursor.eat_while(is_digit);
            }
        }
        if matches!(self.cursor.current(), Some('j' | 'J')) {
            self.cursor.advance();
        }
        TokenKind::Number
    }

    /// Scan a string starting at its opening quote. Unterminated strings
    /// become ERRORTOKEN: single-quoted ones stop at the line break,
    /// triple-quoted ones run to the end of input.
    fn scan_string(&mut self) -> TokenKind {
        let Some(quote) = self.cursor.current() else {
            return TokenKind::ErrorToken;
        };
        let triple: String = [quote; 3].iter().collect();
        if self.cursor.rest().starts_with(&triple) {
            self.cursor.advance_ascii(3);
            loop {
                match self.cursor.current() {
                    None => return TokenKind::ErrorToken,
                    Some('\\') => {
                        self.cursor.advance();
                        self.cursor.advance();
                    }
                    Some(_) if self.cursor.rest().starts_with(&triple) => {
                        self.cursor.advance_ascii(3);
                        return TokenKind::String;
                    }
                    Some(_) => {
                        self.cursor.advance();
                    }
                }
            }
        }

        self.cursor.advance();
        loop {
            if self.cursor.at_newline() {
                return TokenKind::ErrorToken;
            }
            match self.cursor.current() {
                None => return TokenKind::ErrorToken,
                Some('\\') => {
                    self.cursor.advance();
                    if !self.cursor.eat_newline() {
                        self.cursor.advance();
                    }
                }
                Some(c) if c == quote => {
                    self.cursor.advance();
                    return TokenKind::String;
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        if self.finished {
            return None;
        }
        self.scan()
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || c == '_'
}

fn is_string_prefix(word: &str) -> bool {
    word.len() <= 2
        && matches!(
            word.to_ascii_lowercase().as_str(),
            "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
        )
}
