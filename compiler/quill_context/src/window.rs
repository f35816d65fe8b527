//! Slicing source text out of [`CodeLines`].

use quill_ir::{CodeLines, Position};

use crate::ContextError;

/// The text between `start` and `end`.
///
/// The first line begins at `start`'s column and the last line stops at
/// `end`'s column; lines are joined with `\n`. Both positions must address
/// character boundaries and `start` must not come after `end`.
pub fn source_window(lines: &CodeLines, start: Position, end: Position) -> Result<String, ContextError> {
    for position in [start, end] {
        if !lines.contains(position) {
            return Err(ContextError::PositionOutOfRange { position });
        }
    }
    if start > end {
        return Err(ContextError::PositionOutOfRange { position: start });
    }

    let mut out = String::new();
    for number in start.line..=end.line {
        let Some(line) = lines.line(number) else {
            return Err(ContextError::PositionOutOfRange {
                position: Position::new(number, 0),
            });
        };
        let from = if number == start.line { start.column as usize } else { 0 };
        let to = if number == end.line { end.column as usize } else { line.len() };
        if number != start.line {
            out.push('\n');
        }
        // Both bounds were checked against this line above.
        out.push_str(line.get(from..to).unwrap_or_default());
    }
    Ok(out)
}

/// The identifier fragment immediately left of `position`: the trailing
/// run of word characters, minus any leading digits. Empty when the cursor
/// does not follow a word.
pub fn completion_name(lines: &CodeLines, position: Position) -> &str {
    let Some(before) = lines
        .line(position.line)
        .and_then(|line| line.get(..position.column as usize))
    else {
        return "";
    };
    let word_start = before
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_word(c))
        .last()
        .map_or(before.len(), |(index, _)| index);
    let word = &before[word_start..];
    word.trim_start_matches(|c: char| c.is_ascii_digit())
}

fn is_word(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}
