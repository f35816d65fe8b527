use pretty_assertions::assert_eq;

use super::CodeLines;
use crate::Position;

#[test]
fn test_empty_document_has_one_line() {
    let lines = CodeLines::new("");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.line(1), Some(""));
    assert_eq!(lines.end(), Position::START);
}

#[test]
fn test_trailing_newline_adds_empty_line() {
    let lines = CodeLines::new("a = 1\nb\n");
    assert_eq!(lines.iter().collect::<Vec<_>>(), vec!["a = 1", "b", ""]);
    assert_eq!(lines.end(), Position::new(3, 0));
}

#[test]
fn test_crlf_is_stripped() {
    let lines = CodeLines::new("x\r\ny");
    assert_eq!(lines.line(1), Some("x"));
    assert_eq!(lines.line(2), Some("y"));
}

#[test]
fn test_line_zero_and_past_end_are_missing() {
    let lines = CodeLines::new("x");
    assert_eq!(lines.line(0), None);
    assert_eq!(lines.line(2), None);
}

#[test]
fn test_contains_checks_char_boundaries() {
    let lines = CodeLines::new("é = 1");
    assert!(lines.contains(Position::new(1, 0)));
    assert!(!lines.contains(Position::new(1, 1)));
    assert!(lines.contains(Position::new(1, 2)));
    assert!(lines.contains(Position::new(1, 6)));
    assert!(!lines.contains(Position::new(1, 7)));
    assert!(!lines.contains(Position::new(2, 0)));
}
