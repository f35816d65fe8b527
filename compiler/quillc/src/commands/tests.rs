#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use quill_ir::Position;

use super::parse_position;

#[test]
fn test_parse_position() {
    assert_eq!(parse_position("3", "7"), Ok(Position::new(3, 7)));
    assert_eq!(parse_position("1", "0"), Ok(Position::START));
}

#[test]
fn test_parse_position_rejects_bad_input() {
    assert_eq!(
        parse_position("x", "1"),
        Err("invalid line number 'x'".to_owned())
    );
    assert_eq!(parse_position("1", "-2"), Err("invalid column '-2'".to_owned()));
    assert_eq!(parse_position("0", "0"), Err("line numbers start at 1".to_owned()));
}
