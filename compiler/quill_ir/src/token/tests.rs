use super::TokenKind;
use crate::{Position, Token};

#[test]
fn test_operator_lookup() {
    assert_eq!(TokenKind::from_operator("("), Some(TokenKind::LPar));
    assert_eq!(TokenKind::from_operator("**="), Some(TokenKind::DoubleStarEqual));
    assert_eq!(TokenKind::from_operator("->"), Some(TokenKind::RArrow));
    assert_eq!(TokenKind::from_operator("!"), None);
    assert_eq!(TokenKind::from_operator("NAME"), None);
}

#[test]
fn test_token_names() {
    assert_eq!(TokenKind::from_token_name("NAME"), Some(TokenKind::Name));
    assert_eq!(TokenKind::from_token_name("ENDMARKER"), Some(TokenKind::EndMarker));
    assert_eq!(TokenKind::from_token_name("("), None);
    assert_eq!(TokenKind::Newline.name(), "NEWLINE");
    assert_eq!(TokenKind::LPar.name(), "LPar");
}

#[test]
fn test_operator_table_is_consistent() {
    for &(text, kind) in TokenKind::OPERATORS {
        assert!(kind.is_operator());
        assert_eq!(kind.operator_text(), Some(text));
        assert!(text.len() <= TokenKind::MAX_OPERATOR_LEN);
    }
    assert!(!TokenKind::Name.is_operator());
}

#[test]
fn test_display() {
    assert_eq!(TokenKind::Comma.to_string(), "','");
    assert_eq!(TokenKind::String.to_string(), "STRING");
}

#[test]
fn test_brackets() {
    assert!(TokenKind::LSqb.opens_bracket());
    assert!(TokenKind::RBrace.closes_bracket());
    assert!(!TokenKind::Colon.opens_bracket());
}

#[test]
fn test_with_prefix() {
    let token = Token::new(TokenKind::Name, "x", Position::new(1, 2), Position::new(1, 3))
        .with_prefix("  ", Position::START);
    assert_eq!(token.prefix, "  ");
    assert_eq!(token.prefix_start, Position::START);
    assert_eq!(format!("{token:?}"), "Name(\"x\") @ 1:2..1:3");
}
