use super::Position;

#[test]
fn test_ordering_is_line_then_column() {
    assert!(Position::new(1, 9) < Position::new(2, 0));
    assert!(Position::new(3, 1) < Position::new(3, 2));
    assert_eq!(Position::new(4, 4), Position::from((4, 4)));
}

#[test]
fn test_display() {
    assert_eq!(Position::new(12, 3).to_string(), "12:3");
    assert_eq!(format!("{:?}", Position::START), "1:0");
}

#[test]
fn test_line_index() {
    assert_eq!(Position::START.line_index(), 0);
    assert_eq!(Position::new(7, 0).line_index(), 6);
}
