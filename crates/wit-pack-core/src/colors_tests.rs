use crate::Colors;

#[test]
fn plain_is_default() {
    assert_eq!(Colors::default(), Colors::PLAIN);
    assert!(!Colors::new(false).is_styled());
}

#[test]
fn styled_fields_are_escapes() {
    let colors = Colors::new(true);
    assert!(colors.is_styled());
    for code in [colors.error, colors.success, colors.emphasis, colors.reset] {
        assert!(code.starts_with("\x1b["), "{code:?}");
        assert!(code.ends_with('m'), "{code:?}");
    }
}

#[test]
fn plain_status_line() {
    let c = Colors::PLAIN;
    let line = format!("{}error{}: bad input", c.error, c.reset);
    assert_eq!(line, "error: bad input");
}
