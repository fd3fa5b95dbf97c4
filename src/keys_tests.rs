use super::*;

#[test]
fn test_ctrl() {
    assert_eq!(ctrl('A'), '\x01');
    assert_eq!(ctrl('@'), '\0');
    assert_eq!(ctrl('['), '\x1b');
    assert_eq!(ctrl('_'), '\x1f');
}

#[test]
fn test_translate_caret() {
    assert_eq!(translate("^X^B"), "\x18\x02");
    assert_eq!(translate("^X="), "\x18=");
    assert_eq!(translate("^X^?"), "\x18\x7f");
}

#[test]
fn test_translate_escape() {
    assert_eq!(translate("\\E0"), "\x1b0");
    assert_eq!(translate("\\\\"), "\\");
}

#[test]
fn test_range_printable() {
    let keys = range(" -~");
    assert_eq!(keys.first().map(String::as_str), Some(" "));
    assert_eq!(keys.last().map(String::as_str), Some("~"));
    assert_eq!(keys.len(), 95);
}

#[test]
fn test_range_control() {
    let keys = range("^@-^_");
    assert_eq!(keys.len(), 32);
    assert_eq!(keys[0], "\0");
    assert_eq!(keys[31], "\x1f");
}

#[test]
fn test_range_with_prefix() {
    let keys = range("^[A-^[Z");
    assert_eq!(keys.len(), 26);
    assert_eq!(keys[0], "\x1bA");
    assert_eq!(keys[25], "\x1bZ");
}

#[test]
fn test_range_digits() {
    assert_eq!(range("1-9").len(), 9);
    assert_eq!(range("\\E0-\\E9")[3], "\x1b3");
}
