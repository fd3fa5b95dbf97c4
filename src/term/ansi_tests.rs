use super::*;

#[test]
fn test_strip_plain() {
    assert_eq!(strip("hello"), "hello");
}

#[test]
fn test_strip_sgr() {
    assert_eq!(strip("\x1b[7mhi\x1b[0m"), "hi");
    assert_eq!(strip("a\x1b[36mb\x1b[39mc"), "abc");
}

#[test]
fn test_display_width_ignores_escapes() {
    assert_eq!(display_width("\x1b[7mhi\x1b[0m"), 2);
    assert_eq!(display_width("abc"), 3);
}

#[test]
fn test_display_width_wide_chars() {
    assert_eq!(display_width("日本"), 4);
}

#[test]
fn test_split_lines_newlines() {
    assert_eq!(split_lines("a\nb", 80, 4), vec!["a", "b"]);
    assert_eq!(split_lines("", 80, 4), vec![""]);
    assert_eq!(split_lines("a\n", 80, 4), vec!["a", ""]);
}

#[test]
fn test_split_lines_wraps_at_width() {
    assert_eq!(split_lines("abcdef", 4, 4), vec!["abcd", "ef"]);
}

#[test]
fn test_split_lines_wide_char_does_not_straddle() {
    // Width 3 cannot hold "a" + a 2-cell char.
    assert_eq!(split_lines("a日b", 3, 4), vec!["a日", "b"]);
}

#[test]
fn test_split_lines_tab_expansion() {
    assert_eq!(split_lines("a\tb", 80, 4), vec!["a   b"]);
    assert_eq!(split_lines("\tx", 80, 4), vec!["    x"]);
}

#[test]
fn test_split_lines_keeps_escapes() {
    let rows = split_lines("\x1b[7mabcd\x1b[0mef", 4, 4);
    assert_eq!(rows.len(), 2);
    assert_eq!(strip(&rows[0]), "abcd");
    assert_eq!(strip(&rows[1]), "ef");
}

#[test]
fn test_cut() {
    assert_eq!(cut("hello", 3), "hel");
    assert_eq!(cut("日本", 3), "日");
    assert_eq!(strip(&cut("\x1b[36mhello\x1b[39m", 2)), "he");
}
