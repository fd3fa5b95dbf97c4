use super::*;

fn buf(text: &str, cursor: usize) -> Buffer {
    let mut b = Buffer::new();
    b.write(text);
    b.set_cursor(cursor);
    b
}

#[test]
fn test_write_advances_cursor() {
    let mut b = Buffer::new();
    b.write("hello");
    assert_eq!(b.to_string(), "hello");
    assert_eq!(b.cursor(), 5);
}

#[test]
fn test_write_inserts_at_cursor() {
    let mut b = buf("held", 3);
    b.write("lo wor");
    assert_eq!(b.to_string(), "hello word");
}

#[test]
fn test_overtype_replaces_until_newline() {
    let mut b = buf("abc\ndef", 1);
    b.write_over("XYZW", true);
    assert_eq!(b.to_string(), "aXYZW\ndef");
    assert_eq!(b.cursor(), 5);
}

#[test]
fn test_move_clamps_and_reports_actual() {
    let mut b = buf("abc", 1);
    assert_eq!(b.move_cursor(-5), -1);
    assert_eq!(b.cursor(), 0);
    assert_eq!(b.move_cursor(10), 3);
    assert_eq!(b.cursor(), 3);
}

#[test]
fn test_at_char_out_of_range_is_nul() {
    let b = buf("ab", 0);
    assert_eq!(b.at_char(-1), '\0');
    assert_eq!(b.at_char(2), '\0');
    assert_eq!(b.at_char(1), 'b');
}

#[test]
fn test_curr_prev_next() {
    let b = buf("abc", 1);
    assert_eq!(b.prev_char(), 'a');
    assert_eq!(b.curr_char(), 'b');
    assert_eq!(b.next_char(), 'c');
}

#[test]
fn test_backspace_and_delete_clamp() {
    let mut b = buf("abcd", 2);
    assert_eq!(b.backspace(5), 2);
    assert_eq!(b.to_string(), "cd");
    assert_eq!(b.cursor(), 0);
    assert_eq!(b.delete(5), 2);
    assert!(b.is_empty());
}

#[test]
fn test_substring() {
    let b = buf("hello", 0);
    assert_eq!(b.substring(1, 3), "el");
    assert_eq!(b.substring_from(3), "lo");
    assert_eq!(b.substring(4, 99), "o");
}

#[test]
fn test_unicode_indexing() {
    let mut b = buf("日本語", 3);
    assert_eq!(b.length(), 3);
    b.set_cursor(1);
    assert_eq!(b.curr_char(), '本');
    b.backspace(1);
    assert_eq!(b.to_string(), "本語");
}

#[test]
fn test_up_down_between_lines() {
    let mut b = buf("one\ntwo\nthree", 13);
    assert!(b.up());
    assert_eq!(b.cursor(), 7); // clamped to end of "two"
    assert!(b.up());
    assert_eq!(b.cursor(), 3);
    assert!(!b.up());
    assert!(b.down());
    assert_eq!(b.cursor(), 7);
}

#[test]
fn test_down_on_last_line_fails() {
    let mut b = buf("only", 2);
    assert!(!b.down());
    assert!(!b.up());
}

#[test]
fn test_snapshot_round_trip() {
    let b = buf("state", 2);
    let snap = b.copy();
    let mut c = Buffer::new();
    c.restore(&snap);
    assert_eq!(c.to_string(), "state");
    assert_eq!(c.cursor(), 2);
}

#[test]
fn test_cursor_always_in_bounds() {
    let mut b = buf("xy", 2);
    b.set_cursor(99);
    assert_eq!(b.cursor(), 2);
    b.delete(2);
    b.set_cursor(0);
    b.write("a");
    assert!(b.cursor() <= b.length());
}
