use super::*;
use crate::test_utils::MockTerminal;

fn reader_with(text: &str, cursor: usize) -> LineReader<MockTerminal> {
    let mut r = LineReader::new(MockTerminal::new(24, 80));
    r.buf.write(text);
    r.buf.set_cursor(cursor);
    r.count = 1;
    r
}

#[test]
fn test_forward_word_skips_word_then_separators() {
    let mut r = reader_with("one two", 0);
    assert!(r.forward_word());
    assert_eq!(r.buf.cursor(), 4);
}

#[test]
fn test_forward_word_honors_wordchars() {
    // '-' is a word char by default.
    let mut r = reader_with("a-b c", 0);
    assert!(r.forward_word());
    assert_eq!(r.buf.cursor(), 4);
    r.set_variable(crate::options::WORDCHARS, "");
    r.buf.set_cursor(0);
    assert!(r.forward_word());
    assert_eq!(r.buf.cursor(), 2);
}

#[test]
fn test_backward_word() {
    let mut r = reader_with("one two", 7);
    assert!(r.backward_word());
    assert_eq!(r.buf.cursor(), 4);
    assert!(r.backward_word());
    assert_eq!(r.buf.cursor(), 0);
}

#[test]
fn test_negative_count_flips_direction() {
    let mut r = reader_with("one two", 7);
    r.count = -1;
    assert!(r.forward_word());
    assert_eq!(r.buf.cursor(), 4);
}

#[test]
fn test_beginning_and_end_of_line_multiline() {
    let mut r = reader_with("ab\ncd", 4);
    assert!(r.beginning_of_line());
    assert_eq!(r.buf.cursor(), 3);
    r.count = 1;
    assert!(r.end_of_line());
    assert_eq!(r.buf.cursor(), 5);
}

#[test]
fn test_kill_line_to_eol() {
    let mut r = reader_with("hello world", 5);
    assert!(r.kill_line());
    assert_eq!(r.buf.to_string(), "hello");
    assert_eq!(r.kill_ring.yank().as_deref(), Some(" world"));
}

#[test]
fn test_kill_line_at_eol_fails() {
    let mut r = reader_with("abc", 3);
    assert!(!r.kill_line());
}

#[test]
fn test_backward_kill_line() {
    let mut r = reader_with("hello world", 5);
    assert!(r.backward_kill_line());
    assert_eq!(r.buf.to_string(), " world");
    assert_eq!(r.buf.cursor(), 0);
    assert_eq!(r.kill_ring.yank().as_deref(), Some("hello"));
}

#[test]
fn test_kill_whole_line_spans_newline() {
    let mut r = reader_with("one\ntwo\nthree", 5);
    assert!(r.kill_whole_line());
    assert_eq!(r.buf.to_string(), "one\nthree");
    assert_eq!(r.kill_ring.yank().as_deref(), Some("two\n"));
}

#[test]
fn test_kill_word_and_backward_kill_word() {
    let mut r = reader_with("one two", 0);
    assert!(r.kill_word());
    assert_eq!(r.buf.to_string(), " two");

    let mut r = reader_with("one two", 7);
    assert!(r.backward_kill_word());
    assert_eq!(r.buf.to_string(), "one ");
}

#[test]
fn test_consecutive_kills_merge_for_yank() {
    let mut r = reader_with("one two", 7);
    assert!(r.backward_kill_word());
    assert!(r.backward_kill_word());
    assert_eq!(r.kill_ring.yank().as_deref(), Some("one two"));
}

#[test]
fn test_transpose_chars_swaps_and_advances() {
    let mut r = reader_with("ba", 2);
    assert!(r.transpose_chars());
    assert_eq!(r.buf.to_string(), "ab");
}

#[test]
fn test_transpose_chars_needs_two_chars() {
    let mut r = reader_with("a", 1);
    assert!(!r.transpose_chars());
    let mut r = reader_with("a\nb", 3);
    assert!(!r.transpose_chars());
}

#[test]
fn test_transpose_words() {
    let mut r = reader_with("one two", 4);
    assert!(r.transpose_words());
    assert_eq!(r.buf.to_string(), "two one");
}

#[test]
fn test_case_words() {
    let mut r = reader_with("foo bar", 0);
    assert!(r.up_case_word());
    assert_eq!(r.buf.to_string(), "FOO bar");

    let mut r = reader_with("FOO", 0);
    assert!(r.down_case_word());
    assert_eq!(r.buf.to_string(), "foo");

    let mut r = reader_with("foo", 0);
    assert!(r.capitalize_word());
    assert_eq!(r.buf.to_string(), "Foo");
}

#[test]
fn test_case_word_negative_count_restores_cursor() {
    let mut r = reader_with("foo", 0);
    r.count = -1;
    assert!(r.up_case_word());
    assert_eq!(r.buf.to_string(), "FOO");
    assert_eq!(r.buf.cursor(), 0);
}

#[test]
fn test_copy_prev_word() {
    let mut r = reader_with("abc", 3);
    assert!(r.copy_prev_word());
    assert_eq!(r.buf.to_string(), "abcabc");
}

#[test]
fn test_region_kill_and_copy() {
    let mut r = reader_with("hello", 0);
    r.set_mark_command();
    r.buf.set_cursor(3);
    assert!(r.copy_region_as_kill());
    assert_eq!(r.buf.to_string(), "hello");
    assert_eq!(r.kill_ring.yank().as_deref(), Some("hel"));

    let mut r = reader_with("hello", 0);
    r.set_mark_command();
    r.buf.set_cursor(3);
    assert!(r.kill_region());
    assert_eq!(r.buf.to_string(), "lo");
    assert_eq!(r.region_active, RegionType::None);
}

#[test]
fn test_exchange_point_and_mark() {
    let mut r = reader_with("hello", 1);
    r.set_mark_command();
    r.buf.set_cursor(4);
    assert!(r.exchange_point_and_mark());
    assert_eq!(r.buf.cursor(), 1);
    assert_eq!(r.region_mark, 4);
}

#[test]
fn test_yank_pop_rotates() {
    let mut r = reader_with("", 0);
    r.kill_ring.add("one".into());
    r.kill_ring.reset_last_kill();
    r.kill_ring.add("two".into());
    assert!(r.yank());
    assert_eq!(r.buf.to_string(), "two");
    assert!(r.yank_pop());
    assert_eq!(r.buf.to_string(), "one");
}

#[test]
fn test_self_insert_respects_count() {
    let mut r = reader_with("", 0);
    r.binding_reader.run_macro("z");
    // Consume the macro so last_binding becomes "z".
    let emacs = crate::keymap::defaults::emacs();
    let _ = r.binding_reader.read_binding(
        &mut r.term,
        &emacs,
        None,
        std::time::Duration::from_millis(10),
    );
    r.count = 3;
    assert!(r.self_insert());
    assert_eq!(r.buf.to_string(), "zzz");
}

#[test]
fn test_what_cursor_position_sets_post() {
    let mut r = reader_with("ab", 0);
    assert!(r.what_cursor_position());
    let post = r.post.clone().unwrap();
    assert!(post.contains("Char: a"));
    assert!(post.contains("point 1 of 3"));
}

#[test]
fn test_insert_tab_only_on_blank_line_prefix() {
    let mut r = reader_with("  ", 2);
    r.binding_reader.run_macro("\t");
    let safe = crate::keymap::defaults::safe();
    let _ = r.binding_reader.read_binding(
        &mut r.term,
        &safe,
        None,
        std::time::Duration::from_millis(10),
    );
    assert!(r.insert_tab());
    let mut r2 = reader_with("word", 4);
    r2.binding_reader.run_macro("\t");
    let _ = r2.binding_reader.read_binding(
        &mut r2.term,
        &safe,
        None,
        std::time::Duration::from_millis(10),
    );
    assert!(!r2.insert_tab());
}

#[test]
fn test_argument_state() {
    let mut r = reader_with("", 0);
    r.repeat_count = 2;
    assert!(r.argument_base());
    assert_eq!(r.universal, 2);
    r.mult = 1;
    assert!(r.neg_argument());
    assert_eq!(r.mult, -1);
    assert!(r.universal_argument());
    assert_eq!(r.mult, -2);
}
