use super::*;
use crate::completer::StringsCompleter;
use crate::error::ReadlineError;
use crate::keymap::defaults;
use crate::term::Signal;
use crate::test_utils::MockTerminal;

fn reader() -> LineReader<MockTerminal> {
    LineReader::new(MockTerminal::new(24, 80))
}

fn run(reader: &mut LineReader<MockTerminal>, keys: &str) -> Result<String, ReadlineError> {
    reader.term.push_keys(keys);
    reader.read_line("")
}

#[test]
fn test_plain_line() {
    let mut r = reader();
    assert_eq!(run(&mut r, "hello\r").unwrap(), "hello");
}

#[test]
fn test_emacs_kill_and_yank_round_trip() {
    // hello world, ^A, ^K kills everything, ^Y brings it back.
    let mut r = reader();
    assert_eq!(run(&mut r, "hello world\x01\x0b\x19\r").unwrap(), "hello world");
}

#[test]
fn test_emacs_kill_line_leaves_empty_buffer() {
    let mut r = reader();
    assert_eq!(run(&mut r, "hello world\x01\x0b\r").unwrap(), "");
    assert_eq!(r.kill_ring.yank().as_deref(), Some("hello world"));
}

#[test]
fn test_beginning_of_line_moves_home() {
    // ^A then "X" prefixes the line.
    let mut r = reader();
    assert_eq!(run(&mut r, "bc\x01a\r").unwrap(), "abc");
}

#[test]
fn test_backward_delete_char() {
    let mut r = reader();
    assert_eq!(run(&mut r, "abcd\x7f\r").unwrap(), "abc");
}

#[test]
fn test_transpose_chars() {
    let mut r = reader();
    assert_eq!(run(&mut r, "ba\x14\r").unwrap(), "ab");
}

#[test]
fn test_digit_argument_repeats_insert() {
    // ESC-3 x inserts xxx.
    let mut r = reader();
    assert_eq!(run(&mut r, "\x1b3x\r").unwrap(), "xxx");
}

#[test]
fn test_digit_argument_accumulates() {
    let mut r = reader();
    assert_eq!(run(&mut r, "\x1b2\x1b3y\r").unwrap(), "y".repeat(23));
}

#[test]
fn test_undo_restores_previous_states() {
    let mut r = reader();
    assert_eq!(run(&mut r, "abc\x1f\r").unwrap(), "ab");
    let mut r = reader();
    assert_eq!(run(&mut r, "abc\x1f\x1f\x1f\r").unwrap(), "");
}

#[test]
fn test_redo_reapplies() {
    let mut r = reader();
    assert_eq!(run(&mut r, "abc\x1f\x1f\x18\x12\r").unwrap(), "ab");
}

#[test]
fn test_vi_dw_deletes_word() {
    let mut r = reader();
    r.keymaps().insert(crate::keymap::MAIN.to_string(), defaults::vi_insertion());
    r.term.push_keys("\x1b0dw\r");
    let got = r
        .read_line_with(Some(""), None, None, Some("one two three"))
        .unwrap();
    assert_eq!(got, "two three");
}

#[test]
fn test_vi_dd_kills_whole_line() {
    let mut r = reader();
    r.keymaps().insert(crate::keymap::MAIN.to_string(), defaults::vi_insertion());
    r.term.push_keys("\x1bdd\r");
    let got = r
        .read_line_with(Some(""), None, None, Some("whole line"))
        .unwrap();
    assert_eq!(got, "");
    assert_eq!(r.kill_ring.yank().as_deref(), Some("whole line"));
}

#[test]
fn test_vi_cc_changes_line_and_enters_insert() {
    let mut r = reader();
    r.keymaps().insert(crate::keymap::MAIN.to_string(), defaults::vi_insertion());
    r.term.push_keys("\x1bccnew\r");
    let got = r
        .read_line_with(Some(""), None, None, Some("old text"))
        .unwrap();
    assert_eq!(got, "new");
}

#[test]
fn test_vi_yy_then_put() {
    let mut r = reader();
    r.keymaps().insert(crate::keymap::MAIN.to_string(), defaults::vi_insertion());
    r.term.push_keys("\x1byyp\r");
    let got = r.read_line_with(Some(""), None, None, Some("dup")).unwrap();
    assert_eq!(got, "dupdup");
}

#[test]
fn test_vi_x_deletes_under_cursor() {
    let mut r = reader();
    r.keymaps().insert(crate::keymap::MAIN.to_string(), defaults::vi_insertion());
    r.term.push_keys("\x1b0x\r");
    let got = r.read_line_with(Some(""), None, None, Some("abc")).unwrap();
    assert_eq!(got, "bc");
}

#[test]
fn test_vi_find_char_motion() {
    // df: deletes through the first ':' on the line.
    let mut r = reader();
    r.keymaps().insert(crate::keymap::MAIN.to_string(), defaults::vi_insertion());
    r.term.push_keys("\x1b0df:\r");
    let got = r
        .read_line_with(Some(""), None, None, Some("key:value"))
        .unwrap();
    assert_eq!(got, "value");
}

#[test]
fn test_incremental_search_walks_matches() {
    let mut r = reader();
    for entry in ["alpha", "beta", "gamma"] {
        r.history.add(entry);
    }
    // ^R a finds the most recent entry containing "a"; Enter accepts.
    r.term.push_keys("\x12a\r\r");
    assert_eq!(r.read_line("").unwrap(), "gamma");

    let mut r = reader();
    for entry in ["alpha", "beta", "gamma"] {
        r.history.add(entry);
    }
    // Repeating ^R steps to earlier matches, one entry per press.
    r.term.push_keys("\x12a\x12\x12\r\r");
    assert_eq!(r.read_line("").unwrap(), "alpha");
}

#[test]
fn test_up_history_recalls_and_preserves_edits() {
    let mut r = reader();
    r.history.add("first");
    r.history.add("second");
    assert_eq!(run(&mut r, "\x10\x10\r").unwrap(), "first");

    // An edit to a visited entry is remembered when navigating away
    // and back.
    let mut r = reader();
    r.history.add("one");
    r.history.add("two");
    // up, up, edit "one" -> "oneX", down, up again: edit survives.
    assert_eq!(run(&mut r, "\x10\x10X\x0e\x10\r").unwrap(), "oneX");
}

#[test]
fn test_history_expansion_bang_dollar() {
    let mut r = reader();
    r.history.add("git commit -m msg");
    assert_eq!(run(&mut r, "rerun !$\r").unwrap(), "rerun msg");
}

#[test]
fn test_history_expansion_error_clears_buffer() {
    let mut r = reader();
    let got = run(&mut r, "!nosuch\r").unwrap();
    assert_eq!(got, "");
    assert!(r.term.output.contains("!nosuch: event not found"));
}

#[test]
fn test_completion_inserts_single_match() {
    let mut r = reader();
    r.set_completer(Box::new(StringsCompleter::new(["foobar"])));
    assert_eq!(run(&mut r, "fo\t\r").unwrap(), "foobar ");
}

#[test]
fn test_completion_common_prefix_then_menu() {
    let mut r = reader();
    r.set_completer(Box::new(StringsCompleter::new(["foo", "foobar", "foobaz"])));
    // First TAB inserts the common prefix "foo" and lists; second TAB
    // enters the menu over foo/foobar/foobaz; Enter commits "foo".
    let got = run(&mut r, "fo\t\t\r\r").unwrap();
    assert_eq!(got, "foo ");
    assert!(r.term.output.contains("foobar"));
    assert!(r.term.output.contains("foobaz"));
}

#[test]
fn test_bracket_close_blinks_and_restores_cursor() {
    let mut r = reader();
    let got = run(&mut r, "((x)\r").unwrap();
    assert_eq!(got, "((x)");
}

#[test]
fn test_eof_on_empty_buffer() {
    let mut r = reader();
    r.term.push_keys("\x04");
    assert!(matches!(r.read_line(""), Err(ReadlineError::Eof)));
}

#[test]
fn test_ctrl_d_with_content_deletes() {
    let mut r = reader();
    // ^A then ^D deletes the first char instead of signalling EOF.
    assert_eq!(run(&mut r, "abc\x01\x04\r").unwrap(), "bc");
}

#[test]
fn test_interrupt_carries_partial_buffer() {
    let mut r = reader();
    r.term.push_keys("abc");
    r.term.push_signal(Signal::Int);
    match r.read_line("") {
        Err(ReadlineError::Interrupted(partial)) => assert_eq!(partial, "abc"),
        other => panic!("expected interrupt, got {other:?}"),
    }
}

#[test]
fn test_winch_resizes_display() {
    let mut r = reader();
    r.term.push_keys("ab");
    r.term.push_signal(Signal::Winch(crate::term::Size { rows: 10, cols: 40 }));
    r.term.push_keys("c\r");
    assert_eq!(r.read_line("").unwrap(), "abc");
    assert_eq!(r.display.columns(), 40);
}

#[test]
fn test_masked_input_is_not_echoed_or_recorded() {
    let mut r = reader();
    r.term.push_keys("secret\r");
    let got = r.read_line_with(Some("pw: "), None, Some('*'), None).unwrap();
    assert_eq!(got, "secret");
    assert!(r.term.output.contains("******"));
    assert!(!r.term.output.contains("secret"));
    assert!(r.history.is_empty());
}

#[test]
fn test_multiline_continuation_on_open_quote() {
    let mut r = reader();
    let got = run(&mut r, "echo 'a\rb'\r").unwrap();
    assert_eq!(got, "echo 'a\nb'");
    // The continuation prompt carries the missing closer hint.
    assert!(r.term.output.contains("'> "));
}

#[test]
fn test_accepted_lines_reach_history() {
    let mut r = reader();
    run(&mut r, "one\r").unwrap();
    run(&mut r, "two\r").unwrap();
    assert_eq!(r.history.size(), 2);
    assert_eq!(r.history.get(1), Some("two"));
}

#[test]
fn test_empty_line_not_recorded() {
    let mut r = reader();
    run(&mut r, "\r").unwrap();
    assert!(r.history.is_empty());
}

#[test]
fn test_unknown_widget_posts_message() {
    let mut r = reader();
    r.keymaps()
        .get_mut(crate::keymap::MAIN)
        .unwrap()
        .bind("no-such-widget", "\x07");
    let _ = run(&mut r, "\x07\r");
    assert!(r.term.output.contains("No such widget"));
}

#[test]
fn test_user_widget_replaces_builtin() {
    let mut r = reader();
    r.register_widget(
        widgets::SELF_INSERT,
        std::sync::Arc::new(|r: &mut LineReader<MockTerminal>| {
            r.put_string("!");
            true
        }),
    );
    assert_eq!(run(&mut r, "ab\r").unwrap(), "!!");
}

#[test]
fn test_right_prompt_rendered_on_first_row() {
    let mut r = reader();
    r.term.push_keys("x\r");
    let got = r.read_line_with(Some("> "), Some("[rp]"), None, None).unwrap();
    assert_eq!(got, "x");
    assert!(r.term.output.contains("[rp]"));
}

#[test]
fn test_overwrite_mode_toggles() {
    // Insert "abc", home, toggle overwrite (ESC [2~), type "X".
    let mut r = reader();
    assert_eq!(run(&mut r, "abc\x01\x1b[2~X\r").unwrap(), "Xbc");
}
