use super::*;
use crate::test_utils::MockTerminal;

fn reader_with_history(entries: &[&str]) -> LineReader<MockTerminal> {
    let mut r = LineReader::new(MockTerminal::new(24, 80));
    for e in entries {
        r.history.add(e);
    }
    r.count = 1;
    r
}

#[test]
fn test_up_down_history() {
    let mut r = reader_with_history(&["one", "two"]);
    assert!(r.up_history());
    assert_eq!(r.buf.to_string(), "two");
    r.count = 1;
    assert!(r.up_history());
    assert_eq!(r.buf.to_string(), "one");
    r.count = 1;
    assert!(r.down_history());
    assert_eq!(r.buf.to_string(), "two");
}

#[test]
fn test_up_history_at_top() {
    // With HISTORY_BEEP unset, running off the top is silent.
    let mut r = reader_with_history(&[]);
    assert!(r.up_history());
    assert_eq!(r.buf.to_string(), "");
    // With it set, the failure beeps.
    let mut r = reader_with_history(&[]);
    r.set_opt(crate::options::ReaderOption::HistoryBeep);
    r.count = 1;
    assert!(!r.up_history());
}

#[test]
fn test_modified_entries_are_remembered() {
    let mut r = reader_with_history(&["one", "two"]);
    r.up_history();
    r.count = 1;
    r.up_history();
    r.buf.write("X");
    r.count = 1;
    r.down_history();
    assert_eq!(r.buf.to_string(), "two");
    r.count = 1;
    r.up_history();
    assert_eq!(r.buf.to_string(), "oneX");
}

#[test]
fn test_beginning_of_line_hist_steps_back_at_bol() {
    let mut r = reader_with_history(&["previous"]);
    r.buf.write("cur");
    r.buf.set_cursor(2);
    assert!(r.beginning_of_line_hist());
    assert_eq!(r.buf.cursor(), 0);
    assert_eq!(r.buf.to_string(), "cur");
    r.count = 1;
    assert!(r.beginning_of_line_hist());
    assert_eq!(r.buf.to_string(), "previous");
    assert_eq!(r.buf.cursor(), 0);
}

#[test]
fn test_beginning_of_buffer_or_history() {
    let mut r = reader_with_history(&["old"]);
    r.buf.write("ab\ncd");
    assert!(r.beginning_of_buffer_or_history());
    assert_eq!(r.buf.cursor(), 0);
    // Already at offset zero: recalls the first history entry.
    r.count = 1;
    assert!(r.beginning_of_buffer_or_history());
    assert_eq!(r.buf.to_string(), "old");
}

#[test]
fn test_history_search_backward_prefix() {
    let mut r = reader_with_history(&["git log", "make", "git push"]);
    r.buf.write("git");
    assert!(r.history_search_backward());
    assert_eq!(r.buf.to_string(), "git push");
    r.count = 1;
    assert!(r.history_search_backward());
    assert_eq!(r.buf.to_string(), "git log");
    r.count = 1;
    assert!(!r.history_search_backward());
}

#[test]
fn test_history_search_forward_returns_to_origin() {
    let mut r = reader_with_history(&["git log", "git push"]);
    r.buf.write("git");
    assert!(r.history_search_backward());
    assert!(r.history_search_backward());
    assert_eq!(r.buf.to_string(), "git log");
    assert!(r.history_search_forward());
    assert_eq!(r.buf.to_string(), "git push");
    // Forward past the newest match restores the original line.
    assert!(r.history_search_forward());
    assert_eq!(r.buf.to_string(), "git");
}

#[test]
fn test_vi_repeat_search_backward() {
    let mut r = reader_with_history(&["alpha", "beta", "gamma"]);
    r.search_dir = -1;
    r.search_index = Some(3);
    r.search_string = "a".to_string();
    assert!(r.vi_repeat_search());
    assert_eq!(r.buf.to_string(), "gamma");
    assert!(r.vi_repeat_search());
    assert_eq!(r.buf.to_string(), "beta");
}

#[test]
fn test_vi_repeat_search_no_match() {
    let mut r = reader_with_history(&["alpha"]);
    r.search_dir = -1;
    r.search_index = Some(1);
    r.search_string = "zzz".to_string();
    assert!(!r.vi_repeat_search());
}

#[test]
fn test_end_of_history() {
    let mut r = reader_with_history(&["one", "two"]);
    r.history.move_to(0);
    assert!(r.end_of_history());
    assert_eq!(r.buf.to_string(), "two");
}
