use super::*;
use crate::test_utils::MockTerminal;

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_first_frame_writes_everything() {
    let mut term = MockTerminal::new(24, 80);
    let mut display = Display::new(24, 80);
    display
        .update(&mut term, lines(&["> hello"]), Some(7))
        .unwrap();
    assert!(term.output.contains("> hello"));
}

#[test]
fn test_unchanged_frame_emits_no_rewrite() {
    let mut term = MockTerminal::new(24, 80);
    let mut display = Display::new(24, 80);
    display
        .update(&mut term, lines(&["> hello"]), Some(7))
        .unwrap();
    term.clear_output();
    display
        .update(&mut term, lines(&["> hello"]), Some(7))
        .unwrap();
    assert!(!term.output.contains("hello"));
}

#[test]
fn test_only_changed_row_is_rewritten() {
    let mut term = MockTerminal::new(24, 80);
    let mut display = Display::new(24, 80);
    display
        .update(&mut term, lines(&["first", "second"]), Some(5))
        .unwrap();
    term.clear_output();
    display
        .update(&mut term, lines(&["first", "sec"]), Some(5))
        .unwrap();
    assert!(!term.output.contains("first"));
    assert!(term.output.contains("sec"));
}

#[test]
fn test_shrinking_row_clears_to_eol() {
    let mut term = MockTerminal::new(24, 80);
    let mut display = Display::new(24, 80);
    display
        .update(&mut term, lines(&["abcdef"]), Some(6))
        .unwrap();
    term.clear_output();
    display.update(&mut term, lines(&["abc"]), Some(3)).unwrap();
    assert!(term.cap_count(Capability::ClrEol) >= 1);
}

#[test]
fn test_removed_row_is_cleared() {
    let mut term = MockTerminal::new(24, 80);
    let mut display = Display::new(24, 80);
    display
        .update(&mut term, lines(&["one", "two"]), Some(3))
        .unwrap();
    term.clear_output();
    display.update(&mut term, lines(&["one"]), Some(3)).unwrap();
    assert!(term.cap_count(Capability::ClrEol) >= 1);
    assert!(!term.output.contains("two"));
}

#[test]
fn test_cursor_repositioning_uses_line_moves() {
    let mut term = MockTerminal::new(24, 80);
    let mut display = Display::new(24, 80);
    display
        .update(&mut term, lines(&["row0", "row1"]), Some(80 + 4))
        .unwrap();
    term.clear_output();
    // Move cursor to row 0 column 2 without content changes.
    display
        .update(&mut term, lines(&["row0", "row1"]), Some(2))
        .unwrap();
    assert!(term.output.contains("\x1b[1A"));
    assert!(term.output.contains("\x1b[2C"));
}

#[test]
fn test_reset_forces_full_rewrite() {
    let mut term = MockTerminal::new(24, 80);
    let mut display = Display::new(24, 80);
    display.update(&mut term, lines(&["same"]), Some(4)).unwrap();
    display.reset();
    term.clear_output();
    display.update(&mut term, lines(&["same"]), Some(4)).unwrap();
    assert!(term.output.contains("same"));
}

#[test]
fn test_wrap_respects_width() {
    let display = Display::new(24, 4);
    assert_eq!(display.wrap("abcdef"), vec!["abcd", "ef"]);
}

#[test]
fn test_resize_changes_wrap_width() {
    let mut display = Display::new(24, 80);
    display.resize(24, 3);
    assert_eq!(display.wrap("abcd"), vec!["abc", "d"]);
    assert_eq!(display.columns(), 3);
}
