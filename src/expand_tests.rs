use super::*;
use crate::history::MemoryHistory;

fn hist(lines: &[&str]) -> MemoryHistory {
    let mut h = MemoryHistory::new();
    for l in lines {
        h.add(l);
    }
    h
}

#[test]
fn test_plain_text_untouched() {
    let h = hist(&["previous"]);
    assert_eq!(expand_events(&h, "echo hi").unwrap(), "echo hi");
}

#[test]
fn test_bang_bang() {
    let h = hist(&["ls -l"]);
    assert_eq!(expand_events(&h, "!!").unwrap(), "ls -l");
    assert_eq!(expand_events(&h, "sudo !!").unwrap(), "sudo ls -l");
}

#[test]
fn test_bang_bang_empty_history() {
    let h = MemoryHistory::new();
    let err = expand_events(&h, "!!").unwrap_err();
    assert_eq!(err.0, "!!: event not found");
}

#[test]
fn test_bang_n_absolute() {
    let h = hist(&["one", "two", "three"]);
    assert_eq!(expand_events(&h, "!1").unwrap(), "one");
    assert_eq!(expand_events(&h, "!3").unwrap(), "three");
    assert!(expand_events(&h, "!4").is_err());
    assert!(expand_events(&h, "!0").is_err());
}

#[test]
fn test_bang_n_negative() {
    let h = hist(&["one", "two", "three"]);
    assert_eq!(expand_events(&h, "!-1").unwrap(), "three");
    assert_eq!(expand_events(&h, "!-3").unwrap(), "one");
    assert!(expand_events(&h, "!-4").is_err());
}

#[test]
fn test_bang_prefix_search() {
    let h = hist(&["git log", "make test", "git push"]);
    assert_eq!(expand_events(&h, "!git").unwrap(), "git push");
    assert_eq!(expand_events(&h, "!make").unwrap(), "make test");
    let err = expand_events(&h, "!cargo").unwrap_err();
    assert_eq!(err.0, "!cargo: event not found");
}

#[test]
fn test_bang_question_substring_search() {
    let h = hist(&["git log", "make test", "git push"]);
    assert_eq!(expand_events(&h, "!?test?").unwrap(), "make test");
    assert_eq!(expand_events(&h, "!?log? x").unwrap(), "git log x");
    assert!(expand_events(&h, "!?none?").is_err());
}

#[test]
fn test_bang_dollar_last_word() {
    let h = hist(&["git commit -m msg"]);
    assert_eq!(expand_events(&h, "rerun !$").unwrap(), "rerun msg");
    let h = hist(&["single"]);
    assert_eq!(expand_events(&h, "!$").unwrap(), "single");
}

#[test]
fn test_bang_hash_appends_line_so_far() {
    let h = MemoryHistory::new();
    assert_eq!(expand_events(&h, "ab!#").unwrap(), "abab");
    // The accumulator doubles what has been expanded, not the raw input.
    assert_eq!(expand_events(&h, "ab!#cd!#").unwrap(), "ababcdababcd");
}

#[test]
fn test_bang_space_is_literal() {
    let h = hist(&["x"]);
    assert_eq!(expand_events(&h, "a! b").unwrap(), "a! b");
    assert_eq!(expand_events(&h, "a!").unwrap(), "a!");
}

#[test]
fn test_caret_substitution_first_occurrence() {
    let h = hist(&["echo aba"]);
    assert_eq!(expand_events(&h, "^a^o^").unwrap(), "echo oba");
    assert_eq!(expand_events(&h, "^echo^print^").unwrap(), "print aba");
}

#[test]
fn test_caret_without_closing_delimiter() {
    let h = hist(&["echo aba"]);
    assert_eq!(expand_events(&h, "^echo^print").unwrap(), "print aba");
}

#[test]
fn test_caret_only_at_position_zero() {
    let h = hist(&["echo aba"]);
    assert_eq!(expand_events(&h, " ^a^b^").unwrap(), " ^a^b^");
}

#[test]
fn test_backslash_escapes_designator() {
    let h = hist(&["prev"]);
    assert_eq!(expand_events(&h, "\\!!").unwrap(), "\\!!");
    assert_eq!(expand_events(&h, "a\\!1").unwrap(), "a\\!1");
}

#[test]
fn test_expansion_idempotent_without_designators() {
    let h = hist(&["ls -l"]);
    let once = expand_events(&h, "run !!").unwrap();
    assert_eq!(expand_events(&h, &once).unwrap(), once);
}
