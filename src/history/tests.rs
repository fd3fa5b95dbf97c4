use super::*;

fn hist(lines: &[&str]) -> MemoryHistory {
    let mut h = MemoryHistory::new();
    for l in lines {
        h.add(l);
    }
    h
}

#[test]
fn test_add_parks_cursor_at_end() {
    let h = hist(&["a", "b"]);
    assert_eq!(h.size(), 2);
    assert_eq!(h.index(), 2);
    assert_eq!(h.current(), "");
}

#[test]
fn test_previous_next() {
    let mut h = hist(&["a", "b"]);
    assert!(h.previous());
    assert_eq!(h.current(), "b");
    assert!(h.previous());
    assert_eq!(h.current(), "a");
    assert!(!h.previous());
    assert!(h.next());
    assert_eq!(h.current(), "b");
    assert!(h.next());
    assert_eq!(h.current(), "");
    assert!(!h.next());
}

#[test]
fn test_move_to_bounds() {
    let mut h = hist(&["a", "b", "c"]);
    assert!(h.move_to(1));
    assert_eq!(h.current(), "b");
    assert!(h.move_to(3));
    assert!(!h.move_to(4));
}

#[test]
fn test_move_to_first_last() {
    let mut h = hist(&["a", "b", "c"]);
    assert!(h.move_to_first());
    assert_eq!(h.current(), "a");
    assert!(!h.move_to_first());
    assert!(h.move_to_last());
    assert_eq!(h.current(), "c");
    assert!(!h.move_to_last());
    h.move_to_end();
    assert_eq!(h.index(), 3);
}

#[test]
fn test_search_backwards_substring() {
    let h = hist(&["alpha", "beta", "gamma"]);
    assert_eq!(h.search_backwards("a", h.index(), false), Some(2));
    assert_eq!(h.search_backwards("a", 2, false), Some(1));
    assert_eq!(h.search_backwards("alpha", h.index(), false), Some(0));
    assert_eq!(h.search_backwards("zeta", h.index(), false), None);
}

#[test]
fn test_search_backwards_prefix() {
    let h = hist(&["git log", "make", "git push"]);
    assert_eq!(h.search_backwards("git", h.index(), true), Some(2));
    assert_eq!(h.search_backwards("git", 2, true), Some(0));
}

#[test]
fn test_search_forwards() {
    let h = hist(&["alpha", "beta", "gamma"]);
    assert_eq!(h.search_forwards("a", 0, false), Some(0));
    assert_eq!(h.search_forwards("mm", 0, false), Some(2));
    assert_eq!(h.search_forwards("alpha", 1, false), None);
}

#[test]
fn test_empty_history() {
    let mut h = MemoryHistory::new();
    assert!(h.is_empty());
    assert!(!h.previous());
    assert!(!h.move_to_first());
    assert_eq!(h.current(), "");
}
