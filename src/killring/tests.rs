use super::*;

#[test]
fn test_yank_returns_latest_kill() {
    let mut ring = KillRing::new();
    ring.add("one".into());
    ring.reset_last_kill();
    ring.add("two".into());
    assert_eq!(ring.yank().as_deref(), Some("two"));
}

#[test]
fn test_consecutive_kills_concatenate() {
    let mut ring = KillRing::new();
    ring.add("foo".into());
    ring.add("bar".into());
    assert_eq!(ring.len(), 1);
    assert_eq!(ring.yank().as_deref(), Some("foobar"));
}

#[test]
fn test_backward_kills_prepend() {
    let mut ring = KillRing::new();
    ring.add("bar".into());
    ring.add_backwards("foo".into());
    assert_eq!(ring.yank().as_deref(), Some("foobar"));
}

#[test]
fn test_non_adjacent_kills_start_new_slot() {
    let mut ring = KillRing::new();
    ring.add("foo".into());
    ring.reset_last_kill();
    ring.add("bar".into());
    assert_eq!(ring.len(), 2);
}

#[test]
fn test_yank_pop_requires_yank() {
    let mut ring = KillRing::new();
    ring.add("a".into());
    assert_eq!(ring.yank_pop(), None);
    ring.yank();
    assert!(ring.yank_pop().is_some());
}

#[test]
fn test_yank_pop_rotates_backwards_with_wraparound() {
    let mut ring = KillRing::new();
    for s in ["a", "b", "c"] {
        ring.reset_last_kill();
        ring.add(s.into());
    }
    assert_eq!(ring.yank().as_deref(), Some("c"));
    assert_eq!(ring.yank_pop().as_deref(), Some("b"));
    assert_eq!(ring.yank_pop().as_deref(), Some("a"));
    assert_eq!(ring.yank_pop().as_deref(), Some("c"));
}

#[test]
fn test_new_kill_resets_rotation() {
    let mut ring = KillRing::new();
    for s in ["a", "b"] {
        ring.reset_last_kill();
        ring.add(s.into());
    }
    ring.yank();
    ring.yank_pop();
    ring.reset_last_kill();
    ring.reset_last_yank();
    ring.add("c".into());
    assert_eq!(ring.yank().as_deref(), Some("c"));
}

#[test]
fn test_capacity_evicts_oldest() {
    let mut ring = KillRing::with_capacity(2);
    for s in ["a", "b", "c"] {
        ring.reset_last_kill();
        ring.add(s.into());
    }
    assert_eq!(ring.len(), 2);
    ring.yank();
    assert_eq!(ring.yank_pop().as_deref(), Some("b"));
}

#[test]
fn test_empty_ring_yank() {
    let mut ring = KillRing::new();
    assert_eq!(ring.yank(), None);
    assert_eq!(ring.yank_pop(), None);
}
