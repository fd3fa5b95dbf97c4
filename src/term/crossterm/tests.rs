use super::*;

fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn chars(events: Vec<Event>) -> String {
    events
        .into_iter()
        .map(|e| match e {
            Event::Char(c) => c,
            other => panic!("expected char, got {other:?}"),
        })
        .collect()
}

#[test]
fn test_plain_char() {
    let seq = chars(key_to_sequence(press(KeyCode::Char('a'), KeyModifiers::NONE)));
    assert_eq!(seq, "a");
}

#[test]
fn test_ctrl_char_masked() {
    let seq = chars(key_to_sequence(press(
        KeyCode::Char('a'),
        KeyModifiers::CONTROL,
    )));
    assert_eq!(seq, "\x01");
}

#[test]
fn test_ctrl_c_is_interrupt() {
    let events = key_to_sequence(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(events, vec![Event::Signal(Signal::Int)]);
}

#[test]
fn test_alt_char_gets_esc_prefix() {
    let seq = chars(key_to_sequence(press(KeyCode::Char('b'), KeyModifiers::ALT)));
    assert_eq!(seq, "\x1bb");
}

#[test]
fn test_arrow_keys_are_csi() {
    let seq = chars(key_to_sequence(press(KeyCode::Up, KeyModifiers::NONE)));
    assert_eq!(seq, "\x1b[A");
    let seq = chars(key_to_sequence(press(KeyCode::Delete, KeyModifiers::NONE)));
    assert_eq!(seq, "\x1b[3~");
}

#[test]
fn test_alt_arrow_prefixed() {
    let seq = chars(key_to_sequence(press(KeyCode::Right, KeyModifiers::ALT)));
    assert_eq!(seq, "\x1b\x1b[C");
}

#[test]
fn test_enter_and_backspace() {
    assert_eq!(
        chars(key_to_sequence(press(KeyCode::Enter, KeyModifiers::NONE))),
        "\r"
    );
    assert_eq!(
        chars(key_to_sequence(press(KeyCode::Backspace, KeyModifiers::NONE))),
        "\x7f"
    );
}
