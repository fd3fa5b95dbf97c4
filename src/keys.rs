//! Key sequence notation for binding declarations
//!
//! Bindings are declared as strings of code points. Control characters are
//! written with these helpers or with caret/backslash notation accepted by
//! [`translate`]: `^X` for Ctrl-X, `^?` for DEL, `\E` for escape.

/// Ctrl-modified character: `ctrl('A')` is `'\x01'`.
pub fn ctrl(c: char) -> char {
    ((c as u8) & 0x1f) as char
}

/// Key sequence for a Ctrl-modified character.
pub fn ctrl_key(c: char) -> String {
    ctrl(c).to_string()
}

/// Alt (meta) modified character: ESC prefix.
pub fn alt(c: char) -> String {
    let mut s = String::with_capacity(2);
    s.push('\x1b');
    s.push(c);
    s
}

/// Alt (meta) modified key sequence: ESC prefix.
pub fn alt_seq(seq: &str) -> String {
    format!("\x1b{seq}")
}

/// The DEL key.
pub fn del() -> String {
    "\x7f".to_string()
}

/// The escape key.
pub fn esc() -> String {
    "\x1b".to_string()
}

/// Translate caret/backslash notation into the raw key sequence.
///
/// `^X` denotes Ctrl-X (`^?` is DEL), `\E` or `\e` the escape character,
/// `\\` a literal backslash. Anything else passes through.
pub fn translate(notation: &str) -> String {
    let mut out = String::with_capacity(notation.len());
    let mut chars = notation.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '^' => match chars.next() {
                Some('?') => out.push('\x7f'),
                Some(n) => out.push(ctrl(n)),
                None => out.push('^'),
            },
            '\\' => match chars.next() {
                Some('E') | Some('e') => out.push('\x1b'),
                Some('\\') => out.push('\\'),
                Some(n) => out.push(n),
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    out
}

/// Expand a `start-end` range of key sequences.
///
/// Both endpoints are [`translate`]d and must share every code point but
/// the last; the last code point is iterated inclusively. For example
/// `range("^[A-^[Z")` yields ESC-A through ESC-Z.
pub fn range(spec: &str) -> Vec<String> {
    let Some(dash) = find_range_dash(spec) else {
        return Vec::new();
    };
    let start = translate(&spec[..dash]);
    let end = translate(&spec[dash + 1..]);
    let start_chars: Vec<char> = start.chars().collect();
    let end_chars: Vec<char> = end.chars().collect();
    if start_chars.is_empty()
        || start_chars.len() != end_chars.len()
        || start_chars[..start_chars.len() - 1] != end_chars[..end_chars.len() - 1]
    {
        return Vec::new();
    }
    let prefix: String = start_chars[..start_chars.len() - 1].iter().collect();
    let (Some(&lo), Some(&hi)) = (start_chars.last(), end_chars.last()) else {
        return Vec::new();
    };
    let (lo, hi) = (lo as u32, hi as u32);
    (lo..=hi)
        .filter_map(char::from_u32)
        .map(|c| {
            let mut s = prefix.clone();
            s.push(c);
            s
        })
        .collect()
}

// The '-' separating the endpoints must not be one consumed by caret or
// backslash notation, and the range " -~" starts with a literal space.
fn find_range_dash(spec: &str) -> Option<usize> {
    let bytes = spec.as_bytes();
    let mut i = 0;
    let mut seen_start = false;
    while i < bytes.len() {
        match bytes[i] {
            b'^' | b'\\' => {
                i += 2;
                seen_start = true;
            }
            b'-' if seen_start => return Some(i),
            _ => {
                i += 1;
                seen_start = true;
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
