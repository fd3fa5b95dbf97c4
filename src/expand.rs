//! History event expansion
//! Bash-style event designators over the accepted line
//!
//! Grammar: `\` escapes the next character, `!!` recalls the previous
//! entry, `!n` / `!-n` absolute and relative entries, `!str` the most
//! recent entry starting with `str`, `!?str?` the most recent entry
//! containing `str`, `!$` the last word of the previous entry, `!#` the
//! line expanded so far, and `^old^new^` (only at position 0)
//! substitutes the first occurrence of `old` in the previous entry.
//! A designator that matches nothing is an error and the line is left
//! untouched by the caller.

use crate::error::ExpandError;
use crate::history::History;

/// Expand event designators in `line` against `history`.
///
/// Escapes are preserved in the output; the dispatcher strips them
/// separately when the line is finally accepted.
pub fn expand_events(history: &dyn History, line: &str) -> Result<String, ExpandError> {
    let chars: Vec<char> = line.chars().collect();
    let mut sb = String::new();
    let mut escaped = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if escaped {
            escaped = false;
            sb.push(c);
            i += 1;
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                sb.push(c);
                i += 1;
            }
            '!' if i + 1 < chars.len() => {
                i += 1;
                expand_bang(history, &chars, &mut i, &mut sb)?;
            }
            '^' if i == 0 => {
                if !expand_caret(history, &chars, &mut i, &mut sb)? {
                    sb.push('^');
                    i += 1;
                }
            }
            _ => {
                sb.push(c);
                i += 1;
            }
        }
    }
    Ok(sb)
}

// Handle the designator following '!'; `i` points at its first char.
fn expand_bang(
    history: &dyn History,
    chars: &[char],
    i: &mut usize,
    sb: &mut String,
) -> Result<(), ExpandError> {
    let c = chars[*i];
    match c {
        '!' => {
            sb.push_str(&previous_entry(history, "!!")?);
            *i += 1;
        }
        '#' => {
            let so_far = sb.clone();
            sb.push_str(&so_far);
            *i += 1;
        }
        '?' => {
            let close = chars[*i + 1..]
                .iter()
                .position(|&c| c == '?')
                .map(|p| *i + 1 + p)
                .unwrap_or(chars.len());
            let term: String = chars[*i + 1..close].iter().collect();
            *i = (close + 1).min(chars.len());
            match history.search_backwards(&term, history.index(), false) {
                Some(idx) => sb.push_str(history.get(idx).unwrap_or("")),
                None => return Err(ExpandError(format!("!?{term}?: event not found"))),
            }
        }
        '$' => {
            let previous = previous_entry(history, "!$")?;
            let previous = previous.trim();
            let last = previous.rsplit(' ').next().unwrap_or(previous);
            sb.push_str(last);
            *i += 1;
        }
        ' ' | '\t' => {
            sb.push('!');
            sb.push(c);
            *i += 1;
        }
        '-' | '0'..='9' => {
            let neg = c == '-';
            if neg {
                *i += 1;
            }
            let start = *i;
            while *i < chars.len() && chars[*i].is_ascii_digit() {
                *i += 1;
            }
            let digits: String = chars[start..*i].iter().collect();
            let designator = if neg {
                format!("!-{digits}")
            } else {
                format!("!{digits}")
            };
            let idx: usize = digits
                .parse()
                .map_err(|_| ExpandError(format!("{designator}: event not found")))?;
            let size = history.size();
            let cursor = history.index();
            let rep = if neg && idx > 0 && idx <= size {
                history.get(cursor - idx)
            } else if !neg && idx + size > cursor && idx <= cursor && idx > 0 {
                history.get(idx - 1)
            } else {
                None
            };
            match rep {
                Some(text) => sb.push_str(text),
                None => return Err(ExpandError(format!("{designator}: event not found"))),
            }
        }
        _ => {
            let term: String = chars[*i..].iter().collect();
            *i = chars.len();
            match history.search_backwards(&term, history.index(), true) {
                Some(idx) => sb.push_str(history.get(idx).unwrap_or("")),
                None => return Err(ExpandError(format!("!{term}: event not found"))),
            }
        }
    }
    Ok(())
}

// `^old^new^` substitution at the start of the line. Returns false when
// the designator is not well-formed (caller emits the literal caret).
fn expand_caret(
    history: &dyn History,
    chars: &[char],
    i: &mut usize,
    sb: &mut String,
) -> Result<bool, ExpandError> {
    let Some(p1) = chars[1..].iter().position(|&c| c == '^').map(|p| p + 1) else {
        return Ok(false);
    };
    let p2 = chars[p1 + 1..]
        .iter()
        .position(|&c| c == '^')
        .map(|p| p1 + 1 + p)
        .unwrap_or(chars.len());
    let old: String = chars[1..p1].iter().collect();
    let new: String = chars[p1 + 1..p2].iter().collect();
    if history.is_empty() || history.index() == 0 {
        return Err(ExpandError(format!("^{old}^{new}: event not found")));
    }
    let previous = history.get(history.index() - 1).unwrap_or("");
    sb.push_str(&previous.replacen(&old, &new, 1));
    *i = (p2 + 1).min(chars.len());
    Ok(true)
}

fn previous_entry(history: &dyn History, designator: &str) -> Result<String, ExpandError> {
    if history.is_empty() || history.index() == 0 {
        return Err(ExpandError(format!("{designator}: event not found")));
    }
    Ok(history
        .get(history.index() - 1)
        .unwrap_or("")
        .to_string())
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
