//! ANSI-aware text measurement and wrapping
//! Escape sequences occupy no display cells; widths follow wcwidth rules.

use unicode_width::UnicodeWidthChar;

/// ANSI escape sequence constants used by attributed text producers.
pub const REVERSE_VIDEO: &str = "\x1b[7m";
pub const RESET_ATTRIBUTES: &str = "\x1b[0m";
pub const FG_CYAN: &str = "\x1b[36m";
pub const FG_BRIGHT_BLACK: &str = "\x1b[90m";
pub const FG_DEFAULT: &str = "\x1b[39m";

/// Remove ANSI escape sequences, keeping only printable content.
pub fn strip(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            skip_escape(&mut chars);
        } else {
            out.push(c);
        }
    }
    out
}

/// Display width of a string, ignoring escape sequences.
///
/// Tabs count as zero here; callers expand tabs before measuring
/// (see [`split_lines`]).
pub fn display_width(s: &str) -> usize {
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            skip_escape(&mut chars);
        } else {
            width += UnicodeWidthChar::width(c).unwrap_or(0);
        }
    }
    width
}

/// Split attributed text into display rows.
///
/// Rows break at `\n` and when the accumulated display width reaches
/// `columns`. Tabs are expanded to the next `tab_width` stop. Escape
/// sequences stay attached to the row they appear in and never count
/// toward the width.
pub fn split_lines(s: &str, columns: usize, tab_width: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    let mut cur_width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match c {
            '\x1b' => {
                cur.push(c);
                copy_escape(&mut chars, &mut cur);
            }
            '\n' => {
                lines.push(std::mem::take(&mut cur));
                cur_width = 0;
            }
            '\t' => {
                let stop = tab_width.max(1);
                let pad = stop - (cur_width % stop);
                for _ in 0..pad {
                    if cur_width >= columns {
                        lines.push(std::mem::take(&mut cur));
                        cur_width = 0;
                    }
                    cur.push(' ');
                    cur_width += 1;
                }
            }
            _ => {
                let w = UnicodeWidthChar::width(c).unwrap_or(0);
                if cur_width + w > columns {
                    lines.push(std::mem::take(&mut cur));
                    cur_width = 0;
                }
                cur.push(c);
                cur_width += w;
            }
        }
    }
    lines.push(cur);
    lines
}

/// Truncate to at most `max_cells` of display width, preserving escapes.
pub fn cut(s: &str, max_cells: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            out.push(c);
            copy_escape(&mut chars, &mut out);
            continue;
        }
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_cells {
            break;
        }
        out.push(c);
        width += w;
    }
    out
}

// Consume the remainder of an escape sequence whose introducer has been
// read. CSI sequences end at a byte in `@`..`~`; two-char sequences end
// immediately.
fn skip_escape(chars: &mut std::str::Chars<'_>) {
    match chars.next() {
        Some('[') => {
            for c in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        }
        Some(']') => {
            // OSC: terminated by BEL or ST
            let mut prev = '\0';
            for c in chars.by_ref() {
                if c == '\x07' || (prev == '\x1b' && c == '\\') {
                    break;
                }
                prev = c;
            }
        }
        _ => {}
    }
}

fn copy_escape(chars: &mut std::str::Chars<'_>, out: &mut String) {
    match chars.next() {
        Some('[') => {
            out.push('[');
            for c in chars.by_ref() {
                out.push(c);
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        }
        Some(c) => out.push(c),
        None => {}
    }
}

#[cfg(test)]
#[path = "ansi_tests.rs"]
mod tests;
