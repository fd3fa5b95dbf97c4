//! Highlighting contract
//! Attributed rendering of the buffer; column alignment must be kept

use crate::reader::LineReader;
use crate::term::{ansi, Terminal};

/// Highlighter contract (consumer-provided). The returned string may
/// add ANSI attributes but must preserve character-by-character column
/// alignment with the input.
pub trait Highlighter<T: Terminal> {
    fn highlight(&self, reader: &LineReader<T>, buffer: &str) -> String;
}

/// Default highlighter: renders the active incremental-search term in
/// inverse video wherever it occurs in the buffer.
#[derive(Debug, Clone, Default)]
pub struct DefaultHighlighter;

impl<T: Terminal> Highlighter<T> for DefaultHighlighter {
    fn highlight(&self, reader: &LineReader<T>, buffer: &str) -> String {
        match reader.search_term() {
            Some(term) if !term.is_empty() && buffer.contains(term) => {
                let mut out = String::with_capacity(buffer.len());
                let mut rest = buffer;
                while let Some(at) = rest.find(term) {
                    out.push_str(&rest[..at]);
                    out.push_str(ansi::REVERSE_VIDEO);
                    out.push_str(term);
                    out.push_str(ansi::RESET_ATTRIBUTES);
                    rest = &rest[at + term.len()..];
                }
                out.push_str(rest);
                out
            }
            _ => buffer.to_string(),
        }
    }
}
