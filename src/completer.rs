//! Completion contract
//! Candidates and the completer plugin interface

use crate::parser::ParsedLine;
use crate::reader::LineReader;
use crate::term::Terminal;

/// A single completion entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Replacement text inserted into the buffer.
    pub value: String,
    /// Text shown in lists and menus (may carry ANSI attributes).
    pub displ: String,
    /// Group this candidate belongs to, when grouping is enabled.
    pub group: Option<String>,
    /// Short description rendered next to the display text.
    pub descr: Option<String>,
    /// Removable suffix: stripped again when the next key is a suffix
    /// terminator (see `REMOVE_SUFFIX_CHARS`).
    pub suffix: Option<String>,
    /// Candidates sharing a key are merged into one row.
    pub key: Option<String>,
    /// Whether the candidate is complete (a trailing space is added).
    pub complete: bool,
}

impl Candidate {
    /// A plain, complete candidate displaying its own value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            displ: value.clone(),
            value,
            group: None,
            descr: None,
            suffix: None,
            key: None,
            complete: true,
        }
    }

    pub fn full(
        value: impl Into<String>,
        displ: impl Into<String>,
        group: Option<String>,
        descr: Option<String>,
        suffix: Option<String>,
        key: Option<String>,
        complete: bool,
    ) -> Self {
        Self {
            value: value.into(),
            displ: displ.into(),
            group,
            descr,
            suffix,
            key,
            complete,
        }
    }
}

/// Completer contract (consumer-provided).
pub trait Completer<T: Terminal> {
    /// Append candidates for the word under the cursor.
    fn complete(&self, reader: &LineReader<T>, line: &ParsedLine, candidates: &mut Vec<Candidate>);
}

/// Completes from a fixed set of strings.
#[derive(Debug, Clone, Default)]
pub struct StringsCompleter {
    strings: Vec<String>,
}

impl StringsCompleter {
    pub fn new(strings: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T: Terminal> Completer<T> for StringsCompleter {
    fn complete(&self, _reader: &LineReader<T>, _line: &ParsedLine, candidates: &mut Vec<Candidate>) {
        for s in &self.strings {
            candidates.push(Candidate::new(s.clone()));
        }
    }
}
