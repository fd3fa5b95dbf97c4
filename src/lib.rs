//! riftline - a readline-style line editor for character-cell terminals
//!
//! The entry point is [`reader::LineReader`]: a blocking [`read_line`]
//! over a [`term::Terminal`] backend, with emacs and vi key maps,
//! history recall and search, tab completion with list/menu rendering,
//! kill/yank, undo and an incremental diff renderer.
//!
//! [`read_line`]: reader::LineReader::read_line

pub mod buffer;
pub mod completer;
pub mod display;
pub mod error;
pub mod expand;
pub mod highlighter;
pub mod history;
pub mod keymap;
pub mod keys;
pub mod killring;
pub mod options;
pub mod parser;
pub mod reader;
pub mod term;
pub mod undo;

#[cfg(test)]
pub mod test_utils;

pub use crate::buffer::{Buffer, Snapshot};
pub use crate::completer::{Candidate, Completer, StringsCompleter};
pub use crate::error::ReadlineError;
pub use crate::highlighter::{DefaultHighlighter, Highlighter};
pub use crate::history::{History, MemoryHistory};
pub use crate::options::ReaderOption;
pub use crate::parser::{DefaultParser, ParseError, ParsedLine, Parser};
pub use crate::reader::LineReader;
pub use crate::term::crossterm::CrosstermTerminal;
pub use crate::term::Terminal;
