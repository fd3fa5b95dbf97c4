//! Error types surfaced by the line reader

use thiserror::Error;

/// Failure modes of [`read_line`](crate::reader::LineReader::read_line).
#[derive(Debug, Error)]
pub enum ReadlineError {
    /// End of input on an empty buffer (e.g. Ctrl-D at an empty prompt).
    #[error("end of input")]
    Eof,
    /// The user interrupted the read; carries the partial buffer contents.
    #[error("interrupted")]
    Interrupted(String),
    /// The reader was used in a state it does not allow.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
    /// Underlying terminal I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// History event expansion failure (`!!`, `!n`, `!?str?`, ...).
///
/// The message is user-visible: it is printed on its own line when
/// expansion fails at accept-line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ExpandError(pub String);
