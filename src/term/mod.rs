//! Terminal backend abstraction
//! Platform-agnostic interface for terminal input and control output
//!
//! ## term/ Invariants
//!
//! - Terminal handling is isolated behind a strict abstraction boundary.
//! - Raw mode is entered before input processing begins and the prior
//!   attributes are restored on every exit path.
//! - Signals are delivered in-band through the read path; handlers never
//!   touch reader state directly.
//! - Terminal code never depends on reader internals.

use std::io;
use std::time::Duration;

pub mod ansi;
pub mod crossterm;

/// Terminal size information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub rows: u16,
    pub cols: u16,
}

/// OS signals the reader reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// User interrupt (Ctrl-C / SIGINT).
    Int,
    /// Window size change (SIGWINCH); carries the new size.
    Winch(Size),
    /// Resumed after a suspend (SIGCONT).
    Cont,
}

/// One unit read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A single code point of input.
    Char(char),
    /// An out-of-band signal, delivered in input order.
    Signal(Signal),
    /// The input stream is closed.
    Closed,
}

/// Terminal attributes relevant to the reader: the special control
/// characters of the line discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes {
    /// End-of-file character (VEOF), conventionally Ctrl-D.
    pub veof: char,
    /// Erase character (VERASE), conventionally DEL.
    pub verase: char,
    /// Word-erase character (VWERASE), conventionally Ctrl-W.
    pub vwerase: char,
    /// Line-kill character (VKILL), conventionally Ctrl-U.
    pub vkill: char,
    /// Literal-next character (VLNEXT), conventionally Ctrl-V.
    pub vlnext: char,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            veof: '\x04',
            verase: '\x7f',
            vwerase: '\x17',
            vkill: '\x15',
            vlnext: '\x16',
        }
    }
}

/// Output capabilities the reader asks the backend to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ClearScreen,
    Bell,
    FlashScreen,
    CarriageReturn,
    ClrEol,
    KeypadXmit,
    KeypadLocal,
}

/// Terminal backend trait
///
/// All terminal backends must implement these operations. Reads are
/// blocking; `peek_char` waits at most `timeout` and does not consume.
pub trait Terminal {
    /// Read the next input event, blocking until one is available.
    fn read_event(&mut self) -> io::Result<Event>;

    /// Peek the next input code point without consuming it, waiting at
    /// most `timeout`. Returns `None` when no character arrives in time
    /// (pending signals do not count as characters).
    fn peek_char(&mut self, timeout: Duration) -> io::Result<Option<char>>;

    /// Emit a capability. Returns false if the backend cannot express it.
    fn puts(&mut self, cap: Capability) -> bool;

    /// Write text at the current cursor position.
    fn write(&mut self, s: &str) -> io::Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> io::Result<()>;

    /// Move the cursor up `n` rows.
    fn cursor_up(&mut self, n: u16) -> io::Result<()>;

    /// Move the cursor down `n` rows.
    fn cursor_down(&mut self, n: u16) -> io::Result<()>;

    /// Move the cursor right `n` columns.
    fn cursor_forward(&mut self, n: u16) -> io::Result<()>;

    /// Query the terminal dimensions.
    fn size(&self) -> io::Result<Size>;

    /// Enter raw mode, returning the attributes to restore later.
    fn enter_raw_mode(&mut self) -> io::Result<Attributes>;

    /// Restore previously saved attributes (leaves raw mode).
    fn set_attributes(&mut self, attrs: Attributes) -> io::Result<()>;

    /// Current terminal attributes.
    fn attributes(&self) -> Attributes;
}
