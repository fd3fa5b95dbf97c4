//! Test utilities
//! Shared mock terminal for unit and dispatcher tests
//!
//! `MockTerminal` scripts input events (characters and signals) and
//! records all output, so reader behavior can be asserted without a
//! real terminal. The end of the scripted input reads as a closed
//! stream.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::term::{Attributes, Capability, Event, Signal, Size, Terminal};

/// Scripted terminal backend for tests.
pub struct MockTerminal {
    pub events: VecDeque<Event>,
    /// Everything written, escape sequences included.
    pub output: String,
    /// Capabilities emitted, in order.
    pub caps: Vec<Capability>,
    pub size: Size,
    pub attrs: Attributes,
    pub raw_mode_entered: usize,
    pub attrs_restored: usize,
}

impl MockTerminal {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            events: VecDeque::new(),
            output: String::new(),
            caps: Vec::new(),
            size: Size { rows, cols },
            attrs: Attributes::default(),
            raw_mode_entered: 0,
            attrs_restored: 0,
        }
    }

    /// Queue a string of input characters.
    pub fn push_keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.events.push_back(Event::Char(c));
        }
    }

    /// Queue a signal between keystrokes.
    pub fn push_signal(&mut self, signal: Signal) {
        self.events.push_back(Event::Signal(signal));
    }

    /// Forget recorded output and capabilities.
    pub fn clear_output(&mut self) {
        self.output.clear();
        self.caps.clear();
    }

    /// Count of a specific capability emission.
    pub fn cap_count(&self, cap: Capability) -> usize {
        self.caps.iter().filter(|&&c| c == cap).count()
    }
}

impl Terminal for MockTerminal {
    fn read_event(&mut self) -> io::Result<Event> {
        Ok(self.events.pop_front().unwrap_or(Event::Closed))
    }

    fn peek_char(&mut self, _timeout: Duration) -> io::Result<Option<char>> {
        match self.events.front() {
            Some(Event::Char(c)) => Ok(Some(*c)),
            _ => Ok(None),
        }
    }

    fn puts(&mut self, cap: Capability) -> bool {
        self.caps.push(cap);
        match cap {
            Capability::CarriageReturn => self.output.push('\r'),
            Capability::ClrEol => self.output.push_str("\x1b[K"),
            Capability::ClearScreen => self.output.push_str("\x1b[H\x1b[2J"),
            Capability::Bell => self.output.push('\x07'),
            _ => {}
        }
        true
    }

    fn write(&mut self, s: &str) -> io::Result<()> {
        self.output.push_str(s);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn cursor_up(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            self.output.push_str(&format!("\x1b[{n}A"));
        }
        Ok(())
    }

    fn cursor_down(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            self.output.push_str(&format!("\x1b[{n}B"));
        }
        Ok(())
    }

    fn cursor_forward(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            self.output.push_str(&format!("\x1b[{n}C"));
        }
        Ok(())
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn enter_raw_mode(&mut self) -> io::Result<Attributes> {
        self.raw_mode_entered += 1;
        Ok(self.attrs)
    }

    fn set_attributes(&mut self, attrs: Attributes) -> io::Result<()> {
        self.attrs = attrs;
        self.attrs_restored += 1;
        Ok(())
    }

    fn attributes(&self) -> Attributes {
        self.attrs
    }
}
