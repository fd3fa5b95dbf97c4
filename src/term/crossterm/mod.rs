//! Crossterm-based terminal backend
//! Cross-platform raw mode, size queries and input via crossterm
//!
//! Input events are translated back into VT100 byte sequences so the
//! keymap layer always matches against the real escape sequences a
//! terminal would send:
//!   - Cursor keys:  ESC [ {suffix}          e.g. ESC [ A  (up)
//!   - Tilde keys:   ESC [ {num} ~           e.g. ESC [ 3 ~  (delete)
//!   - Alt-modified: ESC {char}
//!   - Ctrl-modified: masked to the control range (0x00-0x1F)
//! Ctrl-C is surfaced as an interrupt signal: raw mode suppresses the
//! kernel's ISIG delivery, so the backend restores the conventional
//! behavior the dispatcher expects.

use std::collections::VecDeque;
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::term::{Attributes, Capability, Event, Signal, Size, Terminal};

/// Crossterm-backed [`Terminal`] implementation writing to stdout.
pub struct CrosstermTerminal {
    writer: BufWriter<Stdout>,
    pending: VecDeque<Event>,
    raw_mode_enabled: bool,
    attrs: Attributes,
}

impl CrosstermTerminal {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::with_capacity(8192, stdout()),
            pending: VecDeque::new(),
            raw_mode_enabled: false,
            attrs: Attributes::default(),
        })
    }

    fn pull_event(&mut self) -> io::Result<()> {
        let ev = event::read()?;
        self.translate(ev);
        Ok(())
    }

    fn translate(&mut self, ev: event::Event) {
        match ev {
            event::Event::Key(key) => {
                if key.kind == KeyEventKind::Press {
                    for c in key_to_sequence(key) {
                        self.pending.push_back(c);
                    }
                }
            }
            event::Event::Resize(cols, rows) => {
                self.pending
                    .push_back(Event::Signal(Signal::Winch(Size { rows, cols })));
            }
            _ => {}
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn read_event(&mut self) -> io::Result<Event> {
        loop {
            if let Some(ev) = self.pending.pop_front() {
                return Ok(ev);
            }
            self.pull_event()?;
        }
    }

    fn peek_char(&mut self, timeout: Duration) -> io::Result<Option<char>> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.pending.front() {
                Some(Event::Char(c)) => return Ok(Some(*c)),
                Some(_) => return Ok(None),
                None => {}
            }
            let now = Instant::now();
            if now >= deadline || !event::poll(deadline - now)? {
                return Ok(None);
            }
            self.pull_event()?;
        }
    }

    fn puts(&mut self, cap: Capability) -> bool {
        let seq = match cap {
            Capability::ClearScreen => "\x1b[H\x1b[2J",
            Capability::Bell => "\x07",
            Capability::FlashScreen => "\x1b[?5h\x1b[?5l",
            Capability::CarriageReturn => "\r",
            Capability::ClrEol => "\x1b[K",
            Capability::KeypadXmit => "\x1b[?1h\x1b=",
            Capability::KeypadLocal => "\x1b[?1l\x1b>",
        };
        self.writer.write_all(seq.as_bytes()).is_ok()
    }

    fn write(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn cursor_up(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            write!(self.writer, "\x1b[{n}A")?;
        }
        Ok(())
    }

    fn cursor_down(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            write!(self.writer, "\x1b[{n}B")?;
        }
        Ok(())
    }

    fn cursor_forward(&mut self, n: u16) -> io::Result<()> {
        if n > 0 {
            write!(self.writer, "\x1b[{n}C")?;
        }
        Ok(())
    }

    fn size(&self) -> io::Result<Size> {
        let (cols, rows) = terminal::size()?;
        Ok(Size { rows, cols })
    }

    fn enter_raw_mode(&mut self) -> io::Result<Attributes> {
        terminal::enable_raw_mode()?;
        self.raw_mode_enabled = true;
        Ok(self.attrs)
    }

    fn set_attributes(&mut self, attrs: Attributes) -> io::Result<()> {
        self.attrs = attrs;
        if self.raw_mode_enabled {
            terminal::disable_raw_mode()?;
            self.raw_mode_enabled = false;
        }
        Ok(())
    }

    fn attributes(&self) -> Attributes {
        self.attrs
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = terminal::disable_raw_mode();
        }
        let _ = self.writer.flush();
    }
}

// Translate one key event into the events the reader consumes. A single
// key may expand to several chars (escape sequences).
fn key_to_sequence(key: KeyEvent) -> Vec<Event> {
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let mut out = Vec::with_capacity(4);
    let mut push_str = |out: &mut Vec<Event>, s: &str| {
        for c in s.chars() {
            out.push(Event::Char(c));
        }
    };
    match key.code {
        KeyCode::Char(c) if ctrl => {
            if c == 'c' {
                out.push(Event::Signal(Signal::Int));
            } else {
                if alt {
                    out.push(Event::Char('\x1b'));
                }
                out.push(Event::Char(((c as u8) & 0x1f) as char));
            }
        }
        KeyCode::Char(c) => {
            if alt {
                out.push(Event::Char('\x1b'));
            }
            out.push(Event::Char(c));
        }
        KeyCode::Enter => out.push(Event::Char('\r')),
        KeyCode::Tab => out.push(Event::Char('\t')),
        KeyCode::BackTab => push_str(&mut out, "\x1b[Z"),
        KeyCode::Backspace => out.push(Event::Char('\x7f')),
        KeyCode::Esc => out.push(Event::Char('\x1b')),
        KeyCode::Up => push_str(&mut out, "\x1b[A"),
        KeyCode::Down => push_str(&mut out, "\x1b[B"),
        KeyCode::Right => push_str(&mut out, "\x1b[C"),
        KeyCode::Left => push_str(&mut out, "\x1b[D"),
        KeyCode::Home => push_str(&mut out, "\x1b[H"),
        KeyCode::End => push_str(&mut out, "\x1b[F"),
        KeyCode::Delete => push_str(&mut out, "\x1b[3~"),
        KeyCode::Insert => push_str(&mut out, "\x1b[2~"),
        KeyCode::PageUp => push_str(&mut out, "\x1b[5~"),
        KeyCode::PageDown => push_str(&mut out, "\x1b[6~"),
        _ => {}
    }
    if alt && !matches!(key.code, KeyCode::Char(_)) {
        if !out.is_empty() {
            out.insert(0, Event::Char('\x1b'));
        }
    }
    out
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
