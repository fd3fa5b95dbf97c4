//! Binding reader
//! Byte-at-a-time resolution of keystroke sequences against key maps
//!
//! The reader owns a pushback stack so macros and rematched characters
//! re-enter the matcher ahead of terminal input. Ambiguous prefixes
//! (a node that is bound and also has children) wait up to the
//! ambiguity timeout for more input before committing.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use tracing::trace;

use crate::keymap::{Binding, KeyMap, MatchResult};
use crate::term::{Event, Signal, Terminal};

/// What a binding read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingEvent {
    Binding(Binding),
    /// A signal arrived mid-sequence; the partial sequence is pushed
    /// back and re-matched after the signal is handled.
    Signal(Signal),
    /// The input stream is closed.
    Eof,
}

/// Matches input characters against key map tries.
#[derive(Debug)]
pub struct BindingReader {
    pushback: VecDeque<char>,
    last_binding: String,
    fallback: Binding,
}

impl BindingReader {
    /// `fallback` is returned for a single unbound printable character
    /// (conventionally a reference to `self-insert`).
    pub fn new(fallback: Binding) -> Self {
        Self {
            pushback: VecDeque::new(),
            last_binding: String::new(),
            fallback,
        }
    }

    /// Push a key sequence so it is read before terminal input.
    pub fn run_macro(&mut self, keys: &str) {
        for c in keys.chars().rev() {
            self.pushback.push_front(c);
        }
    }

    /// The key sequence that produced the last committed binding.
    pub fn last_binding(&self) -> &str {
        &self.last_binding
    }

    /// Read one input event, preferring pushed-back characters.
    pub fn read_character<T: Terminal + ?Sized>(&mut self, term: &mut T) -> io::Result<Event> {
        if let Some(c) = self.pushback.pop_front() {
            return Ok(Event::Char(c));
        }
        term.read_event()
    }

    /// Peek the next character without consuming it.
    pub fn peek_character<T: Terminal + ?Sized>(
        &mut self,
        term: &mut T,
        timeout: Duration,
    ) -> io::Result<Option<char>> {
        if let Some(&c) = self.pushback.front() {
            return Ok(Some(c));
        }
        term.peek_char(timeout)
    }

    /// Resolve the next key sequence against `local` (when given) and
    /// `primary`, longest match winning. Characters that cannot start
    /// any binding are discarded one at a time.
    pub fn read_binding<T: Terminal + ?Sized>(
        &mut self,
        term: &mut T,
        primary: &KeyMap,
        local: Option<&KeyMap>,
        ambiguous_timeout: Duration,
    ) -> io::Result<BindingEvent> {
        let mut pending: Vec<char> = Vec::new();
        let mut last_match: Option<(Binding, usize)> = None;
        loop {
            let c = match self.read_character(term)? {
                Event::Char(c) => c,
                Event::Signal(signal) => {
                    for &pc in pending.iter().rev() {
                        self.pushback.push_front(pc);
                    }
                    return Ok(BindingEvent::Signal(signal));
                }
                Event::Closed => {
                    if let Some((binding, len)) = last_match {
                        return Ok(self.commit(binding, &pending[..len]));
                    }
                    return Ok(BindingEvent::Eof);
                }
            };
            pending.push(c);
            match lookup(primary, local, &pending) {
                MatchResult::Exact(binding) => {
                    let binding = binding.clone();
                    return Ok(self.commit(binding, &pending));
                }
                MatchResult::Ambiguous(binding) => {
                    let binding = binding.clone();
                    if self.peek_character(term, ambiguous_timeout)?.is_none() {
                        return Ok(self.commit(binding, &pending));
                    }
                    last_match = Some((binding, pending.len()));
                }
                MatchResult::Prefix => {}
                MatchResult::None => {
                    if let Some((binding, len)) = last_match.take() {
                        for &pc in pending[len..].iter().rev() {
                            self.pushback.push_front(pc);
                        }
                        return Ok(self.commit(binding, &pending[..len]));
                    }
                    if pending.len() == 1 && !c.is_control() {
                        let fallback = self.fallback.clone();
                        return Ok(self.commit(fallback, &pending));
                    }
                    trace!(discarded = %pending[0].escape_debug(), "unmatched key");
                    for &pc in pending[1..].iter().rev() {
                        self.pushback.push_front(pc);
                    }
                    pending.clear();
                }
            }
        }
    }

    fn commit(&mut self, binding: Binding, keys: &[char]) -> BindingEvent {
        self.last_binding = keys.iter().collect();
        trace!(keys = %self.last_binding.escape_debug(), ?binding, "binding");
        BindingEvent::Binding(binding)
    }
}

fn lookup<'a>(primary: &'a KeyMap, local: Option<&'a KeyMap>, keys: &[char]) -> MatchResult<'a> {
    if let Some(local) = local {
        match local.lookup(keys) {
            MatchResult::None => {}
            result => return result,
        }
    }
    primary.lookup(keys)
}

#[cfg(test)]
#[path = "binding_reader_tests.rs"]
mod tests;
