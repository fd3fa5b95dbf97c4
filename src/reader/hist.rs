//! History widgets
//! Navigation, prefix search and incremental search over the history

use std::io;

use crate::buffer::Buffer;
use crate::keymap::{Binding, KeyMap, MAIN, SAFE};
use crate::options::*;
use crate::reader::binding_reader::BindingEvent;
use crate::reader::widgets;
use crate::reader::LineReader;
use crate::term::Terminal;

impl<T: Terminal> LineReader<T> {
    /// Replace the buffer contents, cursor at the end.
    pub(crate) fn set_buffer(&mut self, text: &str) {
        self.buf.clear();
        self.buf.write(text);
    }

    //
    // Simple navigation
    //

    pub(crate) fn up_line(&mut self) -> bool {
        self.buf.up()
    }

    pub(crate) fn down_line(&mut self) -> bool {
        self.buf.down()
    }

    pub(crate) fn up_history(&mut self) -> bool {
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            if !self.move_history(false) {
                return !self.is_set(ReaderOption::HistoryBeep);
            }
        }
        true
    }

    pub(crate) fn down_history(&mut self) -> bool {
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            if !self.move_history(true) {
                return !self.is_set(ReaderOption::HistoryBeep);
            }
        }
        true
    }

    pub(crate) fn up_line_or_history(&mut self) -> bool {
        self.up_line() || self.up_history()
    }

    pub(crate) fn down_line_or_history(&mut self) -> bool {
        self.down_line() || self.down_history()
    }

    pub(crate) fn up_line_or_search(&mut self) -> bool {
        self.up_line() || self.history_search_backward()
    }

    pub(crate) fn down_line_or_search(&mut self) -> bool {
        self.down_line() || self.history_search_forward()
    }

    /// Step through history, remembering edits made to visited entries
    /// so navigating back restores them.
    pub(crate) fn move_history(&mut self, next: bool) -> bool {
        if self.buf.to_string() != self.history.current() {
            self.modified_history
                .insert(self.history.index(), self.buf.to_string());
        }
        let moved = if next {
            self.history.next()
        } else {
            self.history.previous()
        };
        if !moved {
            return false;
        }
        let text = self
            .modified_history
            .get(&self.history.index())
            .cloned()
            .unwrap_or_else(|| self.history.current().to_string());
        self.set_buffer(&text);
        true
    }

    //
    // Buffer-or-history jumps
    //

    pub(crate) fn beginning_of_buffer_or_history(&mut self) -> bool {
        if self.buf.find_bol() != 0 {
            self.buf.set_cursor(0);
            true
        } else {
            self.beginning_of_history()
        }
    }

    pub(crate) fn beginning_of_history(&mut self) -> bool {
        if self.history.move_to_first() {
            let entry = self.history.current().to_string();
            self.set_buffer(&entry);
            true
        } else {
            false
        }
    }

    pub(crate) fn end_of_buffer_or_history(&mut self) -> bool {
        if self.buf.find_eol() != self.buf.length() {
            self.buf.set_cursor(self.buf.length());
            true
        } else {
            self.end_of_history()
        }
    }

    pub(crate) fn end_of_history(&mut self) -> bool {
        if self.history.move_to_last() {
            let entry = self.history.current().to_string();
            self.set_buffer(&entry);
            true
        } else {
            false
        }
    }

    pub(crate) fn beginning_of_line_hist(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::end_of_line_hist);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            let bol = self.buf.find_bol();
            if bol != self.buf.cursor() {
                self.buf.set_cursor(bol);
            } else {
                self.move_history(false);
                self.buf.set_cursor(0);
            }
        }
        true
    }

    pub(crate) fn end_of_line_hist(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::beginning_of_line_hist);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            let eol = self.buf.find_eol();
            if eol != self.buf.cursor() {
                self.buf.set_cursor(eol);
            } else {
                self.move_history(true);
            }
        }
        true
    }

    //
    // Prefix search (history-search-forward / -backward)
    //

    fn first_word(&self) -> String {
        let text = self.buf.to_string();
        text.chars().take_while(|c| !c.is_whitespace()).collect()
    }

    fn remember_search_origin(&mut self) {
        if self.history_buffer.is_none() || self.buf.to_string() != self.history.current() {
            self.history_buffer = Some(self.buf.copy());
            self.search_prefix = Some(self.first_word());
        }
    }

    pub(crate) fn history_search_backward(&mut self) -> bool {
        self.remember_search_origin();
        let prefix = self.search_prefix.clone().unwrap_or_default();
        match self
            .history
            .search_backwards(&prefix, self.history.index(), true)
        {
            Some(found) => {
                if self.history.move_to(found) {
                    let entry = self.history.current().to_string();
                    self.set_buffer(&entry);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    pub(crate) fn history_search_forward(&mut self) -> bool {
        self.remember_search_origin();
        let prefix = self.search_prefix.clone().unwrap_or_default();
        let index = self.history.index() + 1;
        if index < self.history.size() {
            match self.history.search_forwards(&prefix, index, true) {
                Some(found) => {
                    if self.history.move_to(found) {
                        let entry = self.history.current().to_string();
                        self.set_buffer(&entry);
                        true
                    } else {
                        self.history.move_to_end();
                        let original = self.history_buffer.clone();
                        match original {
                            Some(snapshot) => {
                                self.set_buffer(&snapshot.text);
                                false
                            }
                            None => false,
                        }
                    }
                }
                None => self.restore_search_origin(),
            }
        } else {
            self.history.move_to_end();
            self.restore_search_origin()
        }
    }

    // Fall back to the line the search started from.
    fn restore_search_origin(&mut self) -> bool {
        self.history.move_to_end();
        match self.history_buffer.clone() {
            Some(snapshot) if self.buf.to_string() != snapshot.text => {
                self.set_buffer(&snapshot.text);
                self.history_buffer = None;
                true
            }
            _ => false,
        }
    }

    //
    // Incremental search
    //

    pub(crate) fn history_incremental_search_forward(&mut self) -> bool {
        self.do_search_history(false)
    }

    pub(crate) fn history_incremental_search_backward(&mut self) -> bool {
        self.do_search_history(true)
    }

    fn do_search_history(&mut self, backward: bool) -> bool {
        let original = self.buf.copy();
        let previous_term = self.search_term.clone().unwrap_or_default();
        let mut backward = backward;
        let mut term = self.buf.to_string();
        self.search_term = Some(term.clone());

        if !term.is_empty() {
            self.search_index = if backward {
                self.history
                    .search_backwards(&term, self.history.index(), false)
            } else {
                self.search_forwards_skipping(&term, self.history.index())
            };
            if self.search_index.is_none() {
                self.beep();
            }
            let matched = self.matched_entry();
            self.print_search_status(&term, &matched, backward);
        } else {
            self.search_index = None;
            self.print_search_status("", "", backward);
        }
        let _ = self.redisplay_flush(true);

        let mut terminators = KeyMap::new();
        for c in self
            .get_string(SEARCH_TERMINATORS, DEFAULT_SEARCH_TERMINATORS)
            .chars()
        {
            terminators.bind(widgets::ACCEPT_LINE, &c.to_string());
        }

        let result = loop {
            let name = match self.read_binding_from(None, Some(&terminators)) {
                Ok(BindingEvent::Binding(Binding::Reference(name))) => name,
                Ok(BindingEvent::Binding(Binding::Macro(_))) => continue,
                Ok(BindingEvent::Signal(signal)) => {
                    self.stash_signal(signal);
                    break true;
                }
                _ => break true,
            };
            match name.as_str() {
                widgets::SEND_BREAK => {
                    self.buf.restore(&original);
                    break true;
                }
                widgets::HISTORY_INCREMENTAL_SEARCH_BACKWARD => {
                    backward = true;
                    if term.is_empty() {
                        term.push_str(&previous_term);
                    }
                    if let Some(index) = self.search_index {
                        if index > 0 {
                            self.search_index =
                                self.history.search_backwards(&term, index, false);
                        }
                    }
                }
                widgets::HISTORY_INCREMENTAL_SEARCH_FORWARD => {
                    backward = false;
                    if term.is_empty() {
                        term.push_str(&previous_term);
                    }
                    if let Some(index) = self.search_index {
                        if index + 1 < self.history.size() {
                            self.search_index = self.search_forwards_skipping(&term, index);
                        }
                    }
                }
                widgets::BACKWARD_DELETE_CHAR => {
                    if !term.is_empty() {
                        term.pop();
                        self.search_index = if backward {
                            self.history
                                .search_backwards(&term, self.history.index(), false)
                        } else {
                            self.history
                                .search_forwards(&term, self.history.index(), false)
                        };
                    }
                }
                widgets::SELF_INSERT => {
                    term.push_str(&self.last_binding().to_string());
                    self.search_index = if backward {
                        self.history
                            .search_backwards(&term, self.history.index(), false)
                    } else {
                        self.history
                            .search_forwards(&term, self.history.index(), false)
                    };
                }
                _ => {
                    // Any other binding accepts the match and is
                    // re-dispatched by the main loop.
                    if let Some(index) = self.search_index {
                        self.history.move_to(index);
                    }
                    self.push_back_binding(false);
                    break true;
                }
            }
            self.search_term = Some(term.clone());

            if term.is_empty() {
                self.print_search_status("", "", backward);
                self.search_index = None;
            } else if self.search_index.is_none() {
                self.beep();
                self.print_search_status(&term, "", backward);
            } else {
                let matched = self.matched_entry();
                self.print_search_status(&term, &matched, backward);
            }
            let _ = self.redisplay_flush(true);
        };
        self.search_term = None;
        self.search_index = None;
        self.post = None;
        result
    }

    fn matched_entry(&self) -> String {
        self.search_index
            .and_then(|i| self.history.get(i))
            .unwrap_or("")
            .to_string()
    }

    // Forward search starting just past the current match.
    fn search_forwards_skipping(&self, term: &str, start: usize) -> Option<usize> {
        let mut start = start.min(self.history.size().saturating_sub(1));
        if self.search_index.is_some() {
            start += 1;
        }
        self.history.search_forwards(term, start, false)
    }

    fn print_search_status(&mut self, term: &str, matched: &str, backward: bool) {
        let label = if backward { "bck-i-search" } else { "i-search" };
        self.post = Some(format!("{label}: {term}_"));
        self.set_buffer(matched);
        let cursor = matched
            .find(term)
            .map(|at| matched[..at].chars().count())
            .unwrap_or(0);
        self.buf.set_cursor(cursor);
    }

    //
    // Vi string search ("/" and "?")
    //

    pub(crate) fn vi_history_search_forward(&mut self) -> bool {
        self.search_dir = 1;
        self.search_index = Some(0);
        self.get_vi_search_string() && self.vi_repeat_search()
    }

    pub(crate) fn vi_history_search_backward(&mut self) -> bool {
        self.search_dir = -1;
        self.search_index = self.history.size().checked_sub(1);
        self.get_vi_search_string() && self.vi_repeat_search()
    }

    pub(crate) fn vi_repeat_search(&mut self) -> bool {
        if self.search_dir == 0 {
            return false;
        }
        let start = self.search_index.unwrap_or(0);
        let found = if self.search_dir < 0 {
            self.history
                .search_backwards(&self.search_string, start, false)
        } else {
            self.search_forwards_skipping(&self.search_string.clone(), start)
        };
        match found {
            Some(index) if index != self.history.index() => {
                self.search_index = Some(index);
                // Show the match.
                self.buf.clear();
                self.history.move_to(index);
                let entry = self.history.current().to_string();
                self.buf.write(&entry);
                if self.is_in_vi_cmd_mode() {
                    self.buf.move_cursor(-1);
                }
                true
            }
            _ => false,
        }
    }

    pub(crate) fn vi_rev_repeat_search(&mut self) -> bool {
        self.search_dir = -self.search_dir;
        let ret = self.vi_repeat_search();
        self.search_dir = -self.search_dir;
        ret
    }

    // Read the search pattern for "/" or "?" into a mini-buffer shown
    // in the post area.
    fn get_vi_search_string(&mut self) -> bool {
        if self.search_dir == 0 {
            return false;
        }
        let search_prompt = if self.search_dir < 0 { '?' } else { '/' };
        let mut search_buffer = Buffer::new();
        loop {
            self.post = Some(format!("{search_prompt}{search_buffer}_"));
            let _ = self.redisplay_flush(true);
            let name = match self.read_vi_search_binding() {
                Ok(BindingEvent::Binding(Binding::Reference(name))) => name,
                Ok(BindingEvent::Signal(signal)) => {
                    self.stash_signal(signal);
                    self.post = None;
                    return false;
                }
                Ok(BindingEvent::Binding(Binding::Macro(_))) => continue,
                _ => {
                    self.post = None;
                    return false;
                }
            };
            match name.as_str() {
                widgets::SEND_BREAK => {
                    self.post = None;
                    return false;
                }
                widgets::ACCEPT_LINE | widgets::VI_CMD_MODE => {
                    self.search_string = search_buffer.to_string();
                    self.post = None;
                    return true;
                }
                widgets::MAGIC_SPACE => {
                    search_buffer.write(" ");
                }
                widgets::REDISPLAY => {
                    let _ = self.redisplay_flush(true);
                }
                widgets::CLEAR_SCREEN => {
                    self.clear_screen();
                }
                widgets::SELF_INSERT => {
                    search_buffer.write(&self.last_binding().to_string());
                }
                widgets::SELF_INSERT_UNMETA => {
                    if let Some(stripped) = self.last_binding().strip_prefix('\x1b') {
                        let s = if stripped == "\r" { "\n" } else { stripped };
                        search_buffer.write(&s.to_string());
                    }
                }
                widgets::BACKWARD_DELETE_CHAR | widgets::VI_BACKWARD_DELETE_CHAR => {
                    if search_buffer.length() > 0 {
                        search_buffer.backspace(1);
                    }
                }
                widgets::BACKWARD_KILL_WORD | widgets::VI_BACKWARD_KILL_WORD => {
                    if search_buffer.length() > 0
                        && !Self::is_whitespace(search_buffer.prev_char())
                    {
                        search_buffer.backspace(1);
                    }
                    if search_buffer.length() > 0 && Self::is_whitespace(search_buffer.prev_char())
                    {
                        search_buffer.backspace(1);
                    }
                }
                widgets::QUOTED_INSERT | widgets::VI_QUOTED_INSERT => match self.read_raw_char() {
                    Some(c) => search_buffer.write(&c.to_string()),
                    None => {
                        self.beep();
                    }
                },
                _ => {
                    self.beep();
                }
            }
        }
    }

    // The search mini-buffer always reads with the main map so plain
    // typing works in vicmd mode too.
    fn read_vi_search_binding(&mut self) -> io::Result<BindingEvent> {
        let timeout = std::time::Duration::from_millis(
            self.get_u64(AMBIGUOUS_BINDING, DEFAULT_AMBIGUOUS_BINDING),
        );
        let primary = self
            .keymaps
            .get(MAIN)
            .or_else(|| self.keymaps.get(SAFE))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no search key map"))?;
        self.binding_reader
            .read_binding(&mut self.term, primary, None, timeout)
    }
}

#[cfg(test)]
#[path = "hist_tests.rs"]
mod tests;
