//! Line reader
//! The dispatcher: blocking read loop, widget invocation and redisplay
//!
//! ## reader/ Invariants
//!
//! - All buffer mutations happen on the calling thread, between two
//!   redisplays.
//! - The pre-widget snapshot is committed to undo only when a widget
//!   actually changed the buffer and was not itself undo/redo.
//! - Raw mode and keypad application mode are released on every exit
//!   path, and history is parked at its end.

pub mod binding_reader;
pub mod complete;
pub mod edit;
pub mod hist;
pub mod vi;
pub mod widgets;

use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

use tracing::debug;

use crate::buffer::{Buffer, Snapshot};
use crate::completer::Completer;
use crate::display::Display;
use crate::error::ReadlineError;
use crate::highlighter::{DefaultHighlighter, Highlighter};
use crate::history::{History, MemoryHistory};
use crate::keymap::{defaults, Binding, KeyMap, MAIN, VICMD, VISUAL};
use crate::killring::KillRing;
use crate::options::*;
use crate::parser::{DefaultParser, ParseError, ParsedLine, Parser};
use crate::reader::binding_reader::{BindingEvent, BindingReader};
use crate::reader::widgets::Widget;
use crate::term::{ansi, Capability, Event, Signal, Size, Terminal};
use crate::undo::UndoTree;

pub(crate) const TAB_WIDTH: usize = 4;
/// Mask character that hides input entirely.
pub const NULL_MASK: char = '\0';
const SECONDARY_PROMPT: &str = "> ";

/// States in which the current read-line operation may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// The user is just typing away.
    Normal,
    /// The loop should exit and return the buffer content.
    Done,
    /// The loop should exit with an end-of-file failure.
    Eof,
    /// The loop should exit with a user-interrupt failure.
    Interrupt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViMoveMode {
    Normal,
    Yank,
    Delete,
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RegionType {
    None,
    Char,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BellType {
    None,
    Audible,
    Visible,
}

/// A readline-style line editor over a terminal backend.
pub struct LineReader<T: Terminal> {
    pub(crate) term: T,
    app_name: String,
    pub(crate) keymaps: HashMap<String, KeyMap>,

    // Configuration
    variables: HashMap<String, String>,
    options: HashMap<ReaderOption, bool>,
    pub(crate) history: Box<dyn History>,
    pub(crate) completer: Option<Box<dyn Completer<T>>>,
    highlighter: Box<dyn Highlighter<T>>,
    pub(crate) parser: Box<dyn Parser>,

    // State
    pub(crate) buf: Buffer,
    pub(crate) size: Size,
    pub(crate) prompt: String,
    right_prompt: String,
    mask: Option<char>,

    pub(crate) modified_history: HashMap<usize, String>,
    pub(crate) history_buffer: Option<Snapshot>,
    pub(crate) search_prefix: Option<String>,
    pub(crate) search_term: Option<String>,
    pub(crate) search_index: Option<usize>,

    pub(crate) binding_reader: BindingReader,

    // Vi character find state
    pub(crate) find_char: Option<char>,
    pub(crate) find_dir: isize,
    pub(crate) find_tail_add: isize,
    // Vi history string search state
    pub(crate) search_dir: isize,
    pub(crate) search_string: String,

    // Region state
    pub(crate) region_mark: usize,
    pub(crate) region_active: RegionType,
    pub(crate) force_char: bool,
    pub(crate) force_line: bool,

    pub(crate) yank_buffer: String,
    pub(crate) vi_move_mode: ViMoveMode,
    pub(crate) kill_ring: KillRing,

    pub(crate) undo: UndoTree,
    pub(crate) is_undo: bool,

    pub(crate) state: State,
    reading: bool,

    pub(crate) post: Option<String>,

    builtin_widgets: HashMap<String, Widget<T>>,
    widgets: HashMap<String, Widget<T>>,

    pub(crate) count: i64,
    pub(crate) mult: i64,
    pub(crate) universal: i64,
    pub(crate) repeat_count: i64,
    pub(crate) is_arg_digit: bool,

    pub(crate) parsed_line: Option<ParsedLine>,

    pub(crate) skip_redisplay: bool,
    pub(crate) display: Display,

    pub(crate) over_typing: bool,

    pub(crate) keymap: String,

    pending_signals: VecDeque<Signal>,
}

impl<T: Terminal> LineReader<T> {
    pub fn new(term: T) -> Self {
        Self::with_app_name(term, "riftline")
    }

    pub fn with_app_name(term: T, app_name: impl Into<String>) -> Self {
        let attrs = term.attributes();
        let size = term.size().unwrap_or(Size { rows: 24, cols: 80 });
        let builtin_widgets = widgets::builtin_widgets();
        let widgets = builtin_widgets.clone();
        Self {
            term,
            app_name: app_name.into(),
            keymaps: defaults::default_keymaps(attrs, ReaderOption::BindTtySpecialChars.default_value()),
            variables: HashMap::new(),
            options: HashMap::new(),
            history: Box::new(MemoryHistory::new()),
            completer: None,
            highlighter: Box::new(DefaultHighlighter),
            parser: Box::new(DefaultParser::new()),
            buf: Buffer::new(),
            size,
            prompt: String::new(),
            right_prompt: String::new(),
            mask: None,
            modified_history: HashMap::new(),
            history_buffer: None,
            search_prefix: None,
            search_term: None,
            search_index: None,
            binding_reader: BindingReader::new(Binding::reference(widgets::SELF_INSERT)),
            find_char: None,
            find_dir: 0,
            find_tail_add: 0,
            search_dir: 0,
            search_string: String::new(),
            region_mark: 0,
            region_active: RegionType::None,
            force_char: false,
            force_line: false,
            yank_buffer: String::new(),
            vi_move_mode: ViMoveMode::Normal,
            kill_ring: KillRing::new(),
            undo: UndoTree::new(),
            is_undo: false,
            state: State::Normal,
            reading: false,
            post: None,
            builtin_widgets,
            widgets,
            count: 1,
            mult: 1,
            universal: 4,
            repeat_count: 0,
            is_arg_digit: false,
            parsed_line: None,
            skip_redisplay: false,
            display: Display::new(size.rows as usize, size.cols as usize),
            over_typing: false,
            keymap: MAIN.to_string(),
            pending_signals: VecDeque::new(),
        }
    }

    //
    // Accessors
    //

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buf
    }

    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    pub fn set_history(&mut self, history: Box<dyn History>) {
        self.history = history;
    }

    pub fn set_completer(&mut self, completer: Box<dyn Completer<T>>) {
        self.completer = Some(completer);
    }

    pub fn set_highlighter(&mut self, highlighter: Box<dyn Highlighter<T>>) {
        self.highlighter = highlighter;
    }

    pub fn set_parser(&mut self, parser: Box<dyn Parser>) {
        self.parser = parser;
    }

    pub fn keymaps(&mut self) -> &mut HashMap<String, KeyMap> {
        &mut self.keymaps
    }

    /// The parse of the accepted line, available after `read_line`.
    pub fn parsed_line(&self) -> Option<&ParsedLine> {
        self.parsed_line.as_ref()
    }

    /// The live incremental-search term, if a search is in progress.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// The key sequence that invoked the current widget.
    pub fn last_binding(&self) -> &str {
        self.binding_reader.last_binding()
    }

    /// Replay a key sequence into the input stream.
    pub fn run_macro(&mut self, keys: &str) {
        self.binding_reader.run_macro(keys);
    }

    /// Register or replace a named widget.
    pub fn register_widget(
        &mut self,
        name: impl Into<String>,
        widget: std::sync::Arc<dyn Fn(&mut LineReader<T>) -> bool>,
    ) {
        self.widgets.insert(name.into(), Widget::User(widget));
    }

    /// The read-only builtin widget set.
    pub fn builtin_widget_names(&self) -> impl Iterator<Item = &str> {
        self.builtin_widgets.keys().map(String::as_str)
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    pub fn set_opt(&mut self, option: ReaderOption) {
        self.options.insert(option, true);
    }

    pub fn unset_opt(&mut self, option: ReaderOption) {
        self.options.insert(option, false);
    }

    pub fn is_set(&self, option: ReaderOption) -> bool {
        self.options
            .get(&option)
            .copied()
            .unwrap_or_else(|| option.default_value())
    }

    /// Switch the active key map by name. False if unknown.
    pub fn set_keymap(&mut self, name: &str) -> bool {
        if !self.keymaps.contains_key(name) {
            return false;
        }
        self.keymap = name.to_string();
        if self.reading {
            self.call_widget(widgets::CALLBACK_KEYMAP);
        }
        true
    }

    pub fn keymap_name(&self) -> &str {
        &self.keymap
    }

    pub fn is_keymap(&self, name: &str) -> bool {
        self.keymap == name
    }

    //
    // Variable helpers (lenient parsing)
    //

    pub(crate) fn get_string(&self, name: &str, def: &str) -> String {
        self.variables
            .get(name)
            .cloned()
            .unwrap_or_else(|| def.to_string())
    }

    pub(crate) fn get_int(&self, name: &str, def: i64) -> i64 {
        self.variables
            .get(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(def)
    }

    pub(crate) fn get_u64(&self, name: &str, def: u64) -> u64 {
        self.variables
            .get(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(def)
    }

    pub(crate) fn get_bool(&self, name: &str, def: bool) -> bool {
        match self.variables.get(name) {
            Some(v) => {
                v.is_empty() || v.eq_ignore_ascii_case("on") || v == "1" || v.eq_ignore_ascii_case("true")
            }
            None => def,
        }
    }

    //
    // Line reading
    //

    /// Read a line with a prompt and no mask.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, ReadlineError> {
        self.read_line_with(Some(prompt), None, None, None)
    }

    /// Read a line, full form.
    ///
    /// With a mask of [`NULL_MASK`] nothing is echoed; any other mask
    /// character replaces each typed character on screen. `buffer`
    /// pre-fills the line.
    pub fn read_line_with(
        &mut self,
        prompt: Option<&str>,
        right_prompt: Option<&str>,
        mask: Option<char>,
        buffer: Option<&str>,
    ) -> Result<String, ReadlineError> {
        if self.reading {
            return Err(ReadlineError::InvalidState("read_line is not re-entrant"));
        }
        self.reading = true;
        let original_attrs = self.term.enter_raw_mode();
        let result = match original_attrs {
            Ok(attrs) => {
                let r = self.do_read_line(prompt, right_prompt, mask, buffer, attrs);
                self.cleanup();
                let _ = self.term.set_attributes(attrs);
                r
            }
            Err(e) => Err(e.into()),
        };
        self.reading = false;
        result
    }

    fn do_read_line(
        &mut self,
        prompt: Option<&str>,
        right_prompt: Option<&str>,
        mask: Option<char>,
        buffer: Option<&str>,
        original_attrs: crate::term::Attributes,
    ) -> Result<String, ReadlineError> {
        self.mask = mask;
        self.repeat_count = 0;
        self.mult = 1;
        self.universal = 4;
        self.region_active = RegionType::None;
        self.region_mark = 0;
        self.state = State::Normal;
        self.modified_history.clear();
        self.history_buffer = None;
        self.search_prefix = None;
        self.search_term = None;
        self.search_index = None;
        self.post = None;
        self.over_typing = false;
        self.pending_signals.clear();

        self.size = self.term.size()?;
        if self.size.cols == 0 || self.size.rows == 0 {
            return Err(ReadlineError::InvalidState("invalid terminal size"));
        }
        self.display = Display::new(self.size.rows as usize, self.size.cols as usize);
        self.display.set_tab_width(TAB_WIDTH);

        self.term.puts(Capability::KeypadXmit);
        self.term.puts(Capability::CarriageReturn);

        self.prompt = prompt.unwrap_or("").to_string();
        self.right_prompt = right_prompt.unwrap_or("").to_string();
        self.buf.clear();
        if let Some(initial) = buffer {
            self.buf.write(initial);
        }
        self.undo.clear();
        self.parsed_line = None;
        self.keymaps.entry(MAIN.to_string()).or_default();
        self.keymap = MAIN.to_string();

        self.call_widget(widgets::CALLBACK_INIT);

        self.undo.new_state(self.buf.copy());

        self.redraw_line();
        let _ = self.redisplay_flush(true);

        loop {
            while let Some(signal) = self.pending_signals.pop_front() {
                self.handle_signal(signal)?;
            }

            let use_visual = self.is_in_vi_cmd_mode() && self.region_active != RegionType::None;
            let binding = match self.read_binding_from(use_visual.then_some(VISUAL), None)? {
                BindingEvent::Binding(b) => b,
                BindingEvent::Signal(signal) => {
                    self.handle_signal(signal)?;
                    continue;
                }
                BindingEvent::Eof => return Err(ReadlineError::Eof),
            };

            if self.buf.length() == 0
                && self
                    .last_binding()
                    .chars()
                    .next()
                    .is_some_and(|c| c == original_attrs.veof)
            {
                return Err(ReadlineError::Eof);
            }

            // If this is still false after the widget ran, the repeat
            // count is reset below.
            self.is_arg_digit = false;
            self.count = (if self.repeat_count == 0 { 1 } else { self.repeat_count }) * self.mult;
            self.is_undo = false;

            let copy = self.buf.copy();
            let widget = self.get_widget(&binding);
            let ok = match widget {
                Some(w) => w.apply(self),
                None => false,
            };
            if !ok {
                self.beep();
            }
            if !self.is_undo && copy.text != self.buf.to_string() {
                self.undo.new_state(self.buf.copy());
            }

            match self.state {
                State::Done => return Ok(self.finish_buffer()),
                State::Eof => return Err(ReadlineError::Eof),
                State::Interrupt => {
                    return Err(ReadlineError::Interrupted(self.buf.to_string()))
                }
                State::Normal => {}
            }

            if !self.is_arg_digit {
                self.repeat_count = 0;
                self.mult = 1;
            }

            let _ = self.redisplay_flush(true);
        }
    }

    fn cleanup(&mut self) {
        self.buf.set_cursor(self.buf.length());
        self.post = None;
        if self.size.cols > 0 && self.size.rows > 0 {
            let _ = self.redisplay_flush(false);
            self.println();
            self.term.puts(Capability::KeypadLocal);
            let _ = self.term.flush();
        }
        self.history.move_to_end();
        self.state = State::Normal;
    }

    /// Invoke a named widget by hand. A leading `.` selects the builtin
    /// even when the name was rebound.
    pub fn call_widget(&mut self, name: &str) {
        let widget = if let Some(stripped) = name.strip_prefix('.') {
            self.builtin_widgets.get(stripped).cloned()
        } else {
            self.widgets.get(name).cloned()
        };
        if let Some(w) = widget {
            if !w.apply(self) {
                debug!(widget = name, "widget reported failure");
            }
        }
    }

    //
    // Binding resolution
    //

    /// Read the next binding using the active key map, optionally
    /// overlaid with a named local map or an ad-hoc one.
    pub(crate) fn read_binding_from(
        &mut self,
        local_name: Option<&str>,
        extra_local: Option<&KeyMap>,
    ) -> io::Result<BindingEvent> {
        let timeout = Duration::from_millis(
            self.get_u64(AMBIGUOUS_BINDING, DEFAULT_AMBIGUOUS_BINDING),
        );
        let primary = self
            .keymaps
            .get(self.keymap.as_str())
            .or_else(|| self.keymaps.get(MAIN))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no active key map"))?;
        let local = extra_local.or_else(|| local_name.and_then(|n| self.keymaps.get(n)));
        let event = self
            .binding_reader
            .read_binding(&mut self.term, primary, local, timeout)?;

        // The kill ring keeps record of whether the previous command
        // was a yank or a kill; reset that state here if needed.
        if let BindingEvent::Binding(Binding::Reference(name)) = &event {
            if name != widgets::YANK_POP && name != widgets::YANK {
                self.kill_ring.reset_last_yank();
            }
            if name != widgets::KILL_LINE
                && name != widgets::KILL_WHOLE_LINE
                && name != widgets::BACKWARD_KILL_WORD
                && name != widgets::KILL_WORD
            {
                self.kill_ring.reset_last_kill();
            }
        }
        Ok(event)
    }

    /// Read the next binding against the active map (widget helper).
    pub(crate) fn read_binding_event(&mut self) -> io::Result<BindingEvent> {
        self.read_binding_from(None, None)
    }

    /// Read one raw character; signals are stashed for the main loop.
    pub(crate) fn read_raw_char(&mut self) -> Option<char> {
        loop {
            match self.binding_reader.read_character(&mut self.term) {
                Ok(Event::Char(c)) => return Some(c),
                Ok(Event::Signal(signal)) => {
                    self.pending_signals.push_back(signal);
                    if signal == Signal::Int {
                        return None;
                    }
                }
                Ok(Event::Closed) => return None,
                Err(_) => return None,
            }
        }
    }

    /// Defer a signal caught inside a widget to the main loop.
    pub(crate) fn stash_signal(&mut self, signal: Signal) {
        self.pending_signals.push_back(signal);
    }

    /// Peek the next character with a timeout in milliseconds.
    pub(crate) fn peek_character(&mut self, timeout_ms: u64) -> Option<char> {
        self.binding_reader
            .peek_character(&mut self.term, Duration::from_millis(timeout_ms))
            .ok()
            .flatten()
    }

    fn get_widget(&mut self, binding: &Binding) -> Option<Widget<T>> {
        match binding {
            Binding::Reference(name) => {
                let w = self.widgets.get(name).cloned();
                if w.is_none() {
                    self.post = Some(format!("No such widget `{name}'"));
                }
                w
            }
            Binding::Macro(keys) => {
                self.binding_reader.run_macro(keys);
                Some(Widget::Builtin(|_| true))
            }
        }
    }

    /// Push the last consumed key sequence back into the input stream.
    pub(crate) fn push_back_binding(&mut self, skip_redisplay: bool) {
        let keys = self.last_binding().to_string();
        if !keys.is_empty() {
            self.binding_reader.run_macro(&keys);
            self.skip_redisplay = skip_redisplay;
        }
    }

    fn handle_signal(&mut self, signal: Signal) -> Result<(), ReadlineError> {
        match signal {
            Signal::Int => Err(ReadlineError::Interrupted(self.buf.to_string())),
            Signal::Winch(size) => {
                self.size = size;
                self.display.resize(size.rows as usize, size.cols as usize);
                let _ = self.redisplay_flush(true);
                Ok(())
            }
            Signal::Cont => {
                let _ = self.term.enter_raw_mode();
                if let Ok(size) = self.term.size() {
                    self.size = size;
                    self.display.resize(size.rows as usize, size.cols as usize);
                }
                self.term.puts(Capability::KeypadXmit);
                self.redraw_line();
                let _ = self.redisplay_flush(true);
                Ok(())
            }
        }
    }

    //
    // Finishing
    //

    /// Clear the buffer and add its contents to the history.
    pub(crate) fn finish_buffer(&mut self) -> String {
        let raw = self.buf.to_string();
        let mut line = raw.clone();

        if !self.is_set(ReaderOption::DisableEventExpansion) {
            let mut out = String::with_capacity(line.len());
            let mut escaped = false;
            for c in line.chars() {
                if escaped {
                    escaped = false;
                    out.push(c);
                } else if c == '\\' {
                    escaped = true;
                } else {
                    out.push(c);
                }
            }
            line = out;
        }

        // Empty lines and masked (password) input stay out of history.
        if !line.is_empty()
            && self.mask.is_none()
            && !self.is_set(ReaderOption::DisableHistory)
        {
            self.history.add(&raw);
        }
        line
    }

    //
    // Helper predicates
    //

    pub(crate) fn is_in_vi_move_operation(&self) -> bool {
        self.vi_move_mode != ViMoveMode::Normal
    }

    pub(crate) fn is_in_vi_change_operation(&self) -> bool {
        self.vi_move_mode == ViMoveMode::Change
    }

    pub(crate) fn is_in_vi_cmd_mode(&self) -> bool {
        self.keymap == VICMD
    }

    pub(crate) fn is_word(&self, c: char) -> bool {
        let wordchars = self.get_string(WORDCHARS, DEFAULT_WORDCHARS);
        c.is_alphanumeric() || (c.is_ascii() && wordchars.contains(c))
    }

    pub(crate) fn is_vi_alpha_num(c: char) -> bool {
        c == '_' || c.is_alphanumeric()
    }

    pub(crate) fn is_whitespace(c: char) -> bool {
        c.is_whitespace()
    }

    pub(crate) fn switch_case(c: char) -> char {
        if c.is_uppercase() {
            c.to_lowercase().next().unwrap_or(c)
        } else if c.is_lowercase() {
            c.to_uppercase().next().unwrap_or(c)
        } else {
            c
        }
    }

    // Run a widget with the count negated.
    pub(crate) fn call_neg(&mut self, widget: fn(&mut Self) -> bool) -> bool {
        self.count = -self.count;
        let ret = widget(self);
        self.count = -self.count;
        ret
    }

    //
    // Output
    //

    /// Ring the bell according to `BELL_STYLE`.
    pub(crate) fn beep(&mut self) -> bool {
        let style = self.get_string(BELL_STYLE, DEFAULT_BELL_STYLE).to_lowercase();
        let preference = match style.as_str() {
            "none" | "off" => BellType::None,
            "visible" => BellType::Visible,
            "on" => {
                if self.is_set(ReaderOption::PreferVisibleBell) {
                    BellType::Visible
                } else {
                    BellType::Audible
                }
            }
            _ => BellType::Audible,
        };
        match preference {
            BellType::Visible => {
                if self.term.puts(Capability::FlashScreen) || self.term.puts(Capability::Bell) {
                    let _ = self.term.flush();
                }
            }
            BellType::Audible => {
                if self.term.puts(Capability::Bell) {
                    let _ = self.term.flush();
                }
            }
            BellType::None => {}
        }
        true
    }

    pub(crate) fn print(&mut self, s: &str) {
        let _ = self.term.write(s);
    }

    pub(crate) fn println(&mut self) {
        self.term.puts(Capability::CarriageReturn);
        self.print("\n");
        self.redraw_line();
    }

    pub(crate) fn println_str(&mut self, s: &str) {
        self.print(s);
        self.println();
    }

    /// Forget the drawn frame; the next redisplay redraws fully.
    pub(crate) fn redraw_line(&mut self) {
        self.display.reset();
    }

    /// Write to the buffer at the cursor, honoring overtype mode.
    pub fn put_string(&mut self, s: &str) {
        self.buf.write_over(s, self.over_typing);
    }

    //
    // Redisplay
    //

    pub(crate) fn redisplay(&mut self) -> bool {
        self.redisplay_flush(true).is_ok()
    }

    pub(crate) fn redisplay_flush(&mut self, flush: bool) -> io::Result<()> {
        if self.skip_redisplay {
            self.skip_redisplay = false;
            return Ok(());
        }

        let buffer = self.visible_buffer(&self.buf.to_string());
        let mut secondary_prompts: Vec<String> = Vec::new();
        let full = self.insert_secondary_prompts(&buffer, &mut secondary_prompts, true);

        let mut logical = String::with_capacity(self.prompt.len() + full.len());
        logical.push_str(&self.prompt);
        logical.push_str(&full);
        if let Some(post) = &self.post {
            logical.push('\n');
            logical.push_str(post);
        }
        let mut new_lines = self.display.wrap(&logical);

        if !self.right_prompt.is_empty() {
            let right_lines = self.display.wrap(&self.right_prompt);
            while new_lines.len() < right_lines.len() {
                new_lines.push(String::new());
            }
            for (i, rp) in right_lines.iter().enumerate() {
                new_lines[i] = self.add_right_prompt(rp, &new_lines[i]);
            }
        }

        let visible_to_cursor = self.visible_buffer(&self.buf.up_to_cursor());
        let to_cursor =
            self.insert_secondary_prompts(&visible_to_cursor, &mut secondary_prompts, false);
        let mut with_prompt = String::with_capacity(self.prompt.len() + to_cursor.len());
        with_prompt.push_str(&self.prompt);
        with_prompt.push_str(&to_cursor);
        let prompt_lines = self.display.wrap(&with_prompt);
        let cursor_pos = prompt_lines.last().map(|last| {
            (prompt_lines.len() - 1) * self.display.columns() + ansi::display_width(last)
        });

        self.display.update(&mut self.term, new_lines, cursor_pos)?;
        if flush {
            self.term.flush()?;
        }
        Ok(())
    }

    // The buffer as shown: masked, or highlighted when unmasked.
    fn visible_buffer(&self, raw: &str) -> String {
        match self.mask {
            Some(NULL_MASK) => String::new(),
            Some(mask) => std::iter::repeat(mask).take(raw.chars().count()).collect(),
            None => self.highlighter.highlight(self, raw),
        }
    }

    // Insert a continuation prompt after every newline of `text`. With
    // `compute` the prompts are derived from the parser's missing-closer
    // hint (and recorded); otherwise the recorded ones are reused.
    pub(crate) fn insert_secondary_prompts(
        &self,
        text: &str,
        prompts: &mut Vec<String>,
        compute: bool,
    ) -> String {
        let stripped = ansi::strip(text);
        let stripped_lines: Vec<&str> = stripped.split('\n').collect();
        let ansi_lines: Vec<&str> = split_keeping_ansi(text);
        let mut sb = String::with_capacity(text.len());
        let mut accumulated = String::new();
        for (line, ansi_line) in ansi_lines.iter().enumerate() {
            if line > 0 {
                let prompt = if compute {
                    let p = self.continuation_prompt(&accumulated);
                    prompts.push(p.clone());
                    p
                } else {
                    prompts
                        .get(line - 1)
                        .cloned()
                        .unwrap_or_else(|| SECONDARY_PROMPT.to_string())
                };
                sb.push_str(&prompt);
            }
            sb.push_str(ansi_line);
            if line < stripped_lines.len() {
                accumulated.push_str(stripped_lines[line]);
            }
            if line + 1 < ansi_lines.len() {
                sb.push('\n');
                accumulated.push('\n');
            }
        }
        if compute && self.is_set(ReaderOption::PadPrompts) && prompts.len() >= 2 {
            pad_prompts(prompts);
            // Re-assemble with the padded prompts.
            let mut out = String::with_capacity(text.len());
            for (line, ansi_line) in ansi_lines.iter().enumerate() {
                if line > 0 {
                    out.push_str(&prompts[line - 1]);
                }
                out.push_str(ansi_line);
                if line + 1 < ansi_lines.len() {
                    out.push('\n');
                }
            }
            return out;
        }
        sb
    }

    fn continuation_prompt(&self, accumulated: &str) -> String {
        match self.parser.parse(accumulated, accumulated.chars().count()) {
            Err(ParseError::Eof { missing }) => format!("{missing}{SECONDARY_PROMPT}"),
            _ => SECONDARY_PROMPT.to_string(),
        }
    }

    // Right-align the right prompt on a row, dropping it if it would
    // overlap the content.
    fn add_right_prompt(&self, prompt: &str, line: &str) -> String {
        let width = ansi::display_width(prompt);
        let cols = self.display.columns();
        let line_width = ansi::display_width(line);
        if width + line_width + 3 <= cols {
            let pad = cols - width - line_width - 3;
            let mut out = String::with_capacity(line.len() + prompt.len() + pad + 2);
            out.push_str(line);
            for _ in 0..pad + 2 {
                out.push(' ');
            }
            out.push_str(prompt);
            out
        } else {
            line.to_string()
        }
    }
}

// Split on newlines without touching escape sequences (escapes never
// contain a literal newline).
fn split_keeping_ansi(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

// Right-pad all secondary prompts to the widest one, keeping the
// trailing "> " marker aligned.
fn pad_prompts(prompts: &mut [String]) {
    let max = prompts
        .iter()
        .map(|p| p.chars().count())
        .max()
        .unwrap_or(0);
    for prompt in prompts.iter_mut() {
        let len = prompt.chars().count();
        if len < max {
            let head_len = len.saturating_sub(SECONDARY_PROMPT.len());
            let head: String = prompt.chars().take(head_len).collect();
            let mut padded = head;
            while padded.chars().count() < max - SECONDARY_PROMPT.len() {
                padded.push(' ');
            }
            padded.push_str(SECONDARY_PROMPT);
            *prompt = padded;
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
