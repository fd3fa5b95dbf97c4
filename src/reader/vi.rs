//! Vi widgets
//! Modal motions, operators and edits for the vicmd / viins key maps

use crate::keymap::{Binding, EMACS, VIINS, VICMD};
use crate::reader::binding_reader::BindingEvent;
use crate::reader::widgets;
use crate::reader::{LineReader, State, ViMoveMode};
use crate::term::Terminal;

impl<T: Terminal> LineReader<T> {
    //
    // Character motion
    //

    pub(crate) fn vi_forward_char(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::vi_backward_char);
        }
        let mut lim = self.buf.find_eol() as isize;
        if self.is_in_vi_cmd_mode() && !self.is_in_vi_move_operation() {
            lim -= 1;
        }
        if self.buf.cursor() as isize >= lim {
            return false;
        }
        let mut count = self.count;
        while count > 0 && (self.buf.cursor() as isize) < lim {
            count -= 1;
            self.buf.move_cursor(1);
        }
        true
    }

    pub(crate) fn vi_backward_char(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::vi_forward_char);
        }
        let lim = self.buf.find_bol();
        if self.buf.cursor() == lim {
            return false;
        }
        let mut count = self.count;
        while count > 0 && self.buf.cursor() > 0 {
            count -= 1;
            self.buf.move_cursor(-1);
            if self.buf.curr_char() == '\n' {
                self.buf.move_cursor(1);
                break;
            }
        }
        true
    }

    //
    // Word motion
    //

    pub(crate) fn vi_forward_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            if Self::is_vi_alpha_num(self.buf.curr_char()) {
                while self.buf.cursor() < self.buf.length()
                    && Self::is_vi_alpha_num(self.buf.curr_char())
                {
                    self.buf.move_cursor(1);
                }
            } else {
                while self.buf.cursor() < self.buf.length()
                    && !Self::is_vi_alpha_num(self.buf.curr_char())
                    && !Self::is_whitespace(self.buf.curr_char())
                {
                    self.buf.move_cursor(1);
                }
            }
            if self.is_in_vi_change_operation() && count == 0 {
                return true;
            }
            let mut nl = if self.buf.curr_char() == '\n' { 1 } else { 0 };
            while self.buf.cursor() < self.buf.length()
                && nl < 2
                && Self::is_whitespace(self.buf.curr_char())
            {
                self.buf.move_cursor(1);
                nl += if self.buf.curr_char() == '\n' { 1 } else { 0 };
            }
        }
        true
    }

    pub(crate) fn vi_backward_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            let mut nl = 0;
            while self.buf.cursor() > 0 {
                self.buf.move_cursor(-1);
                if !Self::is_whitespace(self.buf.curr_char()) {
                    break;
                }
                nl += if self.buf.curr_char() == '\n' { 1 } else { 0 };
                if nl == 2 {
                    self.buf.move_cursor(1);
                    break;
                }
            }
            if self.buf.cursor() > 0 {
                if Self::is_vi_alpha_num(self.buf.curr_char()) {
                    while self.buf.cursor() > 0 {
                        if !Self::is_vi_alpha_num(self.buf.prev_char()) {
                            break;
                        }
                        self.buf.move_cursor(-1);
                    }
                } else {
                    while self.buf.cursor() > 0 {
                        if Self::is_vi_alpha_num(self.buf.prev_char())
                            || Self::is_whitespace(self.buf.prev_char())
                        {
                            break;
                        }
                        self.buf.move_cursor(-1);
                    }
                }
            }
        }
        true
    }

    pub(crate) fn vi_forward_blank_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::vi_backward_blank_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() < self.buf.length()
                && !Self::is_whitespace(self.buf.curr_char())
            {
                self.buf.move_cursor(1);
            }
            if self.is_in_vi_change_operation() && count == 0 {
                return true;
            }
            let mut nl = if self.buf.curr_char() == '\n' { 1 } else { 0 };
            while self.buf.cursor() < self.buf.length()
                && nl < 2
                && Self::is_whitespace(self.buf.curr_char())
            {
                self.buf.move_cursor(1);
                nl += if self.buf.curr_char() == '\n' { 1 } else { 0 };
            }
        }
        true
    }

    pub(crate) fn vi_backward_blank_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::vi_forward_blank_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() > 0 {
                self.buf.move_cursor(-1);
                if !Self::is_whitespace(self.buf.curr_char()) {
                    break;
                }
            }
            while self.buf.cursor() > 0 {
                self.buf.move_cursor(-1);
                if Self::is_whitespace(self.buf.curr_char()) {
                    break;
                }
            }
        }
        true
    }

    pub(crate) fn vi_forward_word_end(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() < self.buf.length() {
                if !Self::is_whitespace(self.buf.next_char()) {
                    break;
                }
                self.buf.move_cursor(1);
            }
            if self.buf.cursor() < self.buf.length() {
                if Self::is_vi_alpha_num(self.buf.next_char()) {
                    self.buf.move_cursor(1);
                    while self.buf.cursor() < self.buf.length()
                        && Self::is_vi_alpha_num(self.buf.next_char())
                    {
                        self.buf.move_cursor(1);
                    }
                } else {
                    self.buf.move_cursor(1);
                    while self.buf.cursor() < self.buf.length()
                        && !Self::is_vi_alpha_num(self.buf.next_char())
                        && !Self::is_whitespace(self.buf.next_char())
                    {
                        self.buf.move_cursor(1);
                    }
                }
            }
        }
        // In a move operation the cursor advances one past the last
        // matched character so the span consumes it.
        if self.buf.cursor() < self.buf.length() && self.is_in_vi_move_operation() {
            self.buf.move_cursor(1);
        }
        true
    }

    pub(crate) fn vi_forward_blank_word_end(&mut self) -> bool {
        if self.count < 0 {
            return false;
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() < self.buf.length() {
                self.buf.move_cursor(1);
                if !Self::is_whitespace(self.buf.curr_char()) {
                    break;
                }
            }
            while self.buf.cursor() < self.buf.length() {
                self.buf.move_cursor(1);
                if Self::is_whitespace(self.buf.curr_char()) {
                    break;
                }
            }
        }
        true
    }

    pub(crate) fn vi_backward_word_end(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::vi_forward_word_end);
        }
        let mut count = self.count;
        while count > 0 && self.buf.cursor() > 1 {
            count -= 1;
            let start = if Self::is_vi_alpha_num(self.buf.curr_char()) {
                1
            } else if !Self::is_whitespace(self.buf.curr_char()) {
                2
            } else {
                0
            };
            while self.buf.cursor() > 0 {
                let mut same = start != 1 && Self::is_whitespace(self.buf.curr_char());
                if start != 0 {
                    same |= Self::is_vi_alpha_num(self.buf.curr_char());
                }
                if same == (start == 2) {
                    break;
                }
                self.buf.move_cursor(-1);
            }
            while self.buf.cursor() > 0 && Self::is_whitespace(self.buf.curr_char()) {
                self.buf.move_cursor(-1);
            }
        }
        true
    }

    pub(crate) fn vi_backward_blank_word_end(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::vi_forward_blank_word_end);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() > 0 && !Self::is_whitespace(self.buf.curr_char()) {
                self.buf.move_cursor(-1);
            }
            while self.buf.cursor() > 0 && Self::is_whitespace(self.buf.curr_char()) {
                self.buf.move_cursor(-1);
            }
        }
        true
    }

    //
    // Line position
    //

    pub(crate) fn vi_first_non_blank(&mut self) -> bool {
        self.beginning_of_line();
        while self.buf.cursor() < self.buf.length() && Self::is_whitespace(self.buf.curr_char()) {
            self.buf.move_cursor(1);
        }
        true
    }

    pub(crate) fn vi_beginning_of_line(&mut self) -> bool {
        let bol = self.buf.find_bol();
        self.buf.set_cursor(bol);
        true
    }

    pub(crate) fn vi_end_of_line(&mut self) -> bool {
        if self.count < 0 {
            return false;
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            let eol = self.buf.find_eol();
            self.buf.set_cursor(eol + 1);
        }
        self.buf.move_cursor(-1);
        true
    }

    pub(crate) fn vi_goto_column(&mut self) -> bool {
        let bol = self.buf.find_bol();
        let eol = self.buf.find_eol();
        let column = (self.count.max(1) - 1) as usize;
        self.buf.set_cursor((bol + column).min(eol));
        true
    }

    //
    // Deletion and case
    //

    pub(crate) fn vi_backward_delete_char(&mut self) -> bool {
        for _ in 0..self.count.max(0) {
            if self.buf.backspace(1) != 1 {
                return false;
            }
        }
        true
    }

    pub(crate) fn vi_delete_char(&mut self) -> bool {
        for _ in 0..self.count.max(0) {
            if self.buf.delete(1) != 1 {
                return false;
            }
        }
        true
    }

    /// Switch the case of the character under the cursor and advance.
    pub(crate) fn vi_swap_case(&mut self) -> bool {
        for _ in 0..self.count.max(0) {
            if self.buf.cursor() >= self.buf.length() {
                return false;
            }
            let swapped = Self::switch_case(self.buf.curr_char());
            self.buf.set_curr_char(swapped);
            self.buf.move_cursor(1);
        }
        true
    }

    /// `r` followed by the replacement character.
    pub(crate) fn vi_replace_chars(&mut self) -> bool {
        let Some(c) = self.read_raw_char() else {
            return true;
        };
        // ESC or Ctrl-C aborts.
        if c == '\x1b' || c == '\x03' {
            return true;
        }
        let count = self.count.max(0);
        for i in 0..count {
            if self.buf.set_curr_char(c) {
                if i < count - 1 {
                    self.buf.move_cursor(1);
                }
            } else {
                return false;
            }
        }
        true
    }

    /// `R`: overwrite characters until escape.
    pub(crate) fn vi_replace(&mut self) -> bool {
        loop {
            let Some(c) = self.read_raw_char() else {
                return true;
            };
            match c {
                '\x1b' => return true,
                '\x7f' | '\x08' => {
                    self.buf.move_cursor(-1);
                }
                c => {
                    self.buf.write_over(&c.to_string(), true);
                }
            }
            let _ = self.redisplay_flush(true);
        }
    }

    //
    // Find char
    //

    pub(crate) fn vi_find_next_char(&mut self) -> bool {
        match self.vi_get_key() {
            Some(c) => {
                self.find_char = Some(c);
                self.find_dir = 1;
                self.find_tail_add = 0;
                self.vi_find_char(false)
            }
            None => false,
        }
    }

    pub(crate) fn vi_find_prev_char(&mut self) -> bool {
        match self.vi_get_key() {
            Some(c) => {
                self.find_char = Some(c);
                self.find_dir = -1;
                self.find_tail_add = 0;
                self.vi_find_char(false)
            }
            None => false,
        }
    }

    pub(crate) fn vi_find_next_char_skip(&mut self) -> bool {
        match self.vi_get_key() {
            Some(c) => {
                self.find_char = Some(c);
                self.find_dir = 1;
                self.find_tail_add = -1;
                self.vi_find_char(false)
            }
            None => false,
        }
    }

    pub(crate) fn vi_find_prev_char_skip(&mut self) -> bool {
        match self.vi_get_key() {
            Some(c) => {
                self.find_char = Some(c);
                self.find_dir = -1;
                self.find_tail_add = 1;
                self.vi_find_char(false)
            }
            None => false,
        }
    }

    pub(crate) fn vi_repeat_find(&mut self) -> bool {
        self.vi_find_char(true)
    }

    pub(crate) fn vi_rev_repeat_find(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(|r| r.vi_find_char(true));
        }
        self.find_tail_add = -self.find_tail_add;
        self.find_dir = -self.find_dir;
        let ret = self.vi_find_char(true);
        self.find_tail_add = -self.find_tail_add;
        self.find_dir = -self.find_dir;
        ret
    }

    // Read the target key for f/F/t/T; a key bound to send-break
    // aborts.
    fn vi_get_key(&mut self) -> Option<char> {
        let c = self.read_raw_char()?;
        if let Some(main) = self.keymaps.get(crate::keymap::MAIN) {
            if let Some(Binding::Reference(name)) = main.get_bound(&c.to_string()) {
                if name == widgets::SEND_BREAK {
                    return None;
                }
            }
        }
        Some(c)
    }

    fn vi_find_char(&mut self, repeat: bool) -> bool {
        if self.find_dir == 0 {
            return false;
        }
        if self.count < 0 {
            return self.call_neg(Self::vi_rev_repeat_find);
        }
        let Some(find_char) = self.find_char else {
            return false;
        };
        if repeat && self.find_tail_add != 0 {
            if self.find_dir > 0 {
                if self.buf.cursor() < self.buf.length() && self.buf.next_char() == find_char {
                    self.buf.move_cursor(1);
                }
            } else if self.buf.cursor() > 0 && self.buf.prev_char() == find_char {
                self.buf.move_cursor(-1);
            }
        }
        let cursor = self.buf.cursor();
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            loop {
                self.buf.move_cursor(self.find_dir);
                if !(self.buf.cursor() > 0
                    && self.buf.cursor() < self.buf.length()
                    && self.buf.curr_char() != find_char
                    && self.buf.curr_char() != '\n')
                {
                    break;
                }
            }
            if self.buf.cursor() == 0
                || self.buf.cursor() >= self.buf.length()
                || self.buf.curr_char() == '\n'
            {
                self.buf.set_cursor(cursor);
                return false;
            }
        }
        if self.find_tail_add != 0 {
            self.buf.move_cursor(self.find_tail_add);
        }
        if self.find_dir == 1 && self.is_in_vi_move_operation() {
            self.buf.move_cursor(1);
        }
        true
    }

    //
    // Bracket matching
    //

    pub(crate) fn vi_match_bracket(&mut self) -> bool {
        self.do_vi_match_bracket()
    }

    /// Vi style `%` bracket matching: walks in the direction of the
    /// bracket under the cursor, honoring nesting.
    pub(crate) fn do_vi_match_bracket(&mut self) -> bool {
        let mut pos = self.buf.cursor() as isize;
        if pos as usize == self.buf.length() {
            return false;
        }
        let bracket_type = get_bracket_type(self.buf.at_char(pos));
        if bracket_type == 0 {
            return false;
        }
        let step: isize = if bracket_type < 0 { -1 } else { 1 };
        let mut depth = 1;
        while depth > 0 {
            pos += step;
            if pos < 0 || pos as usize >= self.buf.length() {
                return false;
            }
            let cur = get_bracket_type(self.buf.at_char(pos));
            if cur == bracket_type {
                depth += 1;
            } else if cur == -bracket_type {
                depth -= 1;
            }
        }
        // Consume the matching bracket in delete-to / change-to /
        // yank-to operations.
        if step > 0 && self.is_in_vi_move_operation() {
            pos += 1;
        }
        self.buf.set_cursor(pos as usize);
        true
    }

    //
    // Operators: d / c / y
    //

    pub(crate) fn vi_delete(&mut self) -> bool {
        let cursor_start = self.buf.cursor();
        match self.read_operator_binding() {
            Some(name) => {
                let op = vi_delete_change_yank_remap(&name);
                // "dd" deletes the whole line.
                if op == widgets::VI_DELETE {
                    return self.kill_whole_line();
                }
                self.vi_move_mode = ViMoveMode::Delete;
                let applied = self.apply_named_widget(op);
                self.vi_move_mode = ViMoveMode::Normal;
                if !applied {
                    return false;
                }
                let (start, end) = self.coerce_span(cursor_start, self.buf.cursor());
                self.vi_delete_to(start, end, false)
            }
            None => false,
        }
    }

    pub(crate) fn vi_change(&mut self) -> bool {
        let cursor_start = self.buf.cursor();
        match self.read_operator_binding() {
            Some(name) => {
                let op = vi_delete_change_yank_remap(&name);
                // "cc" changes the whole line.
                let res = if op == widgets::VI_CHANGE {
                    self.kill_whole_line()
                } else {
                    self.vi_move_mode = ViMoveMode::Change;
                    let applied = self.apply_named_widget(op);
                    self.vi_move_mode = ViMoveMode::Normal;
                    if !applied {
                        return false;
                    }
                    let (start, end) = self.coerce_span(cursor_start, self.buf.cursor());
                    self.vi_delete_to(start, end, true)
                };
                self.set_keymap(VIINS);
                res
            }
            None => false,
        }
    }

    pub(crate) fn vi_yank(&mut self) -> bool {
        let cursor_start = self.buf.cursor();
        match self.read_operator_binding() {
            Some(name) => {
                let op = vi_delete_change_yank_remap(&name);
                // "yy" yanks the whole line.
                if op == widgets::VI_YANK {
                    self.yank_buffer = self.buf.to_string();
                    return true;
                }
                self.vi_move_mode = ViMoveMode::Yank;
                let applied = self.apply_named_widget(op);
                self.vi_move_mode = ViMoveMode::Normal;
                if !applied {
                    return false;
                }
                let (start, end) = self.coerce_span(cursor_start, self.buf.cursor());
                self.vi_yank_to(start, end)
            }
            None => false,
        }
    }

    // Read the binding consumed by an operator. Only widget references
    // are accepted; a macro is pushed back for the main loop, a signal
    // is stashed for it.
    fn read_operator_binding(&mut self) -> Option<String> {
        match self.read_binding_event() {
            Ok(BindingEvent::Binding(Binding::Reference(name))) => Some(name),
            Ok(BindingEvent::Binding(Binding::Macro(_))) => {
                self.push_back_binding(false);
                None
            }
            Ok(BindingEvent::Signal(signal)) => {
                self.stash_signal(signal);
                None
            }
            _ => None,
        }
    }

    fn apply_named_widget(&mut self, name: &str) -> bool {
        let widget = self.widgets.get(name).cloned();
        match widget {
            Some(w) => w.apply(self),
            None => false,
        }
    }

    // Honor a v / V typed between the operator and its motion.
    fn coerce_span(&mut self, start: usize, end: usize) -> (usize, usize) {
        if self.force_line {
            self.force_line = false;
            self.force_char = false;
            let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
            let mut lo_ = lo;
            while lo_ > 0 && self.buf.at_char(lo_ as isize - 1) != '\n' {
                lo_ -= 1;
            }
            let mut hi_ = hi;
            while hi_ < self.buf.length() && self.buf.at_char(hi_ as isize) != '\n' {
                hi_ += 1;
            }
            return (lo_, (hi_ + 1).min(self.buf.length()));
        }
        self.force_char = false;
        (start, end)
    }

    pub(crate) fn vi_delete_to(&mut self, start: usize, end: usize, is_change: bool) -> bool {
        if start == end {
            return true;
        }
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        self.buf.set_cursor(start);
        self.buf.delete(end - start);
        // On a pure delete the cursor must not dangle past the end of a
        // newly shortened line.
        if !is_change && start > 0 && start == self.buf.length() {
            self.buf.move_cursor(-1);
        }
        true
    }

    pub(crate) fn vi_yank_to(&mut self, start: usize, end: usize) -> bool {
        let cursor = start;
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        if start == end {
            self.yank_buffer.clear();
            return true;
        }
        self.yank_buffer = self.buf.substring(start, end);
        // The motion moved the cursor to find the end; put it back.
        self.buf.set_cursor(cursor);
        true
    }

    /// Paste the vi yank buffer after the cursor.
    pub(crate) fn vi_put_after(&mut self) -> bool {
        if !self.yank_buffer.is_empty() {
            if self.buf.cursor() < self.buf.length() {
                self.buf.move_cursor(1);
            }
            let yanked = self.yank_buffer.clone();
            for _ in 0..self.count.max(0) {
                self.put_string(&yanked);
            }
            self.buf.move_cursor(-1);
        }
        true
    }

    /// Visual-mode `p`: replace the region with the yank buffer.
    pub(crate) fn put_replace_selection(&mut self) -> bool {
        if self.region_active == crate::reader::RegionType::None {
            return false;
        }
        let cursor = self.buf.cursor();
        let (start, end) = if self.region_mark <= cursor {
            (self.region_mark, (cursor + 1).min(self.buf.length()))
        } else {
            (cursor, (self.region_mark + 1).min(self.buf.length()))
        };
        self.buf.set_cursor(start);
        self.buf.delete(end - start);
        let yanked = self.yank_buffer.clone();
        self.buf.write(&yanked);
        self.region_active = crate::reader::RegionType::None;
        true
    }

    /// Visual-mode `~`: swap case across the region.
    pub(crate) fn vi_oper_swap_case(&mut self) -> bool {
        if self.region_active == crate::reader::RegionType::None {
            return false;
        }
        let cursor = self.buf.cursor();
        let (start, end) = if self.region_mark <= cursor {
            (self.region_mark, (cursor + 1).min(self.buf.length()))
        } else {
            (cursor, (self.region_mark + 1).min(self.buf.length()))
        };
        for i in start..end {
            let c = self.buf.at_char(i as isize);
            let cur = self.buf.cursor();
            self.buf.set_cursor(i);
            self.buf.set_curr_char(Self::switch_case(c));
            self.buf.set_cursor(cur);
        }
        self.buf.set_cursor(start);
        self.region_active = crate::reader::RegionType::None;
        true
    }

    //
    // Change / kill shorthands
    //

    pub(crate) fn vi_change_whole_line(&mut self) -> bool {
        self.vi_first_non_blank() && self.vi_change_eol()
    }

    pub(crate) fn vi_change_eol(&mut self) -> bool {
        let cursor = self.buf.cursor();
        let len = self.buf.length();
        let res = self.vi_delete_to(cursor, len, true);
        self.set_keymap(VIINS);
        res
    }

    pub(crate) fn vi_kill_eol(&mut self) -> bool {
        let eol = self.buf.find_eol();
        if self.buf.cursor() == eol {
            return false;
        }
        let killed = self.buf.substring(self.buf.cursor(), eol);
        self.kill_ring.add(killed);
        self.buf.delete(eol - self.buf.cursor());
        true
    }

    pub(crate) fn vi_kill_whole_line(&mut self) -> bool {
        self.kill_whole_line() && self.set_keymap(VIINS)
    }

    /// `s`: delete the character(s) under the cursor and insert.
    pub(crate) fn vi_substitute(&mut self) -> bool {
        self.vi_delete_char() && self.set_keymap(VIINS)
    }

    pub(crate) fn vi_backward_kill_word(&mut self) -> bool {
        if self.count < 0 {
            return false;
        }
        let lim = self.buf.find_bol();
        let mut x = self.buf.cursor();
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while x > lim && Self::is_whitespace(self.buf.at_char(x as isize - 1)) {
                x -= 1;
            }
            if x > lim {
                if Self::is_vi_alpha_num(self.buf.at_char(x as isize - 1)) {
                    while x > lim && Self::is_vi_alpha_num(self.buf.at_char(x as isize - 1)) {
                        x -= 1;
                    }
                } else {
                    while x > lim
                        && !Self::is_vi_alpha_num(self.buf.at_char(x as isize - 1))
                        && !Self::is_whitespace(self.buf.at_char(x as isize - 1))
                    {
                        x -= 1;
                    }
                }
            }
        }
        let killed = self.buf.substring(x, self.buf.cursor());
        self.kill_ring.add_backwards(killed);
        self.buf.backspace(self.buf.cursor() - x);
        true
    }

    //
    // Mode switching
    //

    pub(crate) fn vi_cmd_mode(&mut self) -> bool {
        // When re-entering from an aborted operator the cursor stays
        // put; it only steps back on an explicit mode switch.
        if self.state == State::Normal {
            self.buf.move_cursor(-1);
        }
        self.set_keymap(VICMD)
    }

    pub(crate) fn vi_insert(&mut self) -> bool {
        self.set_keymap(VIINS)
    }

    pub(crate) fn vi_add_next(&mut self) -> bool {
        self.buf.move_cursor(1);
        self.set_keymap(VIINS)
    }

    pub(crate) fn vi_add_eol(&mut self) -> bool {
        self.end_of_line() && self.set_keymap(VIINS)
    }

    pub(crate) fn vi_insert_bol(&mut self) -> bool {
        self.beginning_of_line() && self.set_keymap(VIINS)
    }

    pub(crate) fn emacs_editing_mode(&mut self) -> bool {
        self.set_keymap(EMACS)
    }

    //
    // History
    //

    pub(crate) fn vi_up_line_or_history(&mut self) -> bool {
        self.up_line() || (self.up_history() && self.vi_first_non_blank())
    }

    pub(crate) fn vi_down_line_or_history(&mut self) -> bool {
        self.down_line() || (self.down_history() && self.vi_first_non_blank())
    }

    /// `G`: fetch a history entry by number, or the last one.
    pub(crate) fn vi_fetch_history(&mut self) -> bool {
        let moved = if self.repeat_count > 0 {
            self.history.move_to(self.repeat_count as usize - 1)
        } else {
            self.history.move_to_last()
        };
        if moved {
            let entry = self.history.current().to_string();
            self.set_buffer(&entry);
            true
        } else {
            false
        }
    }
}

/// Bracket classification for `%`: square 1, curly 2, paren 3, negated
/// for the closing form, zero otherwise.
pub(crate) fn get_bracket_type(c: char) -> i32 {
    match c {
        '[' => 1,
        ']' => -1,
        '{' => 2,
        '}' => -2,
        '(' => 3,
        ')' => -3,
        _ => 0,
    }
}

// Filter the motions allowed while doing a delete-to, change-to or
// yank-to; anything else drops back to command mode.
fn vi_delete_change_yank_remap(op: &str) -> &str {
    match op {
        widgets::SEND_BREAK
        | widgets::BACKWARD_CHAR
        | widgets::FORWARD_CHAR
        | widgets::END_OF_LINE
        | widgets::VI_MATCH_BRACKET
        | widgets::VI_DIGIT_OR_BEGINNING_OF_LINE
        | widgets::NEG_ARGUMENT
        | widgets::DIGIT_ARGUMENT
        | widgets::VI_BACKWARD_CHAR
        | widgets::VI_BACKWARD_WORD
        | widgets::VI_FORWARD_CHAR
        | widgets::VI_FORWARD_WORD
        | widgets::VI_FORWARD_WORD_END
        | widgets::VI_FIRST_NON_BLANK
        | widgets::VI_GOTO_COLUMN
        | widgets::VI_DELETE
        | widgets::VI_YANK
        | widgets::VI_CHANGE
        | widgets::VI_FIND_NEXT_CHAR
        | widgets::VI_FIND_NEXT_CHAR_SKIP
        | widgets::VI_FIND_PREV_CHAR
        | widgets::VI_FIND_PREV_CHAR_SKIP
        | widgets::VI_REPEAT_FIND
        | widgets::VI_REV_REPEAT_FIND => op,
        _ => widgets::VI_CMD_MODE,
    }
}

#[cfg(test)]
#[path = "vi_tests.rs"]
mod tests;
