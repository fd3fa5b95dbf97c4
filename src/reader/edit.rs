//! Core editing widgets
//! Insertion, motion, case, transposition, kill/yank, region and
//! argument handling

use crate::error::ExpandError;
use crate::expand::expand_events;
use crate::options::*;
use crate::parser::ParseError;
use crate::reader::widgets;
use crate::reader::{LineReader, RegionType, State};
use crate::term::{Capability, Terminal};

impl<T: Terminal> LineReader<T> {
    //
    // Insertion
    //

    pub(crate) fn self_insert(&mut self) -> bool {
        let keys = self.last_binding().to_string();
        for _ in 0..self.count.max(0) {
            self.put_string(&keys);
        }
        true
    }

    pub(crate) fn self_insert_unmeta(&mut self) -> bool {
        let keys = self.last_binding().to_string();
        if !keys.starts_with('\x1b') {
            return false;
        }
        let mut s = &keys[1..];
        if s == "\r" {
            s = "\n";
        }
        for _ in 0..self.count.max(0) {
            self.put_string(s);
        }
        true
    }

    pub(crate) fn overwrite_mode(&mut self) -> bool {
        self.over_typing = !self.over_typing;
        true
    }

    pub(crate) fn quoted_insert(&mut self) -> bool {
        let Some(c) = self.read_raw_char() else {
            return false;
        };
        let s = c.to_string();
        for _ in 0..self.count.max(0) {
            self.put_string(&s);
        }
        true
    }

    /// Expand history designators, then insert a space.
    pub(crate) fn magic_space(&mut self) -> bool {
        let _ = self.do_expand_hist();
        self.put_string(" ");
        true
    }

    pub(crate) fn undefined_key(&mut self) -> bool {
        false
    }

    //
    // Character motion
    //

    pub(crate) fn backward_char(&mut self) -> bool {
        self.buf.move_cursor(-(self.count as isize)) != 0
    }

    pub(crate) fn forward_char(&mut self) -> bool {
        self.buf.move_cursor(self.count as isize) != 0
    }

    pub(crate) fn beginning_of_line(&mut self) -> bool {
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.move_cursor(-1) == -1 && self.buf.prev_char() != '\n' {}
        }
        true
    }

    pub(crate) fn end_of_line(&mut self) -> bool {
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.move_cursor(1) == 1 && self.buf.curr_char() != '\n' {}
        }
        true
    }

    //
    // Word motion
    //

    pub(crate) fn forward_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() < self.buf.length() && self.is_word(self.buf.curr_char()) {
                self.buf.move_cursor(1);
            }
            if self.is_in_vi_change_operation() && count == 0 {
                break;
            }
            while self.buf.cursor() < self.buf.length() && !self.is_word(self.buf.curr_char()) {
                self.buf.move_cursor(1);
            }
        }
        true
    }

    pub(crate) fn backward_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::forward_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() > 0 && !self.is_word(self.buf.at_char(self.buf.cursor() as isize - 1)) {
                self.buf.move_cursor(-1);
            }
            while self.buf.cursor() > 0 && self.is_word(self.buf.at_char(self.buf.cursor() as isize - 1)) {
                self.buf.move_cursor(-1);
            }
        }
        true
    }

    pub(crate) fn emacs_forward_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::emacs_backward_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() < self.buf.length() && !self.is_word(self.buf.curr_char()) {
                self.buf.move_cursor(1);
            }
            if self.is_in_vi_change_operation() && count == 0 {
                return true;
            }
            while self.buf.cursor() < self.buf.length() && self.is_word(self.buf.curr_char()) {
                self.buf.move_cursor(1);
            }
        }
        true
    }

    pub(crate) fn emacs_backward_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::emacs_forward_word);
        }
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while self.buf.cursor() > 0 {
                self.buf.move_cursor(-1);
                if self.is_word(self.buf.curr_char()) {
                    break;
                }
            }
            while self.buf.cursor() > 0 {
                self.buf.move_cursor(-1);
                if !self.is_word(self.buf.curr_char()) {
                    break;
                }
            }
        }
        true
    }

    //
    // Case operations
    //

    pub(crate) fn up_case_word(&mut self) -> bool {
        let count = self.count.abs();
        let cursor = self.buf.cursor();
        for _ in 0..count {
            while self.buf.cursor() < self.buf.length() && !self.is_word(self.buf.curr_char()) {
                self.buf.move_cursor(1);
            }
            while self.buf.cursor() < self.buf.length() && self.is_word(self.buf.curr_char()) {
                let up = self.buf.curr_char().to_uppercase().next().unwrap_or('\0');
                self.buf.set_curr_char(up);
                self.buf.move_cursor(1);
            }
        }
        if self.count < 0 {
            self.buf.set_cursor(cursor);
        }
        true
    }

    pub(crate) fn down_case_word(&mut self) -> bool {
        let count = self.count.abs();
        let cursor = self.buf.cursor();
        for _ in 0..count {
            while self.buf.cursor() < self.buf.length() && !self.is_word(self.buf.curr_char()) {
                self.buf.move_cursor(1);
            }
            while self.buf.cursor() < self.buf.length() && self.is_word(self.buf.curr_char()) {
                let low = self.buf.curr_char().to_lowercase().next().unwrap_or('\0');
                self.buf.set_curr_char(low);
                self.buf.move_cursor(1);
            }
        }
        if self.count < 0 {
            self.buf.set_cursor(cursor);
        }
        true
    }

    pub(crate) fn capitalize_word(&mut self) -> bool {
        let count = self.count.abs();
        let cursor = self.buf.cursor();
        for _ in 0..count {
            let mut first = true;
            while self.buf.cursor() < self.buf.length() && !self.is_word(self.buf.curr_char()) {
                self.buf.move_cursor(1);
            }
            while self.buf.cursor() < self.buf.length()
                && self.is_word(self.buf.curr_char())
                && !self.buf.curr_char().is_alphabetic()
            {
                self.buf.move_cursor(1);
            }
            while self.buf.cursor() < self.buf.length() && self.is_word(self.buf.curr_char()) {
                let c = self.buf.curr_char();
                let mapped = if first {
                    c.to_uppercase().next().unwrap_or(c)
                } else {
                    c.to_lowercase().next().unwrap_or(c)
                };
                self.buf.set_curr_char(mapped);
                self.buf.move_cursor(1);
                first = false;
            }
        }
        if self.count < 0 {
            self.buf.set_cursor(cursor);
        }
        true
    }

    //
    // Transposition
    //

    /// Swap the characters around the cursor without crossing line
    /// breaks; needs at least two characters on the line.
    pub(crate) fn transpose_chars(&mut self) -> bool {
        let mut lstart = self.buf.cursor() as isize - 1;
        let mut lend = self.buf.cursor() as isize;
        while self.buf.at_char(lstart) != '\0' && self.buf.at_char(lstart) != '\n' {
            lstart -= 1;
        }
        lstart += 1;
        while self.buf.at_char(lend) != '\0' && self.buf.at_char(lend) != '\n' {
            lend += 1;
        }
        if lend - lstart < 2 {
            return false;
        }
        let neg = self.count < 0;
        for _ in 0..self.count.abs() {
            while (self.buf.cursor() as isize) <= lstart {
                self.buf.move_cursor(1);
            }
            while (self.buf.cursor() as isize) >= lend {
                self.buf.move_cursor(-1);
            }
            let c = self.buf.curr_char();
            let prev = self.buf.prev_char();
            self.buf.set_curr_char(prev);
            self.buf.move_cursor(-1);
            self.buf.set_curr_char(c);
            self.buf.move_cursor(if neg { 0 } else { 2 });
        }
        true
    }

    pub(crate) fn transpose_words(&mut self) -> bool {
        let mut lstart = self.buf.cursor() as isize - 1;
        let mut lend = self.buf.cursor() as isize;
        while self.buf.at_char(lstart) != '\0' && self.buf.at_char(lstart) != '\n' {
            lstart -= 1;
        }
        lstart += 1;
        while self.buf.at_char(lend) != '\0' && self.buf.at_char(lend) != '\n' {
            lend += 1;
        }
        if lend - lstart < 2 {
            return false;
        }
        let lstart = lstart as usize;
        let lend = lend as usize;
        let mut words = 0;
        let mut in_word = false;
        if !is_delimiter(self.buf.at_char(lstart as isize)) {
            words += 1;
            in_word = true;
        }
        for i in lstart..lend {
            if is_delimiter(self.buf.at_char(i as isize)) {
                in_word = false;
            } else {
                if !in_word {
                    words += 1;
                }
                in_word = true;
            }
        }
        if words < 2 {
            return false;
        }
        let neg = self.count < 0;
        for _ in 0..self.count.abs() {
            // Boundaries of the word around the cursor.
            let mut sta1 = self.buf.cursor();
            while sta1 > lstart && !is_delimiter(self.buf.at_char(sta1 as isize - 1)) {
                sta1 -= 1;
            }
            let mut end1 = sta1;
            while end1 < lend && !is_delimiter(self.buf.at_char(end1 as isize + 1)) {
                end1 += 1;
            }
            end1 += 1;
            let (sta2, end2) = if neg {
                let mut end2 = sta1 as isize - 1;
                while end2 > lstart as isize && is_delimiter(self.buf.at_char(end2 - 1)) {
                    end2 -= 1;
                }
                if end2 < lstart as isize {
                    // No word before, use the word after.
                    let mut sta2 = end1;
                    while is_delimiter(self.buf.at_char(sta2 as isize)) {
                        sta2 += 1;
                    }
                    let mut end2 = sta2;
                    while end2 < lend && !is_delimiter(self.buf.at_char(end2 as isize + 1)) {
                        end2 += 1;
                    }
                    (sta2, end2 + 1)
                } else {
                    let end2 = end2 as usize;
                    let mut sta2 = end2;
                    while sta2 > lstart && !is_delimiter(self.buf.at_char(sta2 as isize - 1)) {
                        sta2 -= 1;
                    }
                    (sta2, end2)
                }
            } else {
                let mut sta2 = end1;
                while sta2 < lend && is_delimiter(self.buf.at_char(sta2 as isize)) {
                    sta2 += 1;
                }
                if sta2 == lend {
                    // No word after, use the word before.
                    let mut end2 = sta1;
                    while is_delimiter(self.buf.at_char(end2 as isize - 1)) {
                        end2 -= 1;
                    }
                    let mut sta2 = end2;
                    while sta2 > lstart && !is_delimiter(self.buf.at_char(sta2 as isize - 1)) {
                        sta2 -= 1;
                    }
                    (sta2, end2)
                } else {
                    let mut end2 = sta2;
                    while end2 < lend && !is_delimiter(self.buf.at_char(end2 as isize + 1)) {
                        end2 += 1;
                    }
                    (sta2, end2 + 1)
                }
            };
            if sta1 < sta2 {
                let res = self.buf.substring(0, sta1)
                    + &self.buf.substring(sta2, end2)
                    + &self.buf.substring(end1, sta2)
                    + &self.buf.substring(sta1, end1)
                    + &self.buf.substring_from(end2);
                self.buf.clear();
                self.buf.write(&res);
                self.buf.set_cursor(if neg { end1 } else { end2 });
            } else {
                let res = self.buf.substring(0, sta2)
                    + &self.buf.substring(sta1, end1)
                    + &self.buf.substring(end2, sta1)
                    + &self.buf.substring(sta2, end2)
                    + &self.buf.substring_from(end1);
                self.buf.clear();
                self.buf.write(&res);
                self.buf.set_cursor(if neg { end2 } else { end1 });
            }
        }
        true
    }

    //
    // Deletion
    //

    pub(crate) fn backward_delete_char(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::delete_char);
        }
        if self.buf.cursor() == 0 {
            return false;
        }
        self.buf.backspace(self.count as usize);
        true
    }

    pub(crate) fn delete_char(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_delete_char);
        }
        if self.buf.cursor() == self.buf.length() {
            return false;
        }
        self.buf.delete(self.count as usize);
        true
    }

    pub(crate) fn backward_delete_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::delete_word);
        }
        let mut cursor = self.buf.cursor();
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while cursor > 0 && !self.is_word(self.buf.at_char(cursor as isize - 1)) {
                cursor -= 1;
            }
            while cursor > 0 && self.is_word(self.buf.at_char(cursor as isize - 1)) {
                cursor -= 1;
            }
        }
        self.buf.backspace(self.buf.cursor() - cursor);
        true
    }

    pub(crate) fn delete_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_delete_word);
        }
        let mut x = self.buf.cursor();
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while x < self.buf.length() && !self.is_word(self.buf.at_char(x as isize)) {
                x += 1;
            }
            while x < self.buf.length() && self.is_word(self.buf.at_char(x as isize)) {
                x += 1;
            }
        }
        self.buf.delete(x - self.buf.cursor());
        true
    }

    //
    // Kill family
    //

    pub(crate) fn kill_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_kill_word);
        }
        let mut x = self.buf.cursor();
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while x < self.buf.length() && !self.is_word(self.buf.at_char(x as isize)) {
                x += 1;
            }
            while x < self.buf.length() && self.is_word(self.buf.at_char(x as isize)) {
                x += 1;
            }
        }
        let killed = self.buf.substring(self.buf.cursor(), x);
        self.kill_ring.add(killed);
        self.buf.delete(x - self.buf.cursor());
        true
    }

    pub(crate) fn backward_kill_word(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::kill_word);
        }
        let mut x = self.buf.cursor();
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            while x > 0 && !self.is_word(self.buf.at_char(x as isize - 1)) {
                x -= 1;
            }
            while x > 0 && self.is_word(self.buf.at_char(x as isize - 1)) {
                x -= 1;
            }
        }
        let killed = self.buf.substring(x, self.buf.cursor());
        self.kill_ring.add_backwards(killed);
        self.buf.backspace(self.buf.cursor() - x);
        true
    }

    /// Kill from the cursor to the end of line; with a count, through
    /// that many line ends.
    pub(crate) fn kill_line(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::backward_kill_line);
        }
        if self.buf.cursor() == self.buf.length() {
            return false;
        }
        let cp = self.buf.cursor();
        let mut len = cp;
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            if self.buf.at_char(len as isize) == '\n' {
                len += 1;
            } else {
                while self.buf.at_char(len as isize) != '\0' && self.buf.at_char(len as isize) != '\n'
                {
                    len += 1;
                }
            }
        }
        let killed = self.buf.substring(cp, len);
        self.buf.delete(len - cp);
        self.kill_ring.add(killed);
        true
    }

    pub(crate) fn backward_kill_line(&mut self) -> bool {
        if self.count < 0 {
            return self.call_neg(Self::kill_line);
        }
        if self.buf.cursor() == 0 {
            return false;
        }
        let cp = self.buf.cursor();
        let mut beg = cp;
        let mut count = self.count;
        while count > 0 {
            count -= 1;
            if beg == 0 {
                break;
            }
            if self.buf.at_char(beg as isize - 1) == '\n' {
                beg -= 1;
            } else {
                while beg > 0
                    && self.buf.at_char(beg as isize - 1) != '\0'
                    && self.buf.at_char(beg as isize - 1) != '\n'
                {
                    beg -= 1;
                }
            }
        }
        let killed = self.buf.substring(beg, cp);
        self.buf.set_cursor(beg);
        self.buf.delete(cp - beg);
        self.kill_ring.add(killed);
        true
    }

    pub(crate) fn kill_whole_line(&mut self) -> bool {
        if self.buf.length() == 0 {
            return false;
        }
        let (start, end) = if self.count < 0 {
            let mut end = self.buf.cursor();
            while self.buf.at_char(end as isize) != '\0' && self.buf.at_char(end as isize) != '\n' {
                end += 1;
            }
            let mut start = end as isize;
            for _ in 0..-self.count {
                while start > 0 && self.buf.at_char(start - 1) != '\n' {
                    start -= 1;
                }
                start -= 1;
            }
            (start.max(0) as usize, end)
        } else {
            let mut start = self.buf.cursor();
            while start > 0 && self.buf.at_char(start as isize - 1) != '\n' {
                start -= 1;
            }
            let mut end = start;
            let mut count = self.count;
            while count > 0 {
                count -= 1;
                while end < self.buf.length() && self.buf.at_char(end as isize) != '\n' {
                    end += 1;
                }
                end += 1;
            }
            (start, end)
        };
        let killed = self.buf.substring(start, end);
        self.buf.set_cursor(start);
        self.buf.delete(end.min(self.buf.length()) - start);
        self.kill_ring.add(killed);
        true
    }

    pub(crate) fn kill_buffer(&mut self) -> bool {
        self.kill_ring.add(self.buf.to_string());
        self.buf.clear();
        true
    }

    pub(crate) fn kill_region(&mut self) -> bool {
        self.do_copy_kill_region(true)
    }

    pub(crate) fn copy_region_as_kill(&mut self) -> bool {
        self.do_copy_kill_region(false)
    }

    fn do_copy_kill_region(&mut self, kill: bool) -> bool {
        if self.region_mark > self.buf.length() {
            self.region_mark = self.buf.length();
        }
        if self.region_active == RegionType::Line {
            let mut start = self.region_mark;
            let mut end = self.buf.cursor();
            if start < end {
                while start > 0 && self.buf.at_char(start as isize - 1) != '\n' {
                    start -= 1;
                }
                while end < self.buf.length().saturating_sub(1)
                    && self.buf.at_char(end as isize + 1) != '\n'
                {
                    end += 1;
                }
                if self.is_in_vi_cmd_mode() {
                    end += 1;
                }
                let killed = self.buf.substring(start, end);
                self.kill_ring.add(killed);
                if kill {
                    self.buf.backspace(end.min(self.buf.length()) - start);
                }
            } else {
                while end > 0 && self.buf.at_char(end as isize - 1) != '\n' {
                    end -= 1;
                }
                while start < self.buf.length() && self.buf.at_char(start as isize) != '\n' {
                    start += 1;
                }
                if self.is_in_vi_cmd_mode() {
                    start += 1;
                }
                let killed = self.buf.substring(end, start);
                self.kill_ring.add_backwards(killed);
                if kill {
                    self.buf.set_cursor(end);
                    self.buf.delete(start.min(self.buf.length()) - end);
                }
            }
        } else if self.region_mark > self.buf.cursor() {
            if self.is_in_vi_cmd_mode() {
                self.region_mark += 1;
            }
            let killed = self.buf.substring(self.buf.cursor(), self.region_mark);
            self.kill_ring.add(killed);
            if kill {
                self.buf.delete(self.region_mark - self.buf.cursor());
            }
        } else {
            if self.is_in_vi_cmd_mode() {
                self.buf.move_cursor(1);
            }
            let killed = self.buf.substring(self.region_mark, self.buf.cursor());
            self.kill_ring.add(killed);
            if kill {
                self.buf.backspace(self.buf.cursor() - self.region_mark);
            }
        }
        if kill {
            self.region_active = RegionType::None;
        }
        true
    }

    pub(crate) fn yank(&mut self) -> bool {
        match self.kill_ring.yank() {
            Some(yanked) => {
                self.put_string(&yanked);
                true
            }
            None => false,
        }
    }

    pub(crate) fn yank_pop(&mut self) -> bool {
        if !self.kill_ring.last_yank() {
            return false;
        }
        let Some(current) = self.kill_ring.yank() else {
            return false;
        };
        self.buf.backspace(current.chars().count());
        let Some(yanked) = self.kill_ring.yank_pop() else {
            return false;
        };
        self.put_string(&yanked);
        true
    }

    pub(crate) fn copy_prev_word(&mut self) -> bool {
        if self.count <= 0 {
            return false;
        }
        let mut count = self.count;
        let mut t0 = self.buf.cursor();
        let t1;
        loop {
            let mark = t0;
            while t0 > 0 && !self.is_word(self.buf.at_char(t0 as isize - 1)) {
                t0 -= 1;
            }
            while t0 > 0 && self.is_word(self.buf.at_char(t0 as isize - 1)) {
                t0 -= 1;
            }
            count -= 1;
            if count == 0 {
                t1 = mark;
                break;
            }
            if t0 == 0 {
                return false;
            }
        }
        let word = self.buf.substring(t0, t1);
        self.buf.write(&word);
        true
    }

    //
    // Region
    //

    pub(crate) fn set_mark_command(&mut self) -> bool {
        if self.count < 0 {
            self.region_active = RegionType::None;
            return true;
        }
        self.region_mark = self.buf.cursor();
        self.region_active = RegionType::Char;
        true
    }

    pub(crate) fn exchange_point_and_mark(&mut self) -> bool {
        if self.count == 0 {
            self.region_active = RegionType::Char;
            return true;
        }
        let x = self.region_mark;
        self.region_mark = self.buf.cursor();
        self.buf.set_cursor(x);
        if self.count > 0 {
            self.region_active = RegionType::Char;
        }
        true
    }

    pub(crate) fn visual_mode(&mut self) -> bool {
        if self.is_in_vi_move_operation() {
            self.is_arg_digit = true;
            self.force_line = false;
            self.force_char = true;
            return true;
        }
        self.region_active = match self.region_active {
            RegionType::None => {
                self.region_mark = self.buf.cursor();
                RegionType::Char
            }
            RegionType::Char => RegionType::None,
            RegionType::Line => RegionType::Char,
        };
        true
    }

    pub(crate) fn visual_line_mode(&mut self) -> bool {
        if self.is_in_vi_move_operation() {
            self.is_arg_digit = true;
            self.force_line = true;
            self.force_char = false;
            return true;
        }
        self.region_active = match self.region_active {
            RegionType::None => {
                self.region_mark = self.buf.cursor();
                RegionType::Line
            }
            RegionType::Char => RegionType::Line,
            RegionType::Line => RegionType::None,
        };
        true
    }

    pub(crate) fn deactivate_region(&mut self) -> bool {
        self.region_active = RegionType::None;
        true
    }

    //
    // Undo / redo
    //

    pub(crate) fn undo(&mut self) -> bool {
        self.is_undo = true;
        match self.undo.undo().cloned() {
            Some(snapshot) => {
                self.buf.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    pub(crate) fn redo(&mut self) -> bool {
        self.is_undo = true;
        match self.undo.redo().cloned() {
            Some(snapshot) => {
                self.buf.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Abort the current editing: clear the buffer and start a fresh
    /// line. Reports failure so the dispatcher beeps.
    pub(crate) fn send_break(&mut self) -> bool {
        if self.search_term.is_none() {
            self.buf.clear();
            self.println();
            self.redraw_line();
            return false;
        }
        true
    }

    //
    // Arguments
    //

    pub(crate) fn digit_argument(&mut self) -> bool {
        let Some(digit) = self.last_binding().chars().last() else {
            return false;
        };
        self.repeat_count = self.repeat_count * 10 + digit.to_digit(10).map_or(0, i64::from);
        self.is_arg_digit = true;
        true
    }

    pub(crate) fn neg_argument(&mut self) -> bool {
        self.mult *= -1;
        self.is_arg_digit = true;
        true
    }

    pub(crate) fn universal_argument(&mut self) -> bool {
        self.mult *= self.universal;
        self.is_arg_digit = true;
        true
    }

    pub(crate) fn argument_base(&mut self) -> bool {
        if self.repeat_count > 0 && self.repeat_count < 32 {
            self.universal = self.repeat_count;
            self.is_arg_digit = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn vi_digit_or_beginning_of_line(&mut self) -> bool {
        if self.repeat_count > 0 {
            self.digit_argument()
        } else {
            self.beginning_of_line()
        }
    }

    //
    // Accepting
    //

    pub(crate) fn accept_line(&mut self) -> bool {
        let text = self.buf.to_string();
        match self.parser.parse(&text, self.buf.cursor()) {
            Ok(parsed) => self.parsed_line = Some(parsed),
            Err(ParseError::Eof { .. }) => {
                self.buf.write("\n");
                return true;
            }
            Err(ParseError::Syntax) => {}
        }
        self.call_widget(widgets::CALLBACK_FINISH);
        self.state = State::Done;
        if !self.is_set(ReaderOption::DisableEventExpansion) {
            match expand_events(self.history.as_ref(), &text) {
                Ok(expanded) => {
                    if expanded != text {
                        self.buf.clear();
                        self.buf.write(&expanded);
                        if self.is_set(ReaderOption::HistoryVerify) {
                            self.state = State::Normal;
                        }
                    }
                }
                Err(ExpandError(message)) => {
                    tracing::debug!(%message, "event expansion failed");
                    self.beep();
                    self.buf.clear();
                    self.println();
                    self.println_str(&message);
                    let _ = self.term.flush();
                }
            }
        }
        true
    }

    //
    // Screen control
    //

    pub(crate) fn clear_screen(&mut self) -> bool {
        if self.term.puts(Capability::ClearScreen) {
            self.redraw_line();
        } else {
            self.println();
        }
        true
    }

    //
    // Bracket close blink
    //

    pub(crate) fn insert_close_curly(&mut self) -> bool {
        self.insert_close("}")
    }

    pub(crate) fn insert_close_paren(&mut self) -> bool {
        self.insert_close(")")
    }

    pub(crate) fn insert_close_square(&mut self) -> bool {
        self.insert_close("]")
    }

    fn insert_close(&mut self, s: &str) -> bool {
        self.put_string(s);
        let close_position = self.buf.cursor();
        self.buf.move_cursor(-1);
        self.do_vi_match_bracket();
        let _ = self.redisplay_flush(true);
        let blink = self.get_u64(BLINK_MATCHING_PAREN, DEFAULT_BLINK_MATCHING_PAREN);
        let _ = self.peek_character(blink);
        self.buf.set_cursor(close_position);
        true
    }

    //
    // Comments
    //

    pub(crate) fn insert_comment(&mut self) -> bool {
        self.do_insert_comment(false)
    }

    pub(crate) fn vi_insert_comment(&mut self) -> bool {
        self.do_insert_comment(true)
    }

    fn do_insert_comment(&mut self, vi_mode: bool) -> bool {
        let comment = self.get_string(COMMENT_BEGIN, DEFAULT_COMMENT_BEGIN);
        self.beginning_of_line();
        self.put_string(&comment);
        if vi_mode {
            self.set_keymap(crate::keymap::VIINS);
        }
        self.accept_line()
    }

    //
    // Character search
    //

    pub(crate) fn character_search(&mut self) -> bool {
        let Some(target) = self.read_raw_char() else {
            return false;
        };
        let mut count = self.count.max(1);
        let mut pos = self.buf.cursor() + 1;
        while pos < self.buf.length() {
            if self.buf.at_char(pos as isize) == target {
                count -= 1;
                if count == 0 {
                    self.buf.set_cursor(pos);
                    return true;
                }
            }
            pos += 1;
        }
        false
    }

    pub(crate) fn character_search_backward(&mut self) -> bool {
        let Some(target) = self.read_raw_char() else {
            return false;
        };
        let mut count = self.count.max(1);
        let mut pos = self.buf.cursor() as isize - 1;
        while pos >= 0 {
            if self.buf.at_char(pos) == target {
                count -= 1;
                if count == 0 {
                    self.buf.set_cursor(pos as usize);
                    return true;
                }
            }
            pos -= 1;
        }
        false
    }

    //
    // Misc
    //

    /// Re-run the lowercased version of the last key sequence.
    pub(crate) fn do_lowercase_version(&mut self) -> bool {
        let lower = self.last_binding().to_lowercase();
        self.run_macro(&lower);
        true
    }

    pub(crate) fn what_cursor_position(&mut self) -> bool {
        let mut sb = String::new();
        if self.buf.cursor() < self.buf.length() {
            let c = self.buf.curr_char();
            sb.push_str("Char: ");
            match c {
                ' ' => sb.push_str("SPC"),
                '\n' => sb.push_str("LFD"),
                c if (c as u32) < 32 => {
                    sb.push('^');
                    sb.push(char::from_u32(c as u32 + 'A' as u32 - 1).unwrap_or('?'));
                }
                '\x7f' => sb.push_str("^?"),
                c => sb.push(c),
            }
            let code = c as u32;
            sb.push_str(&format!(" (0{code:o} {code} 0x{code:x})"));
        } else {
            sb.push_str("EOF");
        }
        sb.push_str("   ");
        let len = self.buf.length();
        let cursor = self.buf.cursor();
        let percent = if len == 0 { 100 } else { 100 * cursor / len };
        sb.push_str(&format!(
            "point {} of {} ({percent}%)   column {}",
            cursor + 1,
            len + 1,
            cursor - self.buf.find_bol()
        ));
        self.post = Some(sb);
        true
    }

    // A tab typed at the start of a blank line inserts itself instead
    // of completing.
    pub(crate) fn insert_tab(&self) -> bool {
        if self.last_binding() != "\t" {
            return false;
        }
        let text = self.buf.to_string();
        let tail = text.rsplit('\n').next().unwrap_or("");
        tail.chars().all(|c| matches!(c, ' ' | '\t' | '\r'))
    }

    /// Expand history designators in place. True when the buffer
    /// changed.
    pub(crate) fn do_expand_hist(&mut self) -> Result<bool, ExpandError> {
        let text = self.buf.to_string();
        let expanded = expand_events(self.history.as_ref(), &text)?;
        if expanded != text {
            self.buf.clear();
            self.buf.write(&expanded);
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

// Anything but a letter or digit separates words for transposition.
fn is_delimiter(c: char) -> bool {
    !c.is_alphanumeric()
}

#[cfg(test)]
#[path = "edit_tests.rs"]
mod tests;
