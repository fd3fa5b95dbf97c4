//! Incremental display
//! Diffs the previous frame's rows against the new frame and emits a
//! minimal terminal update
//!
//! ## display/ Invariants
//!
//! - Only rows whose content changed are rewritten.
//! - A resize or reset forces a full rewrite of the next frame.
//! - The tracked cursor position always matches what the emitted
//!   sequences produced on the terminal.

use std::io;

use crate::term::{ansi, Capability, Terminal};

/// Linear position in the drawn region: `row * columns + column`.
pub type Pos = usize;

/// Diff renderer over soft-wrapped rows.
#[derive(Debug)]
pub struct Display {
    old_lines: Vec<String>,
    cursor_pos: Pos,
    rows: usize,
    columns: usize,
    tab_width: usize,
}

impl Display {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            old_lines: Vec::new(),
            cursor_pos: 0,
            rows,
            columns: columns.max(1),
            tab_width: 4,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.tab_width = tab_width.max(1);
    }

    /// Resize the frame; the next update rewrites everything.
    pub fn resize(&mut self, rows: usize, columns: usize) {
        self.rows = rows;
        self.columns = columns.max(1);
        self.reset();
    }

    /// Forget the previous frame. The caller is expected to have moved
    /// to a fresh line; the next update draws from column zero.
    pub fn reset(&mut self) {
        self.old_lines.clear();
        self.cursor_pos = 0;
    }

    /// Display width of attributed text.
    pub fn wcwidth(&self, s: &str) -> usize {
        ansi::display_width(s)
    }

    /// Soft-wrap logical text into rows of at most the frame width.
    pub fn wrap(&self, s: &str) -> Vec<String> {
        ansi::split_lines(s, self.columns, self.tab_width)
    }

    /// Render `new_lines`, then park the cursor at `cursor` (when
    /// given), emitting only what changed since the previous frame.
    pub fn update<T: Terminal + ?Sized>(
        &mut self,
        term: &mut T,
        new_lines: Vec<String>,
        cursor: Option<Pos>,
    ) -> io::Result<()> {
        let rows = self.old_lines.len().max(new_lines.len());
        for i in 0..rows {
            let old = self.old_lines.get(i).cloned().unwrap_or_default();
            let new = new_lines.get(i).map(String::as_str).unwrap_or("");
            if old == new {
                continue;
            }
            self.move_to(term, i * self.columns)?;
            if !new.is_empty() {
                term.write(new)?;
                self.cursor_pos = i * self.columns + ansi::display_width(new);
            }
            if ansi::display_width(new) < ansi::display_width(&old) {
                term.puts(Capability::ClrEol);
            }
        }
        if let Some(pos) = cursor {
            self.move_to(term, pos)?;
        }
        self.old_lines = new_lines;
        Ok(())
    }

    // Move the terminal cursor to a linear position. Downward motion
    // uses line feeds so the terminal scrolls when the region grows
    // past the bottom; upward motion uses cursor-up.
    fn move_to<T: Terminal + ?Sized>(&mut self, term: &mut T, pos: Pos) -> io::Result<()> {
        let cur_row = self.cursor_pos / self.columns;
        let row = pos / self.columns;
        let col = pos % self.columns;
        if row < cur_row {
            term.cursor_up((cur_row - row) as u16)?;
        } else {
            for _ in cur_row..row {
                term.write("\n")?;
            }
        }
        term.puts(Capability::CarriageReturn);
        if col > 0 {
            term.cursor_forward(col as u16)?;
        }
        self.cursor_pos = pos;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
