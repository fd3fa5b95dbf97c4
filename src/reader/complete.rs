//! Completion engine
//! Candidate matching, common-prefix reduction and the list / menu UI

use std::collections::BTreeMap;

use crate::completer::Candidate;
use crate::keymap::{Binding, MENU};
use crate::options::*;
use crate::reader::binding_reader::BindingEvent;
use crate::reader::widgets;
use crate::reader::LineReader;
use crate::term::{ansi, Capability, Terminal};

const DESC_PREFIX: &str = "(";
const DESC_SUFFIX: &str = ")";
const MARGIN_BETWEEN_DISPLAY_AND_DESC: usize = 1;
const MARGIN_BETWEEN_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompletionType {
    Complete,
    List,
}

// A rendered post area: text, grid height, and the grid row holding the
// selection.
struct PostResult {
    post: String,
    lines: usize,
    selected_line: usize,
}

enum PostItem {
    Group(String),
    Candidates(Vec<Candidate>),
}

struct MenuState {
    possible: Vec<Candidate>,
    selection: usize,
    top_line: usize,
    word: String,
    computed: String,
    lines: usize,
    columns: usize,
}

impl<T: Terminal> LineReader<T> {
    //
    // Completion widgets
    //

    pub(crate) fn complete_word(&mut self) -> bool {
        if self.insert_tab() {
            self.self_insert()
        } else {
            let menu = self.is_set(ReaderOption::MenuComplete);
            self.do_complete(CompletionType::Complete, menu, false)
        }
    }

    pub(crate) fn menu_complete(&mut self) -> bool {
        if self.insert_tab() {
            self.self_insert()
        } else {
            self.do_complete(CompletionType::Complete, true, false)
        }
    }

    pub(crate) fn complete_prefix(&mut self) -> bool {
        if self.insert_tab() {
            self.self_insert()
        } else {
            let menu = self.is_set(ReaderOption::MenuComplete);
            self.do_complete(CompletionType::Complete, menu, true)
        }
    }

    pub(crate) fn list_choices(&mut self) -> bool {
        let menu = self.is_set(ReaderOption::MenuComplete);
        self.do_complete(CompletionType::List, menu, false)
    }

    pub(crate) fn delete_char_or_list(&mut self) -> bool {
        if self.buf.cursor() != self.buf.length() || self.buf.length() == 0 {
            self.delete_char()
        } else {
            let menu = self.is_set(ReaderOption::MenuComplete);
            self.do_complete(CompletionType::List, menu, false)
        }
    }

    //
    // The pipeline
    //

    pub(crate) fn do_complete(&mut self, lst: CompletionType, use_menu: bool, prefix: bool) -> bool {
        // An event expansion wins over completion.
        match self.do_expand_hist() {
            Ok(true) => return true,
            Err(_) => return false,
            Ok(false) => {}
        }

        let line = match self.parser.parse(&self.buf.to_string(), self.buf.cursor()) {
            Ok(line) => line,
            Err(_) => return false,
        };
        let mut candidates: Vec<Candidate> = Vec::new();
        if let Some(completer) = &self.completer {
            completer.complete(self, &line, &mut candidates);
        }

        let case_insensitive = self.is_set(ReaderOption::CaseInsensitive);
        let errors = self.get_int(ERRORS, DEFAULT_ERRORS).max(0) as usize;

        // Bucket candidates by their stripped value.
        let mut sorted: BTreeMap<String, (String, Vec<Candidate>)> = BTreeMap::new();
        for cand in candidates {
            let stripped = ansi::strip(&cand.value);
            let key = normalize(&stripped, case_insensitive);
            sorted
                .entry(key)
                .or_insert_with(|| (stripped, Vec::new()))
                .1
                .push(cand);
        }

        // The word (or word prefix) being completed.
        let word = line.word.clone();
        let word_prefix: String = word.chars().take(line.word_cursor).collect();
        let word_suffix: String = word.chars().skip(line.word_cursor).collect();
        let (matched_word, exact_word) = if prefix {
            (word_prefix.clone(), word_prefix.clone())
        } else {
            (word.clone(), word.clone())
        };

        // Prefix match, then substring, then typo distance; first
        // matcher with results wins.
        let complete_in_word = !prefix && self.is_set(ReaderOption::CompleteInWord);
        let mut matching: Vec<(String, Vec<Candidate>)> = Vec::new();
        let passes: [MatchPass; 3] = [MatchPass::Starts, MatchPass::Contains, MatchPass::Typo];
        for pass in passes {
            for (key, (stripped, cands)) in &sorted {
                let hit = if complete_in_word {
                    let wp = normalize(&word_prefix, case_insensitive);
                    let ws = normalize(&word_suffix, case_insensitive);
                    match pass {
                        MatchPass::Starts => {
                            key.starts_with(&wp) && key[wp.len()..].contains(ws.as_str())
                        }
                        MatchPass::Contains => key
                            .find(wp.as_str())
                            .is_some_and(|at| key[at + wp.len()..].contains(ws.as_str())),
                        MatchPass::Typo => {
                            typo_matches(key, &normalize(&word, case_insensitive), errors)
                        }
                    }
                } else {
                    let w = normalize(&matched_word, case_insensitive);
                    match pass {
                        MatchPass::Starts => key.starts_with(w.as_str()),
                        MatchPass::Contains => key.contains(w.as_str()),
                        MatchPass::Typo => typo_matches(key, &w, errors),
                    }
                };
                if hit {
                    matching.push((stripped.clone(), cands.clone()));
                }
            }
            if !matching.is_empty() {
                // A typo pass with several hits offers the original
                // word as a candidate of its own.
                if pass == MatchPass::Typo && matching.len() > 1 {
                    matching.push((
                        matched_word.clone(),
                        vec![Candidate::full(
                            matched_word.clone(),
                            matched_word.clone(),
                            Some("original".to_string()),
                            None,
                            None,
                            None,
                            false,
                        )],
                    ));
                }
                break;
            }
        }
        if matching.is_empty() {
            return false;
        }

        if lst == CompletionType::List {
            let possible: Vec<Candidate> =
                matching.iter().flat_map(|(_, c)| c.iter().cloned()).collect();
            self.do_list(possible);
            return true;
        }

        // A single match, or an exact one when RECOGNIZE_EXACT is set,
        // completes immediately.
        let mut completion: Option<Candidate> = None;
        if matching.len() == 1 {
            completion = matching[0].1.first().cloned();
        } else if self.is_set(ReaderOption::RecognizeExact) {
            completion = matching
                .iter()
                .flat_map(|(_, c)| c.iter())
                .find(|c| c.complete && ansi::strip(&c.value) == exact_word)
                .cloned();
        }
        if let Some(completion) = completion {
            if prefix {
                self.buf.backspace(line.word_cursor);
            } else {
                let word_len = word.chars().count();
                self.buf
                    .move_cursor(word_len as isize - line.word_cursor as isize);
                self.buf.backspace(word_len);
            }
            self.buf.write(&completion.value);
            if completion.complete && self.buf.curr_char() != ' ' {
                self.buf.write(" ");
            }
            if let Some(suffix) = &completion.suffix {
                let _ = self.redisplay_flush(true);
                if let Ok(BindingEvent::Binding(binding)) = self.read_binding_event() {
                    let chars = self.get_string(REMOVE_SUFFIX_CHARS, DEFAULT_REMOVE_SUFFIX_CHARS);
                    let name = match &binding {
                        Binding::Reference(name) => name.as_str(),
                        Binding::Macro(_) => "",
                    };
                    let first_key = self.last_binding().chars().next();
                    let removable = name == widgets::SELF_INSERT
                        && first_key.is_some_and(|c| chars.contains(c));
                    if removable || name == widgets::ACCEPT_LINE {
                        self.buf.backspace(suffix.chars().count());
                        if first_key != Some(' ') {
                            self.buf.write(" ");
                        }
                    }
                    self.push_back_binding(true);
                }
            }
            return true;
        }

        let possible: Vec<Candidate> =
            matching.iter().flat_map(|(_, c)| c.iter().cloned()).collect();

        if use_menu {
            let word_len = word.chars().count();
            self.buf
                .move_cursor(word_len as isize - line.word_cursor as isize);
            self.buf.backspace(word_len);
            self.do_menu(possible);
            return true;
        }

        // Insert the unambiguous common prefix if it extends the word.
        let mut current = if prefix {
            word_prefix
        } else {
            let word_len = word.chars().count();
            self.buf
                .move_cursor(word_len as isize - line.word_cursor as isize);
            word.clone()
        };
        let mut common: Option<String> = None;
        for (stripped, _) in &matching {
            common = Some(match common {
                None => stripped.clone(),
                Some(prev) => common_start(&prev, stripped, case_insensitive),
            });
        }
        let common = common.unwrap_or_default();
        let has_unambiguous = common.starts_with(&current) && common != current;
        if has_unambiguous {
            self.buf.backspace(current.chars().count());
            self.buf.write(&common);
            current = common;
            let auto_list = self.is_set(ReaderOption::AutoList);
            let auto_menu = self.is_set(ReaderOption::AutoMenu);
            let list_ambiguous = self.is_set(ReaderOption::ListAmbiguous);
            if (!auto_list && auto_menu) || (auto_list && list_ambiguous) {
                if !self.next_binding_is_complete() {
                    return true;
                }
            }
        }
        if self.is_set(ReaderOption::AutoList) {
            self.do_list(possible.clone());
            if self.is_set(ReaderOption::AutoMenu) && !self.next_binding_is_complete() {
                return true;
            }
        }
        if self.is_set(ReaderOption::AutoMenu) {
            self.buf.backspace(current.chars().count());
            self.do_menu(possible);
        }
        true
    }

    // A menu-complete binding continues into the menu; anything else is
    // pushed back for normal dispatch.
    fn next_binding_is_complete(&mut self) -> bool {
        let _ = self.redisplay_flush(true);
        match self.read_binding_from(Some(MENU), None) {
            Ok(BindingEvent::Binding(Binding::Reference(name)))
                if name == widgets::MENU_COMPLETE =>
            {
                true
            }
            Ok(BindingEvent::Signal(signal)) => {
                self.stash_signal(signal);
                false
            }
            _ => {
                self.push_back_binding(false);
                false
            }
        }
    }

    //
    // Menu
    //

    fn do_menu(&mut self, mut original: Vec<Candidate>) {
        merge_candidates(&mut original);
        let mut possible: Vec<Candidate> = Vec::new();
        self.compute_post(&original, None, Some(&mut possible));

        let mut menu = MenuState {
            possible,
            selection: 0,
            top_line: 0,
            word: String::new(),
            computed: String::new(),
            lines: 0,
            columns: 1,
        };
        self.menu_update(&mut menu);
        self.post = Some(menu.computed.clone());
        let _ = self.redisplay_flush(true);

        self.term.puts(Capability::KeypadXmit);
        loop {
            let name = match self.read_binding_from(Some(MENU), None) {
                Ok(BindingEvent::Binding(Binding::Reference(name))) => name,
                Ok(BindingEvent::Binding(Binding::Macro(_))) => continue,
                Ok(BindingEvent::Signal(signal)) => {
                    self.stash_signal(signal);
                    break;
                }
                _ => break,
            };
            match name.as_str() {
                widgets::MENU_COMPLETE => self.menu_next(&mut menu),
                widgets::REVERSE_MENU_COMPLETE => self.menu_previous(&mut menu),
                widgets::UP_LINE_OR_HISTORY => self.menu_up(&mut menu),
                widgets::DOWN_LINE_OR_HISTORY => self.menu_down(&mut menu),
                widgets::FORWARD_CHAR => self.menu_right(&mut menu),
                widgets::BACKWARD_CHAR => self.menu_left(&mut menu),
                widgets::CLEAR_SCREEN => {
                    self.clear_screen();
                }
                _ => {
                    // Commit the selection and re-dispatch the key.
                    let completion = menu.possible[menu.selection].clone();
                    let first_key = self.last_binding().chars().next();
                    if let Some(suffix) = &completion.suffix {
                        let chars =
                            self.get_string(REMOVE_SUFFIX_CHARS, DEFAULT_REMOVE_SUFFIX_CHARS);
                        let removable = name == widgets::SELF_INSERT
                            && first_key.is_some_and(|c| chars.contains(c));
                        if removable
                            || name == widgets::ACCEPT_LINE
                            || name == widgets::BACKWARD_DELETE_CHAR
                        {
                            self.buf.backspace(suffix.chars().count());
                        }
                    }
                    if completion.complete && first_key != Some(' ') {
                        self.buf.write(" ");
                    }
                    let suffix_self_insert = name == widgets::SELF_INSERT
                        && completion
                            .suffix
                            .as_deref()
                            .is_some_and(|s| s.starts_with(self.last_binding()));
                    if name != widgets::ACCEPT_LINE
                        && name != widgets::BACKWARD_DELETE_CHAR
                        && !suffix_self_insert
                    {
                        self.push_back_binding(true);
                    }
                    self.post = None;
                    self.term.puts(Capability::KeypadLocal);
                    return;
                }
            }
            self.post = Some(menu.computed.clone());
            let _ = self.redisplay_flush(true);
        }
        self.post = None;
        self.term.puts(Capability::KeypadLocal);
    }

    fn menu_next(&mut self, menu: &mut MenuState) {
        menu.selection = (menu.selection + 1) % menu.possible.len();
        self.menu_update(menu);
    }

    fn menu_previous(&mut self, menu: &mut MenuState) {
        menu.selection = (menu.selection + menu.possible.len() - 1) % menu.possible.len();
        self.menu_update(menu);
    }

    fn menu_down(&mut self, menu: &mut MenuState) {
        if self.is_set(ReaderOption::ListRowsFirst) {
            let mut r = menu.selection / menu.columns;
            let mut c = menu.selection % menu.columns;
            if (r + 1) * menu.columns + c < menu.possible.len() {
                r += 1;
            } else if c + 1 < menu.columns {
                c += 1;
                r = 0;
            } else {
                r = 0;
                c = 0;
            }
            menu.selection = r * menu.columns + c;
            self.menu_update(menu);
        } else {
            self.menu_next(menu);
        }
    }

    fn menu_up(&mut self, menu: &mut MenuState) {
        if self.is_set(ReaderOption::ListRowsFirst) {
            let mut r = menu.selection / menu.columns;
            let mut c = menu.selection % menu.columns;
            if r > 0 {
                r -= 1;
            } else {
                c = (c + menu.columns - 1) % menu.columns;
                r = menu.lines.saturating_sub(1);
                if r * menu.columns + c >= menu.possible.len() {
                    r = r.saturating_sub(1);
                }
            }
            menu.selection = r * menu.columns + c;
            self.menu_update(menu);
        } else {
            self.menu_previous(menu);
        }
    }

    fn menu_right(&mut self, menu: &mut MenuState) {
        if self.is_set(ReaderOption::ListRowsFirst) {
            self.menu_next(menu);
        } else {
            let mut c = menu.selection / menu.lines.max(1);
            let mut r = menu.selection % menu.lines.max(1);
            if c + 1 < menu.columns {
                c += 1;
            } else {
                c = 0;
                r += 1;
            }
            menu.selection = c * menu.lines.max(1) + r;
            if menu.selection >= menu.possible.len() {
                menu.selection = 0;
            }
            self.menu_update(menu);
        }
    }

    fn menu_left(&mut self, menu: &mut MenuState) {
        if self.is_set(ReaderOption::ListRowsFirst) {
            self.menu_previous(menu);
        } else {
            let lines = menu.lines.max(1);
            let mut c = (menu.selection / lines) as isize;
            let r = menu.selection % lines;
            let mut r = r as isize;
            if c - 1 >= 0 {
                c -= 1;
            } else {
                c = menu.columns as isize - 1;
                r -= 1;
            }
            let sel = c * lines as isize + r;
            menu.selection = if sel < 0 {
                menu.possible.len() - 1
            } else {
                (sel as usize).min(menu.possible.len() - 1)
            };
            self.menu_update(menu);
        }
    }

    // Replace the word with the selection and recompute the grid, with
    // a scroll window when it would not fit under the prompt.
    fn menu_update(&mut self, menu: &mut MenuState) {
        self.buf.backspace(menu.word.chars().count());
        menu.word = menu.possible[menu.selection].value.clone();
        let word = menu.word.clone();
        self.buf.write(&word);

        let selected = menu.possible[menu.selection].clone();
        let pr = self.compute_post(&menu.possible, Some(&selected), None);

        let mut with_prompt = String::new();
        with_prompt.push_str(&self.prompt);
        with_prompt.push_str(&self.buf.to_string());
        let text = self.insert_secondary_prompts(&with_prompt, &mut Vec::new(), true);
        let prompt_lines = self.display.wrap(&text).len();
        let rows = self.size.rows as usize;
        if pr.lines + prompt_lines >= rows {
            let displayed = rows.saturating_sub(prompt_lines + 1).max(1);
            if pr.selected_line < menu.top_line {
                menu.top_line = pr.selected_line;
            } else if pr.selected_line >= menu.top_line + displayed {
                menu.top_line = pr.selected_line - displayed + 1;
            }
            let all: Vec<String> = self.display.wrap(&pr.post);
            let upper = (menu.top_line + displayed).min(all.len());
            let mut sub: Vec<String> = all[menu.top_line.min(all.len())..upper].to_vec();
            sub.push(format!(
                "{}rows {} to {} of {}{}",
                ansi::FG_CYAN,
                menu.top_line + 1,
                upper,
                all.len(),
                ansi::FG_DEFAULT
            ));
            menu.computed = sub.join("\n");
        } else {
            menu.computed = pr.post.clone();
        }
        menu.lines = pr.lines.max(1);
        menu.columns = (menu.possible.len() + menu.lines - 1) / menu.lines;
    }

    //
    // List
    //

    fn do_list(&mut self, mut possible: Vec<Candidate>) {
        merge_candidates(&mut possible);

        let mut with_prompt = String::new();
        with_prompt.push_str(&self.prompt);
        with_prompt.push_str(&self.buf.to_string());
        let text = self.insert_secondary_prompts(&with_prompt, &mut Vec::new(), true);
        let prompt_lines = self.display.wrap(&text).len();
        let rows = self.size.rows as usize;

        let pr = self.compute_post(&possible, None, None);
        let list_max = self.get_int(LIST_MAX, DEFAULT_LIST_MAX).max(0) as usize;
        if (list_max > 0 && possible.len() >= list_max) || pr.lines + prompt_lines >= rows {
            // Ask before scrolling a big list past the screen.
            self.post = None;
            let old_cursor = self.buf.cursor();
            self.buf.set_cursor(self.buf.length());
            let _ = self.redisplay_flush(true);
            self.buf.set_cursor(old_cursor);
            self.println();
            let message = format!(
                "{}: do you wish to see all {} possibilities ({} lines)?",
                self.app_name(),
                possible.len(),
                pr.lines
            );
            self.print(&message);
            let _ = self.term.flush();
            let c = self.read_raw_char();
            if !matches!(c, Some('y') | Some('Y') | Some('\t')) {
                self.println();
                return;
            }
        }
        if pr.lines + prompt_lines >= rows {
            // Too tall for a post area: print above the edit line.
            self.post = None;
            let old_cursor = self.buf.cursor();
            self.buf.set_cursor(self.buf.length());
            let _ = self.redisplay_flush(false);
            self.buf.set_cursor(old_cursor);
            self.println();
            self.println_str(&pr.post);
            self.redraw_line();
        } else {
            self.post = Some(pr.post);
        }
    }

    //
    // Grid layout
    //

    // Order candidates into groups and lay them out in columns. When
    // `ordered` is given it receives the candidates in display order.
    fn compute_post(
        &self,
        possible: &[Candidate],
        selection: Option<&Candidate>,
        ordered: Option<&mut Vec<Candidate>>,
    ) -> PostResult {
        let mut items: Vec<PostItem> = Vec::new();
        let mut ordered_out: Vec<Candidate> = Vec::new();
        if self.is_set(ReaderOption::Group) {
            // Candidates are grouped by their group name, groups in
            // first-seen order, values sorted inside each group.
            let mut group_order: Vec<String> = Vec::new();
            let mut grouped: BTreeMap<String, BTreeMap<String, Candidate>> = BTreeMap::new();
            for cand in possible {
                let group = cand.group.clone().unwrap_or_default();
                if !grouped.contains_key(&group) {
                    group_order.push(group.clone());
                }
                grouped
                    .entry(group)
                    .or_default()
                    .insert(cand.value.clone(), cand.clone());
            }
            let many = group_order.len() > 1;
            for group in group_order {
                let members = grouped.remove(&group).unwrap_or_default();
                let label = if group.is_empty() && many {
                    "others".to_string()
                } else {
                    group.clone()
                };
                if !label.is_empty() {
                    items.push(PostItem::Group(label));
                }
                let cands: Vec<Candidate> = members.into_values().collect();
                ordered_out.extend(cands.iter().cloned());
                items.push(PostItem::Candidates(cands));
            }
        } else {
            let mut groups: Vec<String> = Vec::new();
            let mut sorted: BTreeMap<String, Candidate> = BTreeMap::new();
            for cand in possible {
                if let Some(group) = &cand.group {
                    if !groups.contains(group) {
                        groups.push(group.clone());
                    }
                }
                sorted.insert(cand.value.clone(), cand.clone());
            }
            for group in groups {
                items.push(PostItem::Group(group));
            }
            let cands: Vec<Candidate> = sorted.into_values().collect();
            ordered_out.extend(cands.iter().cloned());
            items.push(PostItem::Candidates(cands));
        }
        if let Some(out) = ordered {
            *out = ordered_out;
        }
        self.to_columns(&items, selection)
    }

    fn to_columns(&self, items: &[PostItem], selection: Option<&Candidate>) -> PostResult {
        let width = self.display.columns();
        // Compute the column width from the widest cell.
        let mut max_width = 0;
        for item in items {
            match item {
                PostItem::Group(name) => {
                    max_width = max_width.max(ansi::display_width(name));
                }
                PostItem::Candidates(cands) => {
                    for cand in cands {
                        let mut len = ansi::display_width(&cand.displ);
                        if let Some(descr) = &cand.descr {
                            len += MARGIN_BETWEEN_DISPLAY_AND_DESC
                                + DESC_PREFIX.len()
                                + ansi::display_width(descr)
                                + DESC_SUFFIX.len();
                        }
                        max_width = max_width.max(len);
                    }
                }
            }
        }
        let mut out = String::new();
        let mut total_lines = 0;
        let mut selected_line = 0;
        for item in items {
            match item {
                PostItem::Group(name) => {
                    out.push_str(ansi::FG_CYAN);
                    out.push_str(name);
                    out.push_str(ansi::FG_DEFAULT);
                    out.push('\n');
                    total_lines += 1;
                }
                PostItem::Candidates(cands) => {
                    self.candidates_to_columns(
                        cands,
                        width,
                        max_width,
                        selection,
                        &mut out,
                        &mut total_lines,
                        &mut selected_line,
                    );
                }
            }
        }
        if out.ends_with('\n') {
            out.pop();
        }
        PostResult {
            post: out,
            lines: total_lines,
            selected_line,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn candidates_to_columns(
        &self,
        candidates: &[Candidate],
        width: usize,
        max_width: usize,
        selection: Option<&Candidate>,
        out: &mut String,
        total_lines: &mut usize,
        selected_line: &mut usize,
    ) {
        let max_width = max_width.min(width).max(1);
        // The largest column count whose cells and margins fit.
        let mut columns = (width / max_width).max(1);
        while columns > 1 && columns * max_width + (columns - 1) * MARGIN_BETWEEN_COLUMNS >= width {
            columns -= 1;
        }
        let lines = (candidates.len() + columns - 1) / columns;
        let rows_first = self.is_set(ReaderOption::ListRowsFirst);
        let index = |i: usize, j: usize| {
            if rows_first {
                i * columns + j
            } else {
                j * lines + i
            }
        };
        for i in 0..lines {
            for j in 0..columns {
                let idx = index(i, j);
                if idx >= candidates.len() {
                    continue;
                }
                let cand = &candidates[idx];
                let has_right_item = j + 1 < columns && index(i, j + 1) < candidates.len();
                let left = cand.displ.clone();
                let lw = ansi::display_width(&left);
                let mut right = cand.descr.clone();
                let mut rw = 0;
                if let Some(descr) = right.take() {
                    let rem = max_width.saturating_sub(
                        lw + MARGIN_BETWEEN_DISPLAY_AND_DESC
                            + DESC_PREFIX.len()
                            + DESC_SUFFIX.len(),
                    );
                    let mut descr = descr;
                    if ansi::display_width(&descr) > rem {
                        descr = format!("{}…", ansi::cut(&descr, rem.saturating_sub(1)));
                    }
                    rw = ansi::display_width(&descr) + DESC_PREFIX.len() + DESC_SUFFIX.len();
                    right = Some(format!("{DESC_PREFIX}{descr}{DESC_SUFFIX}"));
                }
                let selected = selection.is_some_and(|s| s == cand);
                if selected {
                    *selected_line = i;
                    out.push_str(ansi::REVERSE_VIDEO);
                    out.push_str(&ansi::strip(&left));
                    for _ in 0..max_width.saturating_sub(lw + rw) {
                        out.push(' ');
                    }
                    if let Some(right) = &right {
                        out.push_str(&ansi::strip(right));
                    }
                    out.push_str(ansi::RESET_ATTRIBUTES);
                } else {
                    out.push_str(&left);
                    if right.is_some() || has_right_item {
                        for _ in 0..max_width.saturating_sub(lw + rw) {
                            out.push(' ');
                        }
                    }
                    if let Some(right) = &right {
                        out.push_str(ansi::FG_BRIGHT_BLACK);
                        out.push_str(right);
                        out.push_str(ansi::FG_DEFAULT);
                    }
                }
                if has_right_item {
                    for _ in 0..MARGIN_BETWEEN_COLUMNS {
                        out.push(' ');
                    }
                }
            }
            out.push('\n');
        }
        *total_lines += lines;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchPass {
    Starts,
    Contains,
    Typo,
}

fn normalize(s: &str, case_insensitive: bool) -> String {
    if case_insensitive {
        s.to_lowercase()
    } else {
        s.to_string()
    }
}

// Candidate prefix of the word's length within `errors` edits.
fn typo_matches(key: &str, word: &str, errors: usize) -> bool {
    if word.is_empty() {
        return false;
    }
    let word_len = word.chars().count();
    let prefix: String = key.chars().take(word_len).collect();
    levenshtein(word, &prefix) < errors
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Longest common prefix of two strings, optionally case-insensitive.
/// The result keeps the first string's characters.
pub(crate) fn common_start(s1: &str, s2: &str, case_insensitive: bool) -> String {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let mut len = 0;
    while len < a.len().min(b.len()) {
        let (mut c1, mut c2) = (a[len], b[len]);
        if c1 != c2 && case_insensitive {
            c1 = c1.to_uppercase().next().unwrap_or(c1);
            c2 = c2.to_uppercase().next().unwrap_or(c2);
            if c1 != c2 {
                c1 = c1.to_lowercase().next().unwrap_or(c1);
                c2 = c2.to_lowercase().next().unwrap_or(c2);
            }
        }
        if c1 != c2 {
            break;
        }
        len += 1;
    }
    a[..len].iter().collect()
}

// Candidates sharing a key are folded into a single row: values
// sorted, display strings joined with spaces, metadata from the first.
fn merge_candidates(possible: &mut Vec<Candidate>) {
    let mut keyed: BTreeMap<String, Vec<Candidate>> = BTreeMap::new();
    for cand in possible.iter() {
        if let Some(key) = &cand.key {
            keyed.entry(key.clone()).or_default().push(cand.clone());
        }
    }
    if keyed.is_empty() {
        return;
    }
    possible.retain(|c| c.key.is_none());
    for (_, mut cands) in keyed {
        cands.sort_by(|a, b| a.value.cmp(&b.value));
        let first = cands[0].clone();
        let displ = cands
            .iter()
            .map(|c| c.displ.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        possible.push(Candidate::full(
            first.value,
            displ,
            first.group,
            first.descr,
            first.suffix,
            None,
            first.complete,
        ));
    }
}

#[cfg(test)]
#[path = "complete_tests.rs"]
mod tests;
