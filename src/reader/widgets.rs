//! Widget registry
//! Named editing operations and the builtin name → implementation table
//!
//! A widget is a zero-argument, side-effecting operation returning
//! success. Builtins are function pointers into the reader; users may
//! replace any name with their own closure.

use std::collections::HashMap;
use std::sync::Arc;

use crate::reader::LineReader;
use crate::term::Terminal;

// Widget names, bound by the default key maps.
pub const ACCEPT_LINE: &str = "accept-line";
pub const ARGUMENT_BASE: &str = "argument-base";
pub const BACKWARD_CHAR: &str = "backward-char";
pub const BACKWARD_DELETE_CHAR: &str = "backward-delete-char";
pub const BACKWARD_DELETE_WORD: &str = "backward-delete-word";
pub const BACKWARD_KILL_LINE: &str = "backward-kill-line";
pub const BACKWARD_KILL_WORD: &str = "backward-kill-word";
pub const BACKWARD_WORD: &str = "backward-word";
pub const BEEP: &str = "beep";
pub const BEGINNING_OF_BUFFER_OR_HISTORY: &str = "beginning-of-buffer-or-history";
pub const BEGINNING_OF_HISTORY: &str = "beginning-of-history";
pub const BEGINNING_OF_LINE: &str = "beginning-of-line";
pub const BEGINNING_OF_LINE_HIST: &str = "beginning-of-line-hist";
pub const CAPITALIZE_WORD: &str = "capitalize-word";
pub const CHARACTER_SEARCH: &str = "character-search";
pub const CHARACTER_SEARCH_BACKWARD: &str = "character-search-backward";
pub const CLEAR_SCREEN: &str = "clear-screen";
pub const COMPLETE_PREFIX: &str = "complete-prefix";
pub const COMPLETE_WORD: &str = "complete-word";
pub const COPY_PREV_WORD: &str = "copy-prev-word";
pub const COPY_REGION_AS_KILL: &str = "copy-region-as-kill";
pub const DEACTIVATE_REGION: &str = "deactivate-region";
pub const DELETE_CHAR: &str = "delete-char";
pub const DELETE_CHAR_OR_LIST: &str = "delete-char-or-list";
pub const DELETE_WORD: &str = "delete-word";
pub const DIGIT_ARGUMENT: &str = "digit-argument";
pub const DO_LOWERCASE_VERSION: &str = "do-lowercase-version";
pub const DOWN_CASE_WORD: &str = "down-case-word";
pub const DOWN_HISTORY: &str = "down-history";
pub const DOWN_LINE: &str = "down-line";
pub const DOWN_LINE_OR_HISTORY: &str = "down-line-or-history";
pub const DOWN_LINE_OR_SEARCH: &str = "down-line-or-search";
pub const EMACS_BACKWARD_WORD: &str = "emacs-backward-word";
pub const EMACS_EDITING_MODE: &str = "emacs-editing-mode";
pub const EMACS_FORWARD_WORD: &str = "emacs-forward-word";
pub const END_OF_BUFFER_OR_HISTORY: &str = "end-of-buffer-or-history";
pub const END_OF_HISTORY: &str = "end-of-history";
pub const END_OF_LINE: &str = "end-of-line";
pub const END_OF_LINE_HIST: &str = "end-of-line-hist";
pub const EXCHANGE_POINT_AND_MARK: &str = "exchange-point-and-mark";
pub const FORWARD_CHAR: &str = "forward-char";
pub const FORWARD_WORD: &str = "forward-word";
pub const HISTORY_INCREMENTAL_SEARCH_BACKWARD: &str = "history-incremental-search-backward";
pub const HISTORY_INCREMENTAL_SEARCH_FORWARD: &str = "history-incremental-search-forward";
pub const HISTORY_SEARCH_BACKWARD: &str = "history-search-backward";
pub const HISTORY_SEARCH_FORWARD: &str = "history-search-forward";
pub const INSERT_CLOSE_CURLY: &str = "insert-close-curly";
pub const INSERT_CLOSE_PAREN: &str = "insert-close-paren";
pub const INSERT_CLOSE_SQUARE: &str = "insert-close-square";
pub const INSERT_COMMENT: &str = "insert-comment";
pub const KILL_BUFFER: &str = "kill-buffer";
pub const KILL_LINE: &str = "kill-line";
pub const KILL_REGION: &str = "kill-region";
pub const KILL_WHOLE_LINE: &str = "kill-whole-line";
pub const KILL_WORD: &str = "kill-word";
pub const LIST_CHOICES: &str = "list-choices";
pub const MAGIC_SPACE: &str = "magic-space";
pub const MENU_COMPLETE: &str = "menu-complete";
pub const NEG_ARGUMENT: &str = "neg-argument";
pub const OVERWRITE_MODE: &str = "overwrite-mode";
pub const PUT_REPLACE_SELECTION: &str = "put-replace-selection";
pub const QUOTED_INSERT: &str = "quoted-insert";
pub const REDISPLAY: &str = "redisplay";
pub const REDO: &str = "redo";
pub const REVERSE_MENU_COMPLETE: &str = "reverse-menu-complete";
pub const SELF_INSERT: &str = "self-insert";
pub const SELF_INSERT_UNMETA: &str = "self-insert-unmeta";
pub const SEND_BREAK: &str = "send-break";
pub const SET_MARK_COMMAND: &str = "set-mark-command";
pub const TRANSPOSE_CHARS: &str = "transpose-chars";
pub const TRANSPOSE_WORDS: &str = "transpose-words";
pub const UNDEFINED_KEY: &str = "undefined-key";
pub const UNDO: &str = "undo";
pub const UNIVERSAL_ARGUMENT: &str = "universal-argument";
pub const UP_CASE_WORD: &str = "up-case-word";
pub const UP_HISTORY: &str = "up-history";
pub const UP_LINE: &str = "up-line";
pub const UP_LINE_OR_HISTORY: &str = "up-line-or-history";
pub const UP_LINE_OR_SEARCH: &str = "up-line-or-search";
pub const VI_ADD_EOL: &str = "vi-add-eol";
pub const VI_ADD_NEXT: &str = "vi-add-next";
pub const VI_BACKWARD_BLANK_WORD: &str = "vi-backward-blank-word";
pub const VI_BACKWARD_BLANK_WORD_END: &str = "vi-backward-blank-word-end";
pub const VI_BACKWARD_CHAR: &str = "vi-backward-char";
pub const VI_BACKWARD_DELETE_CHAR: &str = "vi-backward-delete-char";
pub const VI_BACKWARD_KILL_WORD: &str = "vi-backward-kill-word";
pub const VI_BACKWARD_WORD: &str = "vi-backward-word";
pub const VI_BACKWARD_WORD_END: &str = "vi-backward-word-end";
pub const VI_BEGINNING_OF_LINE: &str = "vi-beginning-of-line";
pub const VI_CHANGE: &str = "vi-change-to";
pub const VI_CHANGE_EOL: &str = "vi-change-eol";
pub const VI_CHANGE_WHOLE_LINE: &str = "vi-change-whole-line";
pub const VI_CMD_MODE: &str = "vi-cmd-mode";
pub const VI_DELETE: &str = "vi-delete-to";
pub const VI_DELETE_CHAR: &str = "vi-delete-char";
pub const VI_DIGIT_OR_BEGINNING_OF_LINE: &str = "vi-digit-or-beginning-of-line";
pub const VI_DOWN_LINE_OR_HISTORY: &str = "vi-down-line-or-history";
pub const VI_END_OF_LINE: &str = "vi-end-of-line";
pub const VI_FETCH_HISTORY: &str = "vi-fetch-history";
pub const VI_FIND_NEXT_CHAR: &str = "vi-find-next-char";
pub const VI_FIND_NEXT_CHAR_SKIP: &str = "vi-find-next-char-skip";
pub const VI_FIND_PREV_CHAR: &str = "vi-find-prev-char";
pub const VI_FIND_PREV_CHAR_SKIP: &str = "vi-find-prev-char-skip";
pub const VI_FIRST_NON_BLANK: &str = "vi-first-non-blank";
pub const VI_FORWARD_BLANK_WORD: &str = "vi-forward-blank-word";
pub const VI_FORWARD_BLANK_WORD_END: &str = "vi-forward-blank-word-end";
pub const VI_FORWARD_CHAR: &str = "vi-forward-char";
pub const VI_FORWARD_WORD: &str = "vi-forward-word";
pub const VI_FORWARD_WORD_END: &str = "vi-forward-word-end";
pub const VI_GOTO_COLUMN: &str = "vi-goto-column";
pub const VI_HISTORY_SEARCH_BACKWARD: &str = "vi-history-search-backward";
pub const VI_HISTORY_SEARCH_FORWARD: &str = "vi-history-search-forward";
pub const VI_INSERT: &str = "vi-insert";
pub const VI_INSERT_BOL: &str = "vi-insert-bol";
pub const VI_INSERT_COMMENT: &str = "vi-insert-comment";
pub const VI_KILL_EOL: &str = "vi-kill-eol";
pub const VI_KILL_LINE: &str = "vi-kill-line";
pub const VI_MATCH_BRACKET: &str = "vi-match-bracket";
pub const VI_OPER_SWAP_CASE: &str = "vi-oper-swap-case";
pub const VI_PUT_AFTER: &str = "vi-put-after";
pub const VI_QUOTED_INSERT: &str = "vi-quoted-insert";
pub const VI_REPEAT_CHANGE: &str = "vi-repeat-change";
pub const VI_REPEAT_FIND: &str = "vi-repeat-find";
pub const VI_REPEAT_SEARCH: &str = "vi-repeat-search";
pub const VI_REPLACE: &str = "vi-replace";
pub const VI_REPLACE_CHARS: &str = "vi-replace-chars";
pub const VI_REV_REPEAT_FIND: &str = "vi-rev-repeat-find";
pub const VI_REV_REPEAT_SEARCH: &str = "vi-rev-repeat-search";
pub const VI_SUBSTITUTE: &str = "vi-substitute";
pub const VI_SWAP_CASE: &str = "vi-swap-case";
pub const VI_UP_LINE_OR_HISTORY: &str = "vi-up-line-or-history";
pub const VI_YANK: &str = "vi-yank-to";
pub const VISUAL_LINE_MODE: &str = "visual-line-mode";
pub const VISUAL_MODE: &str = "visual-mode";
pub const WHAT_CURSOR_POSITION: &str = "what-cursor-position";
pub const YANK: &str = "yank";
pub const YANK_POP: &str = "yank-pop";

// Callback widgets invoked by the dispatcher when registered.
pub const CALLBACK_INIT: &str = "callback-init";
pub const CALLBACK_FINISH: &str = "callback-finish";
pub const CALLBACK_KEYMAP: &str = "callback-keymap";

/// Builtin widget implementation.
pub type WidgetFn<T> = fn(&mut LineReader<T>) -> bool;

/// A named editing operation.
pub enum Widget<T: Terminal> {
    Builtin(WidgetFn<T>),
    User(Arc<dyn Fn(&mut LineReader<T>) -> bool>),
}

impl<T: Terminal> Clone for Widget<T> {
    fn clone(&self) -> Self {
        match self {
            Widget::Builtin(f) => Widget::Builtin(*f),
            Widget::User(f) => Widget::User(Arc::clone(f)),
        }
    }
}

impl<T: Terminal> Widget<T> {
    pub fn apply(&self, reader: &mut LineReader<T>) -> bool {
        match self {
            Widget::Builtin(f) => f(reader),
            Widget::User(f) => f(reader),
        }
    }
}

/// The builtin widget table. Every name here is bound somewhere in the
/// default key maps or callable through `call_widget`.
pub fn builtin_widgets<T: Terminal>() -> HashMap<String, Widget<T>> {
    let mut w: HashMap<String, Widget<T>> = HashMap::new();
    let mut put = |name: &str, f: WidgetFn<T>| {
        w.insert(name.to_string(), Widget::Builtin(f));
    };
    put(ACCEPT_LINE, LineReader::accept_line);
    put(ARGUMENT_BASE, LineReader::argument_base);
    put(BACKWARD_CHAR, LineReader::backward_char);
    put(BACKWARD_DELETE_CHAR, LineReader::backward_delete_char);
    put(BACKWARD_DELETE_WORD, LineReader::backward_delete_word);
    put(BACKWARD_KILL_LINE, LineReader::backward_kill_line);
    put(BACKWARD_KILL_WORD, LineReader::backward_kill_word);
    put(BACKWARD_WORD, LineReader::backward_word);
    put(BEEP, LineReader::beep);
    put(
        BEGINNING_OF_BUFFER_OR_HISTORY,
        LineReader::beginning_of_buffer_or_history,
    );
    put(BEGINNING_OF_HISTORY, LineReader::beginning_of_history);
    put(BEGINNING_OF_LINE, LineReader::beginning_of_line);
    put(BEGINNING_OF_LINE_HIST, LineReader::beginning_of_line_hist);
    put(CAPITALIZE_WORD, LineReader::capitalize_word);
    put(CHARACTER_SEARCH, LineReader::character_search);
    put(
        CHARACTER_SEARCH_BACKWARD,
        LineReader::character_search_backward,
    );
    put(CLEAR_SCREEN, LineReader::clear_screen);
    put(COMPLETE_PREFIX, LineReader::complete_prefix);
    put(COMPLETE_WORD, LineReader::complete_word);
    put(COPY_PREV_WORD, LineReader::copy_prev_word);
    put(COPY_REGION_AS_KILL, LineReader::copy_region_as_kill);
    put(DEACTIVATE_REGION, LineReader::deactivate_region);
    put(DELETE_CHAR, LineReader::delete_char);
    put(DELETE_CHAR_OR_LIST, LineReader::delete_char_or_list);
    put(DELETE_WORD, LineReader::delete_word);
    put(DIGIT_ARGUMENT, LineReader::digit_argument);
    put(DO_LOWERCASE_VERSION, LineReader::do_lowercase_version);
    put(DOWN_CASE_WORD, LineReader::down_case_word);
    put(DOWN_HISTORY, LineReader::down_history);
    put(DOWN_LINE, LineReader::down_line);
    put(DOWN_LINE_OR_HISTORY, LineReader::down_line_or_history);
    put(DOWN_LINE_OR_SEARCH, LineReader::down_line_or_search);
    put(EMACS_BACKWARD_WORD, LineReader::emacs_backward_word);
    put(EMACS_EDITING_MODE, LineReader::emacs_editing_mode);
    put(EMACS_FORWARD_WORD, LineReader::emacs_forward_word);
    put(END_OF_BUFFER_OR_HISTORY, LineReader::end_of_buffer_or_history);
    put(END_OF_HISTORY, LineReader::end_of_history);
    put(END_OF_LINE, LineReader::end_of_line);
    put(END_OF_LINE_HIST, LineReader::end_of_line_hist);
    put(EXCHANGE_POINT_AND_MARK, LineReader::exchange_point_and_mark);
    put(FORWARD_CHAR, LineReader::forward_char);
    put(FORWARD_WORD, LineReader::forward_word);
    put(
        HISTORY_INCREMENTAL_SEARCH_BACKWARD,
        LineReader::history_incremental_search_backward,
    );
    put(
        HISTORY_INCREMENTAL_SEARCH_FORWARD,
        LineReader::history_incremental_search_forward,
    );
    put(HISTORY_SEARCH_BACKWARD, LineReader::history_search_backward);
    put(HISTORY_SEARCH_FORWARD, LineReader::history_search_forward);
    put(INSERT_CLOSE_CURLY, LineReader::insert_close_curly);
    put(INSERT_CLOSE_PAREN, LineReader::insert_close_paren);
    put(INSERT_CLOSE_SQUARE, LineReader::insert_close_square);
    put(INSERT_COMMENT, LineReader::insert_comment);
    put(KILL_BUFFER, LineReader::kill_buffer);
    put(KILL_LINE, LineReader::kill_line);
    put(KILL_REGION, LineReader::kill_region);
    put(KILL_WHOLE_LINE, LineReader::kill_whole_line);
    put(KILL_WORD, LineReader::kill_word);
    put(LIST_CHOICES, LineReader::list_choices);
    put(MAGIC_SPACE, LineReader::magic_space);
    put(MENU_COMPLETE, LineReader::menu_complete);
    put(NEG_ARGUMENT, LineReader::neg_argument);
    put(OVERWRITE_MODE, LineReader::overwrite_mode);
    put(PUT_REPLACE_SELECTION, LineReader::put_replace_selection);
    put(QUOTED_INSERT, LineReader::quoted_insert);
    put(REDISPLAY, LineReader::redisplay);
    put(REDO, LineReader::redo);
    put(SELF_INSERT, LineReader::self_insert);
    put(SELF_INSERT_UNMETA, LineReader::self_insert_unmeta);
    put(SEND_BREAK, LineReader::send_break);
    put(SET_MARK_COMMAND, LineReader::set_mark_command);
    put(TRANSPOSE_CHARS, LineReader::transpose_chars);
    put(TRANSPOSE_WORDS, LineReader::transpose_words);
    put(UNDEFINED_KEY, LineReader::undefined_key);
    put(UNDO, LineReader::undo);
    put(UNIVERSAL_ARGUMENT, LineReader::universal_argument);
    put(UP_CASE_WORD, LineReader::up_case_word);
    put(UP_HISTORY, LineReader::up_history);
    put(UP_LINE, LineReader::up_line);
    put(UP_LINE_OR_HISTORY, LineReader::up_line_or_history);
    put(UP_LINE_OR_SEARCH, LineReader::up_line_or_search);
    put(VI_ADD_EOL, LineReader::vi_add_eol);
    put(VI_ADD_NEXT, LineReader::vi_add_next);
    put(VI_BACKWARD_BLANK_WORD, LineReader::vi_backward_blank_word);
    put(
        VI_BACKWARD_BLANK_WORD_END,
        LineReader::vi_backward_blank_word_end,
    );
    put(VI_BACKWARD_CHAR, LineReader::vi_backward_char);
    put(VI_BACKWARD_DELETE_CHAR, LineReader::vi_backward_delete_char);
    put(VI_BACKWARD_KILL_WORD, LineReader::vi_backward_kill_word);
    put(VI_BACKWARD_WORD, LineReader::vi_backward_word);
    put(VI_BACKWARD_WORD_END, LineReader::vi_backward_word_end);
    put(VI_BEGINNING_OF_LINE, LineReader::vi_beginning_of_line);
    put(VI_CHANGE, LineReader::vi_change);
    put(VI_CHANGE_EOL, LineReader::vi_change_eol);
    put(VI_CHANGE_WHOLE_LINE, LineReader::vi_change_whole_line);
    put(VI_CMD_MODE, LineReader::vi_cmd_mode);
    put(VI_DELETE, LineReader::vi_delete);
    put(VI_DELETE_CHAR, LineReader::vi_delete_char);
    put(
        VI_DIGIT_OR_BEGINNING_OF_LINE,
        LineReader::vi_digit_or_beginning_of_line,
    );
    put(VI_DOWN_LINE_OR_HISTORY, LineReader::vi_down_line_or_history);
    put(VI_END_OF_LINE, LineReader::vi_end_of_line);
    put(VI_FETCH_HISTORY, LineReader::vi_fetch_history);
    put(VI_FIND_NEXT_CHAR, LineReader::vi_find_next_char);
    put(VI_FIND_NEXT_CHAR_SKIP, LineReader::vi_find_next_char_skip);
    put(VI_FIND_PREV_CHAR, LineReader::vi_find_prev_char);
    put(VI_FIND_PREV_CHAR_SKIP, LineReader::vi_find_prev_char_skip);
    put(VI_FIRST_NON_BLANK, LineReader::vi_first_non_blank);
    put(VI_FORWARD_BLANK_WORD, LineReader::vi_forward_blank_word);
    put(
        VI_FORWARD_BLANK_WORD_END,
        LineReader::vi_forward_blank_word_end,
    );
    put(VI_FORWARD_CHAR, LineReader::vi_forward_char);
    put(VI_FORWARD_WORD, LineReader::vi_forward_word);
    put(VI_FORWARD_WORD_END, LineReader::vi_forward_word_end);
    put(VI_GOTO_COLUMN, LineReader::vi_goto_column);
    put(
        VI_HISTORY_SEARCH_BACKWARD,
        LineReader::vi_history_search_backward,
    );
    put(
        VI_HISTORY_SEARCH_FORWARD,
        LineReader::vi_history_search_forward,
    );
    put(VI_INSERT, LineReader::vi_insert);
    put(VI_INSERT_BOL, LineReader::vi_insert_bol);
    put(VI_INSERT_COMMENT, LineReader::vi_insert_comment);
    put(VI_KILL_EOL, LineReader::vi_kill_eol);
    put(VI_KILL_LINE, LineReader::vi_kill_whole_line);
    put(VI_MATCH_BRACKET, LineReader::vi_match_bracket);
    put(VI_OPER_SWAP_CASE, LineReader::vi_oper_swap_case);
    put(VI_PUT_AFTER, LineReader::vi_put_after);
    put(VI_QUOTED_INSERT, LineReader::quoted_insert);
    put(VI_REPEAT_FIND, LineReader::vi_repeat_find);
    put(VI_REPEAT_SEARCH, LineReader::vi_repeat_search);
    put(VI_REPLACE, LineReader::vi_replace);
    put(VI_REPLACE_CHARS, LineReader::vi_replace_chars);
    put(VI_REV_REPEAT_FIND, LineReader::vi_rev_repeat_find);
    put(VI_REV_REPEAT_SEARCH, LineReader::vi_rev_repeat_search);
    put(VI_SUBSTITUTE, LineReader::vi_substitute);
    put(VI_SWAP_CASE, LineReader::vi_swap_case);
    put(VI_UP_LINE_OR_HISTORY, LineReader::vi_up_line_or_history);
    put(VI_YANK, LineReader::vi_yank);
    put(VISUAL_LINE_MODE, LineReader::visual_line_mode);
    put(VISUAL_MODE, LineReader::visual_mode);
    put(WHAT_CURSOR_POSITION, LineReader::what_cursor_position);
    put(YANK, LineReader::yank);
    put(YANK_POP, LineReader::yank_pop);
    w
}
