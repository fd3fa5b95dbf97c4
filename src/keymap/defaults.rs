//! Default key maps
//! The emacs, viins, vicmd, menu, visual, viopp and safe binding tables

use std::collections::HashMap;

use crate::keymap::{KeyMap, EMACS, MAIN, MENU, SAFE, VICMD, VIINS, VIOPP, VISUAL};
use crate::keys::{alt, alt_seq, ctrl_key, del, esc, range, translate};
use crate::reader::widgets::*;
use crate::term::Attributes;

// Sequences sent by cursor and editing keys, in both normal and keypad
// application mode where they differ.
const KEY_UP: [&str; 2] = ["\x1b[A", "\x1bOA"];
const KEY_DOWN: [&str; 2] = ["\x1b[B", "\x1bOB"];
const KEY_RIGHT: [&str; 2] = ["\x1b[C", "\x1bOC"];
const KEY_LEFT: [&str; 2] = ["\x1b[D", "\x1bOD"];
const KEY_HOME: [&str; 2] = ["\x1b[H", "\x1bOH"];
const KEY_END: [&str; 2] = ["\x1b[F", "\x1bOF"];
const KEY_DELETE: &str = "\x1b[3~";
const KEY_INSERT: &str = "\x1b[2~";
const BACK_TAB: &str = "\x1b[Z";

/// Build the standard key maps. `main` starts out as a copy of `emacs`.
pub fn default_keymaps(attrs: Attributes, bind_tty_special_chars: bool) -> HashMap<String, KeyMap> {
    let mut maps = HashMap::new();
    maps.insert(EMACS.to_string(), emacs());
    maps.insert(VICMD.to_string(), vi_cmd());
    maps.insert(VIINS.to_string(), vi_insertion());
    maps.insert(MENU.to_string(), menu());
    maps.insert(VIOPP.to_string(), vi_opp());
    maps.insert(VISUAL.to_string(), visual());
    maps.insert(SAFE.to_string(), safe());
    if bind_tty_special_chars {
        for name in [EMACS, VIINS] {
            if let Some(map) = maps.get_mut(name) {
                bind_tty_chars(map, attrs);
            }
        }
    }
    let main = maps.get(EMACS).cloned().unwrap_or_default();
    maps.insert(MAIN.to_string(), main);
    maps
}

pub fn emacs() -> KeyMap {
    let mut map = KeyMap::new();
    map.bind(SET_MARK_COMMAND, &ctrl_key('@'));
    map.bind(BEGINNING_OF_LINE, &ctrl_key('A'));
    map.bind(BACKWARD_CHAR, &ctrl_key('B'));
    map.bind(DELETE_CHAR_OR_LIST, &ctrl_key('D'));
    map.bind(END_OF_LINE, &ctrl_key('E'));
    map.bind(FORWARD_CHAR, &ctrl_key('F'));
    map.bind(SEND_BREAK, &ctrl_key('G'));
    map.bind(BACKWARD_DELETE_CHAR, &ctrl_key('H'));
    map.bind(COMPLETE_WORD, &ctrl_key('I'));
    map.bind(ACCEPT_LINE, &ctrl_key('J'));
    map.bind(KILL_LINE, &ctrl_key('K'));
    map.bind(CLEAR_SCREEN, &ctrl_key('L'));
    map.bind(ACCEPT_LINE, &ctrl_key('M'));
    map.bind(DOWN_LINE_OR_HISTORY, &ctrl_key('N'));
    map.bind(UP_LINE_OR_HISTORY, &ctrl_key('P'));
    map.bind(HISTORY_INCREMENTAL_SEARCH_BACKWARD, &ctrl_key('R'));
    map.bind(HISTORY_INCREMENTAL_SEARCH_FORWARD, &ctrl_key('S'));
    map.bind(TRANSPOSE_CHARS, &ctrl_key('T'));
    map.bind(KILL_WHOLE_LINE, &ctrl_key('U'));
    map.bind(QUOTED_INSERT, &ctrl_key('V'));
    map.bind(BACKWARD_KILL_WORD, &ctrl_key('W'));
    map.bind(YANK, &ctrl_key('Y'));
    map.bind(CHARACTER_SEARCH, &ctrl_key(']'));
    map.bind(UNDO, &ctrl_key('_'));
    map.bind_all(SELF_INSERT, range(" -~"));
    map.bind(INSERT_CLOSE_PAREN, ")");
    map.bind(INSERT_CLOSE_SQUARE, "]");
    map.bind(INSERT_CLOSE_CURLY, "}");
    map.bind(BACKWARD_DELETE_CHAR, &del());
    map.bind(VI_MATCH_BRACKET, &translate("^X^B"));
    map.bind(SEND_BREAK, &translate("^X^G"));
    map.bind(OVERWRITE_MODE, &translate("^X^O"));
    map.bind(REDO, &translate("^X^R"));
    map.bind(UNDO, &translate("^X^U"));
    map.bind(VI_CMD_MODE, &translate("^X^V"));
    map.bind(EXCHANGE_POINT_AND_MARK, &translate("^X^X"));
    map.bind_all(DO_LOWERCASE_VERSION, range("^XA-^XZ"));
    map.bind(WHAT_CURSOR_POSITION, &translate("^X="));
    map.bind(KILL_LINE, &translate("^X^?"));
    map.bind(SEND_BREAK, &alt_seq(&ctrl_key('G')));
    map.bind(BACKWARD_KILL_WORD, &alt_seq(&ctrl_key('H')));
    map.bind(SELF_INSERT_UNMETA, &alt_seq(&ctrl_key('M')));
    map.bind(COMPLETE_WORD, &alt_seq(&esc()));
    map.bind(CHARACTER_SEARCH_BACKWARD, &alt_seq(&ctrl_key(']')));
    map.bind(COPY_PREV_WORD, &alt_seq(&ctrl_key('_')));
    map.bind(SET_MARK_COMMAND, &alt(' '));
    map.bind(NEG_ARGUMENT, &alt('-'));
    map.bind_all(DIGIT_ARGUMENT, range("\\E0-\\E9"));
    map.bind(BEGINNING_OF_HISTORY, &alt('<'));
    map.bind(LIST_CHOICES, &alt('='));
    map.bind(END_OF_HISTORY, &alt('>'));
    map.bind(LIST_CHOICES, &alt('?'));
    map.bind_all(DO_LOWERCASE_VERSION, range("^[A-^[Z"));
    map.bind(BACKWARD_WORD, &alt('b'));
    map.bind(CAPITALIZE_WORD, &alt('c'));
    map.bind(KILL_WORD, &alt('d'));
    map.bind(FORWARD_WORD, &alt('f'));
    map.bind(DOWN_CASE_WORD, &alt('l'));
    map.bind(HISTORY_SEARCH_FORWARD, &alt('n'));
    map.bind(HISTORY_SEARCH_BACKWARD, &alt('p'));
    map.bind(TRANSPOSE_WORDS, &alt('t'));
    map.bind(UP_CASE_WORD, &alt('u'));
    map.bind(YANK_POP, &alt('y'));
    map.bind(BACKWARD_KILL_WORD, &alt_seq(&del()));
    bind_arrow_keys(&mut map);
    for key in KEY_RIGHT {
        map.bind(FORWARD_WORD, &alt_seq(key));
    }
    for key in KEY_LEFT {
        map.bind(BACKWARD_WORD, &alt_seq(key));
    }
    map
}

pub fn vi_insertion() -> KeyMap {
    let mut map = KeyMap::new();
    map.bind_all(SELF_INSERT, range("^@-^_"));
    map.bind(LIST_CHOICES, &ctrl_key('D'));
    map.bind(SEND_BREAK, &ctrl_key('G'));
    map.bind(BACKWARD_DELETE_CHAR, &ctrl_key('H'));
    map.bind(COMPLETE_WORD, &ctrl_key('I'));
    map.bind(ACCEPT_LINE, &ctrl_key('J'));
    map.bind(CLEAR_SCREEN, &ctrl_key('L'));
    map.bind(ACCEPT_LINE, &ctrl_key('M'));
    map.bind(MENU_COMPLETE, &ctrl_key('N'));
    map.bind(REVERSE_MENU_COMPLETE, &ctrl_key('P'));
    map.bind(HISTORY_INCREMENTAL_SEARCH_BACKWARD, &ctrl_key('R'));
    map.bind(HISTORY_INCREMENTAL_SEARCH_FORWARD, &ctrl_key('S'));
    map.bind(TRANSPOSE_CHARS, &ctrl_key('T'));
    map.bind(KILL_WHOLE_LINE, &ctrl_key('U'));
    map.bind(QUOTED_INSERT, &ctrl_key('V'));
    map.bind(BACKWARD_KILL_WORD, &ctrl_key('W'));
    map.bind(YANK, &ctrl_key('Y'));
    map.bind(VI_CMD_MODE, &ctrl_key('['));
    map.bind(UNDO, &ctrl_key('_'));
    map.bind(
        HISTORY_INCREMENTAL_SEARCH_BACKWARD,
        &format!("{}r", ctrl_key('X')),
    );
    map.bind(
        HISTORY_INCREMENTAL_SEARCH_FORWARD,
        &format!("{}s", ctrl_key('X')),
    );
    map.bind_all(SELF_INSERT, range(" -~"));
    map.bind(INSERT_CLOSE_PAREN, ")");
    map.bind(INSERT_CLOSE_SQUARE, "]");
    map.bind(INSERT_CLOSE_CURLY, "}");
    map.bind(BACKWARD_DELETE_CHAR, &del());
    bind_arrow_keys(&mut map);
    map
}

pub fn vi_cmd() -> KeyMap {
    let mut map = KeyMap::new();
    map.bind(LIST_CHOICES, &ctrl_key('D'));
    map.bind(EMACS_EDITING_MODE, &ctrl_key('E'));
    map.bind(SEND_BREAK, &ctrl_key('G'));
    map.bind(VI_BACKWARD_CHAR, &ctrl_key('H'));
    map.bind(ACCEPT_LINE, &ctrl_key('J'));
    map.bind(KILL_LINE, &ctrl_key('K'));
    map.bind(CLEAR_SCREEN, &ctrl_key('L'));
    map.bind(ACCEPT_LINE, &ctrl_key('M'));
    map.bind(VI_DOWN_LINE_OR_HISTORY, &ctrl_key('N'));
    map.bind(VI_UP_LINE_OR_HISTORY, &ctrl_key('P'));
    map.bind(QUOTED_INSERT, &ctrl_key('Q'));
    map.bind(HISTORY_INCREMENTAL_SEARCH_BACKWARD, &ctrl_key('R'));
    map.bind(HISTORY_INCREMENTAL_SEARCH_FORWARD, &ctrl_key('S'));
    map.bind(TRANSPOSE_CHARS, &ctrl_key('T'));
    map.bind(KILL_WHOLE_LINE, &ctrl_key('U'));
    map.bind(QUOTED_INSERT, &ctrl_key('V'));
    map.bind(BACKWARD_KILL_WORD, &ctrl_key('W'));
    map.bind(YANK, &ctrl_key('Y'));
    map.bind(
        HISTORY_INCREMENTAL_SEARCH_BACKWARD,
        &format!("{}r", ctrl_key('X')),
    );
    map.bind(
        HISTORY_INCREMENTAL_SEARCH_FORWARD,
        &format!("{}s", ctrl_key('X')),
    );
    map.bind(SEND_BREAK, &alt_seq(&ctrl_key('G')));
    map.bind(BACKWARD_KILL_WORD, &alt_seq(&ctrl_key('H')));
    map.bind(SELF_INSERT_UNMETA, &alt_seq(&ctrl_key('M')));
    map.bind(COMPLETE_WORD, &alt_seq(&esc()));
    map.bind(CHARACTER_SEARCH_BACKWARD, &alt_seq(&ctrl_key(']')));
    map.bind(SET_MARK_COMMAND, &alt(' '));
    map.bind(DIGIT_ARGUMENT, &alt('-'));
    map.bind(BEGINNING_OF_HISTORY, &alt('<'));
    map.bind(LIST_CHOICES, &alt('='));
    map.bind(END_OF_HISTORY, &alt('>'));
    map.bind(LIST_CHOICES, &alt('?'));
    map.bind_all(DO_LOWERCASE_VERSION, range("^[A-^[Z"));
    map.bind(BACKWARD_WORD, &alt('b'));
    map.bind(CAPITALIZE_WORD, &alt('c'));
    map.bind(KILL_WORD, &alt('d'));
    map.bind(FORWARD_WORD, &alt('f'));
    map.bind(DOWN_CASE_WORD, &alt('l'));
    map.bind(HISTORY_SEARCH_FORWARD, &alt('n'));
    map.bind(HISTORY_SEARCH_BACKWARD, &alt('p'));
    map.bind(TRANSPOSE_WORDS, &alt('t'));
    map.bind(UP_CASE_WORD, &alt('u'));
    map.bind(YANK_POP, &alt('y'));
    map.bind(BACKWARD_KILL_WORD, &alt_seq(&del()));

    map.bind(FORWARD_CHAR, " ");
    map.bind(VI_INSERT_COMMENT, "#");
    map.bind(END_OF_LINE, "$");
    map.bind(VI_MATCH_BRACKET, "%");
    map.bind(VI_DOWN_LINE_OR_HISTORY, "+");
    map.bind(VI_REV_REPEAT_FIND, ",");
    map.bind(VI_UP_LINE_OR_HISTORY, "-");
    map.bind(VI_REPEAT_CHANGE, ".");
    map.bind(VI_HISTORY_SEARCH_BACKWARD, "/");
    map.bind(VI_DIGIT_OR_BEGINNING_OF_LINE, "0");
    map.bind_all(DIGIT_ARGUMENT, range("1-9"));
    map.bind(VI_REPEAT_FIND, ";");
    map.bind(LIST_CHOICES, "=");
    map.bind(VI_HISTORY_SEARCH_FORWARD, "?");
    map.bind(VI_ADD_EOL, "A");
    map.bind(VI_BACKWARD_BLANK_WORD, "B");
    map.bind(VI_CHANGE_EOL, "C");
    map.bind(VI_KILL_EOL, "D");
    map.bind(VI_FORWARD_BLANK_WORD_END, "E");
    map.bind(VI_FIND_PREV_CHAR, "F");
    map.bind(VI_FETCH_HISTORY, "G");
    map.bind(VI_INSERT_BOL, "I");
    map.bind(VI_REV_REPEAT_SEARCH, "N");
    map.bind(VI_PUT_AFTER, "P");
    map.bind(VI_REPLACE, "R");
    map.bind(VI_KILL_LINE, "S");
    map.bind(VI_FIND_PREV_CHAR_SKIP, "T");
    map.bind(REDO, "U");
    map.bind(VISUAL_LINE_MODE, "V");
    map.bind(VI_FORWARD_BLANK_WORD, "W");
    map.bind(VI_BACKWARD_DELETE_CHAR, "X");
    map.bind(VI_YANK, "Y");
    map.bind(VI_FIRST_NON_BLANK, "^");
    map.bind(VI_ADD_NEXT, "a");
    map.bind(VI_BACKWARD_WORD, "b");
    map.bind(VI_CHANGE, "c");
    map.bind(VI_DELETE, "d");
    map.bind(VI_FORWARD_WORD_END, "e");
    map.bind(VI_FIND_NEXT_CHAR, "f");
    map.bind(WHAT_CURSOR_POSITION, "ga");
    map.bind(VI_BACKWARD_BLANK_WORD_END, "gE");
    map.bind(VI_BACKWARD_WORD_END, "ge");
    map.bind(VI_BACKWARD_CHAR, "h");
    map.bind(VI_INSERT, "i");
    map.bind(DOWN_LINE_OR_HISTORY, "j");
    map.bind(UP_LINE_OR_HISTORY, "k");
    map.bind(VI_FORWARD_CHAR, "l");
    map.bind(VI_REPEAT_SEARCH, "n");
    map.bind(VI_PUT_AFTER, "p");
    map.bind(VI_REPLACE_CHARS, "r");
    map.bind(VI_SUBSTITUTE, "s");
    map.bind(VI_FIND_NEXT_CHAR_SKIP, "t");
    map.bind(UNDO, "u");
    map.bind(VISUAL_MODE, "v");
    map.bind(VI_FORWARD_WORD, "w");
    map.bind(VI_DELETE_CHAR, "x");
    map.bind(VI_YANK, "y");
    map.bind(VI_GOTO_COLUMN, "|");
    map.bind(VI_SWAP_CASE, "~");
    map.bind(VI_BACKWARD_CHAR, &del());

    bind_arrow_keys(&mut map);
    map
}

pub fn menu() -> KeyMap {
    let mut map = KeyMap::new();
    map.bind(MENU_COMPLETE, "\t");
    map.bind(REVERSE_MENU_COMPLETE, BACK_TAB);
    map.bind(ACCEPT_LINE, "\r");
    map.bind(ACCEPT_LINE, "\n");
    bind_arrow_keys(&mut map);
    map
}

pub fn safe() -> KeyMap {
    let mut map = KeyMap::new();
    map.bind_all(SELF_INSERT, range("^@-^?"));
    map.bind(ACCEPT_LINE, "\r");
    map.bind(ACCEPT_LINE, "\n");
    map.bind(SEND_BREAK, &ctrl_key('G'));
    map
}

pub fn visual() -> KeyMap {
    let mut map = KeyMap::new();
    for key in KEY_UP {
        map.bind(UP_LINE, key);
    }
    map.bind(UP_LINE, "k");
    for key in KEY_DOWN {
        map.bind(DOWN_LINE, key);
    }
    map.bind(DOWN_LINE, "j");
    map.bind(DEACTIVATE_REGION, &esc());
    map.bind(EXCHANGE_POINT_AND_MARK, "o");
    map.bind(PUT_REPLACE_SELECTION, "p");
    map.bind(VI_DELETE, "x");
    map.bind(VI_OPER_SWAP_CASE, "~");
    map
}

pub fn vi_opp() -> KeyMap {
    let mut map = KeyMap::new();
    for key in KEY_UP {
        map.bind(UP_LINE, key);
    }
    map.bind(UP_LINE, "k");
    for key in KEY_DOWN {
        map.bind(DOWN_LINE, key);
    }
    map.bind(DOWN_LINE, "j");
    map.bind(VI_CMD_MODE, &esc());
    map
}

fn bind_arrow_keys(map: &mut KeyMap) {
    for key in KEY_UP {
        map.bind(UP_LINE_OR_HISTORY, key);
    }
    for key in KEY_DOWN {
        map.bind(DOWN_LINE_OR_HISTORY, key);
    }
    for key in KEY_LEFT {
        map.bind(BACKWARD_CHAR, key);
    }
    for key in KEY_RIGHT {
        map.bind(FORWARD_CHAR, key);
    }
    for key in KEY_HOME {
        map.bind(BEGINNING_OF_LINE, key);
    }
    for key in KEY_END {
        map.bind(END_OF_LINE, key);
    }
    map.bind(DELETE_CHAR, KEY_DELETE);
    map.bind(OVERWRITE_MODE, KEY_INSERT);
}

// Rebind the terminal's special characters in place of the defaults, so
// the line discipline the user configured keeps working in raw mode.
fn bind_tty_chars(map: &mut KeyMap, attrs: Attributes) {
    rebind(map, BACKWARD_DELETE_CHAR, &del(), attrs.verase);
    rebind(map, BACKWARD_KILL_WORD, &ctrl_key('W'), attrs.vwerase);
    rebind(map, KILL_WHOLE_LINE, &ctrl_key('U'), attrs.vkill);
    rebind(map, QUOTED_INSERT, &ctrl_key('V'), attrs.vlnext);
}

fn rebind(map: &mut KeyMap, widget: &str, prev_binding: &str, new_binding: char) {
    if (new_binding as u32) > 0 && (new_binding as u32) < 128 {
        map.bind(SELF_INSERT, prev_binding);
        map.bind(widget, &new_binding.to_string());
    }
}
