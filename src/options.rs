//! Reader options and configuration variable names

/// Boolean options toggling reader behavior.
///
/// Each option carries a default used when the caller has not set it
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaderOption {
    /// Skip `!`/`^` history event expansion at accept-line.
    DisableEventExpansion,
    /// When event expansion changed the line, return to editing instead
    /// of accepting it immediately.
    HistoryVerify,
    /// Beep when a history motion runs off either end.
    HistoryBeep,
    /// Do not record accepted lines into history.
    DisableHistory,
    /// Complete using the word prefix up to the cursor rather than the
    /// whole word.
    CompleteInWord,
    /// Case-insensitive candidate collation and common-prefix reduction.
    CaseInsensitive,
    /// List candidates after an ambiguous completion.
    AutoList,
    /// Enter menu selection on the next completion key.
    AutoMenu,
    /// With `AutoList`, list eagerly even when a partial completion was
    /// inserted.
    ListAmbiguous,
    /// Fill the candidate grid row by row instead of column by column.
    ListRowsFirst,
    /// `complete-word` cycles through the menu instead of completing.
    MenuComplete,
    /// Accept a candidate whose value equals the word even when other
    /// candidates match.
    RecognizeExact,
    /// Group candidates by their group attribute in lists and menus.
    Group,
    /// Right-pad secondary prompts so they share the widest width.
    PadPrompts,
    /// Rebind the terminal's erase/werase/kill/lnext control characters.
    BindTtySpecialChars,
    /// Prefer the visible bell when `BELL_STYLE` is `on`.
    PreferVisibleBell,
}

impl ReaderOption {
    /// Default value when the option has not been set.
    pub fn default_value(self) -> bool {
        matches!(
            self,
            ReaderOption::AutoList | ReaderOption::AutoMenu | ReaderOption::BindTtySpecialChars
        )
    }
}

// String-keyed variable names. Values are parsed leniently: a malformed
// value falls back to the built-in default.
pub const WORDCHARS: &str = "WORDCHARS";
pub const REMOVE_SUFFIX_CHARS: &str = "REMOVE_SUFFIX_CHARS";
pub const COMMENT_BEGIN: &str = "COMMENT_BEGIN";
pub const SEARCH_TERMINATORS: &str = "SEARCH_TERMINATORS";
pub const BELL_STYLE: &str = "BELL_STYLE";
pub const LIST_MAX: &str = "LIST_MAX";
pub const ERRORS: &str = "ERRORS";
pub const BLINK_MATCHING_PAREN: &str = "BLINK_MATCHING_PAREN";
pub const AMBIGUOUS_BINDING: &str = "AMBIGUOUS_BINDING";

pub const DEFAULT_WORDCHARS: &str = "*?_-.[]~=/&;!#$%^(){}<>";
pub const DEFAULT_REMOVE_SUFFIX_CHARS: &str = " \t\n;&|";
pub const DEFAULT_COMMENT_BEGIN: &str = "#";
pub const DEFAULT_SEARCH_TERMINATORS: &str = "\x1b\n";
pub const DEFAULT_BELL_STYLE: &str = "";
pub const DEFAULT_LIST_MAX: i64 = 100;
pub const DEFAULT_ERRORS: i64 = 2;
pub const DEFAULT_BLINK_MATCHING_PAREN: u64 = 500;
pub const DEFAULT_AMBIGUOUS_BINDING: u64 = 1000;
