use super::*;

fn parse(line: &str, cursor: usize) -> ParsedLine {
    DefaultParser::new().parse(line, cursor).unwrap()
}

#[test]
fn test_split_on_whitespace() {
    let p = parse("one two three", 0);
    assert_eq!(p.words, vec!["one", "two", "three"]);
    assert_eq!(p.word, "one");
    assert_eq!(p.word_index, 0);
}

#[test]
fn test_cursor_in_middle_word() {
    let p = parse("one two three", 5);
    assert_eq!(p.word, "two");
    assert_eq!(p.word_cursor, 1);
    assert_eq!(p.word_index, 1);
}

#[test]
fn test_cursor_at_end_of_word() {
    let p = parse("echo fo", 7);
    assert_eq!(p.word, "fo");
    assert_eq!(p.word_cursor, 2);
}

#[test]
fn test_cursor_between_words_is_empty_word() {
    let p = parse("one  two", 4);
    assert_eq!(p.word, "");
    assert_eq!(p.word_cursor, 0);
    assert_eq!(p.word_index, 2);
    assert_eq!(p.words.last().map(String::as_str), Some(""));
}

#[test]
fn test_quotes_group_words() {
    let p = parse("say 'hello world' end", 0);
    assert_eq!(p.words, vec!["say", "hello world", "end"]);
}

#[test]
fn test_double_quotes_and_escape() {
    let p = parse("a \"b c\" d\\ e", 0);
    assert_eq!(p.words, vec!["a", "b c", "d e"]);
}

#[test]
fn test_unterminated_single_quote_reports_closer() {
    let err = DefaultParser::new().parse("echo 'abc", 9).unwrap_err();
    assert_eq!(
        err,
        ParseError::Eof {
            missing: "'".to_string()
        }
    );
}

#[test]
fn test_unterminated_double_quote_reports_closer() {
    let err = DefaultParser::new().parse("echo \"abc", 9).unwrap_err();
    assert_eq!(
        err,
        ParseError::Eof {
            missing: "\"".to_string()
        }
    );
}

#[test]
fn test_trailing_backslash_is_incomplete() {
    let err = DefaultParser::new().parse("echo abc\\", 9).unwrap_err();
    assert!(matches!(err, ParseError::Eof { .. }));
}

#[test]
fn test_empty_line() {
    let p = parse("", 0);
    assert_eq!(p.word, "");
    assert_eq!(p.words, vec![""]);
    assert_eq!(p.cursor, 0);
}
