use lexer_framework::{consume, lex, peek, Cursor, LexRule, TokenKind};
use std::sync::Arc;

fn name(value: &str) -> Arc<str> {
    Arc::from(value)
}

fn whitespace() -> LexRule {
    LexRule::pattern(r"\s+").unwrap()
}

#[test]
fn test_exhausted_input_yields_eof() {
    let cursor = Cursor::new("ab").at(2);
    let (token, next) = lex(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert_eq!(token.kind, TokenKind::Eof);
    assert_eq!(token.start(), 2);
    assert_eq!(token.end(), 2);
    assert_eq!(next.offset(), 2);
}

#[test]
fn test_empty_input_yields_eof() {
    let token = peek(&Cursor::new(""), &name("a"), &LexRule::literal("a"), false);
    assert!(token.is_eof());
    assert_eq!(token.start(), 0);
}

#[test]
fn test_no_match_yields_zero_width_empty() {
    let cursor = Cursor::new("xyz").at(1);
    let (token, next) = lex(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert_eq!(token.kind, TokenKind::Empty);
    assert_eq!(token.start(), 1);
    assert_eq!(token.end(), 1);
    assert_eq!(token.value(), "");
    assert_eq!(next.offset(), 1);
}

#[test]
fn test_match_advances_past_token() {
    let (token, next) = lex(&Cursor::new("abc"), &name("ab"), &LexRule::literal("ab"), false);
    assert!(token.kind.is("ab"));
    assert_eq!(token.value(), "ab");
    assert_eq!((token.start(), token.end()), (0, 2));
    assert_eq!(next.offset(), 2);
}

#[test]
fn test_pattern_rule_names_the_token() {
    let rule = LexRule::pattern("[0-9]+").unwrap();
    let token = peek(&Cursor::new("42;"), &name("number"), &rule, false);
    assert_eq!(token.kind.name(), "number");
    assert_eq!(token.value(), "42");
}

#[test]
fn test_ignorables_are_skipped_before_match() {
    let cursor = Cursor::with_ignore("  a", vec![whitespace()]);
    let token = peek(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert!(token.kind.is("a"));
    assert_eq!(token.start(), 2);
}

#[test]
fn test_consecutive_ignorables_of_different_kinds() {
    let ignore = vec![whitespace(), LexRule::pattern(r"#[^\n]*\n?").unwrap()];
    let cursor = Cursor::with_ignore("  # note\n\t# more\n  a", ignore);
    let token = peek(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert_eq!(token.start(), 19);
}

#[test]
fn test_empty_token_sits_after_ignorables() {
    let cursor = Cursor::with_ignore("  b", vec![whitespace()]);
    let (token, next) = lex(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert!(token.is_empty());
    assert_eq!(token.start(), 2);
    assert_eq!(next.offset(), 2);
}

#[test]
fn test_trailing_ignorables_reach_eof() {
    let cursor = Cursor::with_ignore("a   ", vec![whitespace()]).at(1);
    let (token, next) = lex(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert!(token.is_eof());
    assert_eq!(token.start(), 4);
    assert_eq!(next.offset(), 4);
}

#[test]
fn test_consume_returns_only_the_new_state() {
    let cursor = Cursor::new("aab");
    let next = consume(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert_eq!(next.offset(), 1);
    // the original state is untouched
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn test_case_insensitive_literal() {
    let cursor = Cursor::new("BEGIN end");
    let token = peek(&cursor, &name("begin"), &LexRule::literal("begin"), true);
    assert_eq!(token.value(), "BEGIN");
    let token = peek(&cursor, &name("begin"), &LexRule::literal("begin"), false);
    assert!(token.is_empty());
}

#[test]
fn test_multibyte_offsets() {
    let cursor = Cursor::new("éa");
    let (token, next) = lex(&cursor, &name("é"), &LexRule::literal("é"), false);
    assert_eq!(token.end(), 2);
    let token = peek(&next, &name("a"), &LexRule::literal("a"), false);
    assert_eq!((token.start(), token.end()), (2, 3));
}

#[test]
fn test_zero_length_ignorable_does_not_loop() {
    let cursor = Cursor::with_ignore("a", vec![LexRule::pattern("x*").unwrap()]);
    let token = peek(&cursor, &name("a"), &LexRule::literal("a"), false);
    assert_eq!(token.start(), 0);
}
