//! Property-based tests for the lexing step.

use lexer_framework::{lex, Cursor, LexRule, TokenKind};
use proptest::prelude::*;
use std::sync::Arc;

proptest! {
    /// With whitespace ignored, the token found for `a` always starts at the
    /// first non-blank character, and the state never moves backwards.
    #[test]
    fn test_token_starts_after_leading_blanks(input in "[ a-c]{0,24}", start in 0usize..24) {
        let ignore = vec![LexRule::pattern(" +").unwrap()];
        let cursor = Cursor::with_ignore(&input, ignore).at(start);
        let (token, next) = lex(&cursor, &Arc::from("a"), &LexRule::literal("a"), false);

        let rest = &input[cursor.offset()..];
        let blanks = rest.len() - rest.trim_start_matches(' ').len();
        let expected_start = cursor.offset() + blanks;

        prop_assert_eq!(token.start(), expected_start);
        prop_assert!(next.offset() >= cursor.offset());
        prop_assert!(next.offset() <= input.len());

        match token.kind {
            TokenKind::Eof => prop_assert_eq!(expected_start, input.len()),
            TokenKind::Empty => prop_assert_eq!(next.offset(), expected_start),
            TokenKind::Rule(_) => prop_assert_eq!(next.offset(), expected_start + 1),
        }
    }
}
