//! The lexing step.
//!
//! All functions are pure: they read a [`Cursor`] and return new values,
//! never touching shared state.

use crate::cursor::Cursor;
use crate::rule::LexRule;
use crate::token::{Token, TokenKind};
use std::sync::Arc;

/// Returns a cursor advanced past every ignorable run at its position.
///
/// Ignorable rules are tried in order; the first one matching (with a
/// non-zero length) at the current offset is skipped and the scan restarts,
/// so consecutive ignorables of different kinds are all consumed.
pub fn skip_ignored(cursor: &Cursor) -> Cursor {
    let mut offset = cursor.offset();
    let input = cursor.input();
    'scan: while offset < input.len() {
        let rest = &input[offset..];
        for rule in cursor.ignore() {
            match rule.match_len(rest, false) {
                Some(len) if len > 0 => {
                    offset += len;
                    continue 'scan;
                }
                _ => {}
            }
        }
        break;
    }
    cursor.at(offset)
}

/// Lexes one token with the rule `name`/`rule` after skipping ignorables.
///
/// Returns an `Eof` token if the input is exhausted, the matched token if the
/// rule matches, and otherwise a zero-width `Empty` token. In the last case
/// the returned cursor sits after the skipped ignorables.
pub fn lex(
    cursor: &Cursor,
    name: &Arc<str>,
    rule: &LexRule,
    case_insensitive: bool,
) -> (Token, Cursor) {
    let cursor = skip_ignored(cursor);
    let start = cursor.offset();

    if cursor.is_eof() {
        let token = Token::new(TokenKind::Eof, cursor.slice(start, start));
        return (token, cursor);
    }

    match rule.match_len(cursor.remaining(), case_insensitive) {
        Some(len) => {
            let token = Token::new(
                TokenKind::Rule(Arc::clone(name)),
                cursor.slice(start, start + len),
            );
            (token, cursor.advance(len))
        }
        None => {
            let token = Token::new(TokenKind::Empty, cursor.slice(start, start));
            (token, cursor)
        }
    }
}

/// Returns the token [`lex`] would produce, discarding the new state.
pub fn peek(cursor: &Cursor, name: &Arc<str>, rule: &LexRule, case_insensitive: bool) -> Token {
    lex(cursor, name, rule, case_insensitive).0
}

/// Returns the state [`lex`] would produce, discarding the token.
pub fn consume(cursor: &Cursor, name: &Arc<str>, rule: &LexRule, case_insensitive: bool) -> Cursor {
    lex(cursor, name, rule, case_insensitive).1
}
