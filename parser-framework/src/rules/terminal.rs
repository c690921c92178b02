use std::sync::Arc;

use common_framework::{Error, Result};
use lexer_framework::{lex, Cursor, LexRule, Token, TokenKind};

use crate::ast::Production;
use crate::environment::Environment;
use crate::result::{Match, ParseResult, Reject};
use crate::traits::{ParsingRule, Parselet};

struct Eof;

impl ParsingRule for Eof {
    fn parse(&self, _env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        if !cursor.is_eof() {
            return Err(Reject::new(
                cursor.clone(),
                format!("expected end of input at offset {}", cursor.offset()),
            ));
        }
        let end = cursor.offset();
        let token = Token::new(TokenKind::Eof, cursor.slice(end, end));
        Ok(Match::new(cursor.clone(), Production::Token(token)))
    }

    fn describe(&self) -> String {
        "<EOF>".to_string()
    }
}

struct Empty;

impl ParsingRule for Empty {
    fn parse(&self, _env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        Ok(Match::empty_at(cursor))
    }

    fn describe(&self) -> String {
        "<empty>".to_string()
    }
}

/// Where a terminal finds its lexical rule.
enum Source {
    /// Looked up by name in the grammar's lexical table at parse time.
    Table,
    Inline(LexRule),
}

struct Terminal {
    name: Arc<str>,
    source: Source,
    case_insensitive: bool,
}

impl ParsingRule for Terminal {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        let rule = match &self.source {
            Source::Inline(rule) => rule,
            Source::Table => match env.lex_rule(&self.name) {
                Some(rule) => rule,
                None => {
                    return Err(Reject::new(
                        cursor.clone(),
                        format!("no lexical rule named `{}`", self.name),
                    ))
                }
            },
        };

        let (token, next) = lex(cursor, &self.name, rule, self.case_insensitive);
        match token.kind {
            TokenKind::Rule(_) => Ok(Match::new(next, Production::Token(token))),
            _ => Err(Reject::new(
                cursor.clone(),
                format!(
                    "could not match {} at offset {}: found {}{}",
                    self.describe(),
                    token.start(),
                    token.kind,
                    preview(&next),
                ),
            )),
        }
    }

    fn describe(&self) -> String {
        match &self.source {
            Source::Table => format!("token {}", self.name),
            Source::Inline(LexRule::Literal(_)) => format!("{:?}", &*self.name),
            Source::Inline(rule) => format!("{} {rule}", self.name),
        }
    }
}

fn preview(cursor: &Cursor) -> String {
    let rest = cursor.remaining();
    if rest.is_empty() {
        return String::new();
    }
    let shown: String = rest.chars().take(12).collect();
    if shown.len() < rest.len() {
        format!(" before {shown:?}...")
    } else {
        format!(" before {shown:?}")
    }
}

/// Succeeds only at the very end of the input, with a zero-width match.
///
/// Ignorables are not skipped first: trailing whitespace before the end is
/// input like any other.
pub fn eof() -> Parselet {
    Parselet::new(Eof)
}

/// Always succeeds without consuming input.
pub fn empty() -> Parselet {
    Parselet::new(Empty)
}

/// Matches one token of the lexical rule named `type_name`, looked up in the
/// grammar's lexical table.
pub fn token(type_name: &str) -> Result<Parselet> {
    if type_name.is_empty() {
        return Err(Error::construction("token type name must not be empty"));
    }
    Ok(Parselet::new(Terminal {
        name: Arc::from(type_name),
        source: Source::Table,
        case_insensitive: false,
    }))
}

/// Matches `value` exactly; the token's type is the value itself.
pub fn literal(value: &str) -> Result<Parselet> {
    inline_literal(value, false)
}

/// Matches `value` ignoring ASCII and simple Unicode case differences.
pub fn literal_case_insensitive(value: &str) -> Result<Parselet> {
    inline_literal(value, true)
}

fn inline_literal(value: &str, case_insensitive: bool) -> Result<Parselet> {
    if value.is_empty() {
        return Err(Error::construction("literal must not be empty"));
    }
    let name: Arc<str> = Arc::from(value);
    Ok(Parselet::new(Terminal {
        source: Source::Inline(LexRule::Literal(name.clone())),
        name,
        case_insensitive,
    }))
}

/// Matches `pattern`, anchored at the cursor, producing a token of type
/// `type_name`.
pub fn regex(type_name: &str, pattern: &str) -> Result<Parselet> {
    if type_name.is_empty() {
        return Err(Error::construction("token type name must not be empty"));
    }
    Ok(Parselet::new(Terminal {
        name: Arc::from(type_name),
        source: Source::Inline(LexRule::pattern(pattern)?),
        case_insensitive: false,
    }))
}

/// Matches the single character with code point `code_point`.
pub fn unicode_point(code_point: u32) -> Result<Parselet> {
    let ch = scalar(code_point)?;
    let name = format!("U+{code_point:04X}");
    Ok(Parselet::new(Terminal {
        name: Arc::from(name),
        source: Source::Inline(LexRule::literal(ch.to_string())),
        case_insensitive: false,
    }))
}

/// Matches one character whose code point lies in `low..=high`.
pub fn unicode_range(low: u32, high: u32) -> Result<Parselet> {
    scalar(low)?;
    scalar(high)?;
    if low > high {
        return Err(Error::construction(format!(
            "empty code point range U+{low:04X}..U+{high:04X}"
        )));
    }
    let pattern = format!(r"[\x{{{low:X}}}-\x{{{high:X}}}]");
    regex(&format!("U+{low:04X}..U+{high:04X}"), &pattern)
}

fn scalar(code_point: u32) -> Result<char> {
    char::from_u32(code_point).ok_or_else(|| {
        Error::construction(format!("{code_point:#X} is not a Unicode scalar value"))
    })
}
