use common_framework::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lexical rules keyed by token type name.
pub type LexTable = HashMap<String, LexRule>;

/// A single lexical rule: a literal string or a regular expression.
///
/// Patterns are compiled anchored to the start of the remaining input, so a
/// match attempt never scans beyond the cursor.
#[derive(Clone)]
pub enum LexRule {
    Literal(Arc<str>),
    Pattern(Pattern),
}

/// A compiled, anchored regular expression together with its source text.
#[derive(Clone)]
pub struct Pattern {
    source: Arc<str>,
    regex: Regex,
}

impl Pattern {
    /// Returns the pattern as it was written, without the anchoring wrapper.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl LexRule {
    /// Creates a literal rule.
    pub fn literal(value: impl Into<Arc<str>>) -> Self {
        Self::Literal(value.into())
    }

    /// Compiles a pattern rule.
    pub fn pattern(source: &str) -> Result<Self> {
        let regex = Regex::new(&format!(r"\A(?:{source})")).map_err(|err| {
            Error::construction(format!("invalid lexical pattern /{source}/: {err}"))
        })?;
        Ok(Self::Pattern(Pattern {
            source: Arc::from(source),
            regex,
        }))
    }

    /// Returns the byte length of the match at the start of `text`, if any.
    ///
    /// `case_insensitive` only affects literal rules.
    pub fn match_len(&self, text: &str, case_insensitive: bool) -> Option<usize> {
        match self {
            Self::Literal(literal) if case_insensitive => match_caseless(text, literal),
            Self::Literal(literal) => text.starts_with(&**literal).then_some(literal.len()),
            Self::Pattern(pattern) => pattern.regex.find(text).map(|m| m.end()),
        }
    }
}

fn match_caseless(text: &str, literal: &str) -> Option<usize> {
    let mut input = text.char_indices();
    let mut consumed = 0;
    for expected in literal.chars() {
        let (index, actual) = input.next()?;
        if expected != actual && !expected.to_lowercase().eq(actual.to_lowercase()) {
            return None;
        }
        consumed = index + actual.len_utf8();
    }
    Some(consumed)
}

impl fmt::Debug for LexRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => write!(f, "{literal:?}"),
            Self::Pattern(pattern) => write!(f, "/{}/", pattern.source),
        }
    }
}

impl fmt::Display for LexRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<&str> for LexRule {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_match() {
        let rule = LexRule::literal("::=");
        assert_eq!(rule.match_len("::= x", false), Some(3));
        assert_eq!(rule.match_len(":= x", false), None);
    }

    #[test]
    fn test_caseless_literal() {
        let rule = LexRule::literal("select");
        assert_eq!(rule.match_len("SeLeCt *", true), Some(6));
        assert_eq!(rule.match_len("SeLeCt *", false), None);
    }

    #[test]
    fn test_pattern_is_anchored() {
        let rule = LexRule::pattern("[0-9]+").unwrap();
        assert_eq!(rule.match_len("123abc", false), Some(3));
        assert_eq!(rule.match_len("abc123", false), None);
    }

    #[test]
    fn test_pattern_keeps_its_source() {
        match LexRule::pattern("[a-z]+").unwrap() {
            LexRule::Pattern(pattern) => assert_eq!(pattern.source(), "[a-z]+"),
            LexRule::Literal(_) => panic!("expected a pattern rule"),
        }
    }

    #[test]
    fn test_pattern_alternation_stays_anchored() {
        let rule = LexRule::pattern("a|b").unwrap();
        assert_eq!(rule.match_len("xb", false), None);
        assert_eq!(rule.match_len("bx", false), Some(1));
    }

    #[test]
    fn test_invalid_pattern_is_construction_error() {
        let err = LexRule::pattern("(unclosed").unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
    }
}
