use common_framework::Result;
use lexer_framework::Cursor;

use crate::environment::Environment;
use crate::result::{Match, ParseResult, Reject};
use crate::traits::{IntoParselet, ParsingRule, Parselet};

struct Not(Parselet);

impl ParsingRule for Not {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        match self.0.parse(env, cursor) {
            Err(_) => Ok(Match::empty_at(cursor)),
            Ok(found) => Err(Reject::new(
                cursor.clone(),
                format!(
                    "unexpected {} at offset {}",
                    found.node.shape(),
                    cursor.offset()
                ),
            )),
        }
    }

    fn describe(&self) -> String {
        format!("!{}", self.0.describe())
    }
}

struct Lookahead(Parselet);

impl ParsingRule for Lookahead {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        match self.0.parse(env, cursor) {
            Ok(found) => Ok(Match::new(cursor.clone(), found.node)),
            Err(reject) => Err(Reject::new(
                cursor.clone(),
                format!("lookahead failed: {}", reject.message),
            )),
        }
    }

    fn describe(&self) -> String {
        format!("&{}", self.0.describe())
    }
}

/// Negative lookahead: succeeds with an empty match, consuming nothing,
/// exactly when `rule` fails here.
pub fn not(rule: impl IntoParselet) -> Result<Parselet> {
    Ok(Parselet::new(Not(rule.into_parselet()?)))
}

/// Positive lookahead: succeeds with `rule`'s node when `rule` matches here,
/// but consumes nothing.
pub fn try_rule(rule: impl IntoParselet) -> Result<Parselet> {
    Ok(Parselet::new(Lookahead(rule.into_parselet()?)))
}
