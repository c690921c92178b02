use common_framework::{Error, Result};
use lexer_framework::Cursor;

use crate::ast::{ArrayProduction, Production};
use crate::environment::Environment;
use crate::result::{Match, ParseResult, Reject};
use crate::traits::{IntoParselet, ParsingRule, Parselet};

struct Optional(Parselet);

impl ParsingRule for Optional {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        match self.0.parse(env, cursor) {
            Ok(found) => Ok(found),
            Err(_) => Ok(Match::empty_at(cursor)),
        }
    }

    fn describe(&self) -> String {
        format!("[{}]", self.0.describe())
    }
}

struct Repeat {
    rule: Parselet,
    min: usize,
    max: Option<usize>,
}

impl ParsingRule for Repeat {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        let mut nodes = Vec::new();
        let mut state = cursor.clone();
        let mut failure = None;

        while self.max.map_or(true, |max| nodes.len() < max) {
            match self.rule.parse(env, &state) {
                Ok(found) => {
                    let progressed = found.cursor.offset() > state.offset();
                    state = found.cursor;
                    if !progressed {
                        // A zero-width match would repeat forever; rules are
                        // pure, so every further iteration yields this node.
                        let copies = self.min.saturating_sub(nodes.len()).max(1);
                        nodes.extend(std::iter::repeat(found.node).take(copies));
                        break;
                    }
                    nodes.push(found.node);
                }
                Err(reject) => {
                    failure = Some(reject);
                    break;
                }
            }
        }

        if nodes.len() < self.min {
            return Err(match failure {
                Some(reject) => reject,
                None => Reject::new(
                    cursor.clone(),
                    format!("expected at least {} of {}", self.min, self.rule.describe()),
                ),
            });
        }
        Ok(Match::new(
            state,
            Production::Array(ArrayProduction::new(nodes)),
        ))
    }

    fn describe(&self) -> String {
        match (self.min, self.max) {
            (0, None) => format!("{{{}}}", self.rule.describe()),
            (1, None) => format!("{}+", self.rule.describe()),
            (min, None) => format!("{min}*{}", self.rule.describe()),
            (min, Some(max)) => format!("{min}*{max}{}", self.rule.describe()),
        }
    }
}

/// Matches `rule` or, failing that, an empty match at the cursor.
pub fn optional(rule: impl IntoParselet) -> Result<Parselet> {
    Ok(Parselet::new(Optional(rule.into_parselet()?)))
}

/// Greedy repetition, at least once. The node is an array of the matches.
pub fn one_or_more(rule: impl IntoParselet) -> Result<Parselet> {
    repetition(rule, 1, None)
}

/// Greedy repetition that never fails; no match yields an empty array.
pub fn zero_or_more(rule: impl IntoParselet) -> Result<Parselet> {
    repetition(rule, 0, None)
}

/// Greedy repetition of `rule` between `min` and `max` times (`None` means
/// unbounded).
///
/// Stops at the first failure, at `max` matches, or after a match that
/// consumed nothing.
pub fn repetition(rule: impl IntoParselet, min: usize, max: Option<usize>) -> Result<Parselet> {
    if let Some(max) = max {
        if max < min {
            return Err(Error::construction(format!(
                "repetition bounds are inverted: min {min} > max {max}"
            )));
        }
    }
    Ok(Parselet::new(Repeat {
        rule: rule.into_parselet()?,
        min,
        max,
    }))
}
