use common_framework::{Error, Result};
use lexer_framework::Cursor;
use tracing::debug;

use crate::ast::{ArrayProduction, Production};
use crate::environment::Environment;
use crate::result::{Match, ParseResult, Reject};
use crate::traits::{IntoParselet, ParsingRule, Parselet};

struct Sequence(Vec<Parselet>);

impl ParsingRule for Sequence {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        let mut nodes = Vec::with_capacity(self.0.len());
        let mut state = cursor.clone();
        for rule in &self.0 {
            let found = rule.parse(env, &state)?;
            state = found.cursor;
            nodes.push(found.node);
        }
        Ok(Match::new(
            state,
            Production::Array(ArrayProduction::new(nodes)),
        ))
    }

    fn describe(&self) -> String {
        join(&self.0, " ")
    }
}

/// Unordered choice: every alternative is tried and exactly one may match.
struct Choice(Vec<Parselet>);

impl ParsingRule for Choice {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        let mut matches = Vec::new();
        let mut ambiguity = None;
        for rule in &self.0 {
            match rule.parse(env, cursor) {
                Ok(found) => matches.push(found),
                Err(reject) if reject.is_ambiguous() => ambiguity = ambiguity.or(Some(reject)),
                Err(_) => {}
            }
        }

        match matches.len() {
            0 => Err(no_alternative(cursor, ambiguity)),
            1 => Ok(matches.remove(0)),
            n => {
                let ends: Vec<usize> = matches.iter().map(Match::offset).collect();
                debug!(
                    offset = cursor.offset(),
                    alternatives = n,
                    ?ends,
                    "ambiguous choice"
                );
                Err(Reject::ambiguous(
                    cursor.clone(),
                    format!(
                        "ambiguous input at offset {}: {n} alternatives of ({}) matched, ending at {ends:?}",
                        cursor.offset(),
                        join(&self.0, " | "),
                    ),
                ))
            }
        }
    }

    fn describe(&self) -> String {
        format!("({})", join(&self.0, " | "))
    }
}

/// Ordered choice: the first alternative that matches wins.
struct OrderedChoice(Vec<Parselet>);

impl ParsingRule for OrderedChoice {
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        let mut ambiguity = None;
        for rule in &self.0 {
            match rule.parse(env, cursor) {
                Ok(found) => return Ok(found),
                Err(reject) if reject.is_ambiguous() => ambiguity = ambiguity.or(Some(reject)),
                Err(_) => {}
            }
        }
        Err(no_alternative(cursor, ambiguity))
    }

    fn describe(&self) -> String {
        format!("({})", join(&self.0, " / "))
    }
}

// An ambiguity below a failed choice is the more useful diagnostic.
fn no_alternative(cursor: &Cursor, ambiguity: Option<Reject>) -> Reject {
    ambiguity.unwrap_or_else(|| {
        Reject::new(
            cursor.clone(),
            format!("no alternative matched at offset {}", cursor.offset()),
        )
    })
}

fn join(rules: &[Parselet], separator: &str) -> String {
    rules
        .iter()
        .map(Parselet::describe)
        .collect::<Vec<_>>()
        .join(separator)
}

fn collect<I, R>(kind: &str, rules: I) -> Result<Vec<Parselet>>
where
    I: IntoIterator<Item = R>,
    R: IntoParselet,
{
    let rules = rules
        .into_iter()
        .map(IntoParselet::into_parselet)
        .collect::<Result<Vec<_>>>()?;
    if rules.len() < 2 {
        return Err(Error::construction(format!(
            "{kind} needs at least two rules, got {}",
            rules.len()
        )));
    }
    Ok(rules)
}

/// Matches every rule in order, threading the cursor through them. The node
/// is the array of their nodes.
pub fn sequence<I, R>(rules: I) -> Result<Parselet>
where
    I: IntoIterator<Item = R>,
    R: IntoParselet,
{
    Ok(Parselet::new(Sequence(collect("sequence", rules)?)))
}

/// Tries every alternative at the same cursor. Succeeds only when exactly one
/// matches; several matches reject as ambiguous.
pub fn choice<I, R>(rules: I) -> Result<Parselet>
where
    I: IntoIterator<Item = R>,
    R: IntoParselet,
{
    Ok(Parselet::new(Choice(collect("choice", rules)?)))
}

/// Tries the alternatives in order and returns the first match.
pub fn ordered_choice<I, R>(rules: I) -> Result<Parselet>
where
    I: IntoIterator<Item = R>,
    R: IntoParselet,
{
    Ok(Parselet::new(OrderedChoice(collect("ordered choice", rules)?)))
}
