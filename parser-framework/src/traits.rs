use std::fmt;
use std::sync::Arc;

use common_framework::Result;
use lexer_framework::Cursor;

use crate::environment::Environment;
use crate::result::ParseResult;

/// A parsing rule: a pure function from a cursor to a match or a reject.
///
/// Rules never mutate the cursor they are given. The only state a rule may
/// touch is the per-parse memo table reachable through the environment.
/// Closures of the right shape are rules too.
pub trait ParsingRule: Send + Sync {
    /// Applies the rule at `cursor`.
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult;

    /// A short human-readable rendering of the rule.
    fn describe(&self) -> String {
        "<rule>".to_string()
    }
}

impl<F> ParsingRule for F
where
    F: Fn(&Environment<'_>, &Cursor) -> ParseResult + Send + Sync,
{
    fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        self(env, cursor)
    }
}

/// A shared, cheaply clonable handle to a parsing rule.
#[derive(Clone)]
pub struct Parselet(Arc<dyn ParsingRule>);

impl Parselet {
    pub fn new(rule: impl ParsingRule + 'static) -> Self {
        Self(Arc::new(rule))
    }

    #[inline]
    pub fn parse(&self, env: &Environment<'_>, cursor: &Cursor) -> ParseResult {
        self.0.parse(env, cursor)
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }
}

impl fmt::Debug for Parselet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Anything a combinator accepts as an operand.
///
/// Plain strings stand for literals, and fallible constructors can be nested
/// without unwrapping them first; the first construction error wins.
pub trait IntoParselet {
    fn into_parselet(self) -> Result<Parselet>;
}

impl IntoParselet for Parselet {
    fn into_parselet(self) -> Result<Parselet> {
        Ok(self)
    }
}

impl IntoParselet for &Parselet {
    fn into_parselet(self) -> Result<Parselet> {
        Ok(self.clone())
    }
}

impl IntoParselet for Result<Parselet> {
    fn into_parselet(self) -> Result<Parselet> {
        self
    }
}

impl IntoParselet for &str {
    fn into_parselet(self) -> Result<Parselet> {
        crate::rules::literal(self)
    }
}

impl IntoParselet for String {
    fn into_parselet(self) -> Result<Parselet> {
        crate::rules::literal(&self)
    }
}
