use common_framework::{Error, Result};
use lexer_framework::{LexRule, LexTable};
use parser_framework::{IntoParselet, ProductionRules};

use crate::parser::{Combinator, Parser};

/// Declarative description of a parser: lexical rules, production rules and
/// ignorable patterns.
///
/// Lexical rules are merged over the built-in token table when the parser is
/// built, so a rule declared here replaces the built-in rule of the same
/// name. Production bodies may reference productions that are declared
/// later; names are resolved when the parser runs.
#[derive(Debug, Clone, Default)]
pub struct CombinatorSpec {
    pub(crate) lexical_rules: LexTable,
    pub(crate) productions: ProductionRules,
    pub(crate) ignore: Vec<LexRule>,
}

impl CombinatorSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lexical_rule(mut self, name: &str, rule: impl Into<LexRule>) -> Self {
        self.lexical_rules.insert(name.to_string(), rule.into());
        self
    }

    pub fn lexical_pattern(self, name: &str, pattern: &str) -> Result<Self> {
        Ok(self.lexical_rule(name, LexRule::pattern(pattern)?))
    }

    /// Declares a production. Declaring the same name twice is an error.
    pub fn production(mut self, name: &str, rule: impl IntoParselet) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::construction("production name must not be empty"));
        }
        if self.productions.contains_key(name) {
            return Err(Error::construction(format!(
                "production `{name}` is defined more than once"
            )));
        }
        self.productions
            .insert(name.to_string(), rule.into_parselet()?);
        Ok(self)
    }

    /// Declares every production of `rules`.
    pub fn productions(self, rules: ProductionRules) -> Result<Self> {
        rules
            .into_iter()
            .try_fold(self, |spec, (name, rule)| spec.production(&name, rule))
    }

    /// Adds an ignorable rule; ignorables are tried in the order added.
    pub fn ignore(mut self, rule: impl Into<LexRule>) -> Self {
        self.ignore.push(rule.into());
        self
    }

    pub fn ignore_pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.ignore(LexRule::pattern(pattern)?))
    }

    pub fn ignore_all(mut self, rules: impl IntoIterator<Item = LexRule>) -> Self {
        self.ignore.extend(rules);
        self
    }

    pub fn production_names(&self) -> impl Iterator<Item = &str> {
        self.productions.keys().map(String::as_str)
    }

    pub fn has_production(&self, name: &str) -> bool {
        self.productions.contains_key(name)
    }

    pub fn build(self) -> Result<Parser> {
        Combinator::build(self)
    }
}
