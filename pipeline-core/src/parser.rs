use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use common_framework::{Error, Position, Result};
use lexer_framework::{skip_ignored, standard_table};
use parser_framework::{Grammar, Production, RejectKind};
use tracing::debug;

use crate::spec::CombinatorSpec;

/// Turns a [`CombinatorSpec`] into a runnable [`Parser`].
pub struct Combinator;

impl Combinator {
    pub fn build(spec: CombinatorSpec) -> Result<Parser> {
        let mut lex_rules = standard_table();
        lex_rules.extend(spec.lexical_rules);

        debug!(
            productions = spec.productions.len(),
            lexical_rules = lex_rules.len(),
            ignorables = spec.ignore.len(),
            "built combinator parser"
        );
        Ok(Parser {
            grammar: Arc::new(Grammar::new(spec.productions, lex_rules, spec.ignore)),
        })
    }
}

/// A compiled grammar with one entry point per production.
///
/// Cloning a parser is cheap and clones share the grammar. Every call gets
/// its own cursor and memo table, so calls may run concurrently.
#[derive(Debug, Clone)]
pub struct Parser {
    grammar: Arc<Grammar>,
}

impl Parser {
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn production_names(&self) -> impl Iterator<Item = &str> {
        self.grammar.productions().keys().map(String::as_str)
    }

    pub fn has_production(&self, name: &str) -> bool {
        self.grammar.production(name).is_some()
    }

    /// Parses a prefix of `text` with the production `production` and returns
    /// the production's node. Input after the match is left unexamined.
    pub fn parse(&self, production: &str, text: &str) -> Result<Production> {
        self.run(production, text, false)
    }

    /// Like [`parse`](Self::parse), but only ignorables may follow the match.
    pub fn parse_all(&self, production: &str, text: &str) -> Result<Production> {
        self.run(production, text, true)
    }

    /// A callable bound to one production.
    pub fn entry(&self, production: &str) -> Result<EntryPoint> {
        if !self.has_production(production) {
            return Err(Error::UnknownProduction(production.to_string()));
        }
        Ok(EntryPoint {
            parser: self.clone(),
            production: production.to_string(),
        })
    }

    /// One entry point per declared production.
    pub fn entries(&self) -> BTreeMap<String, EntryPoint> {
        self.production_names()
            .map(|name| {
                let entry = EntryPoint {
                    parser: self.clone(),
                    production: name.to_string(),
                };
                (name.to_string(), entry)
            })
            .collect()
    }

    fn run(&self, production: &str, text: &str, whole: bool) -> Result<Production> {
        let env = self.grammar.environment();
        let cursor = self.grammar.cursor(text);
        debug!(production, input_len = text.len(), "parse started");

        let outcome = env
            .apply(production, &cursor)
            .ok_or_else(|| Error::UnknownProduction(production.to_string()))?;
        let stats = env.cache_stats();

        let found = match outcome {
            Ok(found) => found,
            Err(reject) => {
                debug!(
                    production,
                    offset = reject.offset(),
                    message = %reject.message,
                    "parse rejected"
                );
                let position = Position::locate(text, reject.offset());
                let production = production.to_string();
                let message = reject.message;
                return Err(match reject.kind {
                    RejectKind::Ambiguous => Error::Ambiguous {
                        production,
                        position,
                        message,
                    },
                    RejectKind::Mismatch => Error::Reject {
                        production,
                        position,
                        message,
                    },
                });
            }
        };

        if whole {
            let rest = skip_ignored(&found.cursor);
            if !rest.is_eof() {
                debug!(production, offset = rest.offset(), "trailing input");
                return Err(Error::Reject {
                    production: production.to_string(),
                    position: Position::locate(text, rest.offset()),
                    message: format!("unexpected trailing input at offset {}", rest.offset()),
                });
            }
        }

        debug!(
            production,
            consumed = found.cursor.offset(),
            memo_entries = stats.entries,
            memo_hits = stats.hits,
            "parse finished"
        );
        Ok(found.node)
    }
}

/// A parser bound to a single production.
#[derive(Clone)]
pub struct EntryPoint {
    parser: Parser,
    production: String,
}

impl EntryPoint {
    pub fn production(&self) -> &str {
        &self.production
    }

    pub fn parse(&self, text: &str) -> Result<Production> {
        self.parser.parse(&self.production, text)
    }

    pub fn parse_all(&self, text: &str) -> Result<Production> {
        self.parser.parse_all(&self.production, text)
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("production", &self.production)
            .finish()
    }
}
