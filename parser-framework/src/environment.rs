use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use lexer_framework::{Cursor, LexRule, LexTable};
use tracing::trace;

use crate::result::ParseResult;
use crate::traits::Parselet;

/// Production rules by name.
pub type ProductionRules = BTreeMap<String, Parselet>;

/// Everything a parse needs besides the input: productions, lexical rules
/// and the ignorable patterns.
///
/// A grammar is immutable once built and can be shared across threads; each
/// parse borrows it through its own [`Environment`].
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: ProductionRules,
    lex_rules: LexTable,
    ignore: Arc<[LexRule]>,
}

impl Grammar {
    /// Assembles a grammar from already-built parts.
    ///
    /// Nothing is validated here; use the builder in `pipeline-core` for
    /// checked construction.
    pub fn new(productions: ProductionRules, lex_rules: LexTable, ignore: Vec<LexRule>) -> Self {
        Self {
            productions,
            lex_rules,
            ignore: ignore.into(),
        }
    }

    /// Looks up a production rule by name.
    pub fn production(&self, name: &str) -> Option<&Parselet> {
        self.productions.get(name)
    }

    pub fn productions(&self) -> &ProductionRules {
        &self.productions
    }

    /// Looks up a named lexical rule.
    pub fn lex_rule(&self, name: &str) -> Option<&LexRule> {
        self.lex_rules.get(name)
    }

    /// Patterns skipped before every token.
    pub fn ignore(&self) -> &[LexRule] {
        &self.ignore
    }

    /// A cursor at the start of `input` carrying this grammar's ignorables.
    pub fn cursor(&self, input: &str) -> Cursor {
        Cursor::with_arc(Arc::from(input), self.ignore.clone())
    }

    /// A fresh per-parse environment with an empty memo table.
    pub fn environment(&self) -> Environment<'_> {
        Environment::new(self)
    }
}

/// Counters of one environment's memo table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

/// Packrat memo table keyed by production name and byte offset.
#[derive(Debug, Default)]
struct MemoCache {
    entries: HashMap<String, HashMap<usize, ParseResult>>,
    stats: CacheStats,
}

impl MemoCache {
    fn lookup(&mut self, name: &str, offset: usize) -> Option<ParseResult> {
        let hit = self
            .entries
            .get(name)
            .and_then(|by_offset| by_offset.get(&offset))
            .cloned();
        if hit.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        hit
    }

    fn store(&mut self, name: &str, offset: usize, result: ParseResult) {
        let fresh = self
            .entries
            .entry(name.to_string())
            .or_default()
            .insert(offset, result)
            .is_none();
        if fresh {
            self.stats.entries += 1;
        }
    }
}

/// The per-parse view of a grammar.
///
/// Owns the memo table for exactly one top-level parse; dropping the
/// environment discards it. Not shared between threads.
#[derive(Debug)]
pub struct Environment<'g> {
    grammar: &'g Grammar,
    cache: RefCell<MemoCache>,
}

impl<'g> Environment<'g> {
    /// An environment with an empty memo table.
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            cache: RefCell::new(MemoCache::default()),
        }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn lex_rule(&self, name: &str) -> Option<&'g LexRule> {
        self.grammar.lex_rule(name)
    }

    /// True if the grammar defines a production called `name`.
    pub fn has_production(&self, name: &str) -> bool {
        self.grammar.production(name).is_some()
    }

    /// Applies the production `name` at `cursor`, answering from the memo
    /// table when the same production was already tried at this offset.
    ///
    /// Returns `None` when no production of that name exists.
    pub fn apply(&self, name: &str, cursor: &Cursor) -> Option<ParseResult> {
        let rule = self.grammar.production(name)?;
        let offset = cursor.offset();

        let cached = self.cache.borrow_mut().lookup(name, offset);
        if let Some(result) = cached {
            trace!(production = name, offset, "memo hit");
            return Some(result);
        }
        trace!(production = name, offset, "memo miss");

        // The table is not borrowed while the rule runs: productions recurse
        // back into `apply`.
        let result = rule.parse(self, cursor);
        self.cache.borrow_mut().store(name, offset, result.clone());
        Some(result)
    }

    /// Hit, miss and entry counts of the memo table so far.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Reject;

    #[test]
    fn test_store_counts_each_key_once() {
        let cursor = Cursor::new("ab");
        let mut cache = MemoCache::default();
        cache.store("a", 0, Err(Reject::new(cursor.clone(), "first")));
        cache.store("a", 0, Err(Reject::new(cursor.clone(), "again")));
        cache.store("a", 1, Err(Reject::new(cursor.at(1), "next")));
        cache.store("b", 0, Err(Reject::new(cursor, "other")));
        assert_eq!(cache.stats.entries, 3);

        let stored = cache.lookup("a", 0).and_then(Result::err);
        assert_eq!(stored.map(|reject| reject.message), Some("again".to_string()));
        assert_eq!(cache.stats.hits, 1);
    }
}
