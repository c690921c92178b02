//! Parser Framework
//!
//! Packrat parser combinators over the stateless lexer.
//!
//! A grammar is a set of named [`Parselet`]s. Each parselet is a pure
//! function from a [`Cursor`] to a [`Match`] or a [`Reject`]; combinators
//! compose them and [`production`] references resolve by name at parse time
//! through the per-parse [`Environment`], which memoizes every
//! (production, offset) pair.

#[macro_use]
mod macros;

pub mod ast;
pub mod environment;
pub mod result;
pub mod rules;
pub mod traits;

pub use ast::{ArrayProduction, NamedProduction, Production};
pub use common_framework::{Error, Position, Result};
pub use environment::{CacheStats, Environment, Grammar, ProductionRules};
pub use lexer_framework::{Cursor, LexRule, LexTable, Token, TokenKind};
pub use result::{Match, ParseResult, Reject, RejectKind};
pub use rules::{
    choice, empty, eof, literal, literal_case_insensitive, not, one_or_more, optional,
    ordered_choice, production, regex, repetition, sequence, token, try_rule, unicode_point,
    unicode_range, zero_or_more,
};
pub use traits::{IntoParselet, ParsingRule, Parselet};
