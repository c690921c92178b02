//! Combinator driver.
//!
//! Builds a [`Parser`] from a declarative [`CombinatorSpec`]. The parser
//! merges the declared lexical rules over the built-in token table and runs
//! each requested production against a fresh cursor and memo table; a
//! rejection that reaches the top is returned as an [`Error`].

mod parser;
mod spec;

pub use common_framework::{Error, Position, Result};
pub use parser::{Combinator, EntryPoint, Parser};
pub use spec::CombinatorSpec;
