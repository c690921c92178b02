//! Lexer Framework
//!
//! A stateless, cursor-addressed tokenizer. Every lexing step takes an
//! immutable [`Cursor`] and a single lexical rule and returns the token found
//! there together with a new cursor; ignorable runs configured on the cursor
//! are skipped before each match attempt.

pub mod cursor;
pub mod lexer;
pub mod rule;
pub mod standard;
pub mod token;

pub use common_framework::{Position, TextSlice};
pub use cursor::Cursor;
pub use lexer::{consume, lex, peek, skip_ignored};
pub use rule::{LexRule, LexTable};
pub use standard::{standard_table, standard_tokens};
pub use token::{Token, TokenKind};
