//! The rule constructors.
//!
//! Every constructor returns a [`Parselet`](crate::Parselet); the ones that
//! validate their arguments return it inside a
//! [`Result`](common_framework::Result) so malformed grammars fail when they
//! are built rather than when they are used.

mod compose;
mod lookahead;
mod reference;
mod repeat;
mod terminal;

pub use compose::{choice, ordered_choice, sequence};
pub use lookahead::{not, try_rule};
pub use reference::production;
pub use repeat::{one_or_more, optional, repetition, zero_or_more};
pub use terminal::{
    empty, eof, literal, literal_case_insensitive, regex, token, unicode_point, unicode_range,
};
