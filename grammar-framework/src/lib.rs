//! Grammar Framework
//!
//! Compilers from textual grammar notations to parsers. Each notation is
//! itself parsed by a grammar built from the parser framework's primitives;
//! a visitor then folds the resulting tree into production rules for the
//! driver.
//!
//! ```no_run
//! use grammar_framework::ebnf;
//!
//! let parser = ebnf(r#"greeting = "hello", { "!" };"#)?;
//! let tree = parser.parse_all("greeting", "hello!!")?;
//! assert_eq!(tree.terminals(), vec!["hello", "!", "!"]);
//! # Ok::<(), grammar_framework::Error>(())
//! ```

mod fold;
mod notation;

pub mod abnf;
pub mod bnf;
pub mod ebnf;
pub mod peg;
pub mod wsn;

pub use abnf::{abnf, abnf_fragment, Abnf};
pub use bnf::{bnf, bnf_fragment, Bnf};
pub use common_framework::{Error, Result};
pub use ebnf::{ebnf, ebnf_fragment, Ebnf};
pub use notation::{compile, compile_fragment, Notation, TextSpec};
pub use peg::{peg, peg_fragment, Peg};
pub use wsn::{wsn, wsn_fragment, Wsn};
