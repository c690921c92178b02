//! A JSON reader assembled directly from the combinator primitives.
//!
//! The grammar lives in [`json::parser`]; [`json::to_value`] folds the
//! resulting parse tree into a [`serde_json::Value`].
//!
//! ```no_run
//! let value = parser_example::parse_json(r#"{"ok": [1, 2.5, null]}"#)?;
//! assert_eq!(value["ok"][1], 2.5);
//! # Ok::<(), common_framework::Error>(())
//! ```

pub mod json;

pub use json::{parse_json, parser, to_value};
