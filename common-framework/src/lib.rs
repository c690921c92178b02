//! Common Framework
//!
//! Shared building blocks for the lexer, parser and driver crates: source
//! positions, shared-buffer text slices and the engine-wide error type.

pub mod error;
pub mod position;
pub mod text_slice;

pub use error::{Error, Result};
pub use position::Position;
pub use text_slice::TextSlice;
