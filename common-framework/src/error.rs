//! Error types shared by every layer of the engine.
//!
//! Ordinary parse failures are not errors: parselets return a `Reject` that
//! enclosing combinators may absorb. An [`Error`] is produced only when a
//! failure can no longer be recovered from, or when a grammar is malformed
//! before any text is parsed.

use thiserror::Error;

use crate::Position;

/// Result type used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A combinator or grammar was assembled from invalid arguments.
    #[error("invalid grammar construction: {0}")]
    Construction(String),

    /// A parse was rejected and the rejection reached the driver boundary.
    #[error("`{production}` rejected input at {position}: {message}")]
    Reject {
        production: String,
        position: Position,
        message: String,
    },

    /// The rejection that reached the driver boundary came from an
    /// unordered choice in which more than one alternative matched.
    #[error("`{production}` is ambiguous at {position}: {message}")]
    Ambiguous {
        production: String,
        position: Position,
        message: String,
    },

    /// An entry point was requested for a production that was never declared.
    #[error("no production rule named `{0}`")]
    UnknownProduction(String),

    /// A notation visitor met a parse tree it does not know how to fold.
    /// This is a defect in the notation compiler, not in the user's grammar.
    #[error("{notation} compiler: unexpected parse tree for `{production}`: {found}")]
    Structural {
        notation: &'static str,
        production: String,
        found: String,
    },

    /// The grammar uses a construct the engine cannot execute.
    #[error("{notation}: {construct} is not supported")]
    Unsupported {
        notation: &'static str,
        construct: String,
    },
}

impl Error {
    /// Shorthand for [`Error::Construction`].
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction(message.into())
    }

    /// Returns `true` for errors that indicate a bug in the engine itself
    /// rather than a problem with the caller's grammar or input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }
}
