use std::fmt;

use lexer_framework::{Cursor, Token, TokenKind};

use crate::ast::Production;

/// Why a rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectKind {
    /// The input did not match.
    Mismatch,
    /// An unordered choice matched more than one alternative.
    Ambiguous,
}

/// A successful application of a rule: the node it built and the cursor just
/// past the input it consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub cursor: Cursor,
    pub node: Production,
}

/// A failed application of a rule.
///
/// Rejects are ordinary values; combinators inspect them to backtrack.
#[derive(Debug, Clone, PartialEq)]
pub struct Reject {
    pub cursor: Cursor,
    pub message: String,
    pub kind: RejectKind,
}

/// What every rule returns.
pub type ParseResult = Result<Match, Reject>;

impl Match {
    /// A match that built `node` and stopped at `cursor`.
    pub fn new(cursor: Cursor, node: Production) -> Self {
        Self { cursor, node }
    }

    /// A zero-width `EMPTY` match at `cursor`.
    pub fn empty_at(cursor: &Cursor) -> Self {
        let offset = cursor.offset();
        let token = Token::new(TokenKind::Empty, cursor.slice(offset, offset));
        Self::new(cursor.clone(), Production::Token(token))
    }

    /// Byte offset just past the consumed input.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }
}

impl Reject {
    /// A plain mismatch at `cursor`.
    pub fn new(cursor: Cursor, message: impl Into<String>) -> Self {
        Self {
            cursor,
            message: message.into(),
            kind: RejectKind::Mismatch,
        }
    }

    /// A reject raised by an unordered choice with more than one winner.
    ///
    /// Enclosing choices propagate it instead of trying their next
    /// alternative.
    pub fn ambiguous(cursor: Cursor, message: impl Into<String>) -> Self {
        Self {
            kind: RejectKind::Ambiguous,
            ..Self::new(cursor, message)
        }
    }

    /// Byte offset where the rule failed.
    pub fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.kind == RejectKind::Ambiguous
    }
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.cursor.position())
    }
}
