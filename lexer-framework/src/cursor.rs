use crate::rule::LexRule;
use common_framework::{Position, TextSlice};
use std::fmt;
use std::sync::Arc;

/// An immutable lexer state: the input text, an absolute byte offset into it
/// and the ignorable rules skipped before each match attempt.
///
/// Cursors are never mutated. Every lexing step returns a new cursor, so a
/// parselet can hold on to the state it started from and backtrack by simply
/// reusing it. Cloning is cheap: the input and the ignore list are shared.
#[derive(Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    offset: usize,
    ignore: Arc<[LexRule]>,
}

impl Cursor {
    /// Creates a cursor at the start of `input` with no ignorable rules.
    pub fn new(input: &str) -> Self {
        Self::with_ignore(input, Vec::<LexRule>::new())
    }

    /// Creates a cursor at the start of `input` that skips `ignore` before
    /// every token.
    pub fn with_ignore(input: &str, ignore: impl Into<Arc<[LexRule]>>) -> Self {
        Self::with_arc(Arc::from(input), ignore.into())
    }

    /// Creates a cursor from an existing shared buffer and ignore list.
    pub fn with_arc(buffer: Arc<str>, ignore: Arc<[LexRule]>) -> Self {
        Self {
            buffer,
            offset: 0,
            ignore,
        }
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the whole input text.
    pub fn input(&self) -> &str {
        &self.buffer
    }

    /// Returns the shared input buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Returns the length of the input in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` if the input text is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the ignorable rules this cursor skips.
    pub fn ignore(&self) -> &[LexRule] {
        &self.ignore
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Returns the remaining input from the current offset.
    pub fn remaining(&self) -> &str {
        &self.buffer[self.offset..]
    }

    /// Returns a cursor over the same input positioned at `offset`.
    ///
    /// `offset` is clamped to the input length and moved back to the nearest
    /// character boundary.
    pub fn at(&self, offset: usize) -> Self {
        let mut offset = offset.min(self.buffer.len());
        while !self.buffer.is_char_boundary(offset) {
            offset -= 1;
        }
        Self {
            buffer: Arc::clone(&self.buffer),
            offset,
            ignore: Arc::clone(&self.ignore),
        }
    }

    /// Returns a cursor advanced by `len` bytes.
    pub fn advance(&self, len: usize) -> Self {
        self.at(self.offset + len)
    }

    /// Returns the text between two offsets as a shared slice.
    pub fn slice(&self, start: usize, end: usize) -> TextSlice {
        TextSlice::new(Arc::clone(&self.buffer), start, end)
    }

    /// Resolves the line and column of the current offset.
    pub fn position(&self) -> Position {
        Position::locate(&self.buffer, self.offset)
    }
}

// Two states are equal when they point at the same offset of the same text.
impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.buffer == other.buffer
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.remaining().chars().take(16).collect();
        f.debug_struct("Cursor")
            .field("offset", &self.offset)
            .field("len", &self.buffer.len())
            .field("next", &preview)
            .finish()
    }
}
