use common_framework::TextSlice;
use std::fmt;
use std::sync::Arc;

/// The type of a token: the name of the rule that produced it, or one of the
/// two reserved sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Produced by the lexical rule with this name.
    Rule(Arc<str>),
    /// The end of the input was reached; zero width.
    Eof,
    /// The requested rule did not match at this position; zero width.
    Empty,
}

impl TokenKind {
    /// Returns the rule name, or the sentinel's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Rule(name) => &**name,
            Self::Eof => "EOF",
            Self::Empty => "EMPTY",
        }
    }

    /// Returns `true` if this is the rule named `name`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, Self::Rule(rule) if &**rule == name)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexed token.
///
/// The token's text is a slice of the shared input, so the source text,
/// span and value are all derived from one [`TextSlice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    text: TextSlice,
}

impl Token {
    pub fn new(kind: TokenKind, text: TextSlice) -> Self {
        Self { kind, text }
    }

    /// Returns the matched text.
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Returns the matched text as a shared slice.
    pub fn text(&self) -> &TextSlice {
        &self.text
    }

    /// Returns the whole input this token was lexed from.
    pub fn input(&self) -> Arc<str> {
        self.text.buffer()
    }

    /// Returns the start offset in bytes.
    pub fn start(&self) -> usize {
        self.text.start()
    }

    /// Returns the end offset in bytes.
    pub fn end(&self) -> usize {
        self.text.end()
    }

    /// Returns true if this token represents end-of-input.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns true if this token records a failed match.
    pub fn is_empty(&self) -> bool {
        self.kind == TokenKind::Empty
    }

    /// Returns true for either sentinel.
    pub fn is_sentinel(&self) -> bool {
        self.is_eof() || self.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) at {}", self.kind, self.value(), self.start())
    }
}
