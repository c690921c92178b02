use std::fmt;
use std::sync::Arc;

use lexer_framework::Token;

/// A node of the concrete syntax tree.
///
/// Terminals become [`Production::Token`], every reference to a named
/// production wraps its result in [`Production::Named`], and repetitions and
/// sequences collect their children into [`Production::Array`].
#[derive(Debug, Clone, PartialEq)]
pub enum Production {
    Token(Token),
    Named(NamedProduction),
    Array(ArrayProduction),
}

/// The result of applying a named production.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProduction {
    pub name: Arc<str>,
    pub node: Arc<Production>,
}

/// An ordered list of child nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayProduction {
    pub nodes: Arc<[Production]>,
}

impl NamedProduction {
    /// Wraps `node` as the result of the production `name`.
    pub fn new(name: Arc<str>, node: Production) -> Self {
        Self {
            name,
            node: Arc::new(node),
        }
    }

    /// The production's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The body the production matched.
    pub fn node(&self) -> &Production {
        &self.node
    }
}

impl ArrayProduction {
    /// Collects `nodes` in order.
    pub fn new(nodes: Vec<Production>) -> Self {
        Self {
            nodes: nodes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the child at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Production> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Production> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a ArrayProduction {
    type Item = &'a Production;
    type IntoIter = std::slice::Iter<'a, Production>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Production {
    /// Returns the token if this node is a terminal.
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Returns the named production this node wraps, whatever its name.
    ///
    /// Use [`Production::named`] to also check the name.
    pub fn as_named(&self) -> Option<&NamedProduction> {
        match self {
            Self::Named(named) => Some(named),
            _ => None,
        }
    }

    /// Returns the children if this node is a sequence or repetition.
    pub fn as_array(&self) -> Option<&ArrayProduction> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the node wrapped by a named production of the given name.
    pub fn named(&self, name: &str) -> Option<&Production> {
        self.as_named()
            .filter(|named| &*named.name == name)
            .map(NamedProduction::node)
    }

    /// Text of every real token below this node, in input order.
    ///
    /// `EOF` and `EMPTY` sentinels are skipped.
    pub fn terminals(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Token(token) if !token.is_sentinel() => out.push(token.value()),
            Self::Token(_) => {}
            Self::Named(named) => named.node.collect_terminals(out),
            Self::Array(array) => array.iter().for_each(|node| node.collect_terminals(out)),
        }
    }

    /// Byte range covered by the real tokens below this node.
    pub fn span(&self) -> Option<(usize, usize)> {
        match self {
            Self::Token(token) if !token.is_sentinel() => Some((token.start(), token.end())),
            Self::Token(_) => None,
            Self::Named(named) => named.node.span(),
            Self::Array(array) => {
                let mut spans = array.iter().filter_map(Production::span);
                let first = spans.next()?;
                let last = spans.last().unwrap_or(first);
                Some((first.0, last.1))
            }
        }
    }

    /// Short description of the node's shape, used in diagnostics.
    pub fn shape(&self) -> String {
        match self {
            Self::Token(token) => format!("token {}({:?})", token.kind, token.value()),
            Self::Named(named) => format!("production `{}`", named.name),
            Self::Array(array) => format!("array of {}", array.len()),
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{token}"),
            Self::Named(named) => write!(f, "{}({})", named.name, named.node),
            Self::Array(array) => {
                f.write_str("[")?;
                for (i, node) in array.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{node}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(feature = "serde")]
mod serialize {
    use serde::ser::{SerializeSeq, SerializeStruct};
    use serde::{Serialize, Serializer};

    use super::{ArrayProduction, NamedProduction, Production};

    impl Serialize for Production {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Token(token) => {
                    let mut state = serializer.serialize_struct("Token", 4)?;
                    state.serialize_field("type", token.kind.name())?;
                    state.serialize_field("value", token.value())?;
                    state.serialize_field("start", &token.start())?;
                    state.serialize_field("end", &token.end())?;
                    state.end()
                }
                Self::Named(named) => named.serialize(serializer),
                Self::Array(array) => array.serialize(serializer),
            }
        }
    }

    impl Serialize for NamedProduction {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("Named", 2)?;
            state.serialize_field("name", &*self.name)?;
            state.serialize_field("node", &*self.node)?;
            state.end()
        }
    }

    impl Serialize for ArrayProduction {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for node in self.iter() {
                seq.serialize_element(node)?;
            }
            seq.end()
        }
    }
}
