//! Tree-shape accessors shared by the notation visitors.
//!
//! A meta-grammar fixes the shape of every tree it produces, so any mismatch
//! found here is a defect in the notation compiler and is reported as
//! [`Error::Structural`].

use common_framework::{Error, Result};
use parser_framework::{choice, ordered_choice, sequence, Parselet, Production};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Shape {
    notation: &'static str,
}

impl Shape {
    pub(crate) const fn new(notation: &'static str) -> Self {
        Self { notation }
    }

    pub(crate) fn defect(&self, production: &str, found: &Production) -> Error {
        Error::Structural {
            notation: self.notation,
            production: production.to_string(),
            found: found.shape(),
        }
    }

    /// The body of a `Named(name, ..)` node.
    pub(crate) fn named<'t>(&self, node: &'t Production, name: &str) -> Result<&'t Production> {
        match node {
            Production::Named(named) if named.name() == name => Ok(named.node()),
            Production::Named(_) | Production::Token(_) | Production::Array(_) => {
                Err(self.defect(name, node))
            }
        }
    }

    /// The name and body of a `Named` node of any name.
    pub(crate) fn variant<'t>(
        &self,
        node: &'t Production,
        production: &str,
    ) -> Result<(&'t str, &'t Production)> {
        match node {
            Production::Named(named) => Ok((named.name(), named.node())),
            Production::Token(_) | Production::Array(_) => Err(self.defect(production, node)),
        }
    }

    pub(crate) fn array<'t>(&self, node: &'t Production, production: &str) -> Result<&'t [Production]> {
        match node {
            Production::Array(array) => Ok(&array.nodes[..]),
            Production::Token(_) | Production::Named(_) => Err(self.defect(production, node)),
        }
    }

    /// An array of exactly `N` nodes.
    pub(crate) fn tuple<'t, const N: usize>(
        &self,
        node: &'t Production,
        production: &str,
    ) -> Result<&'t [Production; N]> {
        self.array(node, production)?
            .try_into()
            .map_err(|_| self.defect(production, node))
    }

    /// The text of a real (non-sentinel) token.
    pub(crate) fn text<'t>(&self, node: &'t Production, production: &str) -> Result<&'t str> {
        match node {
            Production::Token(token) if !token.is_sentinel() => Ok(token.value()),
            Production::Token(_) | Production::Named(_) | Production::Array(_) => {
                Err(self.defect(production, node))
            }
        }
    }
}

/// `true` for the zero-width match an absent `optional` leaves behind.
pub(crate) fn is_absent(node: &Production) -> bool {
    matches!(node, Production::Token(token) if token.is_empty())
}

/// A single alternative as itself, several as a choice.
pub(crate) fn alternatives(mut rules: Vec<Parselet>, ordered: bool) -> Result<Parselet> {
    match rules.len() {
        1 => Ok(rules.remove(0)),
        _ if ordered => ordered_choice(rules),
        _ => choice(rules),
    }
}

/// A single item as itself, several as a sequence.
pub(crate) fn concatenation(mut rules: Vec<Parselet>) -> Result<Parselet> {
    match rules.len() {
        1 => Ok(rules.remove(0)),
        _ => sequence(rules),
    }
}

/// Resolves backslash escapes in a quoted literal body.
pub(crate) fn unescape(notation: &'static str, body: &str) -> Result<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('u') => out.push(code_point(notation, body, &mut chars)?),
            Some(ch @ ('\\' | '"' | '\'' | '/' | '[' | ']' | '-')) => out.push(ch),
            Some(other) => {
                return Err(Error::construction(format!(
                    "{notation}: unknown escape `\\{other}` in literal {body:?}"
                )))
            }
            None => {
                return Err(Error::construction(format!(
                    "{notation}: dangling `\\` in literal {body:?}"
                )))
            }
        }
    }
    Ok(out)
}

// Reads the four hex digits of a `\uXXXX` escape.
fn code_point(
    notation: &'static str,
    body: &str,
    chars: &mut std::str::Chars<'_>,
) -> Result<char> {
    let digits: String = chars.by_ref().take(4).collect();
    let code = if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        u32::from_str_radix(&digits, 16).ok()
    } else {
        None
    };
    code.and_then(char::from_u32).ok_or_else(|| {
        Error::construction(format!(
            "{notation}: bad `\\u{digits}` escape in literal {body:?}"
        ))
    })
}

/// Strips the first and last character (the quotes) of a quoted token.
pub(crate) fn strip_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser_framework::{ArrayProduction, NamedProduction};

    #[test]
    fn test_unescape_handles_json_style_escapes() {
        assert_eq!(unescape("test", r"\u0041\/\b\f").unwrap(), "A/\u{8}\u{c}");
        assert!(unescape("test", r"\u12").is_err());
        assert!(unescape("test", r"\uD800").is_err());
        assert!(unescape("test", r"\q").is_err());
    }

    #[test]
    fn test_unexpected_shape_is_structural() {
        let shape = Shape::new("test");
        let node = Production::Array(ArrayProduction::new(Vec::new()));

        let err = shape.named(&node, "rule").unwrap_err();
        assert!(err.is_internal());
        assert_eq!(
            err,
            Error::Structural {
                notation: "test",
                production: "rule".to_string(),
                found: "array of 0".to_string(),
            }
        );
        assert!(shape.tuple::<2>(&node, "rule").is_err());
    }

    #[test]
    fn test_named_checks_the_name() {
        let shape = Shape::new("test");
        let inner = Production::Array(ArrayProduction::new(Vec::new()));
        let node = Production::Named(NamedProduction::new("list".into(), inner));

        assert!(shape.named(&node, "list").is_ok());
        assert!(shape.named(&node, "term").is_err());
        assert_eq!(shape.variant(&node, "term").unwrap().0, "list");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("test", r#"a\"b\n"#).unwrap(), "a\"b\n");
        assert!(unescape("test", r"\q").is_err());
        assert!(unescape("test", "\\").is_err());
        assert_eq!(strip_quotes("'λ'"), "λ");
    }
}
