//! The built-in lexical rules available to every grammar.

use crate::rule::{LexRule, LexTable};
use once_cell::sync::Lazy;

/// Built-in token names and their definitions.
///
/// Names follow the conventions grammar authors write in grammar text, e.g.
/// `<identifier>` or `<jsonNumber>` in a PEG.
const STANDARD_TOKENS: &[(&str, Definition)] = &[
    ("letter", Definition::Pattern("[A-Za-z]")),
    ("digit", Definition::Pattern("[0-9]")),
    ("hexDigit", Definition::Pattern("[0-9A-Fa-f]")),
    ("identifier", Definition::Pattern("[A-Za-z_][A-Za-z0-9_]*")),
    (
        "jsonString",
        Definition::Pattern(r#""(?:[^"\\\x00-\x1F\x7F]|\\(?:["\\/bfnrt]|u[0-9a-fA-F]{4}))*""#),
    ),
    (
        "jsonStringSingleQuote",
        Definition::Pattern(r#"'(?:[^'\\\x00-\x1F\x7F]|\\(?:['\\/bfnrt]|u[0-9a-fA-F]{4}))*'"#),
    ),
    (
        "jsonNumber",
        Definition::Pattern(r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?"),
    ),
    ("integer", Definition::Pattern("[1-9][0-9]*")),
    ("bit", Definition::Pattern("[01]")),
    ("cr", Definition::Literal("\r")),
    ("lf", Definition::Literal("\n")),
    ("crlf", Definition::Literal("\r\n")),
    ("quote", Definition::Literal("'")),
    ("doubleQuote", Definition::Literal("\"")),
    ("sp", Definition::Literal(" ")),
    ("tab", Definition::Literal("\t")),
    ("whitespace", Definition::Pattern(r"[ \t\r\n]+")),
    ("cComment", Definition::Pattern(r"(?s)/\*.*?\*/")),
    ("cppComment", Definition::Pattern(r"//[^\n]*\n?")),
    ("shComment", Definition::Pattern(r"#[^\n]*\n?")),
];

enum Definition {
    Literal(&'static str),
    Pattern(&'static str),
}

// The definitions above are constants; a failure here is caught by the unit
// tests below.
static STANDARD: Lazy<Vec<(&'static str, LexRule)>> = Lazy::new(|| {
    STANDARD_TOKENS
        .iter()
        .map(|(name, definition)| {
            let rule = match definition {
                Definition::Literal(text) => LexRule::literal(*text),
                Definition::Pattern(source) => {
                    LexRule::pattern(source).expect("built-in lexical pattern is valid")
                }
            };
            (*name, rule)
        })
        .collect()
});

/// Returns the built-in rules in declaration order.
pub fn standard_tokens() -> &'static [(&'static str, LexRule)] {
    &STANDARD
}

/// Returns the built-in rules as a fresh table, ready to be extended.
pub fn standard_table() -> LexTable {
    standard_tokens()
        .iter()
        .map(|(name, rule)| ((*name).to_string(), rule.clone()))
        .collect()
}
