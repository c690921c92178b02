//! Parsing expression grammars.
//!
//! ```text
//! # comment
//! sum     <- product ("+" product)* ;
//! product <- <integer> / "(" sum ")"
//! ```
//!
//! Alternatives (`/`) are ordered. `&e` and `!e` are lookaheads, `e*`, `e+`
//! and `e?` repeat, `.` matches any character, `<name>` references the
//! lexical rule `name` and `<EOF>` / `<e>` stand for the end of input and the
//! empty string. The `;` after a rule is optional.

use common_framework::Result;
use parser_framework::{
    empty, eof, literal, not, one_or_more, optional, ordered_choice, production, regex, sequence,
    token, try_rule, zero_or_more, Parselet, Production,
};
use pipeline_core::{CombinatorSpec, Parser};

use crate::fold::{alternatives, concatenation, is_absent, strip_quotes, unescape, Shape};
use crate::notation::{compile, compile_fragment, Notation, TextSpec};

const SHAPE: Shape = Shape::new(Peg::NAME);

pub struct Peg;

impl Notation for Peg {
    const NAME: &'static str = "PEG";
    const GRAMMAR: &'static str = "grammar";
    const FRAGMENT: &'static str = "expression";

    fn meta_parser() -> Result<Parser> {
        CombinatorSpec::new()
            .lexical_pattern("identifier", "[A-Za-z_][A-Za-z0-9_]*")?
            .lexical_pattern("literal", r#""(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'"#)?
            .ignore_pattern(r"\s+")?
            .ignore_pattern(r"#[^\n]*")?
            .production("grammar", one_or_more(production("rule")))?
            .production(
                "rule",
                sequence![
                    token("identifier"),
                    "<-",
                    production("expression"),
                    optional(";"),
                ],
            )?
            .production(
                "expression",
                sequence![
                    production("sequence"),
                    zero_or_more(sequence!["/", production("sequence")]),
                ],
            )?
            .production("sequence", one_or_more(production("prefix")))?
            .production(
                "prefix",
                sequence![optional(ordered_choice!["&", "!"]), production("suffix")],
            )?
            .production(
                "suffix",
                sequence![
                    production("primary"),
                    optional(ordered_choice!["*", "+", "?"]),
                ],
            )?
            .production(
                "primary",
                ordered_choice![
                    production("group"),
                    production("end"),
                    production("nothing"),
                    production("lexical"),
                    production("literal"),
                    production("any"),
                    production("reference"),
                ],
            )?
            .production("group", sequence!["(", production("expression"), ")"])?
            .production("end", "<EOF>")?
            .production("nothing", "<e>")?
            .production("lexical", sequence!["<", token("identifier"), ">"])?
            .production("literal", token("literal"))?
            .production("any", ".")?
            // A name followed by `<-` starts the next rule.
            .production("reference", sequence![token("identifier"), not("<-")])?
            .build()
    }

    fn fold_grammar(tree: &Production) -> Result<CombinatorSpec> {
        SHAPE
            .array(tree, "grammar")?
            .iter()
            .try_fold(CombinatorSpec::new(), |spec, node| {
                let body = SHAPE.named(node, "rule")?;
                let [name, _, expression, _] = SHAPE.tuple::<4>(body, "rule")?;
                let rule = fold_expression(SHAPE.named(expression, "expression")?)?;
                spec.production(SHAPE.text(name, "rule")?, rule)
            })
    }

    fn fold_fragment(tree: &Production) -> Result<Parselet> {
        fold_expression(tree)
    }
}

fn fold_expression(body: &Production) -> Result<Parselet> {
    let [first, rest] = SHAPE.tuple::<2>(body, "expression")?;
    let mut branches = vec![fold_sequence(first)?];
    for branch in SHAPE.array(rest, "expression")? {
        let [_, sequence] = SHAPE.tuple::<2>(branch, "expression")?;
        branches.push(fold_sequence(sequence)?);
    }
    alternatives(branches, true)
}

fn fold_sequence(node: &Production) -> Result<Parselet> {
    let items = SHAPE
        .array(SHAPE.named(node, "sequence")?, "sequence")?
        .iter()
        .map(fold_prefix)
        .collect::<Result<Vec<_>>>()?;
    concatenation(items)
}

fn fold_prefix(node: &Production) -> Result<Parselet> {
    let [operator, suffix] = SHAPE.tuple::<2>(SHAPE.named(node, "prefix")?, "prefix")?;
    let rule = fold_suffix(suffix)?;
    if is_absent(operator) {
        return Ok(rule);
    }
    match SHAPE.text(operator, "prefix")? {
        "&" => try_rule(rule),
        "!" => not(rule),
        _ => Err(SHAPE.defect("prefix", operator)),
    }
}

fn fold_suffix(node: &Production) -> Result<Parselet> {
    let [primary, operator] = SHAPE.tuple::<2>(SHAPE.named(node, "suffix")?, "suffix")?;
    let rule = fold_primary(primary)?;
    if is_absent(operator) {
        return Ok(rule);
    }
    match SHAPE.text(operator, "suffix")? {
        "*" => zero_or_more(rule),
        "+" => one_or_more(rule),
        "?" => optional(rule),
        _ => Err(SHAPE.defect("suffix", operator)),
    }
}

fn fold_primary(node: &Production) -> Result<Parselet> {
    let primary = SHAPE.named(node, "primary")?;
    match SHAPE.variant(primary, "primary")? {
        ("group", body) => {
            let [_, expression, _] = SHAPE.tuple::<3>(body, "group")?;
            fold_expression(SHAPE.named(expression, "expression")?)
        }
        ("end", _) => Ok(eof()),
        ("nothing", _) => Ok(empty()),
        ("lexical", body) => {
            let [_, name, _] = SHAPE.tuple::<3>(body, "lexical")?;
            token(SHAPE.text(name, "lexical")?)
        }
        ("literal", body) => {
            let value = unescape(Peg::NAME, strip_quotes(SHAPE.text(body, "literal")?))?;
            if value.is_empty() {
                Ok(empty())
            } else {
                literal(&value)
            }
        }
        ("any", _) => regex("any", "(?s)."),
        ("reference", body) => {
            let [name, _] = SHAPE.tuple::<2>(body, "reference")?;
            production(SHAPE.text(name, "reference")?)
        }
        _ => Err(SHAPE.defect("primary", primary)),
    }
}

/// Compiles a PEG grammar.
pub fn peg(spec: impl Into<TextSpec>) -> Result<Parser> {
    compile::<Peg>(spec.into())
}

/// Compiles a single PEG expression, e.g. `"a"+ !"b" / <integer>`.
pub fn peg_fragment(text: &str) -> Result<Parselet> {
    compile_fragment::<Peg>(text)
}
