//! Wirth syntax notation.
//!
//! ```text
//! SYNTAX     = { PRODUCTION } .
//! PRODUCTION = IDENTIFIER "=" EXPRESSION "." .
//! EXPRESSION = TERM { "|" TERM } .
//! TERM       = FACTOR { FACTOR } .
//! FACTOR     = IDENTIFIER | LITERAL | "[" EXPRESSION "]"
//!            | "(" EXPRESSION ")" | "{" EXPRESSION "}" .
//! LITERAL    = """" CHARACTER { CHARACTER } """" .
//! ```
//!
//! A doubled quote inside a literal stands for one quote character.

use common_framework::Result;
use parser_framework::{
    choice, literal, one_or_more, optional, production, sequence, token, zero_or_more, Parselet,
    Production,
};
use pipeline_core::{CombinatorSpec, Parser};

use crate::fold::{alternatives, concatenation, strip_quotes, Shape};
use crate::notation::{compile, compile_fragment, Notation, TextSpec};

const SHAPE: Shape = Shape::new(Wsn::NAME);

pub struct Wsn;

impl Notation for Wsn {
    const NAME: &'static str = "WSN";
    const GRAMMAR: &'static str = "syntax";
    const FRAGMENT: &'static str = "expression";

    fn meta_parser() -> Result<Parser> {
        CombinatorSpec::new()
            .lexical_pattern("identifier", "[A-Za-z][A-Za-z0-9_]*")?
            .lexical_pattern("literal", r#""(?:[^"]|"")+""#)?
            .ignore_pattern(r"\s+")?
            .production("syntax", zero_or_more(production("production")))?
            .production(
                "production",
                sequence![token("identifier"), "=", production("expression"), "."],
            )?
            .production(
                "expression",
                sequence![
                    production("term"),
                    zero_or_more(sequence!["|", production("term")]),
                ],
            )?
            .production("term", one_or_more(production("factor")))?
            .production(
                "factor",
                choice![
                    production("identifier"),
                    production("literal"),
                    production("option"),
                    production("group"),
                    production("repeat"),
                ],
            )?
            .production("identifier", token("identifier"))?
            .production("literal", token("literal"))?
            .production("option", sequence!["[", production("expression"), "]"])?
            .production("group", sequence!["(", production("expression"), ")"])?
            .production("repeat", sequence!["{", production("expression"), "}"])?
            .build()
    }

    fn fold_grammar(tree: &Production) -> Result<CombinatorSpec> {
        SHAPE
            .array(tree, "syntax")?
            .iter()
            .try_fold(CombinatorSpec::new(), |spec, node| {
                let body = SHAPE.named(node, "production")?;
                let [name, _, expression, _] = SHAPE.tuple::<4>(body, "production")?;
                let rule = fold_expression(SHAPE.named(expression, "expression")?)?;
                spec.production(SHAPE.text(name, "production")?, rule)
            })
    }

    fn fold_fragment(tree: &Production) -> Result<Parselet> {
        fold_expression(tree)
    }
}

fn fold_expression(body: &Production) -> Result<Parselet> {
    let [first, rest] = SHAPE.tuple::<2>(body, "expression")?;
    let mut terms = vec![fold_term(first)?];
    for branch in SHAPE.array(rest, "expression")? {
        let [_, term] = SHAPE.tuple::<2>(branch, "expression")?;
        terms.push(fold_term(term)?);
    }
    alternatives(terms, false)
}

fn fold_term(node: &Production) -> Result<Parselet> {
    let factors = SHAPE
        .array(SHAPE.named(node, "term")?, "term")?
        .iter()
        .map(fold_factor)
        .collect::<Result<Vec<_>>>()?;
    concatenation(factors)
}

fn fold_factor(node: &Production) -> Result<Parselet> {
    let factor = SHAPE.named(node, "factor")?;
    match SHAPE.variant(factor, "factor")? {
        ("identifier", body) => production(SHAPE.text(body, "identifier")?),
        ("literal", body) => {
            let text = strip_quotes(SHAPE.text(body, "literal")?).replace("\"\"", "\"");
            literal(&text)
        }
        ("option", body) => optional(fold_enclosed(body, "option")?),
        ("group", body) => fold_enclosed(body, "group"),
        ("repeat", body) => zero_or_more(fold_enclosed(body, "repeat")?),
        _ => Err(SHAPE.defect("factor", factor)),
    }
}

fn fold_enclosed(body: &Production, kind: &str) -> Result<Parselet> {
    let [_, expression, _] = SHAPE.tuple::<3>(body, kind)?;
    fold_expression(SHAPE.named(expression, "expression")?)
}

/// Compiles a WSN grammar.
pub fn wsn(spec: impl Into<TextSpec>) -> Result<Parser> {
    compile::<Wsn>(spec.into())
}

/// Compiles a single WSN expression, e.g. `"a" { "b" } | "c"`.
pub fn wsn_fragment(text: &str) -> Result<Parselet> {
    compile_fragment::<Wsn>(text)
}
