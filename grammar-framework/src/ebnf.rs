//! Extended Backus-Naur form (ISO 14977 subset).
//!
//! Rules end with `;` or `.`, concatenation is written with `,` and binds
//! tighter than `|`, and `(* ... *)` comments may appear anywhere between
//! symbols. Exceptions (`-`) and repetition counts (`3 *`) are not part of
//! the accepted subset.

use common_framework::Result;
use parser_framework::{
    choice, literal, optional, production, sequence, token, zero_or_more, Parselet, Production,
};
use pipeline_core::{CombinatorSpec, Parser};

use crate::fold::{alternatives, concatenation, strip_quotes, Shape};
use crate::notation::{compile, compile_fragment, Notation, TextSpec};

const SHAPE: Shape = Shape::new(Ebnf::NAME);

pub struct Ebnf;

impl Notation for Ebnf {
    const NAME: &'static str = "EBNF";
    const GRAMMAR: &'static str = "grammar";
    const FRAGMENT: &'static str = "alternation";

    fn meta_parser() -> Result<Parser> {
        CombinatorSpec::new()
            .lexical_pattern("meta-identifier", r"[A-Za-z][A-Za-z0-9_\-]*")?
            .lexical_pattern("terminal", r#""[^"]+"|'[^']+'"#)?
            .ignore_pattern(r"\s+")?
            .ignore_pattern(r"(?s)\(\*.*?\*\)")?
            .production("grammar", zero_or_more(production("rule")))?
            .production(
                "rule",
                sequence![
                    token("meta-identifier"),
                    "=",
                    production("alternation"),
                    choice![";", "."],
                ],
            )?
            .production(
                "alternation",
                sequence![
                    production("concatenation"),
                    zero_or_more(sequence!["|", production("concatenation")]),
                ],
            )?
            .production(
                "concatenation",
                sequence![
                    production("factor"),
                    zero_or_more(sequence![",", production("factor")]),
                ],
            )?
            .production(
                "factor",
                choice![
                    production("reference"),
                    production("terminal"),
                    production("option"),
                    production("repeat"),
                    production("group"),
                ],
            )?
            .production("reference", token("meta-identifier"))?
            .production("terminal", token("terminal"))?
            .production("option", sequence!["[", production("alternation"), "]"])?
            .production("repeat", sequence!["{", production("alternation"), "}"])?
            .production("group", sequence!["(", production("alternation"), ")"])?
            .build()
    }

    fn fold_grammar(tree: &Production) -> Result<CombinatorSpec> {
        SHAPE
            .array(tree, "grammar")?
            .iter()
            .try_fold(CombinatorSpec::new(), |spec, node| {
                let [name, _, body, _] = SHAPE.tuple::<4>(SHAPE.named(node, "rule")?, "rule")?;
                let rule = fold_alternation(body)?;
                spec.production(SHAPE.text(name, "rule")?, rule)
            })
    }

    fn fold_fragment(tree: &Production) -> Result<Parselet> {
        fold_alternatives(tree)
    }
}

fn fold_alternation(node: &Production) -> Result<Parselet> {
    fold_alternatives(SHAPE.named(node, "alternation")?)
}

fn fold_alternatives(body: &Production) -> Result<Parselet> {
    let [first, rest] = SHAPE.tuple::<2>(body, "alternation")?;
    let mut branches = vec![fold_concatenation(first)?];
    for branch in SHAPE.array(rest, "alternation")? {
        let [_, concatenation] = SHAPE.tuple::<2>(branch, "alternation")?;
        branches.push(fold_concatenation(concatenation)?);
    }
    alternatives(branches, false)
}

fn fold_concatenation(node: &Production) -> Result<Parselet> {
    let [first, rest] = SHAPE.tuple::<2>(SHAPE.named(node, "concatenation")?, "concatenation")?;
    let mut factors = vec![fold_factor(first)?];
    for item in SHAPE.array(rest, "concatenation")? {
        let [_, factor] = SHAPE.tuple::<2>(item, "concatenation")?;
        factors.push(fold_factor(factor)?);
    }
    concatenation(factors)
}

fn fold_factor(node: &Production) -> Result<Parselet> {
    let factor = SHAPE.named(node, "factor")?;
    match SHAPE.variant(factor, "factor")? {
        ("reference", body) => production(SHAPE.text(body, "reference")?),
        ("terminal", body) => literal(strip_quotes(SHAPE.text(body, "terminal")?)),
        ("option", body) => optional(fold_enclosed(body, "option")?),
        ("repeat", body) => zero_or_more(fold_enclosed(body, "repeat")?),
        ("group", body) => fold_enclosed(body, "group"),
        _ => Err(SHAPE.defect("factor", factor)),
    }
}

fn fold_enclosed(body: &Production, kind: &str) -> Result<Parselet> {
    let [_, alternation, _] = SHAPE.tuple::<3>(body, kind)?;
    fold_alternation(alternation)
}

/// Compiles an EBNF grammar.
pub fn ebnf(spec: impl Into<TextSpec>) -> Result<Parser> {
    compile::<Ebnf>(spec.into())
}

/// Compiles a single EBNF alternation, e.g. `"a", { "b" } | "c"`.
pub fn ebnf_fragment(text: &str) -> Result<Parselet> {
    compile_fragment::<Ebnf>(text)
}
