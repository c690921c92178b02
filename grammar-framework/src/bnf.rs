//! Backus-Naur form.
//!
//! ```text
//! <syntax>  ::= <rule> | <rule> <syntax>
//! <rule>    ::= "<" <name> ">" "::=" <expression> <line-end>
//! <expression> ::= <list> | <list> "|" <expression>
//! ```
//!
//! Alternatives compile to the strict, unordered [`choice`]: at most one of
//! them may match at any position. A `|` may start a continuation line, and
//! the empty literal `""` stands for the empty string.
//!
//! [`choice`]: parser_framework::choice

use common_framework::Result;
use parser_framework::{
    empty, literal, not, one_or_more, optional, ordered_choice, production, regex, sequence,
    token, zero_or_more, Parselet, Production,
};
use pipeline_core::{CombinatorSpec, Parser};

use crate::fold::{alternatives, concatenation, strip_quotes, unescape, Shape};
use crate::notation::{compile, compile_fragment, Notation, TextSpec};

const SHAPE: Shape = Shape::new(Bnf::NAME);

pub struct Bnf;

impl Notation for Bnf {
    const NAME: &'static str = "BNF";
    const GRAMMAR: &'static str = "syntax";
    const FRAGMENT: &'static str = "expression";

    fn meta_parser() -> Result<Parser> {
        CombinatorSpec::new()
            .lexical_pattern("rule-name", r"[A-Za-z][A-Za-z0-9_\-]*")?
            .lexical_pattern("line-end", r"(?:[ \t]*\r?\n)+")?
            .lexical_pattern("text", r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#)?
            .ignore_pattern(r"[ \t]+")?
            .production(
                "syntax",
                sequence![optional(token("line-end")), one_or_more(production("rule"))],
            )?
            .production(
                "rule",
                sequence![
                    "<",
                    token("rule-name"),
                    ">",
                    "::=",
                    production("expression"),
                    // or the end of the text, past any trailing blanks
                    ordered_choice![token("line-end"), not(regex("any", "(?s)."))],
                ],
            )?
            .production(
                "expression",
                sequence![
                    production("list"),
                    zero_or_more(sequence![
                        optional(token("line-end")),
                        "|",
                        production("list")
                    ]),
                ],
            )?
            .production(
                "list",
                one_or_more(ordered_choice![production("reference"), production("literal")]),
            )?
            .production("reference", sequence!["<", token("rule-name"), ">"])?
            .production("literal", token("text"))?
            .build()
    }

    fn fold_grammar(tree: &Production) -> Result<CombinatorSpec> {
        let [_, rules] = SHAPE.tuple::<2>(tree, "syntax")?;
        SHAPE
            .array(rules, "syntax")?
            .iter()
            .try_fold(CombinatorSpec::new(), |spec, node| {
                let body = SHAPE.named(node, "rule")?;
                let [_, name, _, _, expression, _] = SHAPE.tuple::<6>(body, "rule")?;
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
    let mut lists = vec![fold_list(first)?];
    for alternative in SHAPE.array(rest, "expression")? {
        let [_, _, list] = SHAPE.tuple::<3>(alternative, "expression")?;
        lists.push(fold_list(list)?);
    }
    alternatives(lists, false)
}

fn fold_list(node: &Production) -> Result<Parselet> {
    let terms = SHAPE
        .array(SHAPE.named(node, "list")?, "list")?
        .iter()
        .map(fold_term)
        .collect::<Result<Vec<_>>>()?;
    concatenation(terms)
}

fn fold_term(node: &Production) -> Result<Parselet> {
    match SHAPE.variant(node, "list")? {
        ("reference", body) => {
            let [_, name, _] = SHAPE.tuple::<3>(body, "reference")?;
            production(SHAPE.text(name, "reference")?)
        }
        ("literal", body) => {
            let value = unescape(Bnf::NAME, strip_quotes(SHAPE.text(body, "literal")?))?;
            if value.is_empty() {
                Ok(empty())
            } else {
                literal(&value)
            }
        }
        _ => Err(SHAPE.defect("list", node)),
    }
}

/// Compiles a BNF grammar.
pub fn bnf(spec: impl Into<TextSpec>) -> Result<Parser> {
    compile::<Bnf>(spec.into())
}

/// Compiles a single BNF expression, e.g. `"(" <list> ")" | <atom>`.
pub fn bnf_fragment(text: &str) -> Result<Parselet> {
    compile_fragment::<Bnf>(text)
}
