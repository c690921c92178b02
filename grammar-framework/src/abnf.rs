//! Augmented BNF (RFC 5234, with the RFC 7405 `%s` / `%i` string prefixes).
//!
//! Alternatives (`/`) compile to ordered choices. Quoted strings match case
//! insensitively unless prefixed with `%s`; rule names are case sensitive.
//! The RFC 5234 core rules (`ALPHA`, `DIGIT`, `CRLF`, ...) are available to
//! every grammar that does not define them itself.

use std::collections::{BTreeMap, BTreeSet};

use common_framework::{Error, Result};
use lexer_framework::LexRule;
use parser_framework::{
    empty, literal, literal_case_insensitive, not, one_or_more, optional, ordered_choice,
    production, regex, repetition, sequence, token, unicode_range, zero_or_more, Parselet,
    Production,
};
use pipeline_core::{CombinatorSpec, Parser};

use crate::fold::{alternatives, concatenation, is_absent, Shape};
use crate::notation::{compile, compile_fragment, Notation, TextSpec};

const SHAPE: Shape = Shape::new(Abnf::NAME);

/// RFC 5234 appendix B.1.
const CORE_RULES: &[(&str, &str)] = &[
    ("ALPHA", "[A-Za-z]"),
    ("BIT", "[01]"),
    ("CHAR", r"[\x01-\x7F]"),
    ("CR", r"\r"),
    ("CRLF", r"\r\n"),
    ("CTL", r"[\x00-\x1F\x7F]"),
    ("DIGIT", "[0-9]"),
    ("DQUOTE", "\""),
    ("HEXDIG", "[0-9A-Fa-f]"),
    ("HTAB", r"\t"),
    ("LF", r"\n"),
    ("LWSP", r"(?:[ \t]|\r\n[ \t])*"),
    ("OCTET", r"[\x00-\xFF]"),
    ("SP", " "),
    ("VCHAR", r"[\x21-\x7E]"),
    ("WSP", r"[ \t]"),
];

fn core_rule(name: &str) -> Option<&'static str> {
    CORE_RULES
        .iter()
        .find(|(core, _)| *core == name)
        .map(|(_, pattern)| *pattern)
}

pub struct Abnf;

impl Notation for Abnf {
    const NAME: &'static str = "ABNF";
    const GRAMMAR: &'static str = "rulelist";
    const FRAGMENT: &'static str = "alternation";

    fn meta_parser() -> Result<Parser> {
        CombinatorSpec::new()
            .lexical_pattern("rulename", r"[A-Za-z][A-Za-z0-9\-]*")?
            .lexical_pattern("repeat", r"[0-9]*\*[0-9]*|[0-9]+")?
            .lexical_pattern("char-val", r#"%[sSiI]"[^"]*"|"[^"]*""#)?
            .lexical_pattern(
                "num-val",
                concat!(
                    r"%[bB][01]+(?:(?:\.[01]+)+|-[01]+)?",
                    r"|%[dD][0-9]+(?:(?:\.[0-9]+)+|-[0-9]+)?",
                    r"|%[xX][0-9A-Fa-f]+(?:(?:\.[0-9A-Fa-f]+)+|-[0-9A-Fa-f]+)?",
                ),
            )?
            .lexical_pattern("prose-val", "<[^>]*>")?
            .ignore_pattern(r"\s+")?
            .ignore_pattern(";[^\n]*")?
            .production("rulelist", one_or_more(production("rule")))?
            .production(
                "rule",
                sequence![
                    token("rulename"),
                    production("defined-as"),
                    production("alternation"),
                ],
            )?
            .production("defined-as", ordered_choice!["=/", "="])?
            .production(
                "alternation",
                sequence![
                    production("concatenation"),
                    zero_or_more(sequence!["/", production("concatenation")]),
                ],
            )?
            .production("concatenation", one_or_more(production("repetition")))?
            .production(
                "repetition",
                sequence![optional(token("repeat")), production("element")],
            )?
            .production(
                "element",
                ordered_choice![
                    production("reference"),
                    production("group"),
                    production("option"),
                    production("char-val"),
                    production("num-val"),
                    production("prose-val"),
                ],
            )?
            // A name followed by `=` or `=/` starts the next rule.
            .production(
                "reference",
                sequence![token("rulename"), not(production("defined-as"))],
            )?
            .production("group", sequence!["(", production("alternation"), ")"])?
            .production("option", sequence!["[", production("alternation"), "]"])?
            .production("char-val", token("char-val"))?
            .production("num-val", token("num-val"))?
            .production("prose-val", token("prose-val"))?
            .build()
    }

    fn fold_grammar(tree: &Production) -> Result<CombinatorSpec> {
        let mut rules = Rulelist::default();
        for node in SHAPE.array(tree, "rulelist")? {
            rules.fold_rule(node)?;
        }
        rules.into_spec()
    }

    fn fold_fragment(tree: &Production) -> Result<Parselet> {
        let mut rules = Rulelist {
            inline_core: true,
            ..Rulelist::default()
        };
        alternatives(rules.fold_alternatives(tree)?, true)
    }
}

/// Rules collected so far, with their alternatives in definition order.
#[derive(Default)]
struct Rulelist {
    rules: BTreeMap<String, Vec<Parselet>>,
    referenced: BTreeSet<String>,
    // Fragments have no rule list to add core rules to.
    inline_core: bool,
}

impl Rulelist {
    fn fold_rule(&mut self, node: &Production) -> Result<()> {
        let [name, defined_as, alternation] =
            SHAPE.tuple::<3>(SHAPE.named(node, "rule")?, "rule")?;
        let name = SHAPE.text(name, "rule")?;
        let operator = SHAPE.text(SHAPE.named(defined_as, "defined-as")?, "defined-as")?;
        let branches = self.fold_alternation(alternation)?;

        match operator {
            "=" if self.rules.contains_key(name) => Err(Error::construction(format!(
                "ABNF: rule `{name}` is defined more than once; use `=/` to add alternatives"
            ))),
            "=" => {
                self.rules.insert(name.to_string(), branches);
                Ok(())
            }
            "=/" => match self.rules.get_mut(name) {
                Some(existing) => {
                    existing.extend(branches);
                    Ok(())
                }
                None => Err(Error::construction(format!(
                    "ABNF: `{name} =/` adds alternatives to a rule that is not defined"
                ))),
            },
            _ => Err(SHAPE.defect("defined-as", defined_as)),
        }
    }

    fn fold_alternation(&mut self, node: &Production) -> Result<Vec<Parselet>> {
        self.fold_alternatives(SHAPE.named(node, "alternation")?)
    }

    fn fold_alternatives(&mut self, body: &Production) -> Result<Vec<Parselet>> {
        let [first, rest] = SHAPE.tuple::<2>(body, "alternation")?;
        let mut branches = vec![self.fold_concatenation(first)?];
        for branch in SHAPE.array(rest, "alternation")? {
            let [_, concatenation] = SHAPE.tuple::<2>(branch, "alternation")?;
            branches.push(self.fold_concatenation(concatenation)?);
        }
        Ok(branches)
    }

    fn fold_concatenation(&mut self, node: &Production) -> Result<Parselet> {
        let items = SHAPE.array(SHAPE.named(node, "concatenation")?, "concatenation")?;
        let mut folded = Vec::with_capacity(items.len());
        for item in items {
            folded.push(self.fold_repetition(item)?);
        }
        concatenation(folded)
    }

    fn fold_repetition(&mut self, node: &Production) -> Result<Parselet> {
        let [repeat, element] = SHAPE.tuple::<2>(SHAPE.named(node, "repetition")?, "repetition")?;
        let rule = self.fold_element(element)?;
        if is_absent(repeat) {
            return Ok(rule);
        }
        let (min, max) = repeat_bounds(SHAPE.text(repeat, "repetition")?)?;
        repetition(rule, min, max)
    }

    fn fold_element(&mut self, node: &Production) -> Result<Parselet> {
        let element = SHAPE.named(node, "element")?;
        match SHAPE.variant(element, "element")? {
            ("reference", body) => {
                let [name, _] = SHAPE.tuple::<2>(body, "reference")?;
                self.reference(SHAPE.text(name, "reference")?)
            }
            ("group", body) => {
                let [_, alternation, _] = SHAPE.tuple::<3>(body, "group")?;
                alternatives(self.fold_alternation(alternation)?, true)
            }
            ("option", body) => {
                let [_, alternation, _] = SHAPE.tuple::<3>(body, "option")?;
                optional(alternatives(self.fold_alternation(alternation)?, true)?)
            }
            ("char-val", body) => char_val(SHAPE.text(body, "char-val")?),
            ("num-val", body) => num_val(SHAPE.text(body, "num-val")?),
            ("prose-val", body) => Err(Error::Unsupported {
                notation: Abnf::NAME,
                construct: format!("prose-val {}", SHAPE.text(body, "prose-val")?),
            }),
            _ => Err(SHAPE.defect("element", element)),
        }
    }

    fn reference(&mut self, name: &str) -> Result<Parselet> {
        match core_rule(name) {
            Some(pattern) if self.inline_core => regex(name, pattern),
            _ => {
                self.referenced.insert(name.to_string());
                production(name)
            }
        }
    }

    fn into_spec(self) -> Result<CombinatorSpec> {
        let mut spec = CombinatorSpec::new();
        for (name, pattern) in CORE_RULES {
            spec = spec.lexical_rule(name, LexRule::pattern(pattern)?);
        }
        for name in &self.referenced {
            if !self.rules.contains_key(name) && core_rule(name).is_some() {
                spec = spec.production(name, token(name))?;
            }
        }
        for (name, branches) in self.rules {
            spec = spec.production(&name, alternatives(branches, true)?)?;
        }
        Ok(spec)
    }
}

/// `n*m`, `n*`, `*m`, `*` and bare `n`.
fn repeat_bounds(text: &str) -> Result<(usize, Option<usize>)> {
    match text.split_once('*') {
        Some((min, max)) => Ok((count(min)?.unwrap_or(0), count(max)?)),
        None => {
            let exact = count(text)?;
            Ok((exact.unwrap_or(0), exact))
        }
    }
}

fn count(digits: &str) -> Result<Option<usize>> {
    if digits.is_empty() {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|err| Error::construction(format!("ABNF: bad repeat count {digits:?}: {err}")))
}

/// `"abc"`, `%i"abc"` (case insensitive) or `%s"abc"` (case sensitive).
fn char_val(text: &str) -> Result<Parselet> {
    let (case_sensitive, quoted) = match text.strip_prefix('%') {
        Some(rest) => (rest.starts_with(['s', 'S']), &rest[1..]),
        None => (false, text),
    };
    let value = quoted.trim_matches('"');
    match (value.is_empty(), case_sensitive) {
        (true, _) => Ok(empty()),
        (false, true) => literal(value),
        (false, false) => literal_case_insensitive(value),
    }
}

/// `%x41`, `%d13.10` (a string of characters) or `%x30-39` (a range).
fn num_val(text: &str) -> Result<Parselet> {
    let radix = match text.get(1..2) {
        Some("b" | "B") => 2,
        Some("d" | "D") => 10,
        Some("x" | "X") => 16,
        _ => {
            return Err(Error::construction(format!(
                "ABNF: bad numeric value {text:?}"
            )))
        }
    };
    let digits = &text[2..];
    let value = |numeral: &str| {
        u32::from_str_radix(numeral, radix).map_err(|err| {
            Error::construction(format!("ABNF: bad numeral {numeral:?} in {text}: {err}"))
        })
    };

    if let Some((low, high)) = digits.split_once('-') {
        return unicode_range(value(low)?, value(high)?);
    }
    let pattern = digits
        .split('.')
        .map(|numeral| value(numeral).map(|code| format!(r"\x{{{code:X}}}")))
        .collect::<Result<String>>()?;
    regex(text, &pattern)
}

/// Compiles an ABNF rule list.
pub fn abnf(spec: impl Into<TextSpec>) -> Result<Parser> {
    compile::<Abnf>(spec.into())
}

/// Compiles a single ABNF alternation, e.g. `1*DIGIT ["." 1*DIGIT]`.
pub fn abnf_fragment(text: &str) -> Result<Parselet> {
    compile_fragment::<Abnf>(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_bounds() {
        assert_eq!(repeat_bounds("2*5").unwrap(), (2, Some(5)));
        assert_eq!(repeat_bounds("1*").unwrap(), (1, None));
        assert_eq!(repeat_bounds("*3").unwrap(), (0, Some(3)));
        assert_eq!(repeat_bounds("4").unwrap(), (4, Some(4)));
        assert_eq!(repeat_bounds("*").unwrap(), (0, None));
    }

    #[test]
    fn test_core_rules_compile() {
        for (name, pattern) in CORE_RULES {
            assert!(LexRule::pattern(pattern).is_ok(), "{name}");
        }
    }
}
