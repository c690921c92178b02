use grammar_framework::{abnf, bnf, ebnf, peg, wsn, Result};
use pipeline_core::Parser;
use rstest::rstest;

// BNF alternatives are unordered and must not overlap, so the BNF grammar
// nests the `b`s inside the `a`s instead of repeating each run.
#[rstest]
#[case::bnf(bnf(r#"<s> ::= "a" <s> "b" | "a" "b""#), "s")]
#[case::ebnf(ebnf(r#"s = "a", {"a"}, "b", {"b"};"#), "s")]
#[case::abnf(abnf(r#"s = 1*"a" 1*"b""#), "s")]
#[case::peg(peg(r#"s <- as bs; as <- "a" as / "a"; bs <- "b" bs / "b";"#), "s")]
#[case::wsn(wsn(r#"S = "a" { "a" } "b" { "b" } ."#), "S")]
fn test_compiled_grammar_parses_a_then_b(#[case] parser: Result<Parser>, #[case] start: &str) {
    let parser = parser.unwrap();

    let tree = parser.parse_all(start, "aaabbb").unwrap();
    assert_eq!(tree.terminals(), vec!["a", "a", "a", "b", "b", "b"]);

    assert!(parser.parse(start, "aaa").is_err());
}

#[rstest]
#[case::bnf(grammar_framework::bnf_fragment(r#""x" "y""#))]
#[case::ebnf(grammar_framework::ebnf_fragment(r#""x", "y""#))]
#[case::abnf(grammar_framework::abnf_fragment(r#"%s"x" %s"y""#))]
#[case::peg(grammar_framework::peg_fragment(r#""x" "y""#))]
#[case::wsn(grammar_framework::wsn_fragment(r#""x" "y""#))]
fn test_fragments_embed_in_hand_built_grammars(
    #[case] fragment: Result<parser_framework::Parselet>,
) {
    let parser = pipeline_core::CombinatorSpec::new()
        .production("pair", fragment.unwrap())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(parser.parse_all("pair", "xy").unwrap().terminals(), vec!["x", "y"]);
    assert!(parser.parse("pair", "yx").is_err());
}
