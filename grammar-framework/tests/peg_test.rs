use grammar_framework::{peg, peg_fragment, Error, TextSpec};
use pipeline_core::CombinatorSpec;

const ARITHMETIC: &str = r#"
# integer arithmetic
expr   <- term (("+" / "-") term)*
term   <- factor (("*" / "/") factor)*
factor <- <integer> / "(" expr ")"
"#;

#[test]
fn test_arithmetic_with_token_references() {
    let spec = TextSpec::new(ARITHMETIC).ignore_pattern(r"\s+").unwrap();
    let parser = peg(spec).unwrap();

    let tree = parser.parse_all("expr", "2 * (3 + 4)").unwrap();
    assert_eq!(tree.terminals(), vec!["2", "*", "(", "3", "+", "4", ")"]);
    assert!(parser.parse_all("expr", "2 * (3 + )").is_err());
}

#[test]
fn test_alternatives_are_ordered() {
    let parser = peg(r#"s <- "a" / "a" "b""#).unwrap();
    let tree = parser.parse("s", "ab").unwrap();
    assert_eq!(tree.terminals(), vec!["a"]);
}

#[test]
fn test_lookaheads() {
    let parser = peg(
        r#"
        word <- !"end" <identifier>
        peek <- &"a" .
        "#,
    )
    .unwrap();

    assert!(parser.parse("word", "begin").is_ok());
    assert!(parser.parse("word", "end").is_err());
    assert_eq!(parser.parse_all("peek", "a").unwrap().terminals(), vec!["a", "a"]);
    assert!(parser.parse("peek", "b").is_err());
}

#[test]
fn test_suffix_operators() {
    let parser = peg(r#"s <- "a"+ "b"? "c"*"#).unwrap();
    assert!(parser.parse_all("s", "a").is_ok());
    assert!(parser.parse_all("s", "aabccc").is_ok());
    assert!(parser.parse_all("s", "b").is_err());
}

#[test]
fn test_end_and_empty_markers() {
    let parser = peg(
        r#"
        whole <- "a" <EOF>
        maybe <- "x" / <e>
        "#,
    )
    .unwrap();

    assert!(parser.parse("whole", "a").is_ok());
    assert!(parser.parse("whole", "ab").is_err());
    let tree = parser.parse("maybe", "y").unwrap();
    assert!(tree.as_token().unwrap().is_empty());
}

#[test]
fn test_end_marker_does_not_skip_trailing_ignorables() {
    let spec = TextSpec::new(r#"whole <- "a" <EOF>"#)
        .ignore_pattern(r"\s+")
        .unwrap();
    let parser = peg(spec).unwrap();

    assert!(parser.parse("whole", " a").is_ok());
    assert!(parser.parse("whole", "a  ").is_err());
}

#[test]
fn test_duplicate_rule_rejected() {
    let err = peg("a <- \"x\"\na <- \"y\"\n").unwrap_err();
    assert!(matches!(err, Error::Construction(_)), "{err:?}");
}

#[test]
fn test_escapes_and_single_quotes() {
    let parser = peg(r#"line <- 'a' "\t" "b" "\n";"#).unwrap();
    assert!(parser.parse_all("line", "a\tb\n").is_ok());
}

#[test]
fn test_fragment() {
    let parser = CombinatorSpec::new()
        .production("n", peg_fragment(r#""-"? <integer>"#))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(parser.parse_all("n", "-42").unwrap().terminals(), vec!["-", "42"]);
}
