use parser_framework::{
    choice, literal, one_or_more, production, sequence, token, zero_or_more, LexRule,
    ProductionRules,
};
use pipeline_core::{CombinatorSpec, Error};

fn list_parser() -> pipeline_core::Parser {
    // list = "[" [ item { "," item } ] "]" ; item = integer | list
    CombinatorSpec::new()
        .ignore_pattern(r"\s+")
        .unwrap()
        .production(
            "list",
            sequence([
                literal("["),
                parser_framework::optional(sequence([
                    production("item"),
                    zero_or_more(sequence([literal(","), production("item")])),
                ])),
                literal("]"),
            ]),
        )
        .unwrap()
        .production("item", choice([token("integer"), production("list")]))
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_parse_returns_the_production_body() {
    let parser = list_parser();
    let tree = parser.parse("list", "[1, [2, 3], []]").unwrap();

    assert!(tree.as_array().is_some());
    assert_eq!(
        tree.terminals(),
        vec!["[", "1", ",", "[", "2", ",", "3", "]", ",", "[", "]", "]"]
    );
}

#[test]
fn test_builtin_tokens_are_available() {
    let parser = CombinatorSpec::new()
        .production("word", token("identifier"))
        .unwrap()
        .build()
        .unwrap();
    let tree = parser.parse("word", "hello world").unwrap();
    assert_eq!(tree.terminals(), vec!["hello"]);
}

#[test]
fn test_lexical_rules_override_builtins() {
    let parser = CombinatorSpec::new()
        .lexical_pattern("integer", "[0-9]+")
        .unwrap()
        .production("n", token("integer"))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(parser.parse("n", "007").unwrap().terminals(), vec!["007"]);
}

#[test]
fn test_parse_is_a_prefix_match() {
    let parser = list_parser();
    assert!(parser.parse("list", "[1] trailing").is_ok());

    let err = parser.parse_all("list", "[1] trailing").unwrap_err();
    match err {
        Error::Reject { position, .. } => assert_eq!(position.offset, 4),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(parser.parse_all("list", "[1]   ").is_ok());
}

#[test]
fn test_rejection_is_reported_with_position() {
    let parser = list_parser();
    let err = parser.parse("list", "\n[1,").unwrap_err();
    match &err {
        Error::Reject {
            production,
            position,
            ..
        } => {
            assert_eq!(production, "list");
            assert_eq!(position.line, 2);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(err.to_string().contains("`list` rejected input"));
}

#[test]
fn test_ambiguity_is_distinct_from_rejection() {
    let parser = CombinatorSpec::new()
        .production("s", choice([production("a"), production("b")]))
        .unwrap()
        .production("a", one_or_more("x"))
        .unwrap()
        .production("b", literal("x"))
        .unwrap()
        .build()
        .unwrap();

    let err = parser.parse("s", "x").unwrap_err();
    assert!(matches!(err, Error::Ambiguous { .. }), "{err:?}");
}

#[test]
fn test_unknown_entry_point() {
    let parser = list_parser();
    assert_eq!(
        parser.parse("nope", "[]").unwrap_err(),
        Error::UnknownProduction("nope".to_string())
    );
    assert!(parser.entry("nope").is_err());
}

#[test]
fn test_entries_cover_every_production() {
    let parser = list_parser();
    let entries = parser.entries();
    assert_eq!(entries.keys().collect::<Vec<_>>(), vec!["item", "list"]);

    let item = &entries["item"];
    assert_eq!(item.parse("42").unwrap().terminals(), vec!["42"]);
    assert_eq!(item.production(), "item");
}

#[test]
fn test_duplicate_production_is_a_construction_error() {
    let spec = CombinatorSpec::new().production("a", "x").unwrap();
    assert!(matches!(
        spec.production("a", "y"),
        Err(Error::Construction(_))
    ));
}

#[test]
fn test_parsers_are_shared_across_threads() {
    let parser = list_parser();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let parser = parser.clone();
            std::thread::spawn(move || {
                let text = format!("[{}]", i + 1);
                parser.parse_all("list", &text).map(|tree| tree.terminals().len())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 3);
    }
}

#[test]
fn test_ignore_rules_apply_in_order() {
    let parser = CombinatorSpec::new()
        .ignore(LexRule::pattern(r"\s+").unwrap())
        .ignore(LexRule::pattern(r"--[^\n]*").unwrap())
        .production("pair", sequence(["a", "b"]))
        .unwrap()
        .build()
        .unwrap();
    assert!(parser.parse_all("pair", " a -- note\n b -- end").is_ok());
}

#[test]
fn test_productions_declared_as_a_table() {
    let mut rules = ProductionRules::new();
    rules.insert("greeting".to_string(), literal("hi").unwrap());
    rules.insert("farewell".to_string(), literal("bye").unwrap());

    let parser = CombinatorSpec::new()
        .ignore_pattern(r"\s+")
        .unwrap()
        .productions(rules)
        .unwrap()
        .build()
        .unwrap();

    let grammar = parser.grammar();
    assert!(grammar.production("greeting").is_some());
    assert!(grammar.lex_rule("identifier").is_some());
    assert_eq!(grammar.ignore().len(), 1);
    assert!(parser.parse_all("farewell", " bye ").is_ok());
}
