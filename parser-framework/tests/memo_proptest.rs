use parser_framework::{
    choice, literal, one_or_more, production, sequence, Grammar, LexRule, LexTable,
    ProductionRules,
};
use proptest::prelude::*;

// expr = term { "+" term } ; term = digits | "(" expr ")"
fn arithmetic() -> Grammar {
    let mut productions = ProductionRules::new();
    productions.insert(
        "expr".to_string(),
        sequence([
            production("term"),
            parser_framework::zero_or_more(sequence([literal("+"), production("term")])),
        ])
        .unwrap(),
    );
    productions.insert(
        "term".to_string(),
        choice([
            one_or_more(parser_framework::regex("digit", "[0-9]")).unwrap(),
            sequence([literal("("), production("expr"), literal(")")]).unwrap(),
        ])
        .unwrap(),
    );
    Grammar::new(
        productions,
        LexTable::new(),
        vec![LexRule::pattern(" +").unwrap()],
    )
}

fn input() -> impl Strategy<Value = String> {
    let alphabet = proptest::sample::select(vec!['1', '2', '+', '(', ')', ' ']);
    proptest::collection::vec(alphabet, 0..24).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn test_memoized_result_equals_fresh_result(text in input(), start in 0usize..24) {
        let grammar = arithmetic();
        let start = start.min(text.len());

        for name in ["expr", "term"] {
            let warm = grammar.environment();
            let cursor = grammar.cursor(&text).at(start);
            let rule = grammar.production(name).unwrap();

            // Fill the table from the whole input first, then ask again.
            let _ = production("expr").unwrap().parse(&warm, &grammar.cursor(&text));
            let cached = warm.apply(name, &cursor).unwrap();

            let fresh = rule.parse(&grammar.environment(), &cursor);
            prop_assert_eq!(cached, fresh);
        }
    }

    #[test]
    fn test_repeated_application_hits_the_cache(text in input()) {
        let grammar = arithmetic();
        let env = grammar.environment();
        let cursor = grammar.cursor(&text);

        let first = env.apply("expr", &cursor).unwrap();
        let misses = env.cache_stats().misses;
        let second = env.apply("expr", &cursor).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(env.cache_stats().misses, misses);
        prop_assert!(env.cache_stats().hits >= 1);
    }
}
