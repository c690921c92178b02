use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lexer_framework::{lex, skip_ignored, standard_table, Cursor, LexRule, TokenKind};

// --- Data Generation ---

fn generate_source(size_kb: usize) -> String {
    let words = [
        "function", "let", "var", "const", "if", "else", "while", "return",
    ];
    let mut s = String::with_capacity(size_kb * 1024);
    while s.len() < size_kb * 1024 {
        for w in words {
            s.push_str(w);
            s.push_str("  /* note */ ");
            s.push_str("x_variable");
            s.push_str(" # trailing\n\t");
        }
    }
    s
}

fn ignorables() -> Vec<LexRule> {
    let table = standard_table();
    ["whitespace", "cComment", "shComment"]
        .iter()
        .filter_map(|name| table.get(*name).cloned())
        .collect()
}

/// Lexes identifiers until the input is exhausted.
fn lex_all(cursor: &Cursor, name: &Arc<str>, rule: &LexRule) -> usize {
    let mut state = cursor.clone();
    let mut count = 0;
    loop {
        let (token, next) = lex(&state, name, rule, false);
        match token.kind {
            TokenKind::Rule(_) => {
                count += 1;
                state = next;
            }
            _ => return count,
        }
    }
}

fn bench_lexer(c: &mut Criterion) {
    let text = generate_source(100);
    let cursor = Cursor::with_ignore(&text, ignorables());
    let name: Arc<str> = Arc::from("identifier");
    let rule = LexRule::pattern("[A-Za-z_][A-Za-z0-9_]*").unwrap();

    let mut group = c.benchmark_group("lexer_throughput");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("identifiers_100kb", |b| {
        b.iter(|| lex_all(&cursor, &name, &rule))
    });

    let padding = " \t\n".repeat(100 * 1024 / 3);
    let blank = Cursor::with_ignore(&padding, ignorables());
    group.bench_function("skip_ignored_100kb", |b| b.iter(|| skip_ignored(&blank)));

    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
