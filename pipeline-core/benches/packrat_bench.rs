use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use parser_framework::{choice, literal, production, sequence, token, zero_or_more};
use pipeline_core::{CombinatorSpec, Parser};

// --- Grammar ---

// expr   = term { ("+" | "-") term }
// term   = factor { ("*" | "/") factor }
// factor = integer | "(" expr ")"
fn arithmetic() -> Parser {
    CombinatorSpec::new()
        .ignore_pattern(r"\s+")
        .and_then(|spec| {
            spec.production(
                "expr",
                sequence([
                    production("term"),
                    zero_or_more(sequence([choice(["+", "-"]), production("term")])),
                ]),
            )
        })
        .and_then(|spec| {
            spec.production(
                "term",
                sequence([
                    production("factor"),
                    zero_or_more(sequence([choice(["*", "/"]), production("factor")])),
                ]),
            )
        })
        .and_then(|spec| {
            spec.production(
                "factor",
                choice([
                    token("integer"),
                    sequence([literal("("), production("expr"), literal(")")]),
                ]),
            )
        })
        .and_then(CombinatorSpec::build)
        .expect("arithmetic grammar")
}

// --- Data Generation ---

fn generate_expression(depth: usize) -> String {
    let mut s = String::from("1");
    for i in 0..depth {
        s = format!("({s} + {} * (2 - 3)) / 4", i + 1);
    }
    s
}

fn bench_packrat(c: &mut Criterion) {
    let parser = arithmetic();
    let mut group = c.benchmark_group("packrat");

    for depth in [8, 32, 128] {
        let text = generate_expression(depth);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("nested_depth_{depth}"), |b| {
            b.iter(|| parser.parse_all("expr", &text).expect("valid expression"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_packrat);
criterion_main!(benches);
