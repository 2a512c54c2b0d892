//! Benchmark for rule parsing throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rule_ast::rule::trace::NoopObserver;
use rule_ast::{create_rule, get_or_parse, OperandMode, ParserConfig, RuleParser};

/// Balanced tree of `depth` levels rendered with single-token operands
fn nested_rule(depth: usize) -> String {
    fn build(depth: usize, next: &mut usize) -> String {
        if depth == 0 {
            *next += 1;
            return format!("c{}", next);
        }
        let symbol = if depth % 2 == 0 { "AND" } else { "OR" };
        let left = build(depth - 1, next);
        let right = build(depth - 1, next);
        format!("({} {} {})", left, symbol, right)
    }
    build(depth, &mut 0)
}

/// Long left-to-right chain without parentheses
fn flat_rule(len: usize) -> String {
    (0..len)
        .map(|i| format!("c{}", i))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn benchmark_parse(c: &mut Criterion) {
    let nested = nested_rule(8);
    let flat = flat_rule(500);
    let compound = "((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')) \
                    AND (salary > 50000 OR experience > 5)";

    c.bench_function("parse_nested_256_operands", |b| {
        b.iter(|| create_rule(black_box(&nested)))
    });

    c.bench_function("parse_flat_500_operands", |b| {
        let parser = RuleParser::default();
        b.iter(|| parser.parse_with_observer(black_box(&flat), &mut NoopObserver))
    });

    c.bench_function("parse_compound_operands", |b| {
        let parser =
            RuleParser::new(ParserConfig::default().with_operand_mode(OperandMode::Compound));
        b.iter(|| parser.parse_with_observer(black_box(compound), &mut NoopObserver))
    });

    c.bench_function("get_or_parse_cached", |b| {
        b.iter(|| get_or_parse(black_box(&nested)))
    });
}

criterion_group!(benches, benchmark_parse);
criterion_main!(benches);
