use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqpipe::IntPipeline;

fn benchmark_filter_map_sum(c: &mut Criterion) {
    c.bench_function("filter_map_sum_100k", |b| {
        b.iter(|| {
            let total = IntPipeline::range(0, 100_000)
                .filter(|v| v % 3 == 0)
                .map(|v| v * 2)
                .sum();
            black_box(total)
        });
    });
}

fn benchmark_raw_loop_baseline(c: &mut Criterion) {
    c.bench_function("raw_loop_sum_100k", |b| {
        b.iter(|| {
            let mut total = 0i64;
            for v in 0..100_000i64 {
                if v % 3 == 0 {
                    total += v * 2;
                }
            }
            black_box(total)
        });
    });
}

fn benchmark_stateful_operators(c: &mut Criterion) {
    c.bench_function("distinct_sorted_10k", |b| {
        b.iter(|| {
            let values = IntPipeline::range(0, 10_000)
                .map(|v| (v * 37) % 1_000)
                .distinct()
                .sorted()
                .to_vec();
            black_box(values)
        });
    });
}

fn benchmark_short_circuit_search(c: &mut Criterion) {
    c.bench_function("any_match_in_infinite_source", |b| {
        b.iter(|| {
            let found = IntPipeline::iterate(1, |v| v + 1).any_match(|v| v == 5_000);
            black_box(found)
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = benchmark_filter_map_sum, benchmark_raw_loop_baseline,
        benchmark_stateful_operators, benchmark_short_circuit_search
);
criterion_main!(benches);
