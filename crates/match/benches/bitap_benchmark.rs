//! crates/match/benches/bitap_benchmark.rs
//!
//! Benchmarks for fuzzy pattern location.
//!
//! Run with: `cargo bench -p matching`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use matching::{MatchConfig, Matcher, alphabet};

/// Builds a repetitive text with a slightly mangled copy of `needle` near
/// the middle.
fn generate_text(size: usize, needle: &str) -> String {
    let filler = "lorem ipsum dolor sit amet ";
    let mut text: String = filler.chars().cycle().take(size / 2).collect();
    text.push_str(&needle.replacen('e', "E", 1));
    text.extend(filler.chars().cycle().take(size / 2));
    text
}

/// Benchmark fuzzy search as the text grows.
fn bench_fuzzy_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitap_find");
    let matcher = Matcher::new(MatchConfig::default().with_distance(10_000));
    let needle = "consectetur adipiscing";

    for size in [256, 1024, 4096, 16384] {
        let text = generate_text(size, needle);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(matcher.find(black_box(text), black_box(needle), size / 2)));
        });
    }

    group.finish();
}

/// Benchmark the miss path, where every error level is scanned.
fn bench_miss(c: &mut Criterion) {
    let matcher = Matcher::default();
    let text = generate_text(4096, "nothing similar");

    c.bench_function("bitap_miss", |b| {
        b.iter(|| black_box(matcher.find(black_box(&text), black_box("qwzxkvjq"), 100)));
    });
}

/// Benchmark alphabet construction at full width.
fn bench_alphabet(c: &mut Criterion) {
    let pattern: String = "abcdefghijklmnopqrstuvwxyz0123456789".chars().cycle().take(64).collect();

    c.bench_function("alphabet_64", |b| {
        b.iter(|| black_box(alphabet(black_box(&pattern))));
    });
}

criterion_group!(benches, bench_fuzzy_find, bench_miss, bench_alphabet);
criterion_main!(benches);
