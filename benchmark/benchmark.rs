// Copyright (c) 2025-present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use simdneedle::fallback::{MultiStringFallback, reference_index_of_any};
use simdneedle::search_values::MultiStringMatcher;
use simdneedle::string_compare::{AsciiIgnoreCase, CaseSensitive, IgnoreCase};
use simdneedle::teddy_buckets::{bucketize, one_per_bucket};
use simdneedle::teddy_scanner::TeddyMatcher;
use simdneedle::{CaseMode, StringSearchValues};

/// Package version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Print benchmark header with version and timestamp
fn print_benchmark_header() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        let now = chrono::Utc::now();
        eprintln!("\n╔════════════════════════════════════════════════════════════╗");
        eprintln!(
            "║ simdneedle benchmark v{}                                 ║",
            VERSION
        );
        eprintln!(
            "║ Run date: {}                              ║",
            now.format("%Y-%m-%d %H:%M:%S UTC")
        );
        eprintln!("║ Platform: {:<49} ║", std::env::consts::ARCH);
        eprintln!("╚════════════════════════════════════════════════════════════╝\n");
    });
}

// ============================================================================
// Inputs
// ============================================================================

const FEW_NEEDLES: [&str; 5] = ["Sherlock", "Watson", "Moriarty", "Lestrade", "Hudson"];

const MANY_NEEDLES: [&str; 24] = [
    "Sherlock", "Watson", "Moriarty", "Lestrade", "Hudson", "Mycroft", "Adler", "Baker",
    "Gregson", "Hopkins", "Morstan", "Moran", "Stamford", "Wiggins", "Toby", "Milverton",
    "Openshaw", "Hosmer", "Roylott", "Ferguson", "Trevor", "Musgrave", "Holder", "Windibank",
];

/// Text made of short words that never contains a needle, followed by the
/// last needle of `needles`.
fn generate_haystack(len: usize, needles: &[&str]) -> Vec<u16> {
    const WORDS: [&str; 8] = ["the ", "of ", "and ", "a ", "street ", "fog ", "cab ", "door "];
    let mut text = String::with_capacity(len + 16);
    let mut i = 0;
    while text.len() < len {
        text.push_str(WORDS[(i * 7 + i / 3) % WORDS.len()]);
        i += 1;
    }
    text.truncate(len);
    if let Some(last) = needles.last() {
        text.push_str(last);
    }
    text.encode_utf16().collect()
}

fn to_units(needles: &[&str]) -> Vec<Box<[u16]>> {
    needles.iter().map(|s| s.encode_utf16().collect()).collect()
}

const SIZES: [usize; 9] = [15, 16, 17, 64, 255, 1024, 4096, 16384, 65536];

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_teddy_exact(c: &mut Criterion) {
    print_benchmark_header();
    let mut group = c.benchmark_group("teddy_exact");

    let teddy = TeddyMatcher::<CaseSensitive, CaseSensitive, 3, false>::new(one_per_bucket(
        to_units(&FEW_NEEDLES),
    ))
    .expect("eligible needles");
    let fallback = MultiStringFallback::<CaseSensitive>::new(to_units(&FEW_NEEDLES));

    // Sizes around the 16-lane block boundary plus larger inputs for
    // throughput.
    for size in SIZES {
        let haystack = generate_haystack(size, &FEW_NEEDLES);
        group.throughput(Throughput::Bytes((haystack.len() * 2) as u64));

        group.bench_with_input(BenchmarkId::new("simd", size), &haystack, |b, h| {
            b.iter(|| teddy.find(black_box(h)));
        });

        group.bench_with_input(BenchmarkId::new("scalar", size), &haystack, |b, h| {
            b.iter(|| teddy.find_scalar(black_box(h)));
        });

        group.bench_with_input(BenchmarkId::new("fallback", size), &haystack, |b, h| {
            b.iter(|| fallback.index_of_any(black_box(h)));
        });
    }

    group.finish();
}

fn bench_teddy_ignore_case(c: &mut Criterion) {
    let mut group = c.benchmark_group("teddy_ignore_case");

    let ascii = TeddyMatcher::<AsciiIgnoreCase, AsciiIgnoreCase, 3, false>::new(one_per_bucket(
        to_units(&FEW_NEEDLES),
    ))
    .expect("eligible needles");
    let ordinal = TeddyMatcher::<AsciiIgnoreCase, IgnoreCase, 3, false>::new(one_per_bucket(
        to_units(&FEW_NEEDLES),
    ))
    .expect("eligible needles");
    let fallback = MultiStringFallback::<IgnoreCase>::new(to_units(&FEW_NEEDLES));

    for size in [64, 1024, 16384] {
        let haystack = generate_haystack(size, &FEW_NEEDLES);
        group.throughput(Throughput::Bytes((haystack.len() * 2) as u64));

        group.bench_with_input(BenchmarkId::new("ascii_verify", size), &haystack, |b, h| {
            b.iter(|| ascii.find(black_box(h)));
        });

        group.bench_with_input(BenchmarkId::new("ordinal_verify", size), &haystack, |b, h| {
            b.iter(|| ordinal.find(black_box(h)));
        });

        group.bench_with_input(BenchmarkId::new("fallback", size), &haystack, |b, h| {
            b.iter(|| fallback.index_of_any(black_box(h)));
        });
    }

    group.finish();
}

fn bench_bucketized(c: &mut Criterion) {
    let mut group = c.benchmark_group("teddy_bucketized");

    let needles = to_units(&MANY_NEEDLES);
    let n3 = TeddyMatcher::<CaseSensitive, CaseSensitive, 3, true>::new(bucketize(
        needles.clone(),
        3,
        false,
    ))
    .expect("eligible needles");
    let n2 = TeddyMatcher::<CaseSensitive, CaseSensitive, 2, true>::new(bucketize(needles, 2, false))
        .expect("eligible needles");

    for size in [64, 1024, 16384] {
        let haystack = generate_haystack(size, &MANY_NEEDLES);
        group.throughput(Throughput::Bytes((haystack.len() * 2) as u64));

        group.bench_with_input(BenchmarkId::new("prefix_3", size), &haystack, |b, h| {
            b.iter(|| n3.find(black_box(h)));
        });

        group.bench_with_input(BenchmarkId::new("prefix_2", size), &haystack, |b, h| {
            b.iter(|| n2.find(black_box(h)));
        });

        group.bench_with_input(BenchmarkId::new("reference", size), &haystack, |b, h| {
            let needles = to_units(&MANY_NEEDLES);
            b.iter(|| reference_index_of_any(black_box(h), &needles, CaseMode::Exact));
        });
    }

    group.finish();
}

fn bench_search_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_values");

    let cases: [(&str, &[&str]); 4] = [
        ("single", &["Moriarty"]),
        ("teddy", &FEW_NEEDLES),
        ("teddy_bucketized", &MANY_NEEDLES),
        ("fallback", &["M", "Watson", "Hudson"]),
    ];

    for (name, needles) in cases {
        let values = StringSearchValues::with_case_mode(needles, CaseMode::Exact);
        let haystack = generate_haystack(4096, needles);
        group.throughput(Throughput::Bytes((haystack.len() * 2) as u64));

        group.bench_with_input(BenchmarkId::new(name, 4096), &haystack, |b, h| {
            b.iter(|| values.index_of_any(black_box(h)));
        });
    }

    group.finish();
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for count in [2, 8, 24] {
        let needles = &MANY_NEEDLES[..count];
        group.bench_with_input(BenchmarkId::new("exact", count), &needles, |b, n| {
            b.iter(|| StringSearchValues::with_case_mode(black_box(*n), CaseMode::Exact));
        });
        group.bench_with_input(BenchmarkId::new("ignore_case", count), &needles, |b, n| {
            b.iter(|| StringSearchValues::with_case_mode(black_box(*n), CaseMode::OrdinalIgnoreCase));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_teddy_exact,
    bench_teddy_ignore_case,
    bench_bucketized,
    bench_search_values,
    bench_construction
);
criterion_main!(benches);
