//! Benchmarks for docqa core operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rustc_hash::FxHashSet;

use docqa::index::{similarity_ratio, RelevanceScorer, ScoringPolicy};
use docqa::{Chunker, OverlapChunker, Segmenter};

const SAMPLE_SENTENCE: &str = "台北的天氣很好。今天適合出門，我們去爬山吧。山上的風景不錯，價格也很便宜。";

/// Generate sample fragments for benchmarking
fn generate_fragments(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("段落內容第{}頁：{}", i, SAMPLE_SENTENCE))
        .collect()
}

/// Benchmark segmentation with and without a lexicon
fn bench_segmentation(c: &mut Criterion) {
    let plain = Segmenter::new();
    let with_lexicon = Segmenter::with_lexicon(["天氣", "出門", "風景", "價格", "便宜"]);

    c.bench_function("segment_plain", |bencher| {
        bencher.iter(|| black_box(plain.segment(black_box(SAMPLE_SENTENCE))));
    });

    c.bench_function("segment_with_lexicon", |bencher| {
        bencher.iter(|| black_box(with_lexicon.segment(black_box(SAMPLE_SENTENCE))));
    });
}

/// Benchmark the edit-distance similarity ratio
fn bench_similarity_ratio(c: &mut Criterion) {
    c.bench_function("similarity_ratio_short", |bencher| {
        bencher.iter(|| black_box(similarity_ratio(black_box("天氣如何"), black_box("天氣很好"))));
    });

    let long = SAMPLE_SENTENCE.repeat(4);
    c.bench_function("similarity_ratio_long", |bencher| {
        bencher.iter(|| black_box(similarity_ratio(black_box("天氣如何"), black_box(&long))));
    });
}

/// Benchmark composite scoring across fragment counts
fn bench_scoring(c: &mut Criterion) {
    let scorer = RelevanceScorer::new(
        ScoringPolicy::default(),
        std::sync::Arc::new(Segmenter::with_lexicon(["天氣", "價格"])),
    );

    let mut expanded = FxHashSet::default();
    for term in ["天氣", "價格", "費用"] {
        expanded.insert(term.to_string());
    }

    let mut group = c.benchmark_group("score_fragments");
    for size in [10, 100, 1000] {
        let fragments = generate_fragments(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| {
                let total: f32 = fragments
                    .iter()
                    .map(|f| scorer.score("今天天氣如何", &expanded, f))
                    .sum();
                black_box(total)
            });
        });
    }
    group.finish();
}

/// Benchmark chunking a multi-page document
fn bench_chunking(c: &mut Criterion) {
    let text = SAMPLE_SENTENCE.repeat(100);
    let chunker = OverlapChunker::new(500, 100);

    c.bench_function("chunk_4k_chars", |bencher| {
        bencher.iter(|| black_box(chunker.chunk(black_box(&text), 1)));
    });
}

criterion_group!(
    benches,
    bench_segmentation,
    bench_similarity_ratio,
    bench_scoring,
    bench_chunking,
);

criterion_main!(benches);
