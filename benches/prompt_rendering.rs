//! Benchmarks for prompt rendering and request composition
//!
//! This benchmark measures:
//! - Prompt rendering for short and long text content
//! - Request composition and serialization with and without an image part

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use llm_classify::content::ExtractedContent;
use llm_classify::prompt::build_prompt;
use llm_classify::types::compose;

const MAX_TEXT_LENGTH: usize = 4096;

fn text_of_len(len: usize) -> ExtractedContent {
    let body: String = "Quarterly revenue grew across all regions. "
        .chars()
        .cycle()
        .take(len)
        .collect();
    ExtractedContent::text(body, "text/plain")
}

fn bench_prompt_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("prompt_rendering");

    for len in [256usize, 4096, 65536] {
        let content = text_of_len(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("text", len), &content, |b, content| {
            b.iter(|| build_prompt(black_box("q3_report.txt"), black_box(content), MAX_TEXT_LENGTH))
        });
    }

    let image = ExtractedContent::image("iVBORw0KGgo=".repeat(1024), "image/png");
    group.bench_function("image", |b| {
        b.iter(|| build_prompt(black_box("photo.png"), black_box(&image), MAX_TEXT_LENGTH))
    });

    group.finish();
}

fn bench_request_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_serialization");

    let text = text_of_len(4096);
    let prompt = build_prompt("q3_report.txt", &text, MAX_TEXT_LENGTH);
    group.bench_function("text", |b| {
        b.iter(|| {
            let request = compose("local-model", black_box(&prompt), &text, false);
            serde_json::to_vec(&request).unwrap()
        })
    });

    let image = ExtractedContent::image("iVBORw0KGgo=".repeat(16 * 1024), "image/png");
    let prompt = build_prompt("photo.png", &image, MAX_TEXT_LENGTH);
    group.bench_function("vision", |b| {
        b.iter(|| {
            let request = compose("local-model", black_box(&prompt), &image, true);
            serde_json::to_vec(&request).unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_prompt_rendering, bench_request_serialization);
criterion_main!(benches);
