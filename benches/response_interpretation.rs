//! Benchmarks for response interpretation
//!
//! Measures fence stripping and JSON parsing of chat-completions bodies,
//! including the fallback paths.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use llm_classify::structured::{interpret, strip_code_fences};
use serde_json::json;

const ANSWER: &str =
    r#"{"category_path":"Finance/Invoices","suggested_filename":"invoice_acme_corp_2024-03-15","confidence":0.92}"#;

fn body_with(content: &str) -> String {
    json!({"choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]}).to_string()
}

fn bench_interpret(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpret");

    let plain = body_with(ANSWER);
    group.bench_function("plain_json", |b| b.iter(|| interpret(black_box(&plain))));

    let fenced = body_with(&format!("```json\n{}\n```", ANSWER));
    group.bench_function("fenced_json", |b| b.iter(|| interpret(black_box(&fenced))));

    let prose = body_with("I believe this file is an invoice from ACME Corp.");
    group.bench_function("parse_failure", |b| b.iter(|| interpret(black_box(&prose))));

    group.bench_function("unexpected_format", |b| b.iter(|| interpret(black_box("{}"))));

    group.finish();
}

fn bench_fence_stripping(c: &mut Criterion) {
    let long: String = std::iter::once("```json".to_string())
        .chain((0..500).map(|i| format!("  \"key_{}\": {},", i, i)))
        .chain(std::iter::once("```".to_string()))
        .collect::<Vec<_>>()
        .join("\n");

    c.bench_function("strip_code_fences/long", |b| {
        b.iter(|| strip_code_fences(black_box(&long)).len())
    });
    c.bench_function("strip_code_fences/unfenced", |b| {
        b.iter(|| strip_code_fences(black_box(ANSWER)).len())
    });
}

criterion_group!(benches, bench_interpret, bench_fence_stripping);
criterion_main!(benches);
