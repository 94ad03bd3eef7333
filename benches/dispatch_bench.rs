//! Benchmarks for the pre-execution pipeline.
//!
//! Run with: cargo bench --bench dispatch_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scene_copilot::command::{classify, prepare, validate, Intent};
use scene_copilot::core::types::{InteractionMode, ObjectId, ObjectKind, ObjectRef, SelectionSnapshot};

/// Snapshot of N meshes; the first one is active.
fn build_selection(count: usize) -> SelectionSnapshot {
    let selected: Vec<ObjectRef> = (0..count)
        .map(|i| ObjectRef::new(ObjectId::new(), ObjectKind::Mesh, format!("Mesh.{i:03}")))
        .collect();
    let active = selected.first().cloned();
    SelectionSnapshot::new(selected, active, InteractionMode::Object)
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for words in [5, 100, 2_000] {
        // Pattern sits at the very end of the text
        let text = format!("{} shrinkwrap", "please ".repeat(words));
        group.bench_with_input(BenchmarkId::new("late_match", words), &text, |b, text| {
            b.iter(|| black_box(classify(black_box(text))));
        });

        let miss = "lorem ipsum ".repeat(words);
        group.bench_with_input(BenchmarkId::new("no_match", words), &miss, |b, text| {
            b.iter(|| black_box(classify(black_box(text))));
        });
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");

    for count in [1, 2, 150] {
        let snapshot = build_selection(count);
        group.bench_with_input(BenchmarkId::new("meshes", count), &snapshot, |b, snapshot| {
            b.iter(|| black_box(validate(Intent::Shrinkwrap, black_box(snapshot)).is_ok()));
        });
    }

    group.finish();
}

fn bench_prepare(c: &mut Criterion) {
    let snapshot = build_selection(2);
    c.bench_function("prepare_shrinkwrap", |b| {
        b.iter(|| black_box(prepare(black_box("shrinkwrap onto B"), &snapshot).is_ok()));
    });
}

criterion_group!(benches, bench_classify, bench_validate, bench_prepare);
criterion_main!(benches);
