//! Benchmarks for chord synthesis.
//!
//! Eighth-note styles pluck twice as many strokes per bar as quarter-note
//! styles, so both are measured.

use std::hint::black_box;

use backline::render::ChordRenderer;
use criterion::{BenchmarkId, Criterion};

use super::settings;

pub fn bench_guitar(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/guitar");
    group.sample_size(20);
    let sr = backline::SAMPLE_RATE as f32;

    for style in ["rock", "metal"] {
        for bars in [1, 4] {
            let settings = settings(style, bars);
            let events = settings.events();
            let id = format!("{style}_{bars}_bars");
            group.bench_function(BenchmarkId::from_parameter(id), |b| {
                b.iter(|| {
                    ChordRenderer::new(&settings, sr).render(
                        black_box(&events),
                        settings.beat_samples(),
                        settings.total_samples(),
                    )
                })
            });
        }
    }

    group.finish();
}
