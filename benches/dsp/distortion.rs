//! Benchmarks for the waveshapers used by the guitar and amp chains.

use std::hint::black_box;

use backline::dsp::distortion;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("tanh_clip", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                distortion::tanh_clip_buffer(black_box(&mut buffer), black_box(2.8), black_box(1.2));
            })
        });

        // Asymmetric stage: bias shift plus even-harmonic term
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("tube_stage", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                distortion::tube_stage_buffer(black_box(&mut buffer), black_box(3.0), black_box(0.05));
            })
        });
    }

    group.finish();
}
