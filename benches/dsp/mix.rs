//! Benchmarks for buffer mixing and level helpers.

use std::hint::black_box;

use backline::dsp::mix;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &size in BLOCK_SIZES {
        let signal_a: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let signal_b: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();

        let mut buffer = signal_a.clone();
        group.bench_with_input(BenchmarkId::new("sum_scaled", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal_a);
                mix::sum_scaled_in_place(black_box(&mut buffer), black_box(&signal_b), black_box(0.3));
            })
        });

        // Peak scan plus a scaling pass
        let mut buffer = signal_a.clone();
        group.bench_with_input(BenchmarkId::new("normalize", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal_a);
                mix::normalize(black_box(&mut buffer), black_box(0.95))
            })
        });

        group.bench_with_input(BenchmarkId::new("rms", size), &size, |b, _| {
            b.iter(|| mix::rms(black_box(&signal_a)))
        });
    }

    group.finish();
}
