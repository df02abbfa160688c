//! Benchmarks for plucked-string synthesis.

use std::hint::black_box;

use backline::dsp::karplus::KarplusStrong;
use backline::dsp::oscillator::NoiseSource;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_karplus(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/karplus");

    for &size in BLOCK_SIZES {
        let mut string = KarplusStrong::new(44_100.0, 0.996, 0.5);
        let mut noise = NoiseSource::new(42);
        let mut buffer = vec![0.0; size];

        // Low E: longest delay line on the neck
        group.bench_with_input(BenchmarkId::new("pluck_e2", size), &size, |b, _| {
            b.iter(|| string.pluck_into(black_box(82.41), black_box(&mut buffer), &mut noise))
        });

        group.bench_with_input(BenchmarkId::new("pluck_e4", size), &size, |b, _| {
            b.iter(|| string.pluck_into(black_box(329.63), black_box(&mut buffer), &mut noise))
        });
    }

    group.finish();
}
