//! Benchmarks for state-variable sections and Butterworth cascades.

use std::hint::black_box;

use backline::dsp::filter::{ButterworthOrder, FilterChain, SVFilter};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

const SR: f32 = 44_100.0;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp, rich in harmonics
        let input: Vec<f32> = (0..size)
            .map(|i| ((i % 100) as f32 / 100.0) * 2.0 - 1.0)
            .collect();

        // Single 2-pole section
        let mut section = SVFilter::lowpass(1000.0, SR).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("svf_lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                section.render(black_box(&mut buffer));
            })
        });

        // 4th-order cascade, forward only
        let mut chain = FilterChain::butterworth_lowpass(5000.0, ButterworthOrder::Fourth, SR).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("butterworth4", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chain.render(black_box(&mut buffer));
            })
        });

        // Zero-phase: forward and reverse pass
        let mut band = FilterChain::band(200.0, 800.0, SR).unwrap();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("band_filtfilt", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                band.filtfilt(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
