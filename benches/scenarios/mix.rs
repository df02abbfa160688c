//! Benchmarks for the stereo mixdown of guitar and bass.

use std::hint::black_box;

use backline::mixdown::{MixEngine, StereoBuffer};
use criterion::{BenchmarkId, Criterion};

use super::{raw_guitar, settings};

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");
    group.sample_size(20);
    let sr = backline::SAMPLE_RATE as f32;

    for bars in [1, 4] {
        let guitar = raw_guitar(&settings("rock", bars));
        // Only the length matters for timing.
        let bass: Vec<f32> = guitar.iter().map(|x| x * 0.5).collect();
        let mut engine = MixEngine::new(sr).unwrap();

        group.bench_with_input(BenchmarkId::new("guitar_bass", bars), &bars, |b, _| {
            b.iter(|| engine.mix(black_box(&guitar), black_box(&bass), black_box(0.7)))
        });

        group.bench_with_input(BenchmarkId::new("widen", bars), &bars, |b, _| {
            b.iter(|| StereoBuffer::widened(black_box(&guitar), black_box(132)))
        });
    }

    group.finish();
}
