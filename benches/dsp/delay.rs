//! Benchmarks for the delay line and the modulation effects built on it.

use std::hint::black_box;

use backline::dsp::delay::DelayLine;
use backline::effects::{Effect, Modulation};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

const SR: f32 = 44_100.0;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();

        let mut line = DelayLine::new();
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("fixed_tap", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                line.render(black_box(&mut buffer), black_box(132));
            })
        });

        for modulation in [Modulation::Phaser, Modulation::Flanger, Modulation::Chorus] {
            let Some(mut effect) = modulation.build(SR) else {
                continue;
            };
            let name = format!("{modulation:?}").to_lowercase();
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    effect.process(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
