//! Benchmarks for the guitar and bass amp chains over a full track.

use std::hint::black_box;

use backline::amp::{AmpProfile, AmpSimulator, BassAmp};
use criterion::{BenchmarkId, Criterion};

use super::{raw_guitar, settings};

pub fn bench_amp(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/amp");
    group.sample_size(20);
    let sr = backline::SAMPLE_RATE as f32;

    let input = raw_guitar(&settings("metal", 4));

    for (name, profile) in [("metal", AmpProfile::METAL), ("blues", AmpProfile::BLUES)] {
        let mut amp = AmpSimulator::new(profile, sr).unwrap();
        let mut buffer = input.clone();
        group.bench_function(BenchmarkId::new("guitar", name), |b| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                amp.process(black_box(&mut buffer));
            })
        });
    }

    let mut bass_amp = BassAmp::new(sr).unwrap();
    let mut buffer = input.clone();
    group.bench_function("bass", |b| {
        b.iter(|| {
            buffer.copy_from_slice(&input);
            bass_amp.process(black_box(&mut buffer));
        })
    });

    group.finish();
}
