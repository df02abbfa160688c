use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/*
Oscillators and Noise
=====================

Two sources feed every voice in this crate.

Sine: a single partial. Summing weighted sines at integer multiples of a
fundamental builds any harmonic timbre directly (additive synthesis):

    partial n at n·f with weight w(n)

    n:  1    2    3    4    5    6    7    8    9    10
    w:  1.0  0.2  0.7  0.15 0.5  0.1  0.4  0.08 0.3  0.05

The guitar body series above favours odd partials (hollow, square-ish core)
while the even partials stay present but quiet. Partials at or above Nyquist
are skipped so nothing folds back as aliasing.

Noise: uniformly distributed samples in [-1, 1). Every noise source here is
seeded. The same seed always yields the same stream, which is what makes a
render reproducible bit-for-bit. Gaussian samples (for the amp hiss floor)
come from the Box-Muller transform over two uniform draws.
*/

/// Weights of the guitar body partials, fundamental first.
pub const GUITAR_PARTIALS: [f32; 10] = [1.0, 0.2, 0.7, 0.15, 0.5, 0.1, 0.4, 0.08, 0.3, 0.05];

#[inline]
pub fn sine(frequency: f32, time_secs: f32) -> f32 {
    (TAU * frequency * time_secs).sin()
}

/// Weighted sum of harmonics of `fundamental`, skipping partials at or above
/// Nyquist.
pub fn harmonic_series(fundamental: f32, weights: &[f32], time_secs: f32, sample_rate: f32) -> f32 {
    let nyquist = sample_rate * 0.5;
    weights
        .iter()
        .enumerate()
        .map(|(i, &weight)| (fundamental * (i + 1) as f32, weight))
        .take_while(|&(freq, _)| freq < nyquist)
        .map(|(freq, weight)| weight * sine(freq, time_secs))
        .sum()
}

/// Seeded white noise.
pub struct NoiseSource {
    rng: StdRng,
}

impl NoiseSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform sample in [-1, 1).
    #[inline]
    pub fn uniform(&mut self) -> f32 {
        self.rng.gen_range(-1.0..1.0)
    }

    /// Normally distributed sample with mean 0 and standard deviation `sigma`.
    pub fn gaussian(&mut self, sigma: f32) -> f32 {
        // u1 in (0, 1] so the log stays finite.
        let u1: f32 = 1.0 - self.rng.gen::<f32>();
        let u2: f32 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos() * sigma
    }

    pub fn fill_uniform(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.uniform();
        }
    }
}
