//! Karplus-Strong plucked string.

use crate::dsp::oscillator::NoiseSource;

/*
Karplus-Strong Synthesis
========================

A plucked string is a travelling wave bouncing between two fixed ends. The
Karplus-Strong model replaces the string with a delay line whose length is
one period of the fundamental, and the damping of the string with a small
filter in the feedback path.

    ┌──────────────────────────────────────────┐
    │                                          │
    │  ┌────────────────────┐    ┌──────────┐  │
    └─→│ delay line (N)     │───→│ filter×d │──┘
       └────────────────────┘    └──────────┘
                 │
                 └──→ output

    N = round(sample_rate / frequency)   (at least 2)

Excitation: the line starts full of uniform noise. Noise contains every
frequency; the loop keeps only those that fit a whole number of times into
N samples (the harmonics of the fundamental) and lets the rest die out.

Damping filter: each cell is rewritten as it is read.

    avg    = (line[i] + line[i + 1]) / 2              dark: two-tap average
    blend  = brightness · line[i] + (1 - brightness) · avg
    line[i] = blend · decay

The two-tap average is a gentle low-pass, so high harmonics lose energy
faster than low ones on every trip round the loop, which is exactly how a
real string darkens as it rings. `brightness` crossfades towards the
unfiltered cell to keep more top end; `decay` scales the whole loop gain and
so sets the sustain.

    decay 0.95   short, muted chunk (guitar chord stabs)
    decay 0.998  long ring (bass)

Output length is round(duration · sample_rate).
*/

/// Lowest frequency the model will tune to. Anything below is clamped.
pub const MIN_FREQUENCY_HZ: f32 = 20.0;

/// Shortest usable delay line.
pub const MIN_DELAY_LENGTH: usize = 2;

pub struct KarplusStrong {
    sample_rate: f32,
    decay: f32,
    brightness: f32,
    line: Vec<f32>,
}

impl KarplusStrong {
    /// `decay` and `brightness` are clamped to [0, 1].
    pub fn new(sample_rate: f32, decay: f32, brightness: f32) -> Self {
        Self {
            sample_rate,
            decay: decay.clamp(0.0, 1.0),
            brightness: brightness.clamp(0.0, 1.0),
            line: Vec::new(),
        }
    }

    pub fn delay_length(&self, frequency: f32) -> usize {
        let frequency = if frequency.is_finite() {
            frequency.max(MIN_FREQUENCY_HZ)
        } else {
            MIN_FREQUENCY_HZ
        };
        ((self.sample_rate / frequency).round() as usize).max(MIN_DELAY_LENGTH)
    }

    pub fn output_length(&self, duration_secs: f32) -> usize {
        (duration_secs.max(0.0) * self.sample_rate).round() as usize
    }

    /// Pluck the string and fill all of `out`.
    pub fn pluck_into(&mut self, frequency: f32, out: &mut [f32], noise: &mut NoiseSource) {
        let n = self.delay_length(frequency);
        self.line.clear();
        self.line.resize(n, 0.0);
        noise.fill_uniform(&mut self.line);

        let (decay, brightness) = (self.decay, self.brightness);
        let line = &mut self.line;
        let mut idx = 0;
        for sample in out.iter_mut() {
            let current = line[idx];
            *sample = current;

            let next_idx = if idx + 1 == n { 0 } else { idx + 1 };
            let avg = (current + line[next_idx]) * 0.5;
            let blend = brightness * current + (1.0 - brightness) * avg;
            line[idx] = blend * decay;

            idx = next_idx;
        }
    }

    /// Pluck the string for `duration_secs`.
    pub fn pluck(&mut self, frequency: f32, duration_secs: f32, noise: &mut NoiseSource) -> Vec<f32> {
        let mut out = vec![0.0; self.output_length(duration_secs)];
        self.pluck_into(frequency, &mut out, noise);
        out
    }
}
