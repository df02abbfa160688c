/*
Plucked-Note Envelopes
======================

A plucked note has no sustain stage: the string is struck once and dies
away. Two shapes cover everything the renderers need.


Articulation Envelope
---------------------

Applied to the whole note. Three segments multiply together:

  Level
    1.0 ┐ ╱╲
        │╱  ╲__
        │      ╲___           gate point
        │          ╲____ ─ ─ ─ ┐
        │               ╲___   │╲
    0.0 └───────────────────────┴─╲──→ Time
        attack   exponential decay   gate

  attack      linear ramp 0 → 1 over a few milliseconds (removes the click)
  decay       exp(-t · decay_rate); larger rate = shorter, more muted note
  gate        from `gate_point` (a fraction of the note length) to the end,
              a squared ease-out (1 - x)² pulls the level to exactly zero

Palm-muted and staccato notes gate early with a fast decay; legato notes
ring almost to the end of their slot.


Attack Transient
----------------

The pick hitting the string is a short burst of noise whose amplitude falls
from `amplitude` to zero as a power curve:

    level(i) = amplitude · (1 - i / (n - 1)) ^ decay_exp

An exponent below 1 keeps the burst loud for most of its length (a hard,
aggressive pick); an exponent near 1 fades it linearly (a soft touch).

Both shapes are evaluated per sample index so the renderers can fold them
into a single pass without allocating curve buffers.
*/

/// Value of a linear ramp from 1.0 down to 0.0 across `len` points
/// (endpoints included), at point `i`.
#[inline]
fn falling_ramp(i: usize, len: usize) -> f32 {
    if len <= 1 {
        1.0
    } else {
        1.0 - i as f32 / (len - 1) as f32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArticulationEnvelope {
    len: usize,
    attack_samples: usize,
    gate_start: usize,
    decay_rate: f32,
    sample_rate: f32,
}

impl ArticulationEnvelope {
    /// Envelope for a note of `len` samples. A `gate_point` of 1.0 or more
    /// disables the gate segment.
    pub fn new(len: usize, sample_rate: f32, attack_secs: f32, decay_rate: f32, gate_point: f32) -> Self {
        let attack_samples = (attack_secs.max(0.0) * sample_rate) as usize;
        let gate_start = ((len as f32 * gate_point.max(0.0)) as usize).min(len);
        Self {
            len,
            attack_samples,
            gate_start,
            decay_rate,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn gate_start(&self) -> usize {
        self.gate_start
    }

    #[inline]
    pub fn level(&self, i: usize) -> f32 {
        let mut level = 1.0;

        if self.attack_samples > 0 && self.attack_samples < self.len && i < self.attack_samples {
            level = 1.0 - falling_ramp(i, self.attack_samples);
        }

        level *= (-(i as f32 / self.sample_rate) * self.decay_rate).exp();

        if i >= self.gate_start {
            let ramp = falling_ramp(i - self.gate_start, self.len - self.gate_start);
            level *= ramp * ramp;
        }

        level
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AttackTransient {
    samples: usize,
    amplitude: f32,
    decay_exp: f32,
}

impl AttackTransient {
    /// Burst of `duration_secs`, truncated to `max_len` samples.
    pub fn new(duration_secs: f32, amplitude: f32, decay_exp: f32, sample_rate: f32, max_len: usize) -> Self {
        let samples = ((duration_secs.max(0.0) * sample_rate) as usize).min(max_len);
        Self {
            samples,
            amplitude,
            decay_exp,
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    #[inline]
    pub fn level(&self, i: usize) -> f32 {
        if i >= self.samples {
            return 0.0;
        }
        self.amplitude * falling_ramp(i, self.samples).powf(self.decay_exp)
    }
}
