//! Sine LFOs driving the modulated delays.

use std::f32::consts::TAU;

/*
Low Frequency Oscillators
=========================

An LFO is simply an oscillator running at sub-audio frequencies. The same
waveform math applies, but the context and usage are completely different:
it never reaches the output directly, it moves a parameter.

Vocabulary
----------

  control-rate    Frequencies below human hearing: ~0.01 Hz to ~20 Hz.

  bipolar         Output swings positive AND negative: -1.0 to +1.0

  unipolar        Output is only positive: 0.0 to 1.0
                  Convert: unipolar = (bipolar + 1.0) / 2.0

  phase offset    Where in its cycle the LFO starts. Several LFOs at the
                  same rate but offset by 2π/3 drift in and out of step,
                  which is how a three-voice chorus keeps its voices apart.


Rates Used by the Modulation Effects
------------------------------------

    0.3 Hz   flanger   slow jet sweep
    0.5 Hz   phaser    slow swirl
    1.5 Hz   chorus    ensemble shimmer

At these rates one LFO cycle spans tens of thousands of samples, so the
LFO is evaluated per sample from absolute time rather than accumulated,
which keeps long renders free of phase drift.


Modulated Delay
---------------

Every effect here turns the LFO into a delay length:

    delay = base + lfo × depth

and truncates it to whole samples. Designs must keep the range valid
(never negative, never longer than the delay line).
*/

/// Map -1..=1 onto 0..=1.
#[inline]
pub fn bipolar_to_unipolar(bipolar: f32) -> f32 {
    (bipolar + 1.0) * 0.5
}

/// Sine LFO evaluated at absolute sample positions.
#[derive(Debug, Clone, Copy)]
pub struct SineLfo {
    rate_hz: f32,
    phase: f32,
    sample_rate: f32,
}

impl SineLfo {
    pub fn new(rate_hz: f32, sample_rate: f32) -> Self {
        Self {
            rate_hz,
            phase: 0.0,
            sample_rate,
        }
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    /// Bipolar value at sample `index`.
    #[inline]
    pub fn value_at(&self, index: usize) -> f32 {
        let t = index as f64 / self.sample_rate as f64;
        let cycles = (self.rate_hz as f64 * t).fract();
        ((TAU as f64 * cycles) as f32 + self.phase).sin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bipolar_to_unipolar() {
        assert!((bipolar_to_unipolar(-1.0) - 0.0).abs() < 1e-6);
        assert!((bipolar_to_unipolar(0.0) - 0.5).abs() < 1e-6);
        assert!((bipolar_to_unipolar(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lfo_starts_at_phase() {
        let lfo = SineLfo::new(1.0, 44_100.0);
        assert!(lfo.value_at(0).abs() < 1e-6);
        let shifted = SineLfo::new(1.0, 44_100.0).with_phase(std::f32::consts::FRAC_PI_2);
        assert!((shifted.value_at(0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_lfo_quarter_cycle_peaks() {
        let lfo = SineLfo::new(1.0, 44_100.0);
        assert!((lfo.value_at(11_025) - 1.0).abs() < 1e-4);
        assert!((lfo.value_at(33_075) + 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_lfo_is_periodic_over_long_spans() {
        let lfo = SineLfo::new(0.5, 44_100.0);
        let a = lfo.value_at(1234);
        let b = lfo.value_at(1234 + 88_200 * 40);
        assert!((a - b).abs() < 1e-4);
    }
}
