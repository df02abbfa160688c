//! Spectral band energy, used to check amp voicings.

use std::f32::consts::TAU;
use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/*
Band Energy Profile
===================

The signal is cut into non-overlapping Hann-windowed frames of 4096
samples (~93 ms at 44.1 kHz, 10.8 Hz bins). Each frame's power spectrum is
accumulated, and bins are summed into three bands:

    low    below 250 Hz        rumble, speaker thump, bass
    mid    250 Hz - 2 kHz      where a guitar's voice lives
    high   above 2 kHz         pick, fizz, presence

By Parseval, the power in a band is proportional to the squared RMS of the
signal band-limited to it, so comparing band powers compares band RMS.
Reported values are fractions of the total (they sum to 1 for any
non-silent input).
*/

pub const FRAME_SIZE: usize = 4096;
pub const LOW_MID_SPLIT_HZ: f32 = 250.0;
pub const MID_HIGH_SPLIT_HZ: f32 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnergyProfile {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl EnergyProfile {
    pub fn is_mid_forward(&self) -> bool {
        self.mid > self.low
    }
}

impl fmt::Display for EnergyProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "low {:5.1}%  mid {:5.1}%  high {:5.1}%",
            self.low * 100.0,
            self.mid * 100.0,
            self.high * 100.0
        )
    }
}

pub struct SpectrumAnalyzer {
    sample_rate: f32,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    frame: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    pub fn new(sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FRAME_SIZE);
        let window = (0..FRAME_SIZE)
            .map(|i| 0.5 - 0.5 * (TAU * i as f32 / (FRAME_SIZE - 1) as f32).cos())
            .collect();
        Self {
            sample_rate,
            fft,
            window,
            frame: vec![Complex::new(0.0, 0.0); FRAME_SIZE],
        }
    }

    pub fn bin_width(&self) -> f32 {
        self.sample_rate / FRAME_SIZE as f32
    }

    /// Power per bin, DC to Nyquist, summed over all frames. A trailing
    /// partial frame is zero-padded.
    pub fn power_spectrum(&mut self, samples: &[f32]) -> Vec<f32> {
        let mut power = vec![0.0; FRAME_SIZE / 2 + 1];
        for chunk in samples.chunks(FRAME_SIZE) {
            for (i, slot) in self.frame.iter_mut().enumerate() {
                let x = chunk.get(i).copied().unwrap_or(0.0);
                *slot = Complex::new(x * self.window[i], 0.0);
            }
            self.fft.process(&mut self.frame);
            for (acc, bin) in power.iter_mut().zip(self.frame.iter()) {
                *acc += bin.norm_sqr();
            }
        }
        power
    }

    /// Sum of `spectrum` bins whose centre lies in `[low_hz, high_hz)`.
    pub fn band_power(&self, spectrum: &[f32], low_hz: f32, high_hz: f32) -> f32 {
        let width = self.bin_width();
        spectrum
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let f = *i as f32 * width;
                f >= low_hz && f < high_hz
            })
            .map(|(_, &p)| p)
            .sum()
    }

    pub fn energy_profile(&mut self, samples: &[f32]) -> EnergyProfile {
        let spectrum = self.power_spectrum(samples);
        let low = self.band_power(&spectrum, 0.0, LOW_MID_SPLIT_HZ);
        let mid = self.band_power(&spectrum, LOW_MID_SPLIT_HZ, MID_HIGH_SPLIT_HZ);
        let high = self.band_power(&spectrum, MID_HIGH_SPLIT_HZ, f32::INFINITY);
        let total = low + mid + high;
        if total <= 0.0 || !total.is_finite() {
            return EnergyProfile::default();
        }
        EnergyProfile {
            low: low / total,
            mid: mid / total,
            high: high / total,
        }
    }
}

/// One-shot [`SpectrumAnalyzer::energy_profile`].
pub fn energy_profile(samples: &[f32], sample_rate: f32) -> EnergyProfile {
    SpectrumAnalyzer::new(sample_rate).energy_profile(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 44_100.0;

    fn tone(freq: f32, len: usize) -> Vec<f32> {
        (0..len).map(|i| (TAU * freq * i as f32 / SR).sin()).collect()
    }

    #[test]
    fn test_tones_land_in_their_band() {
        let low = energy_profile(&tone(100.0, 4 * FRAME_SIZE), SR);
        assert!(low.low > 0.99, "{low}");

        let mid = energy_profile(&tone(800.0, 4 * FRAME_SIZE), SR);
        assert!(mid.mid > 0.99, "{mid}");
        assert!(mid.is_mid_forward());

        let high = energy_profile(&tone(5000.0, 4 * FRAME_SIZE), SR);
        assert!(high.high > 0.99, "{high}");
    }

    #[test]
    fn test_fractions_sum_to_one() {
        let mixed: Vec<f32> = tone(100.0, 10_000)
            .iter()
            .zip(tone(1000.0, 10_000))
            .zip(tone(6000.0, 10_000))
            .map(|((a, b), c)| a + 0.5 * b + 0.25 * c)
            .collect();
        let p = energy_profile(&mixed, SR);
        assert!((p.low + p.mid + p.high - 1.0).abs() < 1e-4);
        assert!(p.low > p.mid && p.mid > p.high, "{p}");
    }

    #[test]
    fn test_silence_is_zero_profile() {
        assert_eq!(energy_profile(&[0.0; 5000], SR), EnergyProfile::default());
        assert_eq!(energy_profile(&[], SR), EnergyProfile::default());
    }

    #[test]
    fn test_short_input_is_padded() {
        let p = energy_profile(&tone(1000.0, 1000), SR);
        assert!(p.mid > 0.9, "{p}");
    }
}
