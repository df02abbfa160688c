//! Amplifier and cabinet simulation.

pub mod bass;
pub mod profile;

pub use bass::BassAmp;
pub use profile::AmpProfile;

use tracing::debug;

use crate::dsp::distortion::{tanh_clip_buffer, tube_stage_buffer};
use crate::dsp::filter::{ButterworthOrder, FilterChain};
use crate::dsp::mix;
use crate::error::RenderError;

/*
Guitar Amp Chain
================

All filtering is zero-phase (forward-backward), so every stage lines up in
time with the dry signal and the band splits can be summed without comb
filtering.

    input
      │
      ├─ tight?  high-pass @ highpass_hz (2nd order)
      │          + high-pass @ 120 Hz when highpass_hz > 60
      ├─ × gain
      ├─ tube(drive 3, bias 0.05) → tube(drive 2, bias 0.02)      preamp
      │
      ├─ high-pass @ 180 Hz (4th order)                            tone stack
      │    ├─ band 150-250 Hz       × bass · 0.3          ─┐
      │    ├─ band 250-2500 Hz      × mid                   │
      │    │    └─ peak @ mid_freq (Q 2) × 1.3             ├─ 0.2 · bass
      │    ├─ peak @ body_freq (Q 3) × 0.25                │  0.4 · body
      │    └─ band 2-4.5 kHz        × treble              ─┘  2.0 · mid
      │                                                        0.3 · treble
      ├─ tube(drive 1.5, bias 0)                                   power amp
      │
      ├─ low-pass @ cab_lowpass_hz (4th order)                     cabinet
      ├─ peak @ cab_resonance_hz (Q 4)
      ├─ peak @ 2.5 kHz (Q 2) × presence
      │
      ├─ gate?  |x| ≤ 0.02 → x · |x| / 0.02
      ├─ tanh(1.2 x) · 0.95
      └─ normalize to 0.9

The tone stack weights send most of the energy through the mid band, which
is what keeps high-gain voicings from turning into low-end mush.

The peaks are unity-gain resonators: at their centre they pass the signal
unchanged and elsewhere they attenuate. Every peak replaces the signal it
filters. In the cabinet the speaker resonance and the presence peak run in
series, so the cabinet keeps only what both let through and `presence`
sets the level of what is left.
*/

const SECOND_HIGHPASS_HZ: f32 = 120.0;
const SECOND_HIGHPASS_ABOVE_HZ: f32 = 60.0;

const LOW_CUT_HZ: f32 = 180.0;
const BASS_BAND: (f32, f32) = (150.0, 250.0);
const MID_BAND: (f32, f32) = (250.0, 2500.0);
const TREBLE_BAND: (f32, f32) = (2000.0, 4500.0);
const MID_PEAK_Q: f32 = 2.0;
const BODY_PEAK_Q: f32 = 3.0;

const BASS_TRIM: f32 = 0.3;
const MID_PEAK_GAIN: f32 = 1.3;
const BODY_GAIN: f32 = 0.25;
const BASS_WEIGHT: f32 = 0.2;
const BODY_WEIGHT: f32 = 0.4;
const MID_WEIGHT: f32 = 2.0;
const TREBLE_WEIGHT: f32 = 0.3;

const CAB_RESONANCE_Q: f32 = 4.0;
const PRESENCE_HZ: f32 = 2500.0;
const PRESENCE_Q: f32 = 2.0;

pub const GATE_THRESHOLD: f32 = 0.02;
pub const AMP_PEAK: f32 = 0.9;

pub struct AmpSimulator {
    profile: AmpProfile,
    tight: Vec<FilterChain>,
    low_cut: FilterChain,
    bass_band: FilterChain,
    mid_band: FilterChain,
    mid_peak: FilterChain,
    body_peak: FilterChain,
    treble_band: FilterChain,
    cab_lowpass: FilterChain,
    cab_resonance: FilterChain,
    presence: FilterChain,
    band: Vec<f32>,
    sum: Vec<f32>,
}

impl AmpSimulator {
    /// Design every filter of the chain. Fails on the first filter whose
    /// parameters are out of range for `sample_rate`.
    pub fn new(profile: AmpProfile, sample_rate: f32) -> Result<Self, RenderError> {
        profile.validate()?;
        let sr = sample_rate;

        let mut tight = Vec::new();
        if profile.tight {
            tight.push(
                FilterChain::butterworth_highpass(profile.highpass_hz, ButterworthOrder::Second, sr)
                    .map_err(RenderError::filter("amp tight high-pass"))?,
            );
            if profile.highpass_hz > SECOND_HIGHPASS_ABOVE_HZ {
                tight.push(
                    FilterChain::butterworth_highpass(SECOND_HIGHPASS_HZ, ButterworthOrder::Second, sr)
                        .map_err(RenderError::filter("amp tight high-pass"))?,
                );
            }
        }

        Ok(Self {
            profile,
            tight,
            low_cut: FilterChain::butterworth_highpass(LOW_CUT_HZ, ButterworthOrder::Fourth, sr)
                .map_err(RenderError::filter("amp low cut"))?,
            bass_band: FilterChain::band(BASS_BAND.0, BASS_BAND.1, sr)
                .map_err(RenderError::filter("amp bass band"))?,
            mid_band: FilterChain::band(MID_BAND.0, MID_BAND.1, sr)
                .map_err(RenderError::filter("amp mid band"))?,
            mid_peak: FilterChain::resonant_peak(profile.mid_freq_hz, MID_PEAK_Q, sr)
                .map_err(RenderError::filter("amp mid peak"))?,
            body_peak: FilterChain::resonant_peak(profile.body_freq_hz, BODY_PEAK_Q, sr)
                .map_err(RenderError::filter("amp body peak"))?,
            treble_band: FilterChain::band(TREBLE_BAND.0, TREBLE_BAND.1, sr)
                .map_err(RenderError::filter("amp treble band"))?,
            cab_lowpass: FilterChain::butterworth_lowpass(profile.cab_lowpass_hz, ButterworthOrder::Fourth, sr)
                .map_err(RenderError::filter("amp cabinet low-pass"))?,
            cab_resonance: FilterChain::resonant_peak(profile.cab_resonance_hz, CAB_RESONANCE_Q, sr)
                .map_err(RenderError::filter("amp cabinet resonance"))?,
            presence: FilterChain::resonant_peak(PRESENCE_HZ, PRESENCE_Q, sr)
                .map_err(RenderError::filter("amp presence"))?,
            band: Vec::new(),
            sum: Vec::new(),
        })
    }

    pub fn profile(&self) -> &AmpProfile {
        &self.profile
    }

    /// Run the whole chain over `buffer` in place.
    pub fn process(&mut self, buffer: &mut [f32]) {
        let p = self.profile;

        for chain in self.tight.iter_mut() {
            chain.filtfilt(buffer);
        }
        mix::scale(buffer, p.gain);

        tube_stage_buffer(buffer, 3.0, 0.05);
        tube_stage_buffer(buffer, 2.0, 0.02);

        self.tone_stack(buffer);

        tube_stage_buffer(buffer, 1.5, 0.0);

        self.cabinet(buffer);

        if p.gate {
            gate(buffer, GATE_THRESHOLD);
        }

        tanh_clip_buffer(buffer, 1.2, 0.95);
        let gain = mix::normalize(buffer, AMP_PEAK);
        debug!(samples = buffer.len(), gain, "amp chain done");
    }

    fn tone_stack(&mut self, buffer: &mut [f32]) {
        let p = self.profile;
        self.low_cut.filtfilt(buffer);

        self.sum.clear();
        self.sum.resize(buffer.len(), 0.0);

        self.band.clear();
        self.band.extend_from_slice(buffer);
        self.bass_band.filtfilt(&mut self.band);
        mix::sum_scaled_in_place(&mut self.sum, &self.band, p.bass * BASS_TRIM * BASS_WEIGHT);

        self.band.clear();
        self.band.extend_from_slice(buffer);
        self.mid_band.filtfilt(&mut self.band);
        mix::scale(&mut self.band, p.mid);
        self.mid_peak.filtfilt(&mut self.band);
        mix::sum_scaled_in_place(&mut self.sum, &self.band, MID_PEAK_GAIN * MID_WEIGHT);

        self.band.clear();
        self.band.extend_from_slice(buffer);
        self.body_peak.filtfilt(&mut self.band);
        mix::sum_scaled_in_place(&mut self.sum, &self.band, BODY_GAIN * BODY_WEIGHT);

        self.band.clear();
        self.band.extend_from_slice(buffer);
        self.treble_band.filtfilt(&mut self.band);
        mix::sum_scaled_in_place(&mut self.sum, &self.band, p.treble * TREBLE_WEIGHT);

        buffer.copy_from_slice(&self.sum);
    }

    fn cabinet(&mut self, buffer: &mut [f32]) {
        self.cab_lowpass.filtfilt(buffer);
        self.cab_resonance.filtfilt(buffer);
        self.presence.filtfilt(buffer);
        mix::scale(buffer, self.profile.presence);
    }
}

/// Downward expander: samples at or under `threshold` are scaled by
/// `|x| / threshold`, louder samples pass untouched.
pub fn gate(buffer: &mut [f32], threshold: f32) {
    for sample in buffer.iter_mut() {
        let level = sample.abs();
        if level <= threshold {
            *sample *= level / threshold;
        }
    }
}
