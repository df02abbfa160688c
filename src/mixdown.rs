/*
Stereo Mixdown
==============

Guitar and bass arrive as mono tracks. Each is padded to the longer length
and normalized to 0.9 on its own, so neither track's dynamics decide the
balance. The bass is high-passed again at 80 Hz (4th order, zero-phase) and
re-normalized, keeping sub-bass out of the combined low end.

Width comes from a Haas-style delay: the guitar's right copy runs 2 ms late.
The bass stays dead centre.

    gL = 0.9 · guitar            gR = 0.9 · guitar delayed 2 ms
    b  = 0.25 · volume · bass

    L = 0.6 · gL + 0.4 · gR + 0.5 · b
    R = 0.4 · gL + 0.6 · gR + 0.5 · b

Finally both channels are scaled together so the louder one peaks at 0.95.
*/

use tracing::debug;

use crate::dsp::delay::DelayLine;
use crate::dsp::filter::{ButterworthOrder, FilterChain};
use crate::dsp::mix;
use crate::error::RenderError;

pub const TRACK_PEAK: f32 = 0.9;
pub const MIX_PEAK: f32 = 0.95;
pub const BASS_HIGHPASS_HZ: f32 = 80.0;

pub const GUITAR_LEVEL: f32 = 0.9;
/// Bass level per unit of configured volume.
pub const BASS_LEVEL_SCALE: f32 = 0.25;
pub const BASS_PAN: f32 = 0.5;
const NEAR_SIDE: f32 = 0.6;
const FAR_SIDE: f32 = 0.4;

pub const MIX_WIDEN_SECS: f32 = 0.002;
/// Right-channel delay applied to the amp output on its own.
pub const AMP_WIDEN_SECS: f32 = 0.003;

/// Two equal-length channels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StereoBuffer {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl StereoBuffer {
    /// Left is `mono`; right is `mono` delayed by `delay_samples` with a
    /// silent head.
    pub fn widened(mono: &[f32], delay_samples: usize) -> Self {
        let mut right = mono.to_vec();
        DelayLine::new().render(&mut right, delay_samples);
        Self {
            left: mono.to_vec(),
            right,
        }
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn peak(&self) -> f32 {
        mix::peak(&self.left).max(mix::peak(&self.right))
    }

    /// Scale both channels by the same gain so the louder peaks at `target`.
    pub fn normalize(&mut self, target: f32) -> f32 {
        let current = self.peak();
        if current <= 0.0 || !current.is_finite() {
            return 1.0;
        }
        let gain = target / current;
        mix::scale(&mut self.left, gain);
        mix::scale(&mut self.right, gain);
        gain
    }

    /// Mean of the two channels.
    pub fn downmix(&self) -> Vec<f32> {
        self.left
            .iter()
            .zip(self.right.iter())
            .map(|(&l, &r)| (l + r) * 0.5)
            .collect()
    }

    /// L R L R ... frames.
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        self.left
            .iter()
            .zip(self.right.iter())
            .flat_map(|(&l, &r)| [l, r])
    }
}

/// Delay in whole samples for `secs`.
pub fn delay_samples(secs: f32, sample_rate: f32) -> usize {
    (secs * sample_rate) as usize
}

pub struct MixEngine {
    sample_rate: f32,
    bass_highpass: FilterChain,
}

impl MixEngine {
    pub fn new(sample_rate: f32) -> Result<Self, RenderError> {
        Ok(Self {
            sample_rate,
            bass_highpass: FilterChain::butterworth_highpass(
                BASS_HIGHPASS_HZ,
                ButterworthOrder::Fourth,
                sample_rate,
            )
            .map_err(RenderError::filter("mix bass high-pass"))?,
        })
    }

    /// Combine processed mono tracks into the final stereo mix.
    /// `bass_volume` is the configured level in [0, 1]; 0 mutes the bass.
    pub fn mix(&mut self, guitar: &[f32], bass: &[f32], bass_volume: f32) -> StereoBuffer {
        let len = guitar.len().max(bass.len());

        let mut guitar = guitar.to_vec();
        mix::fit_len(&mut guitar, len);
        mix::normalize(&mut guitar, TRACK_PEAK);

        let mut bass = bass.to_vec();
        mix::fit_len(&mut bass, len);
        mix::normalize(&mut bass, TRACK_PEAK);
        self.bass_highpass.filtfilt(&mut bass);
        mix::normalize(&mut bass, TRACK_PEAK);

        mix::scale(&mut guitar, GUITAR_LEVEL);
        let widened = StereoBuffer::widened(&guitar, delay_samples(MIX_WIDEN_SECS, self.sample_rate));
        let bass_level = bass_volume * BASS_LEVEL_SCALE * BASS_PAN;

        let mut out = StereoBuffer {
            left: vec![0.0; len],
            right: vec![0.0; len],
        };
        for i in 0..len {
            let (g_l, g_r, b) = (widened.left[i], widened.right[i], bass[i] * bass_level);
            out.left[i] = g_l * NEAR_SIDE + g_r * FAR_SIDE + b;
            out.right[i] = g_l * FAR_SIDE + g_r * NEAR_SIDE + b;
        }

        let gain = out.normalize(MIX_PEAK);
        debug!(samples = len, gain, "mixed guitar and bass");
        out
    }
}
