use tracing::debug;

use crate::dsp::distortion::tanh_clip_buffer;
use crate::dsp::filter::{ButterworthOrder, FilterChain};
use crate::dsp::mix;
use crate::error::RenderError;

/// High-pass corner that clears sub-bass mud.
pub const MUD_CUT_HZ: f32 = 60.0;
/// Low-mid punch resonance.
pub const PUNCH_HZ: f32 = 150.0;
/// Upper-bass note definition resonance.
pub const DEFINITION_HZ: f32 = 400.0;
const RESONANCE_Q: f32 = 2.0;
/// Low-pass corner that removes string noise.
pub const STRING_NOISE_CUT_HZ: f32 = 2000.0;

const DRIVE: f32 = 1.5;
const DRIVE_MAKEUP: f32 = 0.9;
const DEFINITION_TRIM: f32 = 0.7;
pub const BASS_AMP_PEAK: f32 = 0.85;

/// Clean bass amp voiced to sit under the guitar: high-pass at 60 Hz, light
/// tanh drive, punch (150 Hz) and definition (400 Hz) resonators in series,
/// low-pass at 2 kHz, normalized to 0.85. All filtering is zero-phase.
///
/// The two resonators replace the signal rather than boosting it, so
/// together they select the 150-400 Hz region and leave the guitar's mids
/// alone.
pub struct BassAmp {
    mud_cut: FilterChain,
    punch: FilterChain,
    definition: FilterChain,
    string_noise_cut: FilterChain,
}

impl BassAmp {
    pub fn new(sample_rate: f32) -> Result<Self, RenderError> {
        Ok(Self {
            mud_cut: FilterChain::butterworth_highpass(MUD_CUT_HZ, ButterworthOrder::Fourth, sample_rate)
                .map_err(RenderError::filter("bass amp high-pass"))?,
            punch: FilterChain::resonant_peak(PUNCH_HZ, RESONANCE_Q, sample_rate)
                .map_err(RenderError::filter("bass amp punch"))?,
            definition: FilterChain::resonant_peak(DEFINITION_HZ, RESONANCE_Q, sample_rate)
                .map_err(RenderError::filter("bass amp definition"))?,
            string_noise_cut: FilterChain::butterworth_lowpass(
                STRING_NOISE_CUT_HZ,
                ButterworthOrder::Fourth,
                sample_rate,
            )
            .map_err(RenderError::filter("bass amp low-pass"))?,
        })
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        self.mud_cut.filtfilt(buffer);
        tanh_clip_buffer(buffer, DRIVE, DRIVE_MAKEUP);

        self.punch.filtfilt(buffer);
        self.definition.filtfilt(buffer);
        mix::scale(buffer, DEFINITION_TRIM);

        self.string_noise_cut.filtfilt(buffer);
        let gain = mix::normalize(buffer, BASS_AMP_PEAK);
        debug!(samples = buffer.len(), gain, "bass amp done");
    }
}
