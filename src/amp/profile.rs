#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::theory::Style;

/// Voicing of the guitar amplifier chain.
///
/// Band gains (`bass`, `mid`, `treble`, `presence`) are linear multipliers.
/// Fields left out of a deserialized profile take the `metal` values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AmpProfile {
    /// Input gain ahead of the preamp stages.
    pub gain: f32,
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub presence: f32,
    /// Centre of the characteristic mid resonance.
    pub mid_freq_hz: f32,
    /// Centre of the low-mid body resonance.
    pub body_freq_hz: f32,
    /// High-pass the input to keep the low end tight.
    pub tight: bool,
    /// Downward-expand quiet samples after the cabinet.
    pub gate: bool,
    /// Tightening high-pass corner. Above 60 Hz a second pass at 120 Hz is
    /// added.
    pub highpass_hz: f32,
    /// Speaker resonance peak.
    pub cab_resonance_hz: f32,
    /// Speaker roll-off.
    pub cab_lowpass_hz: f32,
}

impl AmpProfile {
    pub const METAL: AmpProfile = AmpProfile {
        gain: 14.0,
        bass: 0.25,
        mid: 1.3,
        treble: 0.65,
        presence: 0.45,
        mid_freq_hz: 850.0,
        body_freq_hz: 300.0,
        tight: true,
        gate: true,
        highpass_hz: 80.0,
        cab_resonance_hz: 100.0,
        cab_lowpass_hz: 4500.0,
    };

    /// Darker, bass-heavy take on the metal voicing.
    pub const METAL_REFERENCE: AmpProfile = AmpProfile {
        bass: 0.6,
        mid: 1.6,
        treble: 0.1,
        presence: 0.1,
        highpass_hz: 60.0,
        cab_lowpass_hz: 2400.0,
        ..AmpProfile::METAL
    };

    pub const ROCK: AmpProfile = AmpProfile {
        gain: 6.0,
        bass: 0.5,
        mid: 1.0,
        treble: 0.6,
        presence: 0.4,
        mid_freq_hz: 650.0,
        body_freq_hz: 280.0,
        tight: false,
        gate: false,
        highpass_hz: 80.0,
        cab_resonance_hz: 120.0,
        cab_lowpass_hz: 4500.0,
    };

    pub const BLUES: AmpProfile = AmpProfile {
        gain: 3.0,
        bass: 0.55,
        mid: 0.85,
        treble: 0.5,
        presence: 0.3,
        mid_freq_hz: 550.0,
        body_freq_hz: 250.0,
        ..AmpProfile::ROCK
    };

    pub const PUNK: AmpProfile = AmpProfile {
        gain: 7.0,
        bass: 0.35,
        mid: 1.1,
        treble: 0.7,
        presence: 0.5,
        mid_freq_hz: 900.0,
        body_freq_hz: 320.0,
        tight: true,
        ..AmpProfile::ROCK
    };

    pub const DJENT: AmpProfile = AmpProfile {
        gain: 11.0,
        bass: 0.4,
        mid: 0.9,
        treble: 0.6,
        presence: 0.4,
        mid_freq_hz: 1100.0,
        body_freq_hz: 280.0,
        tight: true,
        ..AmpProfile::ROCK
    };

    pub const GRUNGE: AmpProfile = AmpProfile {
        gain: 8.0,
        bass: 0.6,
        mid: 0.7,
        treble: 0.55,
        presence: 0.35,
        mid_freq_hz: 600.0,
        body_freq_hz: 320.0,
        ..AmpProfile::ROCK
    };

    pub fn for_style(style: Style) -> Self {
        match style {
            Style::Metal => Self::METAL,
            Style::MetalReference => Self::METAL_REFERENCE,
            Style::Rock => Self::ROCK,
            Style::Blues => Self::BLUES,
            Style::Punk => Self::PUNK,
            Style::Djent => Self::DJENT,
            Style::Grunge => Self::GRUNGE,
        }
    }

    /// Reject gains a filter design cannot catch: negative or non-finite
    /// multipliers. Frequencies are checked when the chain is built.
    pub fn validate(&self) -> Result<(), RenderError> {
        let gains = [
            ("amp.gain", self.gain),
            ("amp.bass", self.bass),
            ("amp.mid", self.mid),
            ("amp.treble", self.treble),
            ("amp.presence", self.presence),
        ];
        for (parameter, value) in gains {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderError::config(
                    parameter,
                    format!("must be a finite, non-negative gain (got {value})"),
                ));
            }
        }
        Ok(())
    }
}

impl Default for AmpProfile {
    fn default() -> Self {
        Self::METAL
    }
}
