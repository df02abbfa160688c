//! Render configuration.
//!
//! [`BackingTrackConfig`] is the caller-facing parameter set: plain strings
//! and numbers, deserializable from TOML. [`RenderSettings::resolve`] turns it
//! into validated, enum-typed settings once, before any audio is produced.

pub mod registry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amp::AmpProfile;
use crate::effects::Modulation;
use crate::error::{ConfigWarning, RenderError};
use crate::render::patterns::{AccentPattern, Articulation, AttackStyle, BassStyle, RhythmPattern};
use crate::theory::pitch::MAX_OCTAVE;
use crate::theory::progression::{self, ChordEvent};
use crate::theory::{PitchClass, Style};
use crate::SAMPLE_RATE;

use registry::{resolve, resolve_in};

pub const DEFAULT_SEED: u64 = 0x5EED;

pub const MAX_BPM: u32 = 1000;
pub const MAX_BEATS_PER_BAR: u32 = 32;
pub const MAX_BASS_OCTAVE_OFFSET: u8 = 3;
/// Longest render accepted, in seconds.
pub const MAX_DURATION_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BackingTrackConfig {
    pub key: String,
    pub octave: u8,
    pub style: String,
    pub bpm: u32,
    pub bars: u32,
    pub beats_per_bar: u32,
    pub rhythm: String,
    pub accent: String,
    pub articulation: String,
    pub attack: String,
    pub modulation: String,
    /// Amp voicing id. Follows `style` when unset.
    pub amp_style: Option<String>,
    /// Replaces the named amp voicing entirely.
    pub amp_profile: Option<AmpProfile>,
    pub bass: BassConfig,
    pub seed: u64,
}

impl Default for BackingTrackConfig {
    fn default() -> Self {
        Self {
            key: "E".to_string(),
            octave: 2,
            style: "metal".to_string(),
            bpm: 120,
            bars: 4,
            beats_per_bar: 4,
            rhythm: "straight".to_string(),
            accent: "downbeat".to_string(),
            articulation: "palm_mute".to_string(),
            attack: "aggressive".to_string(),
            modulation: "none".to_string(),
            amp_style: None,
            amp_profile: None,
            bass: BassConfig::default(),
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BassConfig {
    pub enabled: bool,
    /// Octaves below the guitar root.
    pub octave_offset: u8,
    pub style: String,
    /// Level in the final mix, in [0, 1].
    pub volume: f32,
}

impl Default for BassConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            octave_offset: 1,
            style: "root".to_string(),
            volume: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BassSettings {
    pub octave_offset: u8,
    pub style: BassStyle,
    pub volume: f32,
}

/// Independent noise streams. Each stage seeds its own generator so enabling
/// one stage never shifts the random draws of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStream {
    Guitar,
    Hiss,
    Bass,
}

impl SeedStream {
    fn salt(self) -> u64 {
        match self {
            SeedStream::Guitar => 0x6775_6974_6172_0001,
            SeedStream::Hiss => 0x6869_7373_0000_0002,
            SeedStream::Bass => 0x6261_7373_0000_0003,
        }
    }
}

/// Validated settings for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub key: PitchClass,
    pub octave: u8,
    pub style: Style,
    pub bpm: u32,
    pub bars: u32,
    pub beats_per_bar: u32,
    pub rhythm: RhythmPattern,
    pub accent: AccentPattern,
    pub articulation: Articulation,
    pub attack: AttackStyle,
    pub modulation: Modulation,
    pub amp: AmpProfile,
    pub bass: Option<BassSettings>,
    pub seed: u64,
    /// Ids that were not recognised and the fallbacks used instead.
    pub warnings: Vec<ConfigWarning>,
}

impl RenderSettings {
    /// Validate `config` and resolve every id it names.
    ///
    /// Unknown ids fall back to a default and leave a [`ConfigWarning`].
    /// The style id is resolved twice: the progression falls back to
    /// `rock`, while the amp voicing (when no `amp_style` or custom profile
    /// is given) falls back to `metal`. An unknown style therefore renders
    /// a rock progression through the metal amp and records two warnings.
    pub fn resolve(config: &BackingTrackConfig) -> Result<Self, RenderError> {
        let key: PitchClass = config.key.parse()?;

        if config.octave > MAX_OCTAVE {
            return Err(RenderError::config(
                "octave",
                format!("must be at most {MAX_OCTAVE} (got {})", config.octave),
            ));
        }
        if config.bpm == 0 || config.bpm > MAX_BPM {
            return Err(RenderError::config(
                "bpm",
                format!("must be in 1..={MAX_BPM} (got {})", config.bpm),
            ));
        }
        if config.bars == 0 {
            return Err(RenderError::config("bars", "must be at least 1"));
        }
        if config.beats_per_bar == 0 || config.beats_per_bar > MAX_BEATS_PER_BAR {
            return Err(RenderError::config(
                "beats_per_bar",
                format!(
                    "must be in 1..={MAX_BEATS_PER_BAR} (got {})",
                    config.beats_per_bar
                ),
            ));
        }
        let total_beats = config.bars as u64 * config.beats_per_bar as u64;
        if total_beats * 60 > MAX_DURATION_SECS * config.bpm as u64 {
            return Err(RenderError::config(
                "bars",
                format!(
                    "{} bars at {} bpm exceeds {} minutes",
                    config.bars,
                    config.bpm,
                    MAX_DURATION_SECS / 60
                ),
            ));
        }

        let mut warnings = Vec::new();
        let style = resolve(&config.style, Style::Rock, &mut warnings);
        let rhythm = resolve(&config.rhythm, RhythmPattern::Straight, &mut warnings);
        let accent = resolve(&config.accent, AccentPattern::Downbeat, &mut warnings);
        let articulation = resolve(&config.articulation, Articulation::PalmMute, &mut warnings);
        let attack = resolve(&config.attack, AttackStyle::Aggressive, &mut warnings);
        let modulation = resolve(&config.modulation, Modulation::None, &mut warnings);

        let amp = match (&config.amp_profile, &config.amp_style) {
            (Some(custom), _) => *custom,
            (None, Some(id)) => {
                AmpProfile::for_style(resolve_in("amp style", id, Style::Metal, &mut warnings))
            }
            (None, None) => AmpProfile::for_style(resolve_in(
                "amp style",
                &config.style,
                Style::Metal,
                &mut warnings,
            )),
        };
        amp.validate()?;

        let bass = if config.bass.enabled {
            let offset = config.bass.octave_offset;
            if offset > MAX_BASS_OCTAVE_OFFSET {
                return Err(RenderError::config(
                    "bass.octave_offset",
                    format!("must be in 0..={MAX_BASS_OCTAVE_OFFSET} (got {offset})"),
                ));
            }
            let volume = config.bass.volume;
            if !(0.0..=1.0).contains(&volume) {
                return Err(RenderError::config(
                    "bass.volume",
                    format!("must be in [0, 1] (got {volume})"),
                ));
            }
            Some(BassSettings {
                octave_offset: offset,
                style: resolve(&config.bass.style, BassStyle::Root, &mut warnings),
                volume,
            })
        } else {
            None
        };

        let settings = Self {
            key,
            octave: config.octave,
            style,
            bpm: config.bpm,
            bars: config.bars,
            beats_per_bar: config.beats_per_bar,
            rhythm,
            accent,
            articulation,
            attack,
            modulation,
            amp,
            bass,
            seed: config.seed,
            warnings,
        };
        debug!(
            key = %settings.key,
            style = ?settings.style,
            bpm = settings.bpm,
            bars = settings.bars,
            samples = settings.total_samples(),
            "resolved render settings"
        );
        Ok(settings)
    }

    pub fn total_beats(&self) -> u32 {
        self.bars * self.beats_per_bar
    }

    /// Samples per beat, truncated.
    pub fn beat_samples(&self) -> usize {
        (60 * SAMPLE_RATE as u64 / self.bpm as u64) as usize
    }

    /// Length of every buffer in the render, truncated.
    pub fn total_samples(&self) -> usize {
        (self.total_beats() as u64 * 60 * SAMPLE_RATE as u64 / self.bpm as u64) as usize
    }

    pub fn duration_secs(&self) -> f32 {
        self.total_beats() as f32 * 60.0 / self.bpm as f32
    }

    pub fn events(&self) -> Vec<ChordEvent> {
        progression::generate(
            self.key,
            self.octave,
            self.style,
            self.bars,
            self.beats_per_bar,
        )
    }

    pub fn stream_seed(&self, stream: SeedStream) -> u64 {
        self.seed ^ stream.salt()
    }
}
