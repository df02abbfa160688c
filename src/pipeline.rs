//! One complete render, from configuration to every output buffer.
//!
//! Filters for every stage are designed before any audio is synthesized, so
//! a bad profile fails the render immediately instead of after the expensive
//! part.

use tracing::{debug, info};

use crate::amp::{AmpSimulator, BassAmp};
use crate::config::{BackingTrackConfig, RenderSettings};
use crate::dsp::mix;
use crate::error::RenderError;
use crate::mixdown::{delay_samples, MixEngine, StereoBuffer, AMP_WIDEN_SECS};
use crate::render::guitar::finish_raw;
use crate::render::{BassRenderer, ChordRenderer};
use crate::theory::ChordEvent;
use crate::SAMPLE_RATE;

#[derive(Debug, Clone, PartialEq)]
pub struct BassArtifacts {
    /// Mono bass line before the bass amp.
    pub raw: Vec<f32>,
    /// Mono bass after the bass amp.
    pub processed: Vec<f32>,
    /// Guitar and bass combined.
    pub mix: StereoBuffer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub settings: RenderSettings,
    pub events: Vec<ChordEvent>,
    /// Mono guitar after modulation and hiss, before the amp.
    pub raw_guitar: Vec<f32>,
    /// Mono amp output.
    pub amp_guitar: Vec<f32>,
    /// Amp output widened to stereo.
    pub guitar: StereoBuffer,
    pub bass: Option<BassArtifacts>,
}

impl Artifacts {
    /// The full mix when a bass track was rendered, otherwise the guitar.
    pub fn final_mix(&self) -> &StereoBuffer {
        self.bass.as_ref().map_or(&self.guitar, |bass| &bass.mix)
    }
}

pub fn render(config: &BackingTrackConfig) -> Result<Artifacts, RenderError> {
    let settings = RenderSettings::resolve(config)?;
    render_settings(settings)
}

pub fn render_settings(settings: RenderSettings) -> Result<Artifacts, RenderError> {
    let sr = SAMPLE_RATE as f32;
    info!(
        key = %settings.key,
        style = ?settings.style,
        bpm = settings.bpm,
        bars = settings.bars,
        bass = settings.bass.is_some(),
        "rendering backing track"
    );

    let mut amp = AmpSimulator::new(settings.amp, sr)?;
    let mut bass_stage = match settings.bass {
        Some(bass) => Some((bass, BassAmp::new(sr)?, MixEngine::new(sr)?)),
        None => None,
    };

    let events = settings.events();
    let beat_samples = settings.beat_samples();
    let total_samples = settings.total_samples();

    let mut raw_guitar = ChordRenderer::new(&settings, sr).render(&events, beat_samples, total_samples);
    settings.modulation.apply(&mut raw_guitar, sr);
    finish_raw(&mut raw_guitar, &settings);
    debug!(peak = mix::peak(&raw_guitar), "raw guitar ready");

    let mut amp_guitar = raw_guitar.clone();
    amp.process(&mut amp_guitar);
    let guitar = StereoBuffer::widened(&amp_guitar, delay_samples(AMP_WIDEN_SECS, sr));

    let bass = bass_stage.as_mut().map(|(bass, bass_amp, engine)| {
        let raw = BassRenderer::new(&settings, bass, sr).render(&events, beat_samples, total_samples);
        let mut processed = raw.clone();
        bass_amp.process(&mut processed);
        let mix = engine.mix(&guitar.downmix(), &processed, bass.volume);
        BassArtifacts { raw, processed, mix }
    });

    info!(
        samples = total_samples,
        seconds = settings.duration_secs(),
        "render complete"
    );

    Ok(Artifacts {
        settings,
        events,
        raw_guitar,
        amp_guitar,
        guitar,
        bass,
    })
}
