//! Whole-track benchmarks.
//!
//! These run the same stages a render does, on one-bar and four-bar tracks.

mod amp;
mod guitar;
mod mix;

pub use amp::bench_amp;
pub use guitar::bench_guitar;
pub use mix::bench_mix;

use backline::{BackingTrackConfig, RenderSettings};

/// Settings for a `bars`-bar track at 120 bpm in the given style.
pub fn settings(style: &str, bars: u32) -> RenderSettings {
    let config = BackingTrackConfig {
        style: style.to_string(),
        bars,
        ..BackingTrackConfig::default()
    };
    RenderSettings::resolve(&config).unwrap()
}

/// Raw guitar for `settings`, ready for the amp.
pub fn raw_guitar(settings: &RenderSettings) -> Vec<f32> {
    let sr = backline::SAMPLE_RATE as f32;
    let events = settings.events();
    let mut buffer = backline::render::ChordRenderer::new(settings, sr).render(
        &events,
        settings.beat_samples(),
        settings.total_samples(),
    );
    backline::render::guitar::finish_raw(&mut buffer, settings);
    buffer
}
