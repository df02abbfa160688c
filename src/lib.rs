pub mod amp; // Guitar and bass amp/cabinet chains
pub mod analysis;
pub mod config;
pub mod dsp;
pub mod effects; // Phaser, flanger, chorus
pub mod error;
pub mod mixdown;
pub mod notation;
pub mod pipeline;
pub mod render; // Chord and bass line synthesis
pub mod theory; // Pitch classes and progressions

pub use config::{BackingTrackConfig, BassConfig, RenderSettings};
pub use error::{ConfigWarning, RenderError};
pub use pipeline::{render, Artifacts};

/// The only sample rate the renderer produces.
pub const SAMPLE_RATE: u32 = 44_100;
/// Capacity of every delay line, in samples.
pub const MAX_DELAY_SAMPLES: usize = 2048;
