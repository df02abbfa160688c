//! Low-level DSP primitives used by the rendering and amp stages.
//!
//! These components stay focused on the signal-processing math: filters,
//! waveshapers, delay lines, noise, envelopes. The stage modules above them
//! decide what to chain and with which constants.

/// Time-domain delay line.
pub mod delay;
/// Waveshaping transfer functions.
pub mod distortion;
/// Plucked-note amplitude shapes.
pub mod envelope;
/// State-variable filter sections, Butterworth cascades, zero-phase passes.
pub mod filter;
/// Karplus-Strong plucked string model.
pub mod karplus;
/// Control-rate oscillators for modulated delays.
pub mod lfo;
/// Mixing, level and length helpers.
pub mod mix;
/// Sines, additive partials and seeded noise.
pub mod oscillator;

pub use filter::FilterSpecError;
