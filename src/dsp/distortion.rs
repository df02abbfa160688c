//! Distortion / Waveshaping
//!
//! Distortion adds harmonics by reshaping the waveform. The "drive" parameter
//! controls how aggressively the signal is pushed into the nonlinear region.
//!
//! # How Waveshaping Works
//!
//! A waveshaper applies a transfer function to each sample:
//!   output = f(input * drive)
//!
//! When drive is low (1.0), the signal stays in the linear region of f()
//! and passes through mostly unchanged. As drive increases, the signal hits
//! the nonlinear parts of f(), creating harmonic distortion.
//!
//! # Transfer Functions Used Here
//!
//! Hyperbolic tangent (soft clip):
//!   f(x) = tanh(x)
//!   - Smooth, symmetric saturation, bounded to (-1, 1)
//!   - Only odd harmonics
//!   - Used for the pre-amp overdrive on each chord chunk and for the
//!     final limiter
//!
//! Tube stage (asymmetric polynomial + soft clip):
//!   u = x * drive + bias
//!   f(x) = tanh(0.8 * (u - u³/3 + u⁵/5))
//!   - The quintic keeps adding upper harmonics long after a plain tanh
//!     would have flattened out
//!   - The DC bias breaks the symmetry, so even harmonics appear too
//!     (the "warmth" of a triode running off-centre)
//!   - Cascading two or three stages mimics the gain stages of a
//!     high-gain amplifier
//!
//! # Drive Values
//!
//!   1.0  = Clean-ish
//!   1.5  = Power-amp compression
//!   2-3  = Pre-amp stage crunch
//!   10+  = Input gain of a high-gain channel

/// Output scale of the tube polynomial before the soft clip.
const TUBE_SHAPE_GAIN: f32 = 0.8;

/// tanh soft clipping.
#[inline]
pub fn tanh_clip(sample: f32, drive: f32) -> f32 {
    (sample * drive).tanh()
}

/// One asymmetric tube gain stage. Output is bounded to (-1, 1).
#[inline]
pub fn tube_stage(sample: f32, drive: f32, bias: f32) -> f32 {
    let x = sample * drive + bias;
    let x3 = x * x * x;
    let x5 = x3 * x * x;
    let shaped = x - x3 / 3.0 + x5 / 5.0;
    (shaped * TUBE_SHAPE_GAIN).tanh()
}

/// Apply tanh clipping to an entire buffer in place, then scale the result.
pub fn tanh_clip_buffer(buffer: &mut [f32], drive: f32, makeup: f32) {
    for sample in buffer.iter_mut() {
        *sample = tanh_clip(*sample, drive) * makeup;
    }
}

/// Apply one tube stage to an entire buffer in place.
pub fn tube_stage_buffer(buffer: &mut [f32], drive: f32, bias: f32) {
    for sample in buffer.iter_mut() {
        *sample = tube_stage(*sample, drive, bias);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tanh_clip_small_signal_is_linear() {
        let output = tanh_clip(0.01, 1.0);
        assert!((output - 0.01).abs() < 1e-5);
    }

    #[test]
    fn test_tanh_clip_saturates() {
        let output = tanh_clip(1.0, 10.0);
        assert!(output > 0.99 && output <= 1.0);
    }

    #[test]
    fn test_tube_stage_is_bounded_for_huge_inputs() {
        for &x in &[-50.0, -3.0, -0.5, 0.0, 0.5, 3.0, 50.0] {
            let y = tube_stage(x, 3.0, 0.05);
            assert!(y.is_finite() && y.abs() <= 1.0, "tube({x}) = {y}");
        }
    }

    #[test]
    fn test_tube_stage_bias_is_asymmetric() {
        // With a bias the positive and negative half-waves differ.
        let pos = tube_stage(0.3, 1.0, 0.1);
        let neg = tube_stage(-0.3, 1.0, 0.1);
        assert!((pos + neg).abs() > 1e-3, "pos={pos}, neg={neg}");
    }

    #[test]
    fn test_tube_stage_without_bias_is_odd() {
        let pos = tube_stage(0.4, 1.5, 0.0);
        let neg = tube_stage(-0.4, 1.5, 0.0);
        assert!((pos + neg).abs() < 1e-6);
    }

    #[test]
    fn test_tanh_clip_buffer_applies_makeup() {
        let mut buffer = [0.0, 10.0, -10.0];
        tanh_clip_buffer(&mut buffer, 1.0, 0.5);
        assert_eq!(buffer[0], 0.0);
        assert!((buffer[1] - 0.5).abs() < 1e-4);
        assert!((buffer[2] + 0.5).abs() < 1e-4);
    }
}
