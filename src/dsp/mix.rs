//! Signal mixing, level and length primitives.

/*
Signal Mixing
=============

Mixing combines signals by ADDING them together, optionally with weights.
Every buffer handed between stages has the same length, so mixing is always
a straight sample-by-sample walk.

Vocabulary
----------

  summing       Adding signals at equal levels (no weighting). Can exceed
                full scale if the inputs are already loud.

  wet/dry       Effect mixing. dry = original, wet = processed.
                  output = dry × (1 - mix) + wet × mix

  peak          The largest absolute sample value in a buffer.

  normalize     Scale a whole buffer so its peak lands exactly on a target
                ceiling (for example 0.95, leaving headroom below 1.0).
                A silent buffer stays silent: there is nothing to scale.


Length Policy
-------------

Synthesis stages sometimes produce a few samples more or fewer than the
slot they are placed in (integer rounding of durations). `fit_len` makes the
policy explicit:

    longer than target   → truncated
    shorter than target  → zero-padded at the end

    target = 5
    [a b c d e f g]  →  [a b c d e]
    [a b c]          →  [a b c 0 0]
*/

/// Add `gain × b` into `a` in-place. The result is not clipped.
#[inline]
pub fn sum_scaled_in_place(a: &mut [f32], b: &[f32], gain: f32) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa += sb * gain;
    }
}

/// Linear crossfade: `mix` 0.0 is all dry, 1.0 all wet.
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}

/// Multiply every sample by `gain`.
#[inline]
pub fn scale(buffer: &mut [f32], gain: f32) {
    for sample in buffer.iter_mut() {
        *sample *= gain;
    }
}

/// Largest absolute sample value. NaN samples are ignored.
pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

pub fn rms(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    (buffer.iter().map(|x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
}

/// Scale `buffer` so its peak equals `target`. Returns the applied gain
/// (1.0 for a silent buffer, which is left untouched).
pub fn normalize(buffer: &mut [f32], target: f32) -> f32 {
    let current = peak(buffer);
    if current <= 0.0 || !current.is_finite() {
        return 1.0;
    }
    let gain = target / current;
    scale(buffer, gain);
    gain
}

/// Truncate or zero-pad `buffer` to exactly `len` samples.
pub fn fit_len(buffer: &mut Vec<f32>, len: usize) {
    buffer.resize(len, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_can_exceed_one() {
        let mut a = [1.0, 0.5];
        sum_scaled_in_place(&mut a, &[1.0, 0.75], 1.0);
        assert_eq!(a, [2.0, 1.25]);
    }

    #[test]
    fn test_sum_scaled() {
        let mut a = [1.0, 1.0];
        sum_scaled_in_place(&mut a, &[1.0, -1.0], 0.5);
        assert_eq!(a, [1.5, 0.5]);
    }

    #[test]
    fn test_blend_dry_wet() {
        assert_eq!(blend_dry_wet(1.0, 0.5, 0.0), 1.0);
        assert_eq!(blend_dry_wet(1.0, 0.5, 1.0), 0.5);
        assert_eq!(blend_dry_wet(1.0, 0.0, 0.5), 0.5);
    }

    #[test]
    fn test_peak_uses_absolute_value() {
        assert_eq!(peak(&[0.1, -0.7, 0.3]), 0.7);
        assert_eq!(peak(&[]), 0.0);
    }

    #[test]
    fn test_normalize_hits_target() {
        let mut buffer = [0.1, -0.4, 0.2];
        let gain = normalize(&mut buffer, 0.9);
        assert!((peak(&buffer) - 0.9).abs() < 1e-6);
        assert!((gain - 2.25).abs() < 1e-5);
    }

    #[test]
    fn test_normalize_leaves_silence_alone() {
        let mut buffer = [0.0; 8];
        assert_eq!(normalize(&mut buffer, 0.95), 1.0);
        assert_eq!(buffer, [0.0; 8]);
    }

    #[test]
    fn test_fit_len_truncates_and_pads() {
        let mut long = vec![1.0, 2.0, 3.0, 4.0];
        fit_len(&mut long, 2);
        assert_eq!(long, vec![1.0, 2.0]);

        let mut short = vec![1.0];
        fit_len(&mut short, 3);
        assert_eq!(short, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rms_of_constant() {
        assert!((rms(&[0.5; 16]) - 0.5).abs() < 1e-6);
        assert_eq!(rms(&[]), 0.0);
    }
}
