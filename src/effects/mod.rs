//! Time-varying delay effects applied to the rendered guitar bed.
//!
//! Each effect keeps its own delay line and sample position, so a buffer can
//! be processed whole or in consecutive blocks with identical results.

pub mod chorus;
pub mod flanger;
pub mod phaser;

pub use chorus::Chorus;
pub use flanger::Flanger;
pub use phaser::Phaser;

use tracing::debug;

/// In-place mono effect.
pub trait Effect {
    fn process(&mut self, buffer: &mut [f32]);

    /// Clear history and rewind the modulation to time zero.
    fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modulation {
    #[default]
    None,
    Phaser,
    Flanger,
    Chorus,
}

impl Modulation {
    /// Fresh effect instance, or `None` for the identity mode.
    pub fn build(self, sample_rate: f32) -> Option<Box<dyn Effect>> {
        match self {
            Modulation::None => None,
            Modulation::Phaser => Some(Box::new(Phaser::new(sample_rate))),
            Modulation::Flanger => Some(Box::new(Flanger::new(sample_rate))),
            Modulation::Chorus => Some(Box::new(Chorus::new(sample_rate))),
        }
    }

    pub fn apply(self, buffer: &mut [f32], sample_rate: f32) {
        if let Some(mut effect) = self.build(sample_rate) {
            effect.process(buffer);
            debug!(modulation = ?self, samples = buffer.len(), "applied modulation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_signal() -> Vec<f32> {
        (0..20_000).map(|i| (i as f32 * 0.031).sin() * 0.6).collect()
    }

    #[test]
    fn test_none_is_identity() {
        let input = test_signal();
        let mut buffer = input.clone();
        Modulation::None.apply(&mut buffer, 44_100.0);
        assert_eq!(buffer, input);
    }

    #[test]
    fn test_effects_change_signal_and_stay_bounded() {
        let input = test_signal();
        for modulation in [Modulation::Phaser, Modulation::Flanger, Modulation::Chorus] {
            let mut buffer = input.clone();
            modulation.apply(&mut buffer, 44_100.0);
            assert_ne!(buffer, input, "{modulation:?} left signal unchanged");
            let peak = crate::dsp::mix::peak(&buffer);
            // Dry peak 0.6. The flanger's 0.8 · 1.5 = 1.2x is the widest sum.
            assert!(peak <= 0.6 * 1.2 + 1e-4, "{modulation:?} peak {peak}");
        }
    }

    #[test]
    fn test_reset_replays_identically() {
        let input = test_signal();
        let mut effect = Modulation::Chorus.build(44_100.0).unwrap();

        let mut first = input.clone();
        effect.process(&mut first);
        effect.reset();
        let mut second = input;
        effect.process(&mut second);
        assert_eq!(first, second);
    }
}
