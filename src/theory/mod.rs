//! Music theory: pitch classes, equal temperament, chord progressions.

pub mod pitch;
pub mod progression;

pub use pitch::{midi_to_freq, PitchClass};
pub use progression::{ChordEvent, Style, POWER_CHORD_INTERVALS};
