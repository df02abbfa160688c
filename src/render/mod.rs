//! Turns chord events into mono instrument tracks.

pub mod bass;
pub mod guitar;
pub mod patterns;

pub use bass::BassRenderer;
pub use guitar::ChordRenderer;
