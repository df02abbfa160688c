/*
Chord Progressions
==================

A style is, harmonically, a loop of scale degrees. Each degree picks a note
of the key's scale, and that note becomes the root of a power chord held for
one bar:

    rock     I  IV  V  I                 [1, 4, 5, 1]
    blues    I I IV IV I I V IV I V      (ten-bar turnaround loop)
    metal    i  VI  iv  v                [1, 6, 4, 5]
    punk     I  V   vi  IV               [1, 5, 6, 4]
    grunge   I  IV  I   V                [1, 4, 1, 5]
    djent    i  ii  VI  v                [1, 2, 6, 5]

`metal_reference` is the metal skeleton with a different amp voicing, so it
reuses the metal table instead of carrying a copy.

Scales
------

Degree d (1-7) maps to a semitone offset above the key:

    major           0  2  4  5  7  9 11
    natural minor   0  2  3  5  7  8 10

Metal, metal_reference, djent and grunge are minor-keyed; everything else
uses the major table.

The offset wraps within the octave before the octave is applied, so every
root lands in the configured octave. In A minor at octave 2, degree 6 is F2
(41), below the tonic A2 (45), not F3.

Events
------

One event per bar. The degree loop restarts when it runs out, so a
four-chord style rendered over six bars plays degrees 1 6 4 5 1 6.
*/

use crate::theory::pitch::PitchClass;

pub const MAJOR_SCALE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
pub const NATURAL_MINOR_SCALE: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Root, fifth, octave.
pub const POWER_CHORD_INTERVALS: [u8; 3] = [0, 7, 12];

pub const DEFAULT_VELOCITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Rock,
    Blues,
    Metal,
    MetalReference,
    Punk,
    Grunge,
    Djent,
}

impl Style {
    /// Scale degrees, one per bar, looped.
    pub fn progression(self) -> &'static [u8] {
        match self {
            Style::Rock => &[1, 4, 5, 1],
            Style::Blues => &[1, 1, 4, 4, 1, 1, 5, 4, 1, 5],
            Style::Metal | Style::MetalReference => &[1, 6, 4, 5],
            Style::Punk => &[1, 5, 6, 4],
            Style::Grunge => &[1, 4, 1, 5],
            Style::Djent => &[1, 2, 6, 5],
        }
    }

    pub fn is_minor(self) -> bool {
        matches!(
            self,
            Style::Metal | Style::MetalReference | Style::Djent | Style::Grunge
        )
    }

    pub fn scale(self) -> &'static [u8; 7] {
        if self.is_minor() {
            &NATURAL_MINOR_SCALE
        } else {
            &MAJOR_SCALE
        }
    }

    /// Strokes per chord in the guitar part.
    pub fn subdivisions(self) -> usize {
        match self {
            Style::Metal | Style::Djent | Style::Punk => 8,
            _ => 4,
        }
    }
}

/// One chord of the progression, in time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChordEvent {
    /// MIDI note number of the chord root.
    pub root: u8,
    pub duration_beats: u32,
    pub velocity: u8,
}

/// Pitch class of scale `degree` (1-based, wraps past 7) in `key`.
pub fn scale_degree(key: PitchClass, degree: u8, scale: &[u8; 7]) -> PitchClass {
    let index = (degree.max(1) - 1) as usize % scale.len();
    key.transpose(scale[index])
}

/// Chord roots for `bars` bars of `style` in `key`, one event per bar.
pub fn generate(
    key: PitchClass,
    octave: u8,
    style: Style,
    bars: u32,
    beats_per_bar: u32,
) -> Vec<ChordEvent> {
    let degrees = style.progression();
    let scale = style.scale();

    (0..bars as usize)
        .map(|bar| {
            let degree = degrees[bar % degrees.len()];
            ChordEvent {
                root: scale_degree(key, degree, scale).midi_note(octave),
                duration_beats: beats_per_bar,
                velocity: DEFAULT_VELOCITY,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_in_e_is_one_four_five_one() {
        let events = generate(PitchClass::E, 2, Style::Rock, 4, 4);
        let roots: Vec<u8> = events.iter().map(|e| e.root).collect();
        // E2, A2, B2, E2
        assert_eq!(roots, vec![40, 45, 47, 40]);
        assert!(events.iter().all(|e| e.duration_beats == 4));
        assert!(events.iter().all(|e| e.velocity == DEFAULT_VELOCITY));
    }

    #[test]
    fn test_metal_in_a_is_minor() {
        let events = generate(PitchClass::A, 2, Style::Metal, 2, 4);
        let roots: Vec<u8> = events.iter().map(|e| e.root).collect();
        // A2, F2 (degree six of A natural minor, same octave)
        assert_eq!(roots, vec![45, 41]);
    }

    #[test]
    fn test_reference_variant_shares_metal_table() {
        assert_eq!(
            Style::MetalReference.progression(),
            Style::Metal.progression()
        );
        assert_eq!(
            generate(PitchClass::D, 2, Style::MetalReference, 8, 4),
            generate(PitchClass::D, 2, Style::Metal, 8, 4)
        );
    }

    #[test]
    fn test_progression_loops() {
        let events = generate(PitchClass::E, 2, Style::Rock, 6, 3);
        let roots: Vec<u8> = events.iter().map(|e| e.root).collect();
        assert_eq!(roots, vec![40, 45, 47, 40, 40, 45]);
        let beats: u32 = events.iter().map(|e| e.duration_beats).sum();
        assert_eq!(beats, 18);
    }

    #[test]
    fn test_blues_is_major() {
        let events = generate(PitchClass::A, 2, Style::Blues, 10, 4);
        let roots: Vec<u8> = events.iter().map(|e| e.root).collect();
        // A2 A2 D2 D2 A2 A2 E2 D2 A2 E2
        assert_eq!(roots, vec![45, 45, 38, 38, 45, 45, 40, 38, 45, 40]);
    }

    #[test]
    fn test_scale_degree_wraps_past_seven() {
        assert_eq!(
            scale_degree(PitchClass::C, 8, &MAJOR_SCALE),
            PitchClass::C
        );
        assert_eq!(
            scale_degree(PitchClass::C, 3, &NATURAL_MINOR_SCALE),
            PitchClass::Ds
        );
    }

    #[test]
    fn test_subdivisions() {
        assert_eq!(Style::Metal.subdivisions(), 8);
        assert_eq!(Style::Djent.subdivisions(), 8);
        assert_eq!(Style::Punk.subdivisions(), 8);
        assert_eq!(Style::Rock.subdivisions(), 4);
        assert_eq!(Style::MetalReference.subdivisions(), 4);
    }

    #[test]
    fn test_zero_bars_is_empty() {
        assert!(generate(PitchClass::E, 2, Style::Rock, 0, 4).is_empty());
    }
}
