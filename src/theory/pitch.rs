/*
Pitch Classes and Note Numbers
==============================

A pitch class is one of the twelve named notes with the octave stripped off.
Combined with an octave it becomes a MIDI note number:

    note_number = 12 * (octave + 1) + semitone

    semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

so E2 (the low string of a guitar in standard tuning) is 40, A2 is 45 and
A4, the tuning reference, is 69.

Equal Temperament
-----------------

Every semitone multiplies frequency by 2^(1/12); twelve of them double it.
Anchored at A4 = 440 Hz:

    f(note) = 440 · 2^((note - 69) / 12)

Names
-----

Sharps are canonical (`C#`). The common flats (`Db Eb Gb Ab Bb`) parse to
the same classes, and parsing ignores case, so `bb`, `Bb` and `A#` are all
the same pitch class.
*/

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// MIDI note number of the tuning reference.
pub const A4: u8 = 69;
/// Frequency of the tuning reference.
pub const A4_HZ: f32 = 440.0;
/// Lowest open string of a standard-tuned guitar.
pub const E2: u8 = 40;

pub const MAX_OCTAVE: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Semitones above C.
    pub fn semitone(self) -> u8 {
        self as u8
    }

    pub fn from_semitone(semitone: u8) -> Self {
        Self::ALL[(semitone % 12) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Move up by `semitones`, wrapping within the octave.
    pub fn transpose(self, semitones: u8) -> Self {
        Self::from_semitone(self.semitone() + semitones % 12)
    }

    /// MIDI note number of this class in `octave`.
    pub fn midi_note(self, octave: u8) -> u8 {
        (octave.min(MAX_OCTAVE) + 1) * 12 + self.semitone()
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        let class = match normalized.as_str() {
            "C" => PitchClass::C,
            "C#" | "DB" => PitchClass::Cs,
            "D" => PitchClass::D,
            "D#" | "EB" => PitchClass::Ds,
            "E" => PitchClass::E,
            "F" => PitchClass::F,
            "F#" | "GB" => PitchClass::Fs,
            "G" => PitchClass::G,
            "G#" | "AB" => PitchClass::Gs,
            "A" => PitchClass::A,
            "A#" | "BB" => PitchClass::As,
            "B" => PitchClass::B,
            _ => {
                return Err(RenderError::InvalidPitchClass {
                    name: s.to_string(),
                })
            }
        };
        Ok(class)
    }
}

/// Equal-temperament frequency of a (possibly fractional) MIDI note.
#[inline]
pub fn midi_to_freq(note: f32) -> f32 {
    A4_HZ * 2.0_f32.powf((note - A4 as f32) / 12.0)
}
