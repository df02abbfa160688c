//! Chord events expanded into note-level data for MIDI and tablature
//! writers. File encodings are left to the consumer.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::theory::pitch::E2;
use crate::theory::{ChordEvent, POWER_CHORD_INTERVALS};

/// General MIDI program: Distortion Guitar (0-based).
pub const GM_DISTORTION_GUITAR: u8 = 30;
/// Highest fret on the tablature neck.
pub const MAX_FRET: u8 = 24;

/// Standard tuning, string 1 (high E4) to string 6 (low E2).
pub const STANDARD_TUNING: [u8; 6] = [64, 59, 55, 50, 45, 40];

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NoteEvent {
    pub note: u8,
    pub start_beat: f32,
    pub duration_beats: f32,
    pub velocity: u8,
}

/// Single-track MIDI performance of the progression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MidiPerformance {
    pub tempo_bpm: u32,
    pub program: u8,
    pub notes: Vec<NoteEvent>,
}

impl MidiPerformance {
    /// Root, fifth and octave of every chord, back to back.
    pub fn from_events(events: &[ChordEvent], tempo_bpm: u32) -> Self {
        let mut notes = Vec::with_capacity(events.len() * POWER_CHORD_INTERVALS.len());
        let mut beat = 0.0;
        for event in events {
            for interval in POWER_CHORD_INTERVALS {
                notes.push(NoteEvent {
                    note: event.root.saturating_add(interval),
                    start_beat: beat,
                    duration_beats: event.duration_beats as f32,
                    velocity: event.velocity,
                });
            }
            beat += event.duration_beats as f32;
        }
        Self {
            tempo_bpm,
            program: GM_DISTORTION_GUITAR,
            notes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TabNote {
    /// 1 = high E, 6 = low E.
    pub string: u8,
    pub fret: u8,
}

/// One whole-bar power chord. Empty when the root is off the neck.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TabMeasure {
    pub number: u32,
    pub beats_per_bar: u32,
    pub beat_unit: u32,
    pub notes: Vec<TabNote>,
}

/// Power-chord shape on the low strings: root on string 6, fifth and octave
/// two frets up on strings 5 and 4. `None` when the root is below E2 or past
/// the 24th fret.
pub fn power_chord_shape(root: u8) -> Option<[TabNote; 3]> {
    let fret = root.checked_sub(E2).filter(|&f| f <= MAX_FRET)?;
    Some([
        TabNote { string: 6, fret },
        TabNote {
            string: 5,
            fret: fret + 2,
        },
        TabNote {
            string: 4,
            fret: fret + 2,
        },
    ])
}

/// One measure per chord event, in quarter-note time.
pub fn tablature(events: &[ChordEvent], beats_per_bar: u32) -> Vec<TabMeasure> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| TabMeasure {
            number: i as u32 + 1,
            beats_per_bar,
            beat_unit: 4,
            notes: power_chord_shape(event.root)
                .map(|shape| shape.to_vec())
                .unwrap_or_default(),
        })
        .collect()
}
