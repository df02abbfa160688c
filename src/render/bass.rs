use tracing::debug;

use crate::config::{BassSettings, RenderSettings, SeedStream};
use crate::dsp::envelope::ArticulationEnvelope;
use crate::dsp::karplus::KarplusStrong;
use crate::dsp::mix;
use crate::dsp::oscillator::{sine, NoiseSource};
use crate::render::patterns::BassStyle;
use crate::theory::progression::DEFAULT_VELOCITY;
use crate::theory::{midi_to_freq, ChordEvent};

/*
Bass Line Renderer
==================

One note per subdivision of the bass style's velocity table, rooted
`octave_offset` octaves under the guitar chord. Zero-velocity steps are
rests. The fifth and octave styles swap in +7 / +12 semitones on their
off-steps.

Each note layers a long, dark Karplus-Strong pluck with a pure fundamental
and a sub-octave sine, under a slow envelope (5 ms attack, e^(-3t), no gate):

    note = (0.3 · string + 0.5 · 0.6 · sin(f) + 0.2 · 0.2 · sin(f/2)) · env · velocity

Notes are summed into the output at half level, so a note that outlasts its
step would overlap the next one instead of being cut. The finished line is
peak-normalized to 0.9.
*/

pub const STRING_DECAY: f32 = 0.998;
pub const STRING_BRIGHTNESS: f32 = 0.4;
const NOTE_ATTACK_SECS: f32 = 0.005;
const NOTE_DECAY_RATE: f32 = 3.0;

const STRING_MIX: f32 = 0.3;
const FUNDAMENTAL_LEVEL: f32 = 0.6;
const FUNDAMENTAL_MIX: f32 = 0.5;
const SUB_LEVEL: f32 = 0.2;
const SUB_MIX: f32 = 0.2;
const NOTE_GAIN: f32 = 0.5;

pub const BASS_PEAK: f32 = 0.9;

pub struct BassRenderer {
    sample_rate: f32,
    style: BassStyle,
    octave_offset: u8,
    string: KarplusStrong,
    noise: NoiseSource,
    pluck: Vec<f32>,
}

impl BassRenderer {
    pub fn new(settings: &RenderSettings, bass: &BassSettings, sample_rate: f32) -> Self {
        Self {
            sample_rate,
            style: bass.style,
            octave_offset: bass.octave_offset,
            string: KarplusStrong::new(sample_rate, STRING_DECAY, STRING_BRIGHTNESS),
            noise: NoiseSource::new(settings.stream_seed(SeedStream::Bass)),
            pluck: Vec::new(),
        }
    }

    /// MIDI note of the bass root under a guitar chord rooted at `guitar_root`.
    pub fn bass_root(&self, guitar_root: u8) -> u8 {
        guitar_root.saturating_sub(12 * self.octave_offset)
    }

    pub fn render(&mut self, events: &[ChordEvent], beat_samples: usize, total_samples: usize) -> Vec<f32> {
        let mut out = vec![0.0; total_samples];
        let velocities = self.style.velocities();
        let steps = velocities.len();
        let mut cursor = 0;

        for event in events {
            let chord_samples = event.duration_beats as usize * beat_samples;
            let step_len = chord_samples / steps;
            let root = self.bass_root(event.root);
            let event_level = event.velocity as f32 / DEFAULT_VELOCITY as f32;

            for (sub, &velocity) in velocities.iter().enumerate() {
                let begin = cursor + sub * step_len;
                if velocity <= 0.0 || step_len == 0 || begin >= out.len() {
                    continue;
                }
                let note = root.saturating_add(self.style.interval_at(sub));
                let end = (begin + step_len).min(out.len());
                self.render_note(note, step_len, velocity * event_level, &mut out[begin..end]);
            }
            cursor += chord_samples;
        }

        let gain = mix::normalize(&mut out, BASS_PEAK);
        debug!(events = events.len(), samples = out.len(), gain, "rendered bass line");
        out
    }

    /// Add one note of `len` samples into `out` (which may be shorter when
    /// the note runs past the end of the render).
    fn render_note(&mut self, note: u8, len: usize, level: f32, out: &mut [f32]) {
        let sr = self.sample_rate;
        let freq = midi_to_freq(note as f32);

        self.pluck.resize(len, 0.0);
        self.string.pluck_into(freq, &mut self.pluck, &mut self.noise);

        let envelope = ArticulationEnvelope::new(len, sr, NOTE_ATTACK_SECS, NOTE_DECAY_RATE, 1.0);

        for (i, sample) in out.iter_mut().enumerate() {
            let t = i as f32 / sr;
            let fundamental = sine(freq, t) * FUNDAMENTAL_LEVEL;
            let sub = sine(freq * 0.5, t) * SUB_LEVEL;
            let value = (self.pluck[i] * STRING_MIX + fundamental * FUNDAMENTAL_MIX + sub * SUB_MIX)
                * envelope.level(i)
                * level;
            *sample += value * NOTE_GAIN;
        }
    }
}
