/*
Guitar Chord Renderer
=====================

Every chord event is cut into equal strokes (8 per bar for the driving
styles, 4 otherwise). Each stroke is a palm-muted power chord built from
three layers per chord tone:

    string      Karplus-Strong pluck, decay 0.95, articulation brightness
    body        additive partials (GUITAR_PARTIALS) + a 300 Hz warmth sine
    pick        noise burst shaped by the attack profile

    tone  = (0.3 · string + 0.4 · body + 0.3 · pick) · envelope · level
    chunk = Σ 0.4 · tone          over root, fifth, octave

then runs through two tanh stages (pre-amp overdrive) and gets a short
damped 90 Hz "chug" added at its onset:

    chunk = tanh(1.3 · 1.2 · tanh(2.8 · chunk))
    chunk[i] += 0.5 · sin(2π · 90 · t) · e^(-150 t)      t < 8 ms

Timing
------

    chord_samples = duration_beats · beat_samples
    stroke_slot   = chord_samples / strokes                 (integer)
    stroke_len    = ⌊stroke_slot · rhythm[sub]⌋, or stroke_slot if < 100

Strokes are written over the output starting at `sub · stroke_slot`. A
stroke longer than its slot runs into the next one until that stroke
overwrites it; anything past the end of the render is dropped. Samples no
stroke reaches (integer rounding at the end of a bar) stay silent.

`level` is the accent multiplier times velocity / 100.
*/

use tracing::debug;

use crate::config::{RenderSettings, SeedStream};
use crate::dsp::distortion::tanh_clip_buffer;
use crate::dsp::envelope::{ArticulationEnvelope, AttackTransient};
use crate::dsp::karplus::KarplusStrong;
use crate::dsp::mix;
use crate::dsp::oscillator::{harmonic_series, sine, NoiseSource, GUITAR_PARTIALS};
use crate::render::patterns::{AccentPattern, ArticulationProfile, AttackProfile, RhythmPattern};
use crate::theory::progression::DEFAULT_VELOCITY;
use crate::theory::{midi_to_freq, ChordEvent, POWER_CHORD_INTERVALS};

/// Strokes shorter than this fall back to the unscaled slot length.
pub const MIN_STROKE_SAMPLES: usize = 100;

pub const STRING_DECAY: f32 = 0.95;
const NOTE_ATTACK_SECS: f32 = 0.001;

const WARMTH_HZ: f32 = 300.0;
const WARMTH_LEVEL: f32 = 0.15;

const STRING_MIX: f32 = 0.3;
const BODY_MIX: f32 = 0.4;
const PICK_MIX: f32 = 0.3;
const TONE_GAIN: f32 = 0.4;

const CHUG_HZ: f32 = 90.0;
const CHUG_SECS: f32 = 0.008;
const CHUG_LEVEL: f32 = 0.5;
const CHUG_DAMPING: f32 = 150.0;

/// Amp hiss standard deviation.
pub const HISS_SIGMA: f32 = 0.005;
/// Peak of the finished raw guitar track.
pub const RAW_PEAK: f32 = 0.95;

pub struct ChordRenderer {
    sample_rate: f32,
    strokes: usize,
    rhythm: RhythmPattern,
    accent: AccentPattern,
    articulation: ArticulationProfile,
    attack: AttackProfile,
    string: KarplusStrong,
    noise: NoiseSource,
    chunk: Vec<f32>,
    pluck: Vec<f32>,
}

impl ChordRenderer {
    pub fn new(settings: &RenderSettings, sample_rate: f32) -> Self {
        let articulation = settings.articulation.profile();
        Self {
            sample_rate,
            strokes: settings.style.subdivisions(),
            rhythm: settings.rhythm,
            accent: settings.accent,
            articulation,
            attack: settings.attack.profile(),
            string: KarplusStrong::new(sample_rate, STRING_DECAY, articulation.brightness),
            noise: NoiseSource::new(settings.stream_seed(SeedStream::Guitar)),
            chunk: Vec::new(),
            pluck: Vec::new(),
        }
    }

    /// Length in samples of stroke `sub` within a slot of `slot` samples.
    pub fn stroke_len(&self, slot: usize, sub: usize) -> usize {
        let scaled = (slot as f32 * self.rhythm.at(sub)) as usize;
        if scaled < MIN_STROKE_SAMPLES {
            slot
        } else {
            scaled
        }
    }

    /// Render all `events` back to back into a buffer of `total_samples`.
    pub fn render(&mut self, events: &[ChordEvent], beat_samples: usize, total_samples: usize) -> Vec<f32> {
        let mut out = vec![0.0; total_samples];
        let mut cursor = 0;
        for event in events {
            let chord_samples = event.duration_beats as usize * beat_samples;
            self.render_event(event, cursor, chord_samples, &mut out);
            cursor += chord_samples;
        }
        debug!(
            events = events.len(),
            samples = out.len(),
            peak = mix::peak(&out),
            "rendered guitar chords"
        );
        out
    }

    fn render_event(&mut self, event: &ChordEvent, start: usize, chord_samples: usize, out: &mut [f32]) {
        let slot = chord_samples / self.strokes;
        if slot == 0 {
            return;
        }
        let velocity = event.velocity as f32 / DEFAULT_VELOCITY as f32;

        for sub in 0..self.strokes {
            let begin = start + sub * slot;
            if begin >= out.len() {
                break;
            }
            let len = self.stroke_len(slot, sub);
            self.render_stroke(event.root, len, self.accent.at(sub) * velocity);

            let end = (begin + len).min(out.len());
            out[begin..end].copy_from_slice(&self.chunk[..end - begin]);
        }
    }

    /// Fill `self.chunk` with one power-chord stroke of `len` samples.
    fn render_stroke(&mut self, root: u8, len: usize, level: f32) {
        let sr = self.sample_rate;
        self.chunk.clear();
        self.chunk.resize(len, 0.0);
        self.pluck.resize(len, 0.0);

        let envelope = ArticulationEnvelope::new(
            len,
            sr,
            NOTE_ATTACK_SECS,
            self.articulation.decay_rate,
            self.articulation.gate_point,
        );
        let pick = AttackTransient::new(
            self.attack.duration_secs,
            self.attack.amplitude,
            self.attack.decay_exp,
            sr,
            len,
        );

        for interval in POWER_CHORD_INTERVALS {
            let freq = midi_to_freq(root as f32 + interval as f32);
            self.string.pluck_into(freq, &mut self.pluck, &mut self.noise);

            for (i, sample) in self.chunk.iter_mut().enumerate() {
                let t = i as f32 / sr;
                let body = harmonic_series(freq, &GUITAR_PARTIALS, t, sr) + sine(WARMTH_HZ, t) * WARMTH_LEVEL;
                let attack = if i < pick.samples() {
                    self.noise.uniform() * pick.level(i)
                } else {
                    0.0
                };
                let tone = (self.pluck[i] * STRING_MIX + body * BODY_MIX + attack * PICK_MIX)
                    * envelope.level(i)
                    * level;
                *sample += tone * TONE_GAIN;
            }
        }

        tanh_clip_buffer(&mut self.chunk, 2.8, 1.2);
        tanh_clip_buffer(&mut self.chunk, 1.3, 1.0);

        let chug_len = ((CHUG_SECS * sr) as usize).min(len);
        for (i, sample) in self.chunk[..chug_len].iter_mut().enumerate() {
            let t = i as f32 / sr;
            *sample += sine(CHUG_HZ, t) * CHUG_LEVEL * (-t * CHUG_DAMPING).exp();
        }
    }
}

/// Add a Gaussian hiss floor and normalize the raw guitar track.
pub fn finish_raw(buffer: &mut [f32], settings: &RenderSettings) {
    let mut hiss = NoiseSource::new(settings.stream_seed(SeedStream::Hiss));
    for sample in buffer.iter_mut() {
        *sample += hiss.gaussian(HISS_SIGMA);
    }
    mix::normalize(buffer, RAW_PEAK);
}
