use std::f32::consts::TAU;

use crate::dsp::delay::DelayLine;
use crate::dsp::lfo::SineLfo;
use crate::effects::Effect;

/*
Chorus
======

Three delayed copies of the input, each read through its own LFO, are laid
over the dry signal. The LFOs share one rate but start a third of a cycle
apart, so the voices never line up and the ensemble keeps moving.

    lfo_v(i)   = depth · sin(2π · 1.5 Hz · t + v · 2π/3)      v = 0, 1, 2
    delay_v(i) = ⌊(lfo_v(i) + 0.5) · 0.02 · sample_rate⌋       ~4 ms .. ~16 ms
    out(i)     = 0.7 · (x(i) + Σ_v 0.2 · x(i - delay_v(i)))

All voices tap the same delay line. A voice with no history yet reads the
dry sample. The 0.7 output gain keeps the summed voices (up to 1.6 × dry)
from piling up level.
*/

pub const CHORUS_RATE_HZ: f32 = 1.5;
pub const CHORUS_DEPTH: f32 = 0.3;
pub const CHORUS_VOICES: usize = 3;
/// Window the voice delays are spread across.
const SPREAD_SECS: f32 = 0.02;
const VOICE_GAIN: f32 = 0.2;
const OUTPUT_GAIN: f32 = 0.7;

pub struct Chorus {
    voices: [SineLfo; CHORUS_VOICES],
    depth: f32,
    spread: f32,
    line: DelayLine,
    position: usize,
}

impl Chorus {
    pub fn new(sample_rate: f32) -> Self {
        let voice = |v: usize| {
            SineLfo::new(CHORUS_RATE_HZ, sample_rate).with_phase(v as f32 * TAU / CHORUS_VOICES as f32)
        };
        Self {
            voices: [voice(0), voice(1), voice(2)],
            depth: CHORUS_DEPTH,
            spread: SPREAD_SECS * sample_rate,
            line: DelayLine::new(),
            position: 0,
        }
    }

    /// Delay of `voice` at absolute position `index`.
    #[inline]
    pub fn voice_delay_at(&self, voice: usize, index: usize) -> usize {
        let lfo = self.voices[voice].value_at(index) * self.depth;
        ((lfo + 0.5) * self.spread) as usize
    }
}

impl Effect for Chorus {
    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let dry = *sample;
            self.line.write(dry);

            let mut sum = dry;
            for voice in 0..CHORUS_VOICES {
                let delay = self.voice_delay_at(voice, self.position);
                let delayed = if self.line.has_history(delay) {
                    self.line.tap(delay)
                } else {
                    dry
                };
                sum += delayed * VOICE_GAIN;
            }

            *sample = sum * OUTPUT_GAIN;
            self.position += 1;
        }
    }

    fn reset(&mut self) {
        self.line.reset();
        self.position = 0;
    }
}
