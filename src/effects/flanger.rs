use crate::dsp::delay::DelayLine;
use crate::dsp::lfo::{bipolar_to_unipolar, SineLfo};
use crate::effects::Effect;

/*
Flanger
=======

The jet-sweep cousin of the phaser: a very short delay (0 to ~5.6 ms) moved
by a slow unipolar LFO and summed with the dry signal at half level. There
is no feedback path.

    lfo(i)   = (sin(2π · 0.3 Hz · t) + 1) / 2 · depth        0 ..= 0.8
    delay(i) = ⌊lfo(i) · ⌊0.007 · sample_rate⌋⌋
    out(i)   = 0.8 · (x(i) + 0.5 · x(i - delay))

When the line has no history at that delay, `out(i) = 0.8 · x(i)`.
*/

pub const FLANGER_RATE_HZ: f32 = 0.3;
pub const FLANGER_DEPTH: f32 = 0.8;
pub const FLANGER_MAX_DELAY_SECS: f32 = 0.007;
const FEEDFORWARD: f32 = 0.5;
const OUTPUT_GAIN: f32 = 0.8;

pub struct Flanger {
    lfo: SineLfo,
    depth: f32,
    max_delay: usize,
    line: DelayLine,
    position: usize,
}

impl Flanger {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            lfo: SineLfo::new(FLANGER_RATE_HZ, sample_rate),
            depth: FLANGER_DEPTH,
            max_delay: (FLANGER_MAX_DELAY_SECS * sample_rate) as usize,
            line: DelayLine::new(),
            position: 0,
        }
    }

    #[inline]
    pub fn delay_at(&self, index: usize) -> usize {
        let sweep = bipolar_to_unipolar(self.lfo.value_at(index)) * self.depth;
        (sweep * self.max_delay as f32) as usize
    }
}

impl Effect for Flanger {
    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let delay = self.delay_at(self.position);
            let dry = *sample;
            self.line.write(dry);
            let mixed = if self.line.has_history(delay) {
                dry + self.line.tap(delay) * FEEDFORWARD
            } else {
                dry
            };
            *sample = mixed * OUTPUT_GAIN;
            self.position += 1;
        }
    }

    fn reset(&mut self) {
        self.line.reset();
        self.position = 0;
    }
}
