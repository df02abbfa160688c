use crate::dsp::delay::DelayLine;
use crate::dsp::lfo::SineLfo;
use crate::dsp::mix::blend_dry_wet;
use crate::effects::Effect;

/*
Phaser
======

A slowly swept short delay blended under the dry signal. The delay moves
between roughly 15 and 85 samples, so the comb-filter notches it creates
glide up and down the spectrum:

    delay(i) = ⌊(lfo(i) · depth + 1) · 50⌋        lfo = sin(2π · 0.5 Hz · t)
    out(i)   = 0.7 · x(i) + 0.3 · x(i - delay)

Before the line holds `delay` samples of history the dry sample stands in
for the delayed one, so the first few milliseconds pass unchanged.
*/

pub const PHASER_RATE_HZ: f32 = 0.5;
pub const PHASER_DEPTH: f32 = 0.7;
/// Delay at LFO zero, in samples. Also the half-range of the sweep.
const CENTER_DELAY: f32 = 50.0;
/// Share of the delayed copy in the output.
const WET: f32 = 0.3;

pub struct Phaser {
    lfo: SineLfo,
    depth: f32,
    line: DelayLine,
    position: usize,
}

impl Phaser {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            lfo: SineLfo::new(PHASER_RATE_HZ, sample_rate),
            depth: PHASER_DEPTH,
            line: DelayLine::new(),
            position: 0,
        }
    }

    /// Delay in samples at absolute position `index`.
    #[inline]
    pub fn delay_at(&self, index: usize) -> usize {
        ((self.lfo.value_at(index) * self.depth + 1.0) * CENTER_DELAY) as usize
    }
}

impl Effect for Phaser {
    fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let delay = self.delay_at(self.position);
            let dry = *sample;
            self.line.write(dry);
            let phased = if self.line.has_history(delay) {
                self.line.tap(delay)
            } else {
                dry
            };
            *sample = blend_dry_wet(dry, phased, WET);
            self.position += 1;
        }
    }

    fn reset(&mut self) {
        self.line.reset();
        self.position = 0;
    }
}
