use crate::MAX_DELAY_SAMPLES;

/// Circular buffer of past samples.
///
/// Taps are counted backwards from the most recent write: `tap(0)` is the
/// sample just written, `tap(1)` the one before it. Unwritten history reads
/// as silence.
pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
    written: usize,
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayLine {
    pub fn new() -> Self {
        Self {
            buffer: vec![0.0; MAX_DELAY_SAMPLES],
            write_pos: 0,
            written: 0,
        }
    }

    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % MAX_DELAY_SAMPLES;
        self.written = self.written.saturating_add(1);
    }

    pub fn tap(&self, delay_samples: usize) -> f32 {
        let delay_samples = delay_samples.min(MAX_DELAY_SAMPLES - 1);
        let read_pos = (self.write_pos + 2 * MAX_DELAY_SAMPLES - 1 - delay_samples) % MAX_DELAY_SAMPLES;
        self.buffer[read_pos]
    }

    /// Whether `tap(delay_samples)` reaches a sample that was actually written.
    pub fn has_history(&self, delay_samples: usize) -> bool {
        delay_samples < self.written
    }

    /// Write `sample`, then return the sample from `delay_samples` ago.
    pub fn next_sample(&mut self, sample: f32, delay_samples: usize) -> f32 {
        self.write(sample);
        self.tap(delay_samples)
    }

    pub fn render(&mut self, buffer: &mut [f32], delay_samples: usize) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample, delay_samples);
        }
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
        self.written = 0;
    }
}
