use std::f32::consts::PI;

use thiserror::Error;

/*
State-Variable Filter Sections
==============================

Every filter in the amp and mix chains is built from one primitive: the
trapezoidal (TPT) state-variable filter. A single section produces every
response at once; the caller picks the tap it needs.

| type              | tap                  | passes          | rejects      |
| ----------------- | -------------------- | --------------- | ------------ |
| low-pass          | v2                   | below cutoff    | above cutoff |
| high-pass         | x - k·v1 - v2        | above cutoff    | below cutoff |
| band-pass         | v1                   | around cutoff   | far away     |
| peak (resonator)  | k·v1                 | around cutoff   | far away     |

`k` is the damping term, `k = 1 / Q`. The plain band-pass tap has a gain of
1/k at the centre frequency; the peak tap rescales it to exactly unity, which
is what a "resonant peak" in an amp voicing wants: a narrow band lifted out
of the signal without a level jump.


Cascades
--------

Higher orders come from chaining second-order sections. A Butterworth
response of order 2n uses n sections whose Q values are spread around the
unit circle:

    order 2:  Q = 0.7071
    order 4:  Q = 0.5412, 1.3066

A band between two frequencies is a high-pass at the lower edge in series
with a low-pass at the upper edge (LPF ∘ HPF).


Zero-Phase Filtering
--------------------

Offline rendering can run a filter forward, reverse the buffer, and run it
again. Phase shifts from the two passes cancel, so transients stay aligned
with the dry signal and the magnitude response is squared (twice the slope).


Design Limits
-------------

The prewarp `g = tan(π · fc / fs)` diverges at Nyquist. Cutoffs at or above
fs / 2 are rejected at design time rather than producing an unstable
section.
*/

/// Q of a second-order Butterworth section.
pub const BUTTERWORTH_Q: f32 = std::f32::consts::FRAC_1_SQRT_2;

const FOURTH_ORDER_QS: [f32; 2] = [0.541_196_1, 1.306_563];

/// Why a filter could not be designed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterSpecError {
    #[error("cutoff {cutoff_hz} Hz is outside (0, {nyquist_hz}) Hz")]
    CutoffOutOfRange { cutoff_hz: f32, nyquist_hz: f32 },

    #[error("Q {q} must be positive and finite")]
    InvalidQ { q: f32 },

    #[error("band edges {low_hz} Hz..{high_hz} Hz are empty")]
    EmptyBand { low_hz: f32, high_hz: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
    Peak,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

#[derive(Debug, Clone)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    g: f32,
    k: f32,
    pub cutoff_hz: f32,
    pub q: f32,
    filter_type: FilterType,
}

fn check_cutoff(cutoff_hz: f32, sample_rate: f32) -> Result<(), FilterSpecError> {
    let nyquist_hz = sample_rate * 0.5;
    if !(cutoff_hz.is_finite() && cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
        return Err(FilterSpecError::CutoffOutOfRange {
            cutoff_hz,
            nyquist_hz,
        });
    }
    Ok(())
}

impl SVFilter {
    pub fn new(
        filter_type: FilterType,
        cutoff_hz: f32,
        q: f32,
        sample_rate: f32,
    ) -> Result<Self, FilterSpecError> {
        check_cutoff(cutoff_hz, sample_rate)?;
        if !(q.is_finite() && q > 0.0) {
            return Err(FilterSpecError::InvalidQ { q });
        }

        Ok(Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            g: (PI * cutoff_hz / sample_rate).tan(),
            k: 1.0 / q,
            cutoff_hz,
            q,
            filter_type,
        })
    }

    pub fn lowpass(cutoff_hz: f32, sample_rate: f32) -> Result<Self, FilterSpecError> {
        Self::new(FilterType::LowPass, cutoff_hz, BUTTERWORTH_Q, sample_rate)
    }

    pub fn highpass(cutoff_hz: f32, sample_rate: f32) -> Result<Self, FilterSpecError> {
        Self::new(FilterType::HighPass, cutoff_hz, BUTTERWORTH_Q, sample_rate)
    }

    /// Unity-gain resonator centred on `center_hz`.
    pub fn peak(center_hz: f32, q: f32, sample_rate: f32) -> Result<Self, FilterSpecError> {
        Self::new(FilterType::Peak, center_hz, q, sample_rate)
    }

    pub fn next_sample(&mut self, sample: f32) -> FilterOutputs {
        let (g, k) = (self.g, self.k);
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    #[inline]
    pub fn process(&mut self, sample: f32) -> f32 {
        let k = self.k;
        let outputs = self.next_sample(sample);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
            FilterType::Peak => outputs.bandpass * k,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

/// Slope of a Butterworth cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButterworthOrder {
    Second,
    Fourth,
}

impl ButterworthOrder {
    fn section_qs(self) -> &'static [f32] {
        match self {
            ButterworthOrder::Second => &[BUTTERWORTH_Q],
            ButterworthOrder::Fourth => &FOURTH_ORDER_QS,
        }
    }
}

/// Second-order sections run in series.
#[derive(Debug, Clone)]
pub struct FilterChain {
    sections: Vec<SVFilter>,
}

impl FilterChain {
    fn butterworth(
        filter_type: FilterType,
        cutoff_hz: f32,
        order: ButterworthOrder,
        sample_rate: f32,
    ) -> Result<Self, FilterSpecError> {
        let sections = order
            .section_qs()
            .iter()
            .map(|&q| SVFilter::new(filter_type, cutoff_hz, q, sample_rate))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sections })
    }

    pub fn butterworth_lowpass(
        cutoff_hz: f32,
        order: ButterworthOrder,
        sample_rate: f32,
    ) -> Result<Self, FilterSpecError> {
        Self::butterworth(FilterType::LowPass, cutoff_hz, order, sample_rate)
    }

    pub fn butterworth_highpass(
        cutoff_hz: f32,
        order: ButterworthOrder,
        sample_rate: f32,
    ) -> Result<Self, FilterSpecError> {
        Self::butterworth(FilterType::HighPass, cutoff_hz, order, sample_rate)
    }

    /// Second-order Butterworth high-pass at `low_hz` followed by a
    /// second-order Butterworth low-pass at `high_hz`.
    pub fn band(low_hz: f32, high_hz: f32, sample_rate: f32) -> Result<Self, FilterSpecError> {
        if low_hz >= high_hz {
            return Err(FilterSpecError::EmptyBand { low_hz, high_hz });
        }
        Ok(Self {
            sections: vec![
                SVFilter::highpass(low_hz, sample_rate)?,
                SVFilter::lowpass(high_hz, sample_rate)?,
            ],
        })
    }

    pub fn resonant_peak(center_hz: f32, q: f32, sample_rate: f32) -> Result<Self, FilterSpecError> {
        Ok(Self {
            sections: vec![SVFilter::peak(center_hz, q, sample_rate)?],
        })
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for section in self.sections.iter_mut() {
            section.render(buffer);
        }
    }

    /// Forward-backward pass. State is cleared before each direction, so
    /// repeated calls on the same chain are independent.
    pub fn filtfilt(&mut self, buffer: &mut [f32]) {
        self.reset();
        self.render(buffer);
        buffer.reverse();
        self.reset();
        self.render(buffer);
        buffer.reverse();
    }

    pub fn reset(&mut self) {
        for section in self.sections.iter_mut() {
            section.reset();
        }
    }
}
