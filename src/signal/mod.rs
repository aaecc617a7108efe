//! Signal model: closed-form waveform generation for each topology.
//!
//! Every generator maps a [`ParameterSet`] to exactly [`SAMPLE_COUNT`]
//! points. Generators are pure and total. Out-of-range or missing
//! parameters produce non-finite samples rather than errors, so callers that
//! render should go through [`SampleSequence::finite_points`] or
//! [`SamplePoint::is_finite`].
//!
//! ## Time base
//!
//! The sample index `i` is mapped to a generator-local time
//! `t = scale * i / SAMPLE_COUNT`. The scale is 1 for most circuits, 0.3 for
//! the RC low-pass, 0.5 for the band-pass and 2 ms for the Wien bridge
//! oscillator. Only the index is exposed.

mod amplifiers;
mod divider;
mod filters;
mod oscillator;
mod photo;

pub use amplifiers::{difference_amplifier, inverting_opamp, non_inverting_opamp, summing_amplifier};
pub use divider::voltage_divider;
pub use filters::{
    band_pass_filter, band_pass_response, low_pass_filter, low_pass_response,
    rc_center_frequency, FrequencyResponse, BAND_PASS_Q,
};
pub use oscillator::{wien_bridge, wien_frequency};
pub use photo::{photodiode_sensor, transimpedance_amplifier, PHOTO_SENSITIVITY};

use serde::Serialize;

use crate::circuit::{CircuitType, ParameterSet};
use crate::{RAIL_VOLTAGE, SAMPLE_COUNT};

/// One point of the oscilloscope trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    /// Sample index in `0..SAMPLE_COUNT`
    pub time: usize,
    pub input: f64,
    pub output: f64,
    /// Second input trace (summing and difference amplifiers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input2: Option<f64>,
}

impl SamplePoint {
    /// Create a single-input sample.
    pub fn new(time: usize, input: f64, output: f64) -> Self {
        Self {
            time,
            input,
            output,
            input2: None,
        }
    }

    /// Attach a second input value.
    pub fn with_input2(mut self, input2: f64) -> Self {
        self.input2 = Some(input2);
        self
    }

    /// True when every value in the point can be plotted.
    pub fn is_finite(&self) -> bool {
        self.input.is_finite()
            && self.output.is_finite()
            && self.input2.map_or(true, f64::is_finite)
    }
}

/// A full trace of [`SAMPLE_COUNT`] points.
///
/// Values are kept exactly as computed, including NaN and infinities from
/// degenerate parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SampleSequence {
    points: Vec<SamplePoint>,
}

impl SampleSequence {
    /// Build a sequence by evaluating `f(i, t)` for every index, where
    /// `t = i / SAMPLE_COUNT` lies in `[0, 1)`.
    pub fn from_fn(mut f: impl FnMut(usize, f64) -> SamplePoint) -> Self {
        let points = (0..SAMPLE_COUNT)
            .map(|i| f(i, i as f64 / SAMPLE_COUNT as f64))
            .collect();
        Self { points }
    }

    /// All points, in time order.
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    /// Points safe to hand to a renderer.
    pub fn finite_points(&self) -> impl Iterator<Item = &SamplePoint> {
        self.points.iter().filter(|p| p.is_finite())
    }

    /// Number of points holding at least one non-finite value.
    pub fn non_finite_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_finite()).count()
    }

    /// Whether any point carries a second input.
    pub fn has_input2(&self) -> bool {
        self.points.iter().any(|p| p.input2.is_some())
    }

    /// Largest finite |output|, or `None` if no output is finite.
    pub fn peak_output(&self) -> Option<f64> {
        finite_max(self.points.iter().map(|p| p.output.abs()))
    }

    /// Largest finite |input|, or `None` if no input is finite.
    pub fn peak_input(&self) -> Option<f64> {
        finite_max(self.points.iter().map(|p| p.input.abs()))
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn finite_max(values: impl Iterator<Item = f64>) -> Option<f64> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

/// Generate the trace for `circuit` from `params`.
pub fn generate(circuit: CircuitType, params: &ParameterSet) -> SampleSequence {
    match circuit {
        CircuitType::VoltageDivider => voltage_divider(params),
        CircuitType::InvertingOpAmp => inverting_opamp(params),
        CircuitType::NonInvertingOpAmp => non_inverting_opamp(params),
        CircuitType::LowPassFilter => low_pass_filter(params),
        CircuitType::SummingAmplifier => summing_amplifier(params),
        CircuitType::DifferenceAmplifier => difference_amplifier(params),
        CircuitType::PhotodiodeSensor => photodiode_sensor(params),
        CircuitType::TransimpedanceAmplifier => transimpedance_amplifier(params),
        CircuitType::BandPassFilter => band_pass_filter(params),
        CircuitType::SignalGenerator => wien_bridge(params),
    }
}

/// Hard-limit an amplifier output to the supply rails.
///
/// Written with ordered comparisons so NaN passes through untouched; only
/// finite overshoot and infinities are pulled onto a rail.
pub(crate) fn clip_to_rails(v: f64) -> f64 {
    if v > RAIL_VOLTAGE {
        RAIL_VOLTAGE
    } else if v < -RAIL_VOLTAGE {
        -RAIL_VOLTAGE
    } else {
        v
    }
}
