//! Op-amp gain stages: inverting, non-inverting, summing and difference.
//!
//! All four use the ideal closed-loop gain and clip the result to the
//! ±[`RAIL_VOLTAGE`](crate::RAIL_VOLTAGE) supply rails. The input is a sine
//! swept over one display window, `θ = 2π·f·t` with `t ∈ [0, 1)`.

use std::f64::consts::PI;

use super::{clip_to_rails, SamplePoint, SampleSequence};
use crate::circuit::ParameterSet;

/// Frequency used by the summing amplifier when none is configured.
const SUMMING_FALLBACK_FREQ: f64 = 1.0;
/// Frequency used by the difference amplifier when none is configured.
const DIFFERENCE_FALLBACK_FREQ: f64 = 2.0;

/// `Vout = -Vin·sin(θ)·(Rf/Rin)`
pub fn inverting_opamp(params: &ParameterSet) -> SampleSequence {
    let gain = -(params.get("rf") / params.get("rin"));
    sine_gain_stage(params.get("vin"), params.get("freq"), gain)
}

/// `Vout = Vin·sin(θ)·(1 + R2/R1)`
pub fn non_inverting_opamp(params: &ParameterSet) -> SampleSequence {
    let gain = 1.0 + params.get("r2") / params.get("r1");
    sine_gain_stage(params.get("vin"), params.get("freq"), gain)
}

fn sine_gain_stage(amplitude: f64, freq: f64, gain: f64) -> SampleSequence {
    SampleSequence::from_fn(|i, t| {
        let vin = amplitude * (2.0 * PI * freq * t).sin();
        SamplePoint::new(i, vin, clip_to_rails(vin * gain))
    })
}

/// `Vout = -Rf·(V1/R1 + V2/R2)` with V1 a sine and V2 a DC level.
///
/// Resistances are in kΩ; the units cancel.
pub fn summing_amplifier(params: &ParameterSet) -> SampleSequence {
    let freq = params.get_nonzero_or("freq", SUMMING_FALLBACK_FREQ);
    let (a1, v2) = (params.get("v1"), params.get("v2"));
    let (r1, r2, rf) = (params.get("r1"), params.get("r2"), params.get("rf"));

    SampleSequence::from_fn(|i, t| {
        let v1 = a1 * (2.0 * PI * freq * t).sin();
        let vout = -rf * (v1 / r1 + v2 / r2);
        SamplePoint::new(i, v1, clip_to_rails(vout)).with_input2(v2)
    })
}

/// `Vout = (R2/R1)·(V2 − V1)` with V1 a sine and V2 a DC level.
///
/// Assumes matched pairs R1 = R3 and R2 = R4.
pub fn difference_amplifier(params: &ParameterSet) -> SampleSequence {
    let freq = params.get_nonzero_or("freq", DIFFERENCE_FALLBACK_FREQ);
    let gain = params.get("r2") / params.get("r1");
    let (a1, v2) = (params.get("v1"), params.get("v2"));

    SampleSequence::from_fn(|i, t| {
        let v1 = a1 * (2.0 * PI * freq * t).sin();
        SamplePoint::new(i, v1, clip_to_rails(gain * (v2 - v1))).with_input2(v2)
    })
}
