//! Frequency-selective circuits: passive RC low-pass and active band-pass.

use std::f64::consts::PI;

use super::{SamplePoint, SampleSequence};
use crate::circuit::ParameterSet;

/// Quality factor of the band-pass model.
pub const BAND_PASS_Q: f64 = 1.0;

/// Fraction of a second shown in the low-pass window.
const LOW_PASS_WINDOW: f64 = 0.3;
/// Fraction of a second shown in the band-pass window.
const BAND_PASS_WINDOW: f64 = 0.5;
/// Display frequency of the band-pass trace, independent of the input frequency.
const BAND_PASS_VISUAL_FREQ: f64 = 5.0;

/// Steady-state magnitude and phase (radians) of a transfer function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyResponse {
    pub gain: f64,
    pub phase: f64,
}

impl FrequencyResponse {
    /// Phase in degrees.
    pub fn phase_degrees(&self) -> f64 {
        self.phase.to_degrees()
    }
}

/// First-order RC low-pass response at `freq` Hz, with R in Ω and C in F.
pub fn low_pass_response(freq: f64, r_ohm: f64, c_farad: f64) -> FrequencyResponse {
    let wrc = 2.0 * PI * freq * r_ohm * c_farad;
    FrequencyResponse {
        gain: 1.0 / (1.0 + wrc * wrc).sqrt(),
        phase: -wrc.atan(),
    }
}

/// `f = 1 / (2π·R·C)`, the corner of an RC section. R in Ω, C in F.
pub fn rc_center_frequency(r_ohm: f64, c_farad: f64) -> f64 {
    1.0 / (2.0 * PI * r_ohm * c_farad)
}

/// Normalised second-order band-pass response.
///
/// With `x = f_in / f_center` the magnitude is `1/√(1 + (Q(x − 1/x))²)`
/// and the phase `−atan(Q(x − 1/x))`.
pub fn band_pass_response(f_in: f64, f_center: f64, q: f64) -> FrequencyResponse {
    let x = f_in / f_center;
    let detune = q * (x - 1.0 / x);
    FrequencyResponse {
        gain: 1.0 / (1.0 + detune * detune).sqrt(),
        phase: -detune.atan(),
    }
}

/// RC low-pass driven by a sine. C is given in µF.
pub fn low_pass_filter(params: &ParameterSet) -> SampleSequence {
    let amplitude = params.get("vin");
    let freq = params.get("freq");
    let response = low_pass_response(freq, params.get("r"), params.get("c") * 1e-6);

    SampleSequence::from_fn(|i, t| {
        let theta = 2.0 * PI * freq * (t * LOW_PASS_WINDOW);
        let vin = amplitude * theta.sin();
        let vout = amplitude * response.gain * (theta + response.phase).sin();
        SamplePoint::new(i, vin, vout)
    })
}

/// Active band-pass with R in kΩ and C in nF.
///
/// The input frequency only sets gain and phase; the trace is drawn at a
/// fixed visual frequency so the waveform stays legible across the range.
pub fn band_pass_filter(params: &ParameterSet) -> SampleSequence {
    let amplitude = params.get("vin");
    let f_center = rc_center_frequency(params.get("r") * 1e3, params.get("c") * 1e-9);
    let response = band_pass_response(params.get("freq"), f_center, BAND_PASS_Q);

    SampleSequence::from_fn(|i, t| {
        let theta = 2.0 * PI * BAND_PASS_VISUAL_FREQ * (t * BAND_PASS_WINDOW);
        let vin = amplitude * theta.sin();
        let vout = amplitude * response.gain * (theta + response.phase).sin();
        SamplePoint::new(i, vin, vout)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{defaults_for, CircuitType};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_low_pass_corner() {
        // 1k, 1µF: corner at ~159.15 Hz, -3 dB and -45°
        let fc = rc_center_frequency(1000.0, 1e-6);
        let r = low_pass_response(fc, 1000.0, 1e-6);
        assert_relative_eq!(r.gain, std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(r.phase_degrees(), -45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_low_pass_dc_limit() {
        let r = low_pass_response(0.0, 1000.0, 10e-6);
        assert_eq!(r.gain, 1.0);
        assert_eq!(r.phase, 0.0);
    }

    #[test]
    fn test_low_pass_trace_uses_response() {
        let params = defaults_for(CircuitType::LowPassFilter);
        let expected = low_pass_response(50.0, 1000.0, 10e-6);
        let seq = low_pass_filter(&params);
        // t = 0: vin = 0, vout = A·gain·sin(phase)
        assert_abs_diff_eq!(seq.points()[0].input, 0.0);
        assert_relative_eq!(
            seq.points()[0].output,
            2.0 * expected.gain * expected.phase.sin(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_band_pass_unity_at_center() {
        let r = band_pass_response(1000.0, 1000.0, BAND_PASS_Q);
        assert_relative_eq!(r.gain, 1.0);
        assert_abs_diff_eq!(r.phase, 0.0);
    }

    #[test]
    fn test_band_pass_symmetric_in_log_frequency() {
        let below = band_pass_response(500.0, 1000.0, 1.0);
        let above = band_pass_response(2000.0, 1000.0, 1.0);
        assert_relative_eq!(below.gain, above.gain, epsilon = 1e-12);
        assert!(below.phase > 0.0 && above.phase < 0.0);
    }

    #[test]
    fn test_band_pass_trace_at_center() {
        let mut params = defaults_for(CircuitType::BandPassFilter);
        let f0 = rc_center_frequency(1e3, 100e-9);
        params.set("freq", f0);
        let seq = band_pass_filter(&params);
        for p in &seq {
            assert_abs_diff_eq!(p.output, p.input, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(seq.peak_output().unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_band_pass_zero_capacitance_is_degenerate() {
        let mut params = defaults_for(CircuitType::BandPassFilter);
        params.set("c", 0.0);
        let seq = band_pass_filter(&params);
        assert_eq!(seq.len(), crate::SAMPLE_COUNT);
        // Infinite center frequency drives the gain to zero
        assert!(seq.iter().all(|p| p.output == 0.0));
    }
}
