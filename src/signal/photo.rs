//! Light sensing front ends: photodiode with load resistor, and TIA.
//!
//! Both share the same illumination model: the configured lux level wobbles
//! ±20% sinusoidally, two cycles per window, and the photodiode converts it
//! at a fixed sensitivity.

use std::f64::consts::PI;

use super::{SamplePoint, SampleSequence};
use crate::circuit::ParameterSet;
use crate::RAIL_VOLTAGE;

/// Photodiode sensitivity in µA per lux.
pub const PHOTO_SENSITIVITY: f64 = 0.5;

/// Relative depth of the illumination wobble.
const LUX_FLUCTUATION: f64 = 0.2;
/// Illumination wobble cycles per window.
const LUX_CYCLES: f64 = 2.0;
/// Divisors scaling lux onto the voltage axis of the scope.
const PHOTODIODE_DISPLAY_SCALE: f64 = 200.0;
const TIA_DISPLAY_SCALE: f64 = 100.0;

fn fluctuating_lux(lux: f64, t: f64) -> f64 {
    lux + lux * LUX_FLUCTUATION * (2.0 * PI * LUX_CYCLES * t).sin()
}

/// Photocurrent across a load resistor: `Vout = I·RL`, capped at `Vbias`.
///
/// µA·kΩ gives mV, hence the division by 1000.
pub fn photodiode_sensor(params: &ParameterSet) -> SampleSequence {
    let (lux, rl, vbias) = (params.get("lux"), params.get("rl"), params.get("vbias"));

    SampleSequence::from_fn(|i, t| {
        let lux_t = fluctuating_lux(lux, t);
        let i_photo_ua = lux_t * PHOTO_SENSITIVITY;
        let mut vout = i_photo_ua * rl / 1000.0;
        if vout > vbias {
            vout = vbias;
        }
        SamplePoint::new(i, lux_t / PHOTODIODE_DISPLAY_SCALE, vout)
    })
}

/// Transimpedance amplifier: `Vout = -I·Rf`, limited by the negative rail.
pub fn transimpedance_amplifier(params: &ParameterSet) -> SampleSequence {
    let (lux, rf) = (params.get("lux"), params.get("rf"));

    SampleSequence::from_fn(|i, t| {
        let lux_t = fluctuating_lux(lux, t);
        let i_photo_ua = lux_t * PHOTO_SENSITIVITY;
        let mut vout = -(i_photo_ua * rf) / 1000.0;
        if vout < -RAIL_VOLTAGE {
            vout = -RAIL_VOLTAGE;
        }
        SamplePoint::new(i, lux_t / TIA_DISPLAY_SCALE, vout)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{defaults_for, CircuitType};
    use approx::assert_relative_eq;

    #[test]
    fn test_photodiode_defaults() {
        // 500 lx · 0.5 µA/lx · 10 kΩ = 2.5 V at t = 0
        let seq = photodiode_sensor(&defaults_for(CircuitType::PhotodiodeSensor));
        let first = seq.points()[0];
        assert_relative_eq!(first.output, 2.5);
        assert_relative_eq!(first.input, 2.5);
        // ±20% illumination swing
        assert_relative_eq!(seq.peak_output().unwrap(), 3.0, epsilon = 1e-3);
    }

    #[test]
    fn test_photodiode_clamped_by_bias() {
        let params: ParameterSet = [("lux", 2000.0), ("rl", 100.0), ("vbias", 5.0)]
            .into_iter()
            .collect();
        let seq = photodiode_sensor(&params);
        assert!(seq.iter().all(|p| p.output == 5.0));
    }

    #[test]
    fn test_dark_photodiode_is_zero() {
        let params: ParameterSet = [("lux", 0.0), ("rl", 10.0), ("vbias", 5.0)]
            .into_iter()
            .collect();
        assert!(photodiode_sensor(&params).iter().all(|p| p.output == 0.0 && p.input == 0.0));
    }

    #[test]
    fn test_tia_defaults() {
        // 200 lx · 0.5 µA/lx · 100 kΩ = 10 V, inverted
        let seq = transimpedance_amplifier(&defaults_for(CircuitType::TransimpedanceAmplifier));
        assert_relative_eq!(seq.points()[0].output, -10.0);
        assert_relative_eq!(seq.points()[0].input, 2.0);
        assert!(seq.iter().all(|p| p.output < 0.0));
        assert_relative_eq!(seq.peak_output().unwrap(), 12.0, epsilon = 1e-3);
    }

    #[test]
    fn test_tia_limited_by_negative_rail() {
        let params: ParameterSet = [("lux", 1000.0), ("rf", 1000.0)].into_iter().collect();
        let seq = transimpedance_amplifier(&params);
        assert!(seq.iter().all(|p| p.output == -12.0));
    }
}
