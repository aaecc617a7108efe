//! Wien bridge oscillator.

use std::f64::consts::PI;

use super::filters::rc_center_frequency;
use super::{SamplePoint, SampleSequence};
use crate::circuit::ParameterSet;

/// Output amplitude of the oscillator in volts.
const WIEN_AMPLITUDE: f64 = 5.0;
/// Width of the display window in seconds.
const WIEN_WINDOW: f64 = 0.002;

/// Oscillation frequency for R in kΩ and C in nF.
pub fn wien_frequency(r_kohm: f64, c_nf: f64) -> f64 {
    rc_center_frequency(r_kohm * 1e3, c_nf * 1e-9)
}

/// Free-running sine at `f = 1/(2πRC)` over a fixed 2 ms window.
///
/// There is no input signal; the input trace is zero.
pub fn wien_bridge(params: &ParameterSet) -> SampleSequence {
    let freq = wien_frequency(params.get("r"), params.get("c"));

    SampleSequence::from_fn(|i, t| {
        let seconds = t * WIEN_WINDOW;
        SamplePoint::new(i, 0.0, WIEN_AMPLITUDE * (2.0 * PI * freq * seconds).sin())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{defaults_for, CircuitType};
    use approx::assert_relative_eq;

    #[test]
    fn test_default_frequency() {
        // 10 kΩ, 100 nF → ~159.15 Hz
        assert_relative_eq!(wien_frequency(10.0, 100.0), 159.154_943, epsilon = 1e-5);
    }

    #[test]
    fn test_trace_shape() {
        let seq = wien_bridge(&defaults_for(CircuitType::SignalGenerator));
        assert!(seq.iter().all(|p| p.input == 0.0));
        assert!(seq.iter().all(|p| p.output.abs() <= WIEN_AMPLITUDE));
        assert_eq!(seq.points()[0].output, 0.0);
    }

    #[test]
    fn test_higher_frequency_crosses_zero_more_often() {
        let crossings = |r: f64| {
            let params: ParameterSet = [("r", r), ("c", 10.0)].into_iter().collect();
            let seq = wien_bridge(&params);
            seq.points()
                .windows(2)
                .filter(|w| w[0].output.signum() != w[1].output.signum())
                .count()
        };
        assert!(crossings(10.0) > crossings(50.0));
    }
}
