//! Resistive voltage divider (DC).

use super::{SamplePoint, SampleSequence};
use crate::circuit::ParameterSet;

/// `Vout = Vin * R2 / (R1 + R2)`, constant over the whole window.
pub fn voltage_divider(params: &ParameterSet) -> SampleSequence {
    let vin = params.get("vin");
    let r1 = params.get("r1");
    let r2 = params.get("r2");
    let vout = vin * (r2 / (r1 + r2));

    SampleSequence::from_fn(|i, _| SamplePoint::new(i, vin, vout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn divider(vin: f64, r1: f64, r2: f64) -> SampleSequence {
        let params: ParameterSet = [("vin", vin), ("r1", r1), ("r2", r2)].into_iter().collect();
        voltage_divider(&params)
    }

    #[test]
    fn test_equal_resistors_halve() {
        let seq = divider(5.0, 1000.0, 1000.0);
        assert!(seq.iter().all(|p| p.output == 2.5 && p.input == 5.0));
    }

    #[test]
    fn test_ratio() {
        let seq = divider(-9.0, 2000.0, 1000.0);
        approx::assert_relative_eq!(seq.points()[0].output, -3.0);
    }

    #[test]
    fn test_zero_resistors_give_nan() {
        let seq = divider(5.0, 0.0, 0.0);
        assert_eq!(seq.len(), crate::SAMPLE_COUNT);
        assert!(seq.iter().all(|p| p.output.is_nan()));
        assert_eq!(seq.finite_points().count(), 0);
    }
}
