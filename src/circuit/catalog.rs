//! Parameter catalog: default values and slider descriptors per topology.
//!
//! The numbers here define the operating range each circuit was designed to
//! be explored in. Units are per-topology (Ω, kΩ, µF, nF); the generators in
//! [`crate::signal`] convert to SI before applying their formulas.

use serde::Serialize;

use super::types::{CircuitType, ParameterSet};

/// Metadata for one adjustable quantity of a topology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterDescriptor {
    /// Key into the [`ParameterSet`]
    pub id: &'static str,
    /// Display label
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Unit suffix shown next to the value
    pub unit: &'static str,
}

impl ParameterDescriptor {
    const fn new(
        id: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        unit: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            min,
            max,
            step,
            unit,
        }
    }

    /// Check whether a value lies within the slider bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Number of decimals a control should display for this quantity.
    pub fn display_precision(&self) -> usize {
        if self.step < 1.0 {
            2
        } else {
            0
        }
    }
}

type P = ParameterDescriptor;

const VOLTAGE_DIVIDER: &[P] = &[
    P::new("vin", "Input Voltage (Vin)", -10.0, 10.0, 0.1, "V"),
    P::new("r1", "Resistor R1", 100.0, 10_000.0, 100.0, "Ω"),
    P::new("r2", "Resistor R2", 100.0, 10_000.0, 100.0, "Ω"),
];

const INVERTING_OPAMP: &[P] = &[
    P::new("vin", "Input Amplitude", 0.1, 5.0, 0.1, "V"),
    P::new("freq", "Frequency", 1.0, 20.0, 1.0, "Hz"),
    P::new("rin", "Input Resistor (Rin)", 100.0, 5_000.0, 100.0, "Ω"),
    P::new("rf", "Feedback Resistor (Rf)", 100.0, 10_000.0, 100.0, "Ω"),
];

const NON_INVERTING_OPAMP: &[P] = &[
    P::new("vin", "Input Amplitude", 0.1, 5.0, 0.1, "V"),
    P::new("freq", "Frequency", 1.0, 20.0, 1.0, "Hz"),
    P::new("r1", "Ground Resistor (R1)", 100.0, 5_000.0, 100.0, "Ω"),
    P::new("r2", "Feedback Resistor (R2)", 100.0, 10_000.0, 100.0, "Ω"),
];

const LOW_PASS_FILTER: &[P] = &[
    P::new("vin", "Input Amplitude", 0.1, 5.0, 0.1, "V"),
    P::new("freq", "Frequency", 10.0, 200.0, 10.0, "Hz"),
    P::new("r", "Resistor (R)", 100.0, 5_000.0, 100.0, "Ω"),
    P::new("c", "Capacitor (C)", 1.0, 100.0, 1.0, "µF"),
];

const SUMMING_AMPLIFIER: &[P] = &[
    P::new("v1", "Input V1 (sine)", -5.0, 5.0, 0.1, "V"),
    P::new("v2", "Input V2 (DC offset)", -5.0, 5.0, 0.1, "V"),
    P::new("r1", "Resistor R1", 0.5, 10.0, 0.5, "kΩ"),
    P::new("r2", "Resistor R2", 0.5, 10.0, 0.5, "kΩ"),
    P::new("rf", "Feedback Resistor Rf", 0.5, 10.0, 0.5, "kΩ"),
];

const DIFFERENCE_AMPLIFIER: &[P] = &[
    P::new("v1", "Input V1 (inverting)", 0.0, 5.0, 0.1, "V"),
    P::new("v2", "Input V2 (non-inverting)", 0.0, 5.0, 0.1, "V"),
    P::new("r1", "Input Resistor (R1)", 1.0, 50.0, 1.0, "kΩ"),
    P::new("r2", "Feedback Resistor (R2)", 1.0, 50.0, 1.0, "kΩ"),
];

const PHOTODIODE_SENSOR: &[P] = &[
    P::new("lux", "Illuminance", 0.0, 2_000.0, 10.0, "lx"),
    P::new("rl", "Load Resistor (RL)", 1.0, 100.0, 1.0, "kΩ"),
    P::new("vbias", "Bias Voltage (Vcc)", 1.0, 12.0, 0.5, "V"),
];

const TRANS_IMPEDANCE_AMPLIFIER: &[P] = &[
    P::new("lux", "Illuminance", 0.0, 1_000.0, 10.0, "lx"),
    P::new("rf", "Feedback Resistor (Rf)", 10.0, 1_000.0, 10.0, "kΩ"),
];

const BAND_PASS_FILTER: &[P] = &[
    P::new("vin", "Input Amplitude", 0.1, 5.0, 0.1, "V"),
    P::new("freq", "Input Frequency", 100.0, 5_000.0, 100.0, "Hz"),
    P::new("r", "Resistor (R)", 0.5, 20.0, 0.5, "kΩ"),
    P::new("c", "Capacitor (C)", 10.0, 470.0, 10.0, "nF"),
];

const SIGNAL_GENERATOR: &[P] = &[
    P::new("r", "Resistor (R)", 1.0, 50.0, 1.0, "kΩ"),
    P::new("c", "Capacitor (C)", 10.0, 470.0, 10.0, "nF"),
];

/// Default values for a topology.
///
/// Some defaults (the `freq` of the summing and difference amplifiers) have
/// no slider; they still drive the generator.
pub fn defaults_for(circuit: CircuitType) -> ParameterSet {
    let values: &[(&str, f64)] = match circuit {
        CircuitType::VoltageDivider => &[("vin", 5.0), ("r1", 1000.0), ("r2", 1000.0)],
        CircuitType::InvertingOpAmp => {
            &[("vin", 1.0), ("freq", 1.0), ("rin", 1000.0), ("rf", 2000.0)]
        }
        CircuitType::NonInvertingOpAmp => {
            &[("vin", 1.0), ("freq", 1.0), ("r1", 1000.0), ("r2", 2000.0)]
        }
        // C in µF
        CircuitType::LowPassFilter => &[("vin", 2.0), ("freq", 50.0), ("r", 1000.0), ("c", 10.0)],
        // Resistors in kΩ
        CircuitType::SummingAmplifier => &[
            ("v1", 1.0),
            ("v2", -0.5),
            ("freq", 2.0),
            ("r1", 1.0),
            ("r2", 1.0),
            ("rf", 2.0),
        ],
        CircuitType::DifferenceAmplifier => &[
            ("v1", 2.0),
            ("v2", 2.5),
            ("freq", 2.0),
            ("r1", 10.0),
            ("r2", 10.0),
        ],
        CircuitType::PhotodiodeSensor => &[("lux", 500.0), ("rl", 10.0), ("vbias", 5.0)],
        CircuitType::TransimpedanceAmplifier => &[("lux", 200.0), ("rf", 100.0)],
        // R in kΩ, C in nF
        CircuitType::BandPassFilter => &[("vin", 2.0), ("freq", 1000.0), ("r", 1.0), ("c", 100.0)],
        CircuitType::SignalGenerator => &[("r", 10.0), ("c", 100.0)],
    };
    values.iter().copied().collect()
}

/// Ordered slider descriptors for a topology.
pub fn controls_for(circuit: CircuitType) -> &'static [ParameterDescriptor] {
    match circuit {
        CircuitType::VoltageDivider => VOLTAGE_DIVIDER,
        CircuitType::InvertingOpAmp => INVERTING_OPAMP,
        CircuitType::NonInvertingOpAmp => NON_INVERTING_OPAMP,
        CircuitType::LowPassFilter => LOW_PASS_FILTER,
        CircuitType::SummingAmplifier => SUMMING_AMPLIFIER,
        CircuitType::DifferenceAmplifier => DIFFERENCE_AMPLIFIER,
        CircuitType::PhotodiodeSensor => PHOTODIODE_SENSOR,
        CircuitType::TransimpedanceAmplifier => TRANS_IMPEDANCE_AMPLIFIER,
        CircuitType::BandPassFilter => BAND_PASS_FILTER,
        CircuitType::SignalGenerator => SIGNAL_GENERATOR,
    }
}

/// Look up a single descriptor by key.
pub fn control(circuit: CircuitType, id: &str) -> Option<&'static ParameterDescriptor> {
    controls_for(circuit).iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_control_has_a_default() {
        for circuit in CircuitType::ALL {
            let defaults = defaults_for(circuit);
            for ctrl in controls_for(circuit) {
                assert!(
                    defaults.contains(ctrl.id),
                    "{circuit}: control '{}' has no default",
                    ctrl.id
                );
            }
        }
    }

    #[test]
    fn test_defaults_within_bounds() {
        for circuit in CircuitType::ALL {
            let defaults = defaults_for(circuit);
            for ctrl in controls_for(circuit) {
                let value = defaults.get(ctrl.id);
                assert!(ctrl.contains(value), "{circuit}: {} = {value} out of range", ctrl.id);
                assert!(ctrl.min < ctrl.max);
                assert!(ctrl.step > 0.0);
            }
        }
    }

    #[test]
    fn test_freq_default_without_control() {
        for circuit in [CircuitType::SummingAmplifier, CircuitType::DifferenceAmplifier] {
            assert_eq!(defaults_for(circuit).get("freq"), 2.0);
            assert!(control(circuit, "freq").is_none());
        }
    }

    #[test]
    fn test_display_precision() {
        let vin = control(CircuitType::VoltageDivider, "vin").unwrap();
        assert_eq!(vin.display_precision(), 2);
        let r1 = control(CircuitType::VoltageDivider, "r1").unwrap();
        assert_eq!(r1.display_precision(), 0);
    }
}
