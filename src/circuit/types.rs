//! Core types for circuit selection and parameters.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::CircuitScopeError;

/// One of the fixed circuit topologies the simulator knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CircuitType {
    VoltageDivider,
    /// Selected when the simulator starts
    #[default]
    InvertingOpAmp,
    NonInvertingOpAmp,
    LowPassFilter,
    SummingAmplifier,
    DifferenceAmplifier,
    PhotodiodeSensor,
    TransimpedanceAmplifier,
    BandPassFilter,
    SignalGenerator,
}

impl CircuitType {
    /// Every topology, in menu order.
    pub const ALL: [CircuitType; 10] = [
        CircuitType::VoltageDivider,
        CircuitType::InvertingOpAmp,
        CircuitType::NonInvertingOpAmp,
        CircuitType::LowPassFilter,
        CircuitType::SummingAmplifier,
        CircuitType::DifferenceAmplifier,
        CircuitType::PhotodiodeSensor,
        CircuitType::TransimpedanceAmplifier,
        CircuitType::BandPassFilter,
        CircuitType::SignalGenerator,
    ];

    /// Human readable name, used in the UI and in explanation prompts.
    pub fn label(&self) -> &'static str {
        match self {
            CircuitType::VoltageDivider => "Voltage Divider",
            CircuitType::InvertingOpAmp => "Inverting Amplifier",
            CircuitType::NonInvertingOpAmp => "Non-Inverting Amplifier",
            CircuitType::LowPassFilter => "RC Low-Pass Filter",
            CircuitType::SummingAmplifier => "Summing Amplifier",
            CircuitType::DifferenceAmplifier => "Difference Amplifier",
            CircuitType::PhotodiodeSensor => "Photodiode Sensor",
            CircuitType::TransimpedanceAmplifier => "Transimpedance Amplifier (TIA)",
            CircuitType::BandPassFilter => "Active Band-Pass Filter",
            CircuitType::SignalGenerator => "Signal Generator (Wien Bridge)",
        }
    }

    /// Short identifier accepted on the command line and from JavaScript.
    pub fn slug(&self) -> &'static str {
        match self {
            CircuitType::VoltageDivider => "voltage-divider",
            CircuitType::InvertingOpAmp => "inverting",
            CircuitType::NonInvertingOpAmp => "non-inverting",
            CircuitType::LowPassFilter => "low-pass",
            CircuitType::SummingAmplifier => "summing",
            CircuitType::DifferenceAmplifier => "difference",
            CircuitType::PhotodiodeSensor => "photodiode",
            CircuitType::TransimpedanceAmplifier => "tia",
            CircuitType::BandPassFilter => "band-pass",
            CircuitType::SignalGenerator => "wien-bridge",
        }
    }

    /// Whether the oscilloscope shows a second input trace.
    pub fn has_second_input(&self) -> bool {
        matches!(
            self,
            CircuitType::SummingAmplifier | CircuitType::DifferenceAmplifier
        )
    }
}

impl fmt::Display for CircuitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CircuitType {
    type Err = CircuitScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        CircuitType::ALL
            .into_iter()
            .find(|c| c.slug() == wanted || c.label().to_lowercase() == wanted)
            .ok_or_else(|| CircuitScopeError::unknown_circuit(s))
    }
}

/// Numeric parameter values keyed by identifier (`"r1"`, `"vin"`, `"freq"`...).
///
/// Keys keep their insertion order so serialized parameters read in the same
/// order as the catalog declares them. Reading a missing key yields NaN,
/// which then propagates through the signal math.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: Vec<(String, f64)>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value, or NaN if the key is absent.
    pub fn get(&self, key: &str) -> f64 {
        self.try_get(key).unwrap_or(f64::NAN)
    }

    /// Get a value if present.
    pub fn try_get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// Get a value, substituting `fallback` when it is absent, zero or NaN.
    pub fn get_nonzero_or(&self, key: &str, fallback: f64) -> f64 {
        match self.try_get(key) {
            Some(v) if v != 0.0 && !v.is_nan() => v,
            _ => fallback,
        }
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Check whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut params = ParameterSet::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

impl Serialize for ParameterSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_from_slug_and_label() {
        assert_eq!("tia".parse::<CircuitType>().unwrap(), CircuitType::TransimpedanceAmplifier);
        assert_eq!("Low_Pass".parse::<CircuitType>().unwrap(), CircuitType::LowPassFilter);
        assert_eq!(
            "voltage divider".parse::<CircuitType>().unwrap(),
            CircuitType::VoltageDivider
        );
        assert!(matches!(
            "flux-capacitor".parse::<CircuitType>(),
            Err(CircuitScopeError::UnknownCircuit { .. })
        ));
    }

    #[test]
    fn test_slugs_are_unique() {
        for (i, a) in CircuitType::ALL.iter().enumerate() {
            for b in &CircuitType::ALL[i + 1..] {
                assert_ne!(a.slug(), b.slug());
            }
        }
    }

    #[test]
    fn test_missing_parameter_is_nan() {
        let params: ParameterSet = [("r1", 1000.0)].into_iter().collect();
        assert_eq!(params.get("r1"), 1000.0);
        assert!(params.get("r2").is_nan());
    }

    #[test]
    fn test_nonzero_fallback() {
        let mut params = ParameterSet::new();
        assert_eq!(params.get_nonzero_or("freq", 2.0), 2.0);
        params.set("freq", 0.0);
        assert_eq!(params.get_nonzero_or("freq", 2.0), 2.0);
        params.set("freq", f64::NAN);
        assert_eq!(params.get_nonzero_or("freq", 2.0), 2.0);
        params.set("freq", 5.0);
        assert_eq!(params.get_nonzero_or("freq", 2.0), 5.0);
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params: ParameterSet = [("vin", 1.0), ("freq", 1.0)].into_iter().collect();
        params.set("vin", 3.0);
        let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["vin", "freq"]);
        assert_eq!(params.get("vin"), 3.0);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let params: ParameterSet = [("vin", 1.0), ("freq", 2.5), ("bad", f64::NAN)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"vin":1.0,"freq":2.5,"bad":null}"#);
    }
}
