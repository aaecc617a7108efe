//! Circuit topologies and their parameter catalog.
//!
//! A [`CircuitType`] names one of the fixed teaching circuits. The catalog
//! maps each one to its default [`ParameterSet`] and the ordered list of
//! [`ParameterDescriptor`]s a control panel should show.

mod catalog;
mod types;

pub use catalog::{control, controls_for, defaults_for, ParameterDescriptor};
pub use types::{CircuitType, ParameterSet};
