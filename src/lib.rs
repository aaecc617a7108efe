//! # Circuit Scope
//!
//! An interactive analog circuit simulator for teaching.
//!
//! This library provides:
//! - Ten canonical teaching circuits, from a voltage divider to a Wien bridge oscillator
//! - A parameter catalog with the default values and slider ranges for each circuit
//! - Closed-form waveform generation producing an oscilloscope trace of input and output
//! - A controller that keeps the trace in sync with circuit and parameter changes
//! - Natural-language explanations from a generative text backend
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit types, parameter sets and the parameter catalog
//! - [`signal`] - Per-topology transfer functions and trace generation
//! - [`controller`] - State owner driven by circuit selection and parameter edits
//! - [`explain`] - Prompt building, backend transport and markup rendering
//! - [`output`] - CSV, summary and terminal plot renderings (CLI)
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! circuit-scope low-pass --set freq=150 --format plot
//! API_KEY=... circuit-scope inverting --set rf=8000 --explain
//! ```
//!
//! ### Library
//!
//! ```
//! use circuit_scope::{CircuitType, SimulationController};
//!
//! let mut sim = SimulationController::with_circuit(CircuitType::VoltageDivider);
//! sim.set_parameter("r2", 3000.0);
//! assert_eq!(sim.samples().points()[0].output, 3.75);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmCircuitScope } from 'circuit_scope';
//!
//! const sim = new WasmCircuitScope('inverting');
//! sim.set_parameter('rf', 4000);
//! chart.update(sim.times(), sim.inputs(), sim.outputs());
//! ```
//!
//! ## Signal Model
//!
//! This is not a circuit solver. Each topology has a hand-derived transfer
//! function valid near its intended operating point. Amplifier outputs are
//! clipped to ±12 V to model supply-rail saturation. Degenerate parameters
//! (a zero resistance, say) are not rejected: they flow through as NaN or
//! infinite samples, which renderers must skip.

pub mod circuit;
pub mod controller;
pub mod error;
pub mod explain;
pub mod signal;

#[cfg(feature = "cli")]
pub mod output;

// Re-export main types for convenience
pub use circuit::{controls_for, defaults_for, CircuitType, ParameterDescriptor, ParameterSet};
pub use controller::{ExplanationTicket, SimulationController, SimulationSnapshot};
pub use error::{CircuitScopeError, Result};
pub use explain::{ExplainConfig, Explainer, Transport};
pub use signal::{generate, SamplePoint, SampleSequence};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuitScope;

/// Number of points in every generated trace
pub const SAMPLE_COUNT: usize = 150;

/// Supply rail magnitude used to clip amplifier outputs (volts)
pub const RAIL_VOLTAGE: f64 = 12.0;
