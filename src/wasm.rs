//! WASM bindings for Circuit Scope.
//!
//! This module exposes the simulation controller to a browser front end
//! that draws schematics, sliders and the oscilloscope chart.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuitScope } from 'circuit_scope';
//!
//! await init();
//!
//! const sim = new WasmCircuitScope('low-pass');
//! for (const ctrl of JSON.parse(sim.controls_json())) {
//!   addSlider(ctrl, (value) => {
//!     sim.set_parameter(ctrl.id, value);
//!     redraw(sim.times(), sim.inputs(), sim.outputs(), sim.finite_mask());
//!   });
//! }
//!
//! // Explanation: the prompt is built here, the fetch happens in JS.
//! const { ticket, prompt } = JSON.parse(sim.begin_explanation());
//! const text = await askBackend(prompt);
//! if (sim.complete_explanation(ticket, text)) {
//!   panel.innerHTML = sim.explanation_html();
//! }
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::circuit::{controls_for, CircuitType};
use crate::controller::SimulationController;
use crate::explain::{build_prompt, markup};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[derive(Serialize)]
struct CircuitEntry {
    slug: &'static str,
    label: &'static str,
    two_inputs: bool,
}

#[derive(Serialize)]
struct PendingExplanation {
    ticket: u32,
    prompt: String,
}

/// WASM-compatible wrapper around [`SimulationController`].
#[wasm_bindgen]
pub struct WasmCircuitScope {
    controller: SimulationController,
}

#[wasm_bindgen]
impl WasmCircuitScope {
    /// Create a simulator showing the circuit with the given slug.
    ///
    /// # Example
    /// ```javascript
    /// const sim = new WasmCircuitScope('inverting');
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(circuit: &str) -> Result<WasmCircuitScope, JsValue> {
        let circuit: CircuitType = circuit.parse().map_err(to_js_error)?;
        Ok(WasmCircuitScope {
            controller: SimulationController::with_circuit(circuit),
        })
    }

    /// Switch to another circuit, resetting its parameters.
    #[wasm_bindgen]
    pub fn select_circuit(&mut self, circuit: &str) -> Result<(), JsValue> {
        let circuit: CircuitType = circuit.parse().map_err(to_js_error)?;
        self.controller.select_circuit(circuit);
        Ok(())
    }

    /// Slug of the active circuit.
    #[wasm_bindgen(getter)]
    pub fn circuit(&self) -> String {
        self.controller.circuit().slug().to_string()
    }

    /// Display label of the active circuit.
    #[wasm_bindgen(getter)]
    pub fn label(&self) -> String {
        self.controller.circuit().label().to_string()
    }

    /// Set one parameter from a slider change.
    #[wasm_bindgen]
    pub fn set_parameter(&mut self, key: &str, value: f64) {
        self.controller.set_parameter(key, value);
    }

    /// Current value of a parameter, or `undefined`.
    #[wasm_bindgen]
    pub fn parameter(&self, key: &str) -> Option<f64> {
        self.controller.params().try_get(key)
    }

    /// Current parameters as a JSON object.
    #[wasm_bindgen]
    pub fn params_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.controller.params()).map_err(to_js_error)
    }

    /// Slider descriptors of the active circuit as a JSON array.
    #[wasm_bindgen]
    pub fn controls_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(controls_for(self.controller.circuit())).map_err(to_js_error)
    }

    /// Trace as a JSON array of `{time, input, output, input2?}` rows.
    ///
    /// Non-finite values serialize as `null`, which charting libraries skip.
    #[wasm_bindgen]
    pub fn samples_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.controller.samples()).map_err(to_js_error)
    }

    /// Sample indices.
    #[wasm_bindgen]
    pub fn times(&self) -> Vec<u32> {
        self.controller.samples().iter().map(|p| p.time as u32).collect()
    }

    /// Input trace.
    #[wasm_bindgen]
    pub fn inputs(&self) -> Vec<f64> {
        self.controller.samples().iter().map(|p| p.input).collect()
    }

    /// Output trace.
    #[wasm_bindgen]
    pub fn outputs(&self) -> Vec<f64> {
        self.controller.samples().iter().map(|p| p.output).collect()
    }

    /// Second input trace, or `undefined` for single-input circuits.
    #[wasm_bindgen]
    pub fn inputs2(&self) -> Option<Vec<f64>> {
        let samples = self.controller.samples();
        if !samples.has_input2() {
            return None;
        }
        Some(samples.iter().map(|p| p.input2.unwrap_or(f64::NAN)).collect())
    }

    /// 1 where a sample can be plotted, 0 where it holds NaN or infinity.
    #[wasm_bindgen]
    pub fn finite_mask(&self) -> Vec<u8> {
        self.controller
            .samples()
            .iter()
            .map(|p| u8::from(p.is_finite()))
            .collect()
    }

    /// Start an explanation request.
    ///
    /// Returns JSON `{ticket, prompt}`. Send the prompt to the backend and
    /// pass the answer to [`complete_explanation`](Self::complete_explanation).
    #[wasm_bindgen]
    pub fn begin_explanation(&mut self) -> Result<String, JsValue> {
        let ticket = self.controller.begin_explanation();
        let prompt = build_prompt(ticket.circuit, &ticket.params, ticket.signal_description)
            .map_err(to_js_error)?;
        serde_json::to_string(&PendingExplanation {
            ticket: u32::try_from(ticket.id()).map_err(to_js_error)?,
            prompt,
        })
        .map_err(to_js_error)
    }

    /// Deliver backend text. Returns false if the request was superseded or
    /// the circuit changed since it was made.
    #[wasm_bindgen]
    pub fn complete_explanation(&mut self, ticket: u32, text: String) -> bool {
        self.controller.resolve_explanation(u64::from(ticket), text)
    }

    /// True while an explanation request is outstanding.
    #[wasm_bindgen(getter)]
    pub fn explaining(&self) -> bool {
        self.controller.is_explaining()
    }

    /// Raw explanation text.
    #[wasm_bindgen]
    pub fn explanation(&self) -> Option<String> {
        self.controller.explanation().map(str::to_string)
    }

    /// Explanation rendered as safe HTML.
    #[wasm_bindgen]
    pub fn explanation_html(&self) -> Option<String> {
        self.controller.explanation().map(markup::to_html)
    }
}

/// All circuits as a JSON array of `{slug, label, two_inputs}`.
#[wasm_bindgen]
pub fn circuits_json() -> Result<String, JsValue> {
    let entries: Vec<CircuitEntry> = CircuitType::ALL
        .iter()
        .map(|c| CircuitEntry {
            slug: c.slug(),
            label: c.label(),
            two_inputs: c.has_second_input(),
        })
        .collect();
    serde_json::to_string(&entries).map_err(to_js_error)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
