//! Simulation controller: owns the active circuit, its parameters and the
//! current trace, and regenerates the trace on every change.
//!
//! The controller also tracks an outstanding explanation request. Each
//! request gets an [`ExplanationTicket`]; a response is only applied when its
//! ticket is still the pending one, so a slow answer for a circuit the user
//! has already left is dropped instead of being shown against the wrong
//! schematic.

use tracing::{debug, info};

use crate::circuit::{controls_for, defaults_for, CircuitType, ParameterDescriptor, ParameterSet};
use crate::error::{CircuitScopeError, Result};
use crate::explain::{signal_description, Explainer, Transport};
use crate::signal::{generate, SampleSequence};

/// A request for an explanation, carrying everything needed to build the
/// prompt as it stood when the request was made.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationTicket {
    id: u64,
    pub circuit: CircuitType,
    pub params: ParameterSet,
    pub signal_description: &'static str,
}

impl ExplanationTicket {
    /// Identifier to hand back to [`SimulationController::resolve_explanation`].
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Read-only view of the controller state for a presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct SimulationSnapshot<'a> {
    pub circuit: CircuitType,
    pub params: &'a ParameterSet,
    pub controls: &'static [ParameterDescriptor],
    pub samples: &'a SampleSequence,
    pub explanation: Option<&'a str>,
    pub explaining: bool,
}

/// State machine driven by circuit selection and parameter edits.
#[derive(Debug, Clone)]
pub struct SimulationController {
    circuit: CircuitType,
    params: ParameterSet,
    samples: SampleSequence,
    explanation: Option<String>,
    /// Ticket id of the request currently awaited
    pending: Option<u64>,
    next_ticket: u64,
}

impl Default for SimulationController {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationController {
    /// Start on the default circuit with its default parameters.
    pub fn new() -> Self {
        Self::with_circuit(CircuitType::default())
    }

    /// Start on a specific circuit with its default parameters.
    pub fn with_circuit(circuit: CircuitType) -> Self {
        let mut controller = Self {
            circuit,
            params: defaults_for(circuit),
            samples: SampleSequence::default(),
            explanation: None,
            pending: None,
            next_ticket: 0,
        };
        controller.regenerate();
        controller
    }

    pub fn circuit(&self) -> CircuitType {
        self.circuit
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn samples(&self) -> &SampleSequence {
        &self.samples
    }

    /// Slider descriptors for the active circuit.
    pub fn controls(&self) -> &'static [ParameterDescriptor] {
        controls_for(self.circuit)
    }

    /// The last applied explanation, if any.
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// True while an explanation request is outstanding.
    pub fn is_explaining(&self) -> bool {
        self.pending.is_some()
    }

    pub fn snapshot(&self) -> SimulationSnapshot<'_> {
        SimulationSnapshot {
            circuit: self.circuit,
            params: &self.params,
            controls: self.controls(),
            samples: &self.samples,
            explanation: self.explanation(),
            explaining: self.is_explaining(),
        }
    }

    /// Switch topology.
    ///
    /// Parameters are replaced wholesale by the new circuit's defaults, any
    /// shown or pending explanation is discarded, and the trace regenerated.
    pub fn select_circuit(&mut self, circuit: CircuitType) {
        info!(circuit = circuit.slug(), "selecting circuit");
        self.circuit = circuit;
        self.params = defaults_for(circuit);
        self.explanation = None;
        self.pending = None;
        self.regenerate();
    }

    /// Set one parameter and regenerate.
    ///
    /// Any key is accepted, matching the behaviour of the interactive
    /// controls. Use [`try_set_parameter`](Self::try_set_parameter) to reject
    /// keys the active circuit does not know.
    pub fn set_parameter(&mut self, key: &str, value: f64) {
        self.params.set(key, value);
        self.regenerate();
    }

    /// Set one parameter, rejecting keys the active circuit does not declare.
    pub fn try_set_parameter(&mut self, key: &str, value: f64) -> Result<()> {
        let known = self.controls().iter().any(|c| c.id == key) || self.params.contains(key);
        if !known {
            return Err(CircuitScopeError::unknown_parameter(self.circuit.slug(), key));
        }
        self.set_parameter(key, value);
        Ok(())
    }

    fn regenerate(&mut self) {
        self.samples = generate(self.circuit, &self.params);
        debug!(
            circuit = self.circuit.slug(),
            samples = self.samples.len(),
            non_finite = self.samples.non_finite_count(),
            "regenerated trace"
        );
    }

    /// Mark an explanation as in progress and return the request to send.
    ///
    /// A newer request supersedes any earlier one still in flight.
    pub fn begin_explanation(&mut self) -> ExplanationTicket {
        let id = self.next_ticket;
        self.next_ticket += 1;
        self.pending = Some(id);
        ExplanationTicket {
            id,
            circuit: self.circuit,
            params: self.params.clone(),
            signal_description: signal_description(self.circuit),
        }
    }

    /// Apply the response for `ticket`. Returns false if it was stale.
    pub fn complete_explanation(&mut self, ticket: &ExplanationTicket, text: impl Into<String>) -> bool {
        self.resolve_explanation(ticket.id, text)
    }

    /// Apply the response for the ticket with id `ticket_id`. Returns false if
    /// it was stale.
    pub fn resolve_explanation(&mut self, ticket_id: u64, text: impl Into<String>) -> bool {
        if self.pending != Some(ticket_id) {
            debug!(ticket = ticket_id, "discarding stale explanation");
            return false;
        }
        self.pending = None;
        self.explanation = Some(text.into());
        true
    }

    /// Run a full explanation round trip synchronously.
    pub fn explain_with<T: Transport>(&mut self, explainer: &Explainer<T>) -> bool {
        let ticket = self.begin_explanation();
        let text = explainer.explain_ticket(&ticket);
        self.complete_explanation(&ticket, text)
    }
}
