//! Natural-language explanations from a generative text backend.
//!
//! The [`Explainer`] builds a prompt from the circuit, its parameters and a
//! short description of the input signal, then hands it to a [`Transport`].
//! It never fails: a missing credential or any backend fault is folded into
//! a fixed user-facing message.
//!
//! The HTTP transport for the Gemini API lives behind the `gemini` feature.
//! In the browser the prompt is built here and the request is made by
//! JavaScript (see the `wasm` bindings).

mod config;
#[cfg(feature = "gemini")]
mod gemini;
pub mod markup;

pub use config::{
    ExplainConfig, API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT,
    GEMINI_API_KEY_ENV,
};
#[cfg(feature = "gemini")]
pub use gemini::{GenerateContentRequest, GenerateContentResponse, GeminiTransport};

use tracing::warn;

use crate::circuit::{CircuitType, ParameterSet};
use crate::controller::ExplanationTicket;
use crate::error::{CircuitScopeError, Result};

/// Shown when no credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Missing API key. Please check your configuration.";
/// Shown when the backend call fails.
pub const UNAVAILABLE_MESSAGE: &str =
    "Unable to generate an explanation right now. Please try again later.";
/// Shown when the backend answers with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "No explanation was generated.";

/// The nature of the input signal, as described to the backend.
pub fn signal_description(circuit: CircuitType) -> &'static str {
    match circuit {
        CircuitType::PhotodiodeSensor => "varying light intensity",
        CircuitType::SignalGenerator => "self-oscillation",
        _ => "standard sine-wave input",
    }
}

/// Build the prompt sent to the backend.
pub fn build_prompt(
    circuit: CircuitType,
    params: &ParameterSet,
    signal_description: &str,
) -> Result<String> {
    let params_json = serde_json::to_string(params)?;
    Ok(format!(
        "You are an electronics engineering professor teaching an analog circuits course.\n\
         \n\
         Current circuit: {circuit}\n\
         Current parameters: {params_json}\n\
         Input signal: {signal_description}\n\
         \n\
         Based on these specific parameters, give a concise but insightful explanation of what is happening in the circuit.\n\
         \n\
         1. Compute the key theoretical values from the given parameters (for example gain, cutoff frequency, output voltage).\n\
         2. Explain the circuit behaviour (for example \"the signal is inverted and amplified by a factor of 2\").\n\
         3. If the parameters are extreme (for example a very high gain), mention practical problems such as saturation or noise, even though the simulation is ideal.\n\
         \n\
         Keep the answer under 200 words. Use Markdown bold to highlight key values.",
        circuit = circuit.label(),
    ))
}

/// Backend that turns a prompt into generated text.
pub trait Transport {
    /// Send `prompt` and return the generated text.
    fn generate(&self, config: &ExplainConfig, api_key: &str, prompt: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn generate(&self, config: &ExplainConfig, api_key: &str, prompt: &str) -> Result<String> {
        (**self).generate(config, api_key, prompt)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn generate(&self, config: &ExplainConfig, api_key: &str, prompt: &str) -> Result<String> {
        (**self).generate(config, api_key, prompt)
    }
}

/// Produces explanations, one best-effort backend call per request.
#[derive(Debug, Clone)]
pub struct Explainer<T> {
    config: ExplainConfig,
    transport: T,
}

impl<T: Transport> Explainer<T> {
    pub fn new(config: ExplainConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ExplainConfig {
        &self.config
    }

    /// Explain a circuit. Always returns displayable text.
    pub fn explain(
        &self,
        circuit: CircuitType,
        params: &ParameterSet,
        signal_description: &str,
    ) -> String {
        match self.try_explain(circuit, params, signal_description) {
            Ok(text) => text,
            Err(CircuitScopeError::MissingCredential) => MISSING_CREDENTIAL_MESSAGE.to_string(),
            Err(CircuitScopeError::EmptyResponse) => EMPTY_RESPONSE_MESSAGE.to_string(),
            Err(err) => {
                warn!(error = %err, circuit = circuit.slug(), "explanation request failed");
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }

    /// Explain the circuit captured in a controller ticket.
    pub fn explain_ticket(&self, ticket: &ExplanationTicket) -> String {
        self.explain(ticket.circuit, &ticket.params, ticket.signal_description)
    }

    /// Like [`explain`](Self::explain) but surfaces the failure reason.
    pub fn try_explain(
        &self,
        circuit: CircuitType,
        params: &ParameterSet,
        signal_description: &str,
    ) -> Result<String> {
        let api_key = self.config.api_key().ok_or(CircuitScopeError::MissingCredential)?;
        let prompt = build_prompt(circuit, params, signal_description)?;
        let text = self.transport.generate(&self.config, api_key, &prompt)?;
        if text.trim().is_empty() {
            return Err(CircuitScopeError::EmptyResponse);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::defaults_for;
    use std::cell::{Cell, RefCell};

    /// Records calls and replies with a canned answer.
    struct CannedTransport {
        calls: Cell<usize>,
        last_prompt: RefCell<String>,
        reply: fn() -> Result<String>,
    }

    impl CannedTransport {
        fn new(reply: fn() -> Result<String>) -> Self {
            Self {
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
                reply,
            }
        }
    }

    impl Transport for CannedTransport {
        fn generate(&self, _config: &ExplainConfig, api_key: &str, prompt: &str) -> Result<String> {
            assert_eq!(api_key, "test-key");
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = prompt.to_string();
            (self.reply)()
        }
    }

    fn keyed() -> ExplainConfig {
        ExplainConfig::new().with_api_key("test-key")
    }

    #[test]
    fn test_missing_credential_makes_no_call() {
        let transport = CannedTransport::new(|| Ok("unused".into()));
        let explainer = Explainer::new(ExplainConfig::new(), &transport);
        let circuit = CircuitType::InvertingOpAmp;
        let text = explainer.explain(circuit, &defaults_for(circuit), signal_description(circuit));
        assert_eq!(text, MISSING_CREDENTIAL_MESSAGE);
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn test_success_passes_text_through() {
        let transport = CannedTransport::new(|| Ok("Gain is **-2**".into()));
        let explainer = Explainer::new(keyed(), &transport);
        let circuit = CircuitType::InvertingOpAmp;
        let text = explainer.explain(circuit, &defaults_for(circuit), "standard sine-wave input");
        assert_eq!(text, "Gain is **-2**");
        assert_eq!(transport.calls.get(), 1);

        let prompt = transport.last_prompt.borrow();
        assert!(prompt.contains("Current circuit: Inverting Amplifier"));
        assert!(prompt.contains(r#"{"vin":1.0,"freq":1.0,"rin":1000.0,"rf":2000.0}"#));
        assert!(prompt.contains("Input signal: standard sine-wave input"));
    }

    #[test]
    fn test_backend_fault_becomes_fallback() {
        let transport = CannedTransport::new(|| Err(CircuitScopeError::transport("connection refused")));
        let explainer = Explainer::new(keyed(), &transport);
        let circuit = CircuitType::BandPassFilter;
        let text = explainer.explain(circuit, &defaults_for(circuit), signal_description(circuit));
        assert_eq!(text, UNAVAILABLE_MESSAGE);
        assert_eq!(transport.calls.get(), 1);
    }

    #[test]
    fn test_blank_reply_becomes_placeholder() {
        let transport = CannedTransport::new(|| Ok("  \n".into()));
        let explainer = Explainer::new(keyed(), &transport);
        let circuit = CircuitType::VoltageDivider;
        let text = explainer.explain(circuit, &defaults_for(circuit), signal_description(circuit));
        assert_eq!(text, EMPTY_RESPONSE_MESSAGE);
    }

    #[test]
    fn test_signal_descriptions() {
        assert_eq!(signal_description(CircuitType::PhotodiodeSensor), "varying light intensity");
        assert_eq!(signal_description(CircuitType::SignalGenerator), "self-oscillation");
        assert_eq!(signal_description(CircuitType::LowPassFilter), "standard sine-wave input");
    }

    #[test]
    fn test_prompt_serializes_degenerate_values_as_null() {
        let mut params = defaults_for(CircuitType::VoltageDivider);
        params.set("r1", f64::INFINITY);
        let prompt = build_prompt(CircuitType::VoltageDivider, &params, "x").unwrap();
        assert!(prompt.contains(r#""r1":null"#));
    }
}
