//! Error types for the Circuit Scope simulator.
//!
//! The signal model itself is total and never fails. Errors only arise at the
//! edges: parsing user input in the CLI, hardened parameter assignment, and
//! talking to the explanation backend.

use thiserror::Error;

/// Result type alias using [`CircuitScopeError`].
pub type Result<T> = std::result::Result<T, CircuitScopeError>;

/// Unified error type for all Circuit Scope operations.
#[derive(Error, Debug)]
pub enum CircuitScopeError {
    // ============ Catalog Errors ============
    /// Circuit name or slug not recognised
    #[error("Unknown circuit '{name}' (use --list to see available circuits)")]
    UnknownCircuit { name: String },

    /// Parameter key not declared for the active circuit
    #[error("Unknown parameter '{key}' for circuit '{circuit}'")]
    UnknownParameter { circuit: String, key: String },

    /// Malformed `key=value` assignment
    #[error("Invalid parameter assignment '{input}': expected key=value with a numeric value")]
    InvalidAssignment { input: String },

    // ============ Explanation Errors ============
    /// No credential configured for the explanation backend
    #[error("No API key configured for the explanation service")]
    MissingCredential,

    /// Network or protocol level failure
    #[error("Explanation transport error: {message}")]
    Transport { message: String },

    /// Backend answered with a non-success status
    #[error("Explanation backend returned status {status}: {message}")]
    BackendStatus { status: u16, message: String },

    /// Backend answered but produced no text
    #[error("Explanation backend returned an empty response")]
    EmptyResponse,

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ============ I/O Errors ============
    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CircuitScopeError {
    /// Create an unknown circuit error
    pub fn unknown_circuit(name: impl Into<String>) -> Self {
        Self::UnknownCircuit { name: name.into() }
    }

    /// Create an unknown parameter error
    pub fn unknown_parameter(circuit: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnknownParameter {
            circuit: circuit.into(),
            key: key.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
