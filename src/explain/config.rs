//! Configuration for the explanation backend.

use std::fmt;
use std::time::Duration;

/// Environment variable holding the backend credential.
pub const API_KEY_ENV: &str = "API_KEY";
/// Fallback environment variable for the credential.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default generative model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for talking to the explanation backend.
///
/// A missing credential is a normal state: the explainer then answers with a
/// fixed message instead of making a request.
#[derive(Clone)]
pub struct ExplainConfig {
    api_key: Option<String>,
    /// Model name placed in the request path
    pub model: String,
    /// API base URL without a trailing slash
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ExplainConfig {
    /// Create a new configuration with default values and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the credential from `API_KEY`, then `GEMINI_API_KEY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same credential rules as [`from_env`](Self::from_env), reading
    /// variables through `lookup`.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let key = [API_KEY_ENV, GEMINI_API_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty());
        match key {
            Some(key) => Self::new().with_api_key(key),
            None => Self::new(),
        }
    }

    /// Set the credential. Blank strings count as no credential.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.trim().is_empty() {
            None
        } else {
            Some(api_key)
        };
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured credential, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl fmt::Debug for ExplainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplainConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}
