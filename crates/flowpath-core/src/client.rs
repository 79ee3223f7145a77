//! Process-engine HTTP client
//!
//! Fetches the diagram XML from a Camunda-style engine REST endpoint.
//! The response is a JSON envelope whose `bpmn20Xml` field carries the
//! diagram; unwrapping is a pure function so it can be tested without a
//! network. Retries apply only to transport failures and 5xx responses,
//! never to 4xx.

use std::time::Duration;

use crate::error::{FlowpathError, Result};

/// Default engine endpoint (Camunda's public invoice demo process)
pub const DEFAULT_ENGINE_URL: &str =
    "https://n35ro2ic4d.execute-api.eu-central-1.amazonaws.com/prod/engine-rest/process-definition/key/invoice/xml";

/// Default timeout for fetch requests
pub const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of retry attempts
pub const MAX_RETRY_ATTEMPTS: u32 = 3;

/// JSON envelope field holding the diagram XML
pub const ENVELOPE_XML_FIELD: &str = "bpmn20Xml";

/// Configuration for the engine endpoint
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// URL of the diagram endpoint
    pub url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum retry attempts for failed fetches
    pub max_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: Self::get_engine_url(),
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
            max_retries: MAX_RETRY_ATTEMPTS,
        }
    }
}

impl EngineConfig {
    /// Get endpoint URL from environment or use the default
    pub fn get_engine_url() -> String {
        std::env::var("FLOWPATH_ENGINE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENGINE_URL.to_string())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(timeout) = std::env::var("FLOWPATH_FETCH_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.timeout_seconds = seconds.clamp(5, 300);
            }
        }

        if let Ok(retries) = std::env::var("FLOWPATH_FETCH_RETRIES") {
            if let Ok(count) = retries.parse::<u32>() {
                config.max_retries = count.clamp(0, 10);
            }
        }

        config
    }
}

/// HTTP client for diagram fetches
pub struct EngineClient {
    pub config: EngineConfig,
    user_agent: String,
}

impl EngineClient {
    /// Create a new engine client with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let os_platform = std::env::consts::OS;
        let user_agent = format!("flowpath/{} ({})", version, os_platform);

        Self { config, user_agent }
    }

    /// Fetch the diagram XML, unwrapping the JSON response envelope
    #[tracing::instrument(skip(self), fields(url = %self.config.url))]
    pub fn fetch_diagram_xml(&self) -> Result<String> {
        let timeout = Duration::from_secs(self.config.timeout_seconds);

        let response = ureq::get(&self.config.url)
            .set("Accept", "application/json")
            .set("User-Agent", &self.user_agent)
            .timeout(timeout)
            .call();

        match response {
            Ok(res) => {
                let body = res
                    .into_string()
                    .map_err(|e| FlowpathError::fetch(&self.config.url, e))?;
                unwrap_envelope(&body)
            }
            Err(ureq::Error::Status(status, _)) => Err(FlowpathError::EngineStatus {
                status,
                url: self.config.url.clone(),
            }),
            Err(ureq::Error::Transport(e)) => Err(FlowpathError::fetch(&self.config.url, e)),
        }
    }

    /// Fetch with retry using exponential backoff.
    ///
    /// Retries only transport failures and 5xx responses; 4xx and
    /// malformed-envelope failures are returned immediately.
    pub fn fetch_with_retry(&self) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(100 * 2_u64.pow(attempt - 1));
                std::thread::sleep(backoff);
            }

            match self.fetch_diagram_xml() {
                Ok(xml) => return Ok(xml),
                Err(e) if !is_retryable(&e) => return Err(e),
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "fetch_retry");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| FlowpathError::fetch(&self.config.url, "retries exhausted")))
    }
}

fn is_retryable(err: &FlowpathError) -> bool {
    match err {
        FlowpathError::Fetch { .. } => true,
        FlowpathError::EngineStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Extract the diagram XML from the engine's JSON response envelope.
/// A missing, null, or empty field is an error; the caller cannot do
/// anything useful with an empty diagram.
pub fn unwrap_envelope(body: &str) -> Result<String> {
    let root: serde_json::Value = serde_json::from_str(body)?;

    match root.get(ENVELOPE_XML_FIELD) {
        Some(serde_json::Value::String(xml)) if !xml.is_empty() => Ok(xml.clone()),
        _ => Err(FlowpathError::MissingEnvelopeField {
            field: ENVELOPE_XML_FIELD.to_string(),
        }),
    }
}
