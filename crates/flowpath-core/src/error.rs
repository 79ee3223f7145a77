//! Error types and exit codes for flowpath
//!
//! Exit codes:
//! - 0: Success (including "no path found", which is a result, not an error)
//! - 1: Generic failure (fetch, parse, IO)
//! - 2: Usage error (bad flags/args)
//! - 3: Data error (unknown node id, malformed diagram graph)

use thiserror::Error;

/// Exit codes for the flowpath CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unknown node, malformed graph (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during flowpath operations
#[derive(Error, Debug)]
pub enum FlowpathError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("flow node not found in diagram: {id}")]
    NodeNotFound { id: String },

    #[error("malformed graph: sequence flow {source_id} -> {target} references unknown node {unknown}")]
    MalformedGraph {
        // Named `source_id` rather than `source` because thiserror treats a
        // field named `source` as the error's source, which must impl Error.
        source_id: String,
        target: String,
        unknown: String,
    },

    #[error("invalid node id: {reason}")]
    InvalidNodeId { reason: String },

    // Generic failures (exit code 1)
    #[error("failed to fetch diagram from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("engine returned HTTP {status} for {url}")]
    EngineStatus { status: u16, url: String },

    #[error("response envelope is missing the {field} field")]
    MissingEnvelopeField { field: String },

    #[error("invalid BPMN diagram: {reason}")]
    InvalidDiagram { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl FlowpathError {
    /// Create an error for an invalid BPMN document
    pub fn invalid_diagram(reason: impl std::fmt::Display) -> Self {
        FlowpathError::InvalidDiagram {
            reason: reason.to_string(),
        }
    }

    /// Create an error for a failed fetch
    pub fn fetch(url: &str, reason: impl std::fmt::Display) -> Self {
        FlowpathError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            FlowpathError::UnknownFormat(_) | FlowpathError::UsageError(_) => ExitCode::Usage,

            // Data errors
            FlowpathError::NodeNotFound { .. }
            | FlowpathError::MalformedGraph { .. }
            | FlowpathError::InvalidNodeId { .. } => ExitCode::Data,

            // Generic failures
            FlowpathError::Fetch { .. }
            | FlowpathError::EngineStatus { .. }
            | FlowpathError::MissingEnvelopeField { .. }
            | FlowpathError::InvalidDiagram { .. }
            | FlowpathError::Io(_)
            | FlowpathError::Json(_)
            | FlowpathError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier used in the JSON error envelope
    fn error_type(&self) -> &'static str {
        match self {
            FlowpathError::UnknownFormat(_) => "unknown_format",
            FlowpathError::UsageError(_) => "usage_error",
            FlowpathError::NodeNotFound { .. } => "node_not_found",
            FlowpathError::MalformedGraph { .. } => "malformed_graph",
            FlowpathError::InvalidNodeId { .. } => "invalid_node_id",
            FlowpathError::Fetch { .. } => "fetch_error",
            FlowpathError::EngineStatus { .. } => "engine_status",
            FlowpathError::MissingEnvelopeField { .. } => "missing_envelope_field",
            FlowpathError::InvalidDiagram { .. } => "invalid_diagram",
            FlowpathError::Io(_) => "io_error",
            FlowpathError::Json(_) => "json_error",
            FlowpathError::Other(_) => "other",
        }
    }

    /// Render this error as the structured JSON envelope emitted on stderr
    /// when the user asked for `--format json`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        })
    }
}

/// Result type alias for flowpath operations
pub type Result<T> = std::result::Result<T, FlowpathError>;
