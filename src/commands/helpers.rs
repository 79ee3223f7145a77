//! Shared helpers for diagram loading

use crate::cli::Cli;
use flowpath_core::bpmn::{self, Diagram};
use flowpath_core::client::{EngineClient, EngineConfig};
use flowpath_core::error::Result;

/// Load the raw diagram XML, either from a local file (`--input`) or by
/// fetching it from the engine endpoint. A local file holds bare BPMN
/// XML; only the engine response carries the JSON envelope.
pub fn load_diagram_xml(cli: &Cli) -> Result<String> {
    if let Some(path) = &cli.input {
        tracing::debug!(path = %path.display(), "read_local_diagram");
        return Ok(std::fs::read_to_string(path)?);
    }

    let client = EngineClient::new(engine_config(cli));
    client.fetch_with_retry()
}

/// Load and parse the diagram into flat node/flow lists
pub fn load_diagram(cli: &Cli) -> Result<Diagram> {
    let xml = load_diagram_xml(cli)?;
    bpmn::parse_diagram(&xml)
}

fn engine_config(cli: &Cli) -> EngineConfig {
    let mut config = EngineConfig::from_env();
    if let Some(url) = &cli.url {
        config.url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_seconds = timeout.clamp(5, 300);
    }
    config
}
