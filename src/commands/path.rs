//! Path command: find one path between two flow nodes

use std::time::Instant;

use crate::cli::{Cli, OutputFormat};
use flowpath_core::error::{FlowpathError, Result};
use flowpath_core::graph::{find_path, Graph, PathResult};

use super::helpers;

/// Execute the path command
pub fn execute(cli: &Cli, from: &str, to: &str) -> Result<()> {
    let start = Instant::now();

    let diagram = helpers::load_diagram(cli)?;
    tracing::debug!(
        elapsed = ?start.elapsed(),
        nodes = diagram.nodes.len(),
        flows = diagram.flows.len(),
        "load_diagram"
    );

    let graph = Graph::from_diagram(&diagram)?;

    // Verify both endpoints exist before searching
    if !graph.contains(from) {
        return Err(FlowpathError::NodeNotFound {
            id: from.to_string(),
        });
    }
    if !graph.contains(to) {
        return Err(FlowpathError::NodeNotFound { id: to.to_string() });
    }

    let result = find_path(&graph, from, to)?;

    match cli.format {
        OutputFormat::Json => output_json(&result)?,
        OutputFormat::Human => output_human(cli, &result),
    }

    Ok(())
}

fn output_json(result: &PathResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}

fn output_human(cli: &Cli, result: &PathResult) {
    if result.found {
        println!("{}", result.nodes.join(" -> "));
    } else if !cli.quiet {
        println!("No path found from {} to {}", result.from, result.to);
    }
}
