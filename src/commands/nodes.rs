//! Nodes command: list flow nodes and sequence flows

use crate::cli::{Cli, OutputFormat};
use flowpath_core::error::Result;
use flowpath_core::graph::Graph;

use super::helpers;

/// Execute the nodes command
pub fn execute(cli: &Cli) -> Result<()> {
    let diagram = helpers::load_diagram(cli)?;
    let graph = Graph::from_diagram(&diagram)?;

    match cli.format {
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "nodes": graph.node_ids(),
                "flows": diagram.flows,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Human => {
            for id in graph.node_ids() {
                println!("{}", id);
            }
            if cli.verbose {
                for flow in &diagram.flows {
                    println!("{} -> {}", flow.source, flow.target);
                }
            }
        }
    }

    Ok(())
}
