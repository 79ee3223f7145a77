//! CLI argument parsing for flowpath
//!
//! Global flags cover diagram source selection (--url, --input,
//! --timeout) and output control (--format, --quiet, --verbose).

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use output::OutputFormat;

/// Flowpath - find paths between flow nodes in a BPMN process diagram
#[derive(Parser, Debug)]
#[command(name = "flowpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Engine endpoint URL to fetch the diagram from
    #[arg(long, global = true, env = "FLOWPATH_ENGINE_URL")]
    pub url: Option<String>,

    /// Read diagram XML from a local file instead of fetching
    #[arg(long, short, global = true)]
    pub input: Option<PathBuf>,

    /// Fetch timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log level filter (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find one path between two flow nodes
    Path {
        /// Id of the flow node to start from
        from: String,
        /// Id of the flow node to reach
        to: String,
    },
    /// List the diagram's flow nodes and sequence flows
    Nodes,
    /// Print the raw diagram XML
    Dump,
}
