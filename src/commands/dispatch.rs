//! Command dispatch logic for flowpath

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use flowpath_core::error::Result;

use super::{dump, nodes, path};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    debug!(elapsed = ?start.elapsed(), "dispatch");

    match &cli.command {
        Commands::Path { from, to } => path::execute(cli, from, to),
        Commands::Nodes => nodes::execute(cli),
        Commands::Dump => dump::execute(cli),
    }
}
