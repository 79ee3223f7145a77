//! Dump command: print the raw diagram XML

use crate::cli::Cli;
use flowpath_core::error::Result;

use super::helpers;

/// Execute the dump command
pub fn execute(cli: &Cli) -> Result<()> {
    let xml = helpers::load_diagram_xml(cli)?;
    println!("{}", xml);
    Ok(())
}
