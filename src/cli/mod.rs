//! CLI module for the payroll anomaly detector
//!
//! Provides command-line interface for:
//! - analyze: Analyse a payroll CSV into an xlsx report
//! - demo: Generate the reference data set and analyse it

mod args;
mod commands;
mod logging;

pub use args::{Cli, Command};
pub use commands::{DEMO_INPUT_FILE, DEMO_OUTPUT_FILE, demo, run_command};
pub use logging::init_logging;

use crate::error::PayrollResult;

/// Parse arguments, install logging and run the selected command.
pub fn run() -> PayrollResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.log_json);
    run_command(cli.command)
}
