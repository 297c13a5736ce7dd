//! CLI argument definitions using clap
//!
//! Commands:
//! - payroll-anomaly analyze <INPUT> <OUTPUT>
//! - payroll-anomaly demo [--dir <DIR>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Payroll anomaly detector: flags excessive hours, high rates and duplicate IDs
#[derive(Parser, Debug)]
#[command(name = "payroll-anomaly")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse a payroll CSV file and write a two-sheet xlsx report
    Analyze {
        /// Payroll CSV with Employee_ID, Name, Department, Hours_Worked, Hourly_Rate
        input: PathBuf,

        /// Output workbook path
        output: PathBuf,

        /// Print the run summary as JSON after the report
        #[arg(long)]
        summary_json: bool,
    },

    /// Write the reference payroll data set and analyse it
    Demo {
        /// Directory for payroll_with_anomalies.csv and payroll_anomalies.xlsx
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Print the run summary as JSON after the report
        #[arg(long)]
        summary_json: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
