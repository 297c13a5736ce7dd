//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::error::{PayrollError, PayrollResult};
use crate::pipeline::{AnalysisRun, analyze_payroll_file};
use crate::sample::sample_payroll;
use crate::source::write_payroll_csv;

use super::args::Command;

/// File name of the demo input.
pub const DEMO_INPUT_FILE: &str = "payroll_with_anomalies.csv";
/// File name of the demo report.
pub const DEMO_OUTPUT_FILE: &str = "payroll_anomalies.xlsx";

/// Dispatch a parsed command
pub fn run_command(command: Command) -> PayrollResult<()> {
    match command {
        Command::Analyze {
            input,
            output,
            summary_json,
        } => {
            let run = analyze_payroll_file(&input, &output)?;
            print_run(&run, summary_json)
        }
        Command::Demo { dir, summary_json } => {
            let run = demo(&dir)?;
            print_run(&run, summary_json)
        }
    }
}

/// Write the reference data set under `dir` and analyse it.
pub fn demo(dir: &Path) -> PayrollResult<AnalysisRun> {
    let input = dir.join(DEMO_INPUT_FILE);
    let output = dir.join(DEMO_OUTPUT_FILE);

    write_payroll_csv(&sample_payroll(), &input)?;
    info!(path = %input.display(), "Wrote demo payroll data");

    analyze_payroll_file(&input, &output)
}

fn print_run(run: &AnalysisRun, summary_json: bool) -> PayrollResult<()> {
    let stdout_error = |e: io::Error| PayrollError::SinkWrite {
        path: "<stdout>".to_string(),
        message: e.to_string(),
    };

    let mut out = io::stdout().lock();
    writeln!(out, "Detected Payroll Anomalies:").map_err(stdout_error)?;
    write!(out, "{}", run.report).map_err(stdout_error)?;

    if summary_json {
        let json = serde_json::to_string_pretty(&run.summary).map_err(|e| PayrollError::SinkWrite {
            path: "<stdout>".to_string(),
            message: e.to_string(),
        })?;
        writeln!(out, "{json}").map_err(stdout_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_writes_input_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let run = demo(dir.path()).unwrap();

        assert!(dir.path().join(DEMO_INPUT_FILE).exists());
        assert!(dir.path().join(DEMO_OUTPUT_FILE).exists());
        assert_eq!(run.report.len(), 2);
        assert_eq!(run.summary.total_records, 5);
    }

    #[test]
    fn test_demo_into_missing_directory_is_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = demo(&dir.path().join("absent"));

        assert!(matches!(result, Err(PayrollError::SinkWrite { .. })));
    }
}
