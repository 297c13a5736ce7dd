//! End-to-end analysis: load, evaluate, write, return.

use std::path::Path;

use tracing::info;
use uuid::Uuid;

use crate::detection::AnomalyEvaluator;
use crate::error::PayrollResult;
use crate::models::{AnomalyReport, RunSummary};
use crate::sink::{ReportSink, XlsxReportSink};
use crate::source::{CsvTableSource, TableSource};

/// The outcome of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    /// Counts and metadata for the run.
    pub summary: RunSummary,
    /// The flagged records.
    pub report: AnomalyReport,
}

/// Loads a table from `source`, evaluates it, and writes both sheets to `sink`.
///
/// Nothing is written if loading fails, and the report is only returned once
/// the sink has succeeded.
pub fn run_analysis<S, K>(source: &S, sink: &K) -> PayrollResult<AnalysisRun>
where
    S: TableSource + ?Sized,
    K: ReportSink + ?Sized,
{
    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, "Starting payroll analysis");

    let table = source.load()?;
    let report = AnomalyEvaluator::new().evaluate(&table);
    sink.write_report(&table, &report)?;

    let summary = RunSummary::new(run_id, table.len(), &report);
    info!(
        run_id = %run_id,
        rows = summary.total_records,
        anomalies = summary.anomaly_count,
        "Payroll analysis complete"
    );

    Ok(AnalysisRun { summary, report })
}

/// Analyses the CSV file at `input` into the xlsx workbook at `output`,
/// returning the report together with its run summary.
pub fn analyze_payroll_file(input: &Path, output: &Path) -> PayrollResult<AnalysisRun> {
    run_analysis(&CsvTableSource::new(input), &XlsxReportSink::new(output))
}

/// Analyses the CSV file at `input` and writes the xlsx report to `output`.
///
/// # Example
///
/// ```no_run
/// use payroll_anomaly::pipeline::analyze_payroll;
///
/// let report = analyze_payroll("payroll_with_anomalies.csv", "payroll_anomalies.xlsx")?;
/// println!("Detected Payroll Anomalies:\n{report}");
/// # Ok::<(), payroll_anomaly::error::PayrollError>(())
/// ```
pub fn analyze_payroll(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> PayrollResult<AnomalyReport> {
    analyze_payroll_file(input.as_ref(), output.as_ref()).map(|run| run.report)
}
