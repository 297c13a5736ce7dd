//! Report sinks.
//!
//! A [`ReportSink`] persists the full payroll table and the anomaly report.
//! The shipped sink writes a two-sheet spreadsheet: "Payroll Data" with every
//! row and "Anomalies" with the flagged subset, both with the same columns.

mod layout;
mod workbook;

pub use layout::{
    ANOMALIES_SHEET, CellValue, PAYROLL_DATA_SHEET, REPORT_COLUMNS, SheetData, report_sheets,
    sheet_rows,
};
pub use workbook::XlsxReportSink;

use crate::error::PayrollResult;
use crate::models::{AnomalyReport, PayrollTable};

/// Persists a finished analysis.
pub trait ReportSink {
    /// Writes the full table and the anomaly report. A failure leaves no
    /// output that could be mistaken for a complete report.
    fn write_report(&self, table: &PayrollTable, report: &AnomalyReport) -> PayrollResult<()>;
}
