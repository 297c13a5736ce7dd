//! Sheet layout shared by every report sink.

use rust_decimal::Decimal;

use crate::models::{AnomalyReport, PayrollRecord, PayrollTable};
use crate::source::{
    DEPARTMENT_COLUMN, EMPLOYEE_ID_COLUMN, HOURLY_RATE_COLUMN, HOURS_WORKED_COLUMN, NAME_COLUMN,
};

/// Name of the sheet holding every payroll row.
pub const PAYROLL_DATA_SHEET: &str = "Payroll Data";
/// Name of the sheet holding the flagged rows.
pub const ANOMALIES_SHEET: &str = "Anomalies";

/// Header row of both sheets, in column order.
pub const REPORT_COLUMNS: [&str; 6] = [
    EMPLOYEE_ID_COLUMN,
    NAME_COLUMN,
    DEPARTMENT_COLUMN,
    HOURS_WORKED_COLUMN,
    HOURLY_RATE_COLUMN,
    "Gross_Pay",
];

/// A single data cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// An integer cell.
    Integer(i64),
    /// A decimal cell.
    Number(Decimal),
    /// A text cell.
    Text(String),
}

/// One sheet's name and data rows. The header is always [`REPORT_COLUMNS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    /// Sheet name.
    pub name: &'static str,
    /// Data rows, without the header.
    pub rows: Vec<Vec<CellValue>>,
}

/// Lays out records as data rows in [`REPORT_COLUMNS`] order.
pub fn sheet_rows<'a, I>(records: I) -> Vec<Vec<CellValue>>
where
    I: IntoIterator<Item = &'a PayrollRecord>,
{
    records
        .into_iter()
        .map(|record| {
            vec![
                CellValue::Integer(record.employee_id),
                CellValue::Text(record.name.clone()),
                CellValue::Text(record.department.clone()),
                CellValue::Number(record.hours_worked),
                CellValue::Number(record.hourly_rate),
                CellValue::Number(record.gross_pay),
            ]
        })
        .collect()
}

/// Builds both report sheets: the full table first, then the anomalies.
pub fn report_sheets(table: &PayrollTable, report: &AnomalyReport) -> [SheetData; 2] {
    [
        SheetData {
            name: PAYROLL_DATA_SHEET,
            rows: sheet_rows(table),
        },
        SheetData {
            name: ANOMALIES_SHEET,
            rows: sheet_rows(report.records()),
        },
    ]
}
