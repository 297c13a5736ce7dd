//! Spreadsheet (xlsx) report sink.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{AnomalyReport, PayrollTable};

use super::ReportSink;
use super::layout::{CellValue, REPORT_COLUMNS, SheetData, report_sheets};

/// Largest integer magnitude a spreadsheet number cell holds exactly.
///
/// Cells are IEEE 754 doubles; employee IDs beyond this are written as text so
/// the stored value matches the input digit for digit.
pub const MAX_EXACT_INTEGER_CELL: u64 = 1 << 53;

/// Writes the report as an `.xlsx` workbook.
///
/// The workbook is serialised in memory and written to a hidden sibling file,
/// which is renamed onto the output path only once it is complete.
#[derive(Debug, Clone)]
pub struct XlsxReportSink {
    path: PathBuf,
}

impl XlsxReportSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialises both sheets into xlsx bytes.
    pub fn render(&self, table: &PayrollTable, report: &AnomalyReport) -> PayrollResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in report_sheets(table, report) {
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, &sheet, &header_format).map_err(|e| self.write_error(e))?;
        }

        workbook.save_to_buffer().map_err(|e| self.write_error(e))
    }

    fn write_error(&self, error: impl std::fmt::Display) -> PayrollError {
        PayrollError::SinkWrite {
            path: self.path.display().to_string(),
            message: error.to_string(),
        }
    }

    fn staging_path(&self) -> PayrollResult<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| self.write_error("output path has no file name"))?;
        let mut staged = std::ffi::OsString::from(".");
        staged.push(file_name);
        staged.push(".partial");
        Ok(self.path.with_file_name(staged))
    }
}

fn discard_staging(staging: &Path) {
    if let Err(cleanup) = fs::remove_file(staging) {
        warn!(path = %staging.display(), error = %cleanup, "Failed to remove staging file");
    }
}

impl ReportSink for XlsxReportSink {
    fn write_report(&self, table: &PayrollTable, report: &AnomalyReport) -> PayrollResult<()> {
        let bytes = self.render(table, report)?;
        let staging = self.staging_path()?;

        if let Err(e) = fs::write(&staging, &bytes) {
            if staging.is_file() {
                discard_staging(&staging);
            }
            return Err(self.write_error(e));
        }
        if let Err(e) = fs::rename(&staging, &self.path) {
            discard_staging(&staging);
            return Err(self.write_error(e));
        }

        info!(
            path = %self.path.display(),
            rows = table.len(),
            anomalies = report.len(),
            bytes = bytes.len(),
            "Wrote anomaly workbook"
        );
        Ok(())
    }
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &SheetData,
    header_format: &Format,
) -> Result<(), XlsxError> {
    worksheet.set_name(sheet.name)?;

    for (col, header) in (0u16..).zip(REPORT_COLUMNS) {
        worksheet.write_string_with_format(0, col, header, header_format)?;
    }

    for (row, cells) in (1u32..).zip(&sheet.rows) {
        for (col, cell) in (0u16..).zip(cells) {
            match cell {
                CellValue::Integer(value) if value.unsigned_abs() > MAX_EXACT_INTEGER_CELL => {
                    worksheet.write_string(row, col, value.to_string())?;
                }
                CellValue::Integer(value) => {
                    worksheet.write_number(row, col, *value as f64)?;
                }
                CellValue::Number(value) => {
                    let number = value.to_f64().ok_or_else(|| {
                        XlsxError::ParameterError(format!("{value} is not representable"))
                    })?;
                    worksheet.write_number(row, col, number)?;
                }
                CellValue::Text(value) => {
                    worksheet.write_string(row, col, value)?;
                }
            }
        }
    }
    Ok(())
}
