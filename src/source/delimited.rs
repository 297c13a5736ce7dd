//! Delimited text (CSV) payroll source.
//!
//! Rows are read with the `csv` crate. Required columns are located by header
//! name, extra columns are ignored, and any `Gross_Pay` column in the input is
//! never read since gross pay is always derived.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::detection::checked_gross_pay;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{PayrollRecord, PayrollTable};

use super::{
    EMPLOYEE_ID_COLUMN, HOURLY_RATE_COLUMN, HOURS_WORKED_COLUMN, REQUIRED_COLUMNS, TableSource,
};

/// Reads a payroll table from a comma-delimited file with a header row.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    path: PathBuf,
}

/// Position of each required column within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    employee_id: usize,
    name: usize,
    department: usize,
    hours_worked: usize,
    hourly_rate: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, origin: &str) -> PayrollResult<Self> {
        let found = REQUIRED_COLUMNS.map(|column| headers.iter().position(|h| h == column));

        match found {
            [
                Some(employee_id),
                Some(name),
                Some(department),
                Some(hours_worked),
                Some(hourly_rate),
            ] => Ok(Self {
                employee_id,
                name,
                department,
                hours_worked,
                hourly_rate,
            }),
            _ => Err(PayrollError::MissingColumns {
                path: origin.to_string(),
                columns: REQUIRED_COLUMNS
                    .iter()
                    .zip(found)
                    .filter(|(_, position)| position.is_none())
                    .map(|(column, _)| column.to_string())
                    .collect(),
            }),
        }
    }
}

impl CsvTableSource {
    /// Creates a source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a payroll table from any reader.
    ///
    /// `origin` names the input in error messages.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_anomaly::source::CsvTableSource;
    ///
    /// let data = "Name,Employee_ID,Department,Hourly_Rate,Hours_Worked\nAda,7,IT,30,40\n";
    /// let table = CsvTableSource::read_from(data.as_bytes(), "inline").unwrap();
    /// assert_eq!(table.records()[0].employee_id, 7);
    /// assert_eq!(table.records()[0].gross_pay.to_string(), "1200");
    /// ```
    pub fn read_from<R: Read>(reader: R, origin: &str) -> PayrollResult<PayrollTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| source_error(origin, e))?
            .clone();
        if headers.iter().all(str::is_empty) {
            return Err(PayrollError::SourceRead {
                path: origin.to_string(),
                message: "no header row".to_string(),
            });
        }
        let columns = ColumnIndex::from_headers(&headers, origin)?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| source_error(origin, e))?;
            records.push(parse_row(&row, &columns, index + 1)?);
        }

        debug!(origin, rows = records.len(), "Parsed payroll rows");
        Ok(PayrollTable::new(records))
    }
}

impl TableSource for CsvTableSource {
    fn load(&self) -> PayrollResult<PayrollTable> {
        let origin = self.path.display().to_string();
        let file = File::open(&self.path).map_err(|e| source_error(&origin, e))?;
        let table = Self::read_from(file, &origin)?;
        info!(path = %origin, rows = table.len(), "Loaded payroll table");
        Ok(table)
    }
}

fn source_error(origin: &str, error: impl std::fmt::Display) -> PayrollError {
    PayrollError::SourceRead {
        path: origin.to_string(),
        message: error.to_string(),
    }
}

fn field<'r>(row: &'r StringRecord, index: usize) -> &'r str {
    row.get(index).unwrap_or_default()
}

fn coercion_error(row: usize, column: &str, value: &str) -> PayrollError {
    PayrollError::TypeCoercion {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Parses a numeric cell, accepting plain and scientific notation.
///
/// `Decimal` parsing tolerates `_` digit separators; such cells are text, not numbers.
fn parse_decimal(value: &str) -> Option<Decimal> {
    if value.contains('_') {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn parse_row(
    row: &StringRecord,
    columns: &ColumnIndex,
    row_number: usize,
) -> PayrollResult<PayrollRecord> {
    let raw_id = field(row, columns.employee_id);
    let employee_id: i64 = raw_id
        .parse()
        .map_err(|_| coercion_error(row_number, EMPLOYEE_ID_COLUMN, raw_id))?;

    let raw_hours = field(row, columns.hours_worked);
    let hours_worked = parse_decimal(raw_hours)
        .ok_or_else(|| coercion_error(row_number, HOURS_WORKED_COLUMN, raw_hours))?;

    let raw_rate = field(row, columns.hourly_rate);
    let hourly_rate = parse_decimal(raw_rate)
        .ok_or_else(|| coercion_error(row_number, HOURLY_RATE_COLUMN, raw_rate))?;

    if checked_gross_pay(hours_worked, hourly_rate).is_none() {
        return Err(coercion_error(
            row_number,
            HOURLY_RATE_COLUMN,
            &format!("{raw_rate} (gross pay overflows with {raw_hours} hours)"),
        ));
    }

    Ok(PayrollRecord::new(
        employee_id,
        field(row, columns.name),
        field(row, columns.department),
        hours_worked,
        hourly_rate,
    ))
}

/// Writes `table` as a delimited file with the required columns only.
///
/// Gross pay is not written; it is derived again on load.
pub fn write_payroll_csv(table: &PayrollTable, path: &Path) -> PayrollResult<()> {
    let origin = path.display().to_string();
    let sink_error = |e: csv::Error| PayrollError::SinkWrite {
        path: origin.clone(),
        message: e.to_string(),
    };

    let mut writer = WriterBuilder::new().from_path(path).map_err(sink_error)?;
    writer.write_record(REQUIRED_COLUMNS).map_err(sink_error)?;
    for record in table {
        writer
            .write_record([
                record.employee_id.to_string(),
                record.name.clone(),
                record.department.clone(),
                record.hours_worked.to_string(),
                record.hourly_rate.to_string(),
            ])
            .map_err(sink_error)?;
    }
    writer.flush().map_err(|e| PayrollError::SinkWrite {
        path: origin.clone(),
        message: e.to_string(),
    })?;

    debug!(path = %origin, rows = table.len(), "Wrote payroll CSV");
    Ok(())
}
