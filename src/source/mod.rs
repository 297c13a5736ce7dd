//! Payroll table sources.
//!
//! A [`TableSource`] loads a [`PayrollTable`] from somewhere outside the detector.
//! The only shipped source reads delimited text files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_anomaly::source::{CsvTableSource, TableSource};
//!
//! let table = CsvTableSource::new("payroll_with_anomalies.csv").load()?;
//! println!("Loaded {} rows", table.len());
//! # Ok::<(), payroll_anomaly::error::PayrollError>(())
//! ```

mod delimited;

pub use delimited::{CsvTableSource, write_payroll_csv};

use crate::error::PayrollResult;
use crate::models::PayrollTable;

/// Column holding the employee identifier.
pub const EMPLOYEE_ID_COLUMN: &str = "Employee_ID";
/// Column holding the display name.
pub const NAME_COLUMN: &str = "Name";
/// Column holding the department.
pub const DEPARTMENT_COLUMN: &str = "Department";
/// Column holding hours worked.
pub const HOURS_WORKED_COLUMN: &str = "Hours_Worked";
/// Column holding the hourly rate.
pub const HOURLY_RATE_COLUMN: &str = "Hourly_Rate";

/// Columns every source must provide. Order in the file is not significant.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    EMPLOYEE_ID_COLUMN,
    NAME_COLUMN,
    DEPARTMENT_COLUMN,
    HOURS_WORKED_COLUMN,
    HOURLY_RATE_COLUMN,
];

/// Loads a payroll table, preserving source row order.
pub trait TableSource {
    /// Reads the whole table. Any malformed row aborts the load.
    fn load(&self) -> PayrollResult<PayrollTable>;
}

impl TableSource for PayrollTable {
    fn load(&self) -> PayrollResult<PayrollTable> {
        Ok(self.clone())
    }
}
