//! Payroll record and table models.
//!
//! This module defines the [`PayrollRecord`] struct for one row of payroll input
//! and the [`PayrollTable`] ordered collection built from a source file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::detection::calculate_gross_pay;

/// One row of payroll data, with its derived gross pay attached.
///
/// Two records are equal only when every field matches, including the derived
/// `gross_pay`. Decimal fields compare by value, so `38` equals `38.0`.
///
/// # Examples
///
/// ```
/// use payroll_anomaly::models::PayrollRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = PayrollRecord::new(
///     202,
///     "Sarah Lee",
///     "Finance",
///     Decimal::from_str("65").unwrap(),
///     Decimal::from_str("30").unwrap(),
/// );
/// assert_eq!(record.gross_pay, Decimal::from_str("1950").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Employee identifier. Not guaranteed unique across rows.
    pub employee_id: i64,
    /// Display name.
    pub name: String,
    /// Department the employee belongs to.
    pub department: String,
    /// Hours worked in the period.
    pub hours_worked: Decimal,
    /// Pay rate in currency units per hour.
    pub hourly_rate: Decimal,
    /// Derived `hours_worked * hourly_rate`. Never read from the source.
    pub gross_pay: Decimal,
}

impl PayrollRecord {
    /// Creates a record, deriving `gross_pay` from hours and rate.
    pub fn new(
        employee_id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        hours_worked: Decimal,
        hourly_rate: Decimal,
    ) -> Self {
        Self {
            employee_id,
            name: name.into(),
            department: department.into(),
            hours_worked,
            hourly_rate,
            gross_pay: calculate_gross_pay(hours_worked, hourly_rate),
        }
    }
}

/// An ordered sequence of payroll records in source row order.
///
/// Employee IDs may repeat; duplicate identities are one of the anomalies
/// the detector looks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTable {
    records: Vec<PayrollRecord>,
}

impl PayrollTable {
    /// Creates a table from records already in source order.
    pub fn new(records: Vec<PayrollRecord>) -> Self {
        Self { records }
    }

    /// Returns the records in source order.
    pub fn records(&self) -> &[PayrollRecord] {
        &self.records
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, PayrollRecord> {
        self.records.iter()
    }
}

impl From<Vec<PayrollRecord>> for PayrollTable {
    fn from(records: Vec<PayrollRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a PayrollTable {
    type Item = &'a PayrollRecord;
    type IntoIter = std::slice::Iter<'a, PayrollRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
