//! Anomaly report models.
//!
//! This module contains the [`AnomalyReport`] type and its associated structures
//! that capture the outcome of one detection pass: the flagged records in report
//! order, the per-rule matches, and an audit trace of every decision.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detection::{
    EmployeeIdCounts, is_duplicate_employee_id, is_excessive_hours, is_high_hourly_rate,
};

use super::PayrollRecord;

/// One of the fixed anomaly rules.
///
/// Rules are evaluated in the order of [`AnomalyRule::ALL`], which also decides
/// the order of the final report.
///
/// # Example
///
/// ```
/// use payroll_anomaly::models::AnomalyRule;
///
/// assert_eq!(AnomalyRule::ExcessiveHours.id(), "excessive_hours");
/// assert_eq!(AnomalyRule::ALL.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyRule {
    /// More than 60 hours worked in the period.
    ExcessiveHours,
    /// Hourly rate above 100.
    HighHourlyRate,
    /// Employee ID shared by two or more rows.
    DuplicateEmployeeId,
}

impl AnomalyRule {
    /// All rules in evaluation order.
    pub const ALL: [AnomalyRule; 3] = [
        AnomalyRule::ExcessiveHours,
        AnomalyRule::HighHourlyRate,
        AnomalyRule::DuplicateEmployeeId,
    ];

    /// Stable machine-readable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::ExcessiveHours => "excessive_hours",
            Self::HighHourlyRate => "high_hourly_rate",
            Self::DuplicateEmployeeId => "duplicate_employee_id",
        }
    }

    /// Human-readable rule name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ExcessiveHours => "Excessive Hours",
            Self::HighHourlyRate => "High Hourly Rate",
            Self::DuplicateEmployeeId => "Duplicate Employee ID",
        }
    }

    /// Returns true if `record` satisfies this rule.
    ///
    /// `counts` must hold the employee ID occurrences of the table `record`
    /// belongs to; only the duplicate ID rule reads it.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_anomaly::detection::employee_id_counts;
    /// use payroll_anomaly::models::AnomalyRule;
    /// use payroll_anomaly::sample::sample_payroll;
    ///
    /// let table = sample_payroll();
    /// let counts = employee_id_counts(&table);
    /// let mike = &table.records()[2];
    /// assert!(!AnomalyRule::ExcessiveHours.matches(mike, &counts));
    /// assert!(AnomalyRule::HighHourlyRate.matches(mike, &counts));
    /// assert!(AnomalyRule::DuplicateEmployeeId.matches(mike, &counts));
    /// ```
    pub fn matches(&self, record: &PayrollRecord, counts: &EmployeeIdCounts) -> bool {
        match self {
            Self::ExcessiveHours => is_excessive_hours(record),
            Self::HighHourlyRate => is_high_hourly_rate(record),
            Self::DuplicateEmployeeId => is_duplicate_employee_id(record, counts),
        }
    }
}

impl fmt::Display for AnomalyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// The source rows one rule matched, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMatch {
    /// The rule that was evaluated.
    pub rule: AnomalyRule,
    /// 0-based indices into the payroll table.
    pub row_indices: Vec<usize>,
}

/// A record kept in the anomaly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedRecord {
    /// 0-based source row of the first occurrence of this record.
    pub row_index: usize,
    /// The flagged record.
    pub record: PayrollRecord,
    /// Every rule the record satisfies, in evaluation order.
    pub rules: Vec<AnomalyRule>,
}

/// A single step in the detection trace.
///
/// Each step captures the input, output, and reasoning for one rule pass or
/// for the final dedupe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule or stage that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule or stage.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionTrace {
    /// The sequence of detection steps.
    pub steps: Vec<AuditStep>,
}

/// The records flagged by one detection pass.
///
/// Entries appear in rule evaluation order: every excessive-hours match first,
/// then high-rate matches, then duplicate-ID matches, with field-wise identical
/// records collapsed onto their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Flagged records in report order.
    pub entries: Vec<FlaggedRecord>,
    /// The rows each rule matched before dedupe.
    pub matches: Vec<RuleMatch>,
    /// Audit trace of the detection pass.
    pub trace: DetectionTrace,
}

impl AnomalyReport {
    /// Returns the number of distinct flagged records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was flagged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the flagged records in report order.
    pub fn records(&self) -> impl Iterator<Item = &PayrollRecord> {
        self.entries.iter().map(|entry| &entry.record)
    }

    /// Returns the source rows a rule matched, or an empty slice if the rule
    /// was not evaluated.
    pub fn matched_rows(&self, rule: AnomalyRule) -> &[usize] {
        self.matches
            .iter()
            .find(|m| m.rule == rule)
            .map(|m| m.row_indices.as_slice())
            .unwrap_or(&[])
    }
}

const DISPLAY_HEADERS: [&str; 8] = [
    "Row",
    "Employee_ID",
    "Name",
    "Department",
    "Hours_Worked",
    "Hourly_Rate",
    "Gross_Pay",
    "Rules",
];

impl fmt::Display for AnomalyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "Empty report: no anomalies detected");
        }

        let rows: Vec<[String; 8]> = self
            .entries
            .iter()
            .map(|entry| {
                let rules: Vec<&str> = entry.rules.iter().map(|r| r.id()).collect();
                [
                    entry.row_index.to_string(),
                    entry.record.employee_id.to_string(),
                    entry.record.name.clone(),
                    entry.record.department.clone(),
                    entry.record.hours_worked.to_string(),
                    entry.record.hourly_rate.to_string(),
                    entry.record.gross_pay.to_string(),
                    rules.join(","),
                ]
            })
            .collect();

        let mut widths = DISPLAY_HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = DISPLAY_HEADERS
            .iter()
            .zip(widths)
            .map(|(h, w)| format!("{h:<w$}"))
            .collect();
        writeln!(f, "{}", header.join("  ").trim_end())?;

        for row in &rows {
            let line: Vec<String> = row
                .iter()
                .zip(widths)
                .map(|(cell, w)| format!("{cell:<w$}"))
                .collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
        }
        Ok(())
    }
}
