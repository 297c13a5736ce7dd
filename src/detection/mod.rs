//! Anomaly detection logic for the payroll anomaly detector.
//!
//! This module contains gross pay derivation, the three fixed rule predicates
//! (excessive hours, high hourly rate, duplicate employee ID) and the evaluator
//! that unions their matches into a deduplicated report.

mod duplicate_id;
mod evaluator;
mod excessive_hours;
mod gross_pay;
mod high_rate;
mod matches;

pub use duplicate_id::{
    EmployeeIdCounts, detect_duplicate_employee_ids, employee_id_counts, is_duplicate_employee_id,
};
pub use evaluator::{AnomalyEvaluator, DEDUPE_STEP_ID, evaluate, matching_rules};
pub use excessive_hours::{EXCESSIVE_HOURS_THRESHOLD, detect_excessive_hours, is_excessive_hours};
pub use gross_pay::{calculate_gross_pay, checked_gross_pay};
pub use high_rate::{HIGH_RATE_THRESHOLD, detect_high_hourly_rate, is_high_hourly_rate};
pub use matches::RuleDetection;
