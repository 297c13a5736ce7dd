//! Core data models for the payroll anomaly detector.
//!
//! This module contains all the domain models used throughout the detector.

mod anomaly_report;
mod record;
mod run_summary;

pub use anomaly_report::{
    AnomalyReport, AnomalyRule, AuditStep, DetectionTrace, FlaggedRecord, RuleMatch,
};
pub use record::{PayrollRecord, PayrollTable};
pub use run_summary::RunSummary;
