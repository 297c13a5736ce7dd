//! Run summary model.
//!
//! A [`RunSummary`] describes one analysis run for logs and machine-readable output.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AnomalyReport, AnomalyRule};

/// Metadata and counts for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run completed.
    pub generated_at: DateTime<Utc>,
    /// The version of the detector that produced the report.
    pub engine_version: String,
    /// Number of rows in the payroll table.
    pub total_records: usize,
    /// Number of distinct records in the anomaly report.
    pub anomaly_count: usize,
    /// Source rows matched by each rule before dedupe, keyed by rule id.
    pub rule_matches: BTreeMap<String, usize>,
}

impl RunSummary {
    /// Builds a summary for a finished detection pass.
    pub fn new(run_id: Uuid, total_records: usize, report: &AnomalyReport) -> Self {
        let rule_matches = AnomalyRule::ALL
            .iter()
            .map(|rule| (rule.id().to_string(), report.matched_rows(*rule).len()))
            .collect();

        Self {
            run_id,
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            total_records,
            anomaly_count: report.len(),
            rule_matches,
        }
    }
}
