//! Anomaly evaluation over a whole payroll table.
//!
//! The evaluator runs every rule in [`AnomalyRule::ALL`] order, concatenates the
//! matched rows, then drops records that are field-wise identical to one already
//! kept. Records that share only an employee ID stay as separate entries.

use std::collections::HashSet;

use tracing::debug;

use crate::models::{
    AnomalyReport, AnomalyRule, AuditStep, DetectionTrace, FlaggedRecord, PayrollRecord,
    PayrollTable, RuleMatch,
};

use super::duplicate_id::{
    EmployeeIdCounts, duplicate_employee_id_audit_step, employee_id_counts,
};
use super::excessive_hours::excessive_hours_audit_step;
use super::high_rate::high_hourly_rate_audit_step;
use super::matches::{RuleDetection, rows_matching};

/// Identifier of the dedupe stage in the detection trace.
pub const DEDUPE_STEP_ID: &str = "full_row_dedupe";

/// Evaluates the fixed anomaly rules over a payroll table.
///
/// The evaluator holds no state; every call works on the table it is given.
///
/// # Example
///
/// ```
/// use payroll_anomaly::detection::AnomalyEvaluator;
/// use payroll_anomaly::sample::sample_payroll;
///
/// let report = AnomalyEvaluator::new().evaluate(&sample_payroll());
/// let names: Vec<&str> = report.records().map(|r| r.name.as_str()).collect();
/// assert_eq!(names, vec!["Sarah Lee", "Mike Chan"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyEvaluator;

impl AnomalyEvaluator {
    /// Creates an evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Runs every rule over `table` and returns the deduplicated report.
    ///
    /// Gross pay is already attached to each record when the table is built,
    /// so this pass only reads the table.
    pub fn evaluate(&self, table: &PayrollTable) -> AnomalyReport {
        let counts = employee_id_counts(table);

        let detections: Vec<RuleDetection> = AnomalyRule::ALL
            .iter()
            .zip(1u32..)
            .map(|(&rule, step_number)| detect_rule(rule, table, &counts, step_number))
            .collect();

        let concatenated: Vec<usize> = detections
            .iter()
            .flat_map(|d| d.rule_match.row_indices.iter().copied())
            .collect();

        let mut seen: HashSet<&PayrollRecord> = HashSet::with_capacity(concatenated.len());
        let mut entries = Vec::new();
        for &row_index in &concatenated {
            let record = &table.records()[row_index];
            if seen.insert(record) {
                entries.push(FlaggedRecord {
                    row_index,
                    record: record.clone(),
                    rules: matching_rules(record, &counts),
                });
            }
        }

        let dedupe_step = AuditStep {
            step_number: detections.len() as u32 + 1,
            rule_id: DEDUPE_STEP_ID.to_string(),
            rule_name: "Full Row Dedupe".to_string(),
            input: serde_json::json!({ "concatenated_rows": concatenated.len() }),
            output: serde_json::json!({
                "kept_rows": entries.iter().map(|e| e.row_index).collect::<Vec<_>>()
            }),
            reasoning: format!(
                "{} matched rows collapsed to {} distinct records",
                concatenated.len(),
                entries.len()
            ),
        };

        debug!(
            rows = table.len(),
            matched = concatenated.len(),
            distinct = entries.len(),
            "Evaluated anomaly rules"
        );

        let mut steps = Vec::with_capacity(detections.len() + 1);
        let mut matches = Vec::with_capacity(detections.len());
        for detection in detections {
            steps.push(detection.audit_step);
            matches.push(detection.rule_match);
        }
        steps.push(dedupe_step);

        AnomalyReport {
            entries,
            matches,
            trace: DetectionTrace { steps },
        }
    }
}

/// Evaluates `table` with a default [`AnomalyEvaluator`].
pub fn evaluate(table: &PayrollTable) -> AnomalyReport {
    AnomalyEvaluator::new().evaluate(table)
}

/// Returns every rule `record` satisfies, in evaluation order.
pub fn matching_rules(record: &PayrollRecord, counts: &EmployeeIdCounts) -> Vec<AnomalyRule> {
    AnomalyRule::ALL
        .into_iter()
        .filter(|rule| rule.matches(record, counts))
        .collect()
}

/// Runs one rule over `table`, recording its matches and audit step.
fn detect_rule(
    rule: AnomalyRule,
    table: &PayrollTable,
    counts: &EmployeeIdCounts,
    step_number: u32,
) -> RuleDetection {
    let row_indices = rows_matching(table, |record| rule.matches(record, counts));
    let audit_step = match rule {
        AnomalyRule::ExcessiveHours => excessive_hours_audit_step(table, &row_indices, step_number),
        AnomalyRule::HighHourlyRate => {
            high_hourly_rate_audit_step(table, &row_indices, step_number)
        }
        AnomalyRule::DuplicateEmployeeId => {
            duplicate_employee_id_audit_step(table, counts, &row_indices, step_number)
        }
    };

    RuleDetection {
        rule_match: RuleMatch { rule, row_indices },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_payroll;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(id: i64, name: &str, hours: &str, rate: &str) -> PayrollRecord {
        PayrollRecord::new(id, name, "IT", dec(hours), dec(rate))
    }

    #[test]
    fn test_reference_scenario() {
        let report = evaluate(&sample_payroll());

        assert_eq!(report.len(), 2);
        let ids: Vec<i64> = report.records().map(|r| r.employee_id).collect();
        assert_eq!(ids, vec![202, 203]);

        let mike = &report.entries[1];
        assert_eq!(mike.row_index, 2);
        assert_eq!(mike.record.gross_pay, dec("4560"));
        assert_eq!(
            mike.rules,
            vec![AnomalyRule::HighHourlyRate, AnomalyRule::DuplicateEmployeeId]
        );
        assert_eq!(report.entries[0].rules, vec![AnomalyRule::ExcessiveHours]);
    }

    #[test]
    fn test_reference_scenario_rule_matches() {
        let report = evaluate(&sample_payroll());
        assert_eq!(report.matched_rows(AnomalyRule::ExcessiveHours), &[1]);
        assert_eq!(report.matched_rows(AnomalyRule::HighHourlyRate), &[2, 3]);
        assert_eq!(report.matched_rows(AnomalyRule::DuplicateEmployeeId), &[2, 3]);
    }

    #[test]
    fn test_trace_has_one_step_per_rule_plus_dedupe() {
        let report = evaluate(&sample_payroll());
        let ids: Vec<&str> = report.trace.steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "excessive_hours",
                "high_hourly_rate",
                "duplicate_employee_id",
                DEDUPE_STEP_ID
            ]
        );
        let numbers: Vec<u32> = report.trace.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(
            report.trace.steps[3].reasoning,
            "5 matched rows collapsed to 2 distinct records"
        );
    }

    #[test]
    fn test_evaluator_matches_agree_with_rule_detectors() {
        use crate::detection::{
            detect_duplicate_employee_ids, detect_excessive_hours, detect_high_hourly_rate,
        };

        let table = sample_payroll();
        let counts = employee_id_counts(&table);
        let report = evaluate(&table);

        assert_eq!(report.matches[0], detect_excessive_hours(&table, 1).rule_match);
        assert_eq!(report.matches[1], detect_high_hourly_rate(&table, 2).rule_match);
        assert_eq!(
            report.matches[2],
            detect_duplicate_employee_ids(&table, &counts, 3).rule_match
        );
        assert_eq!(
            report.trace.steps[2],
            detect_duplicate_employee_ids(&table, &counts, 3).audit_step
        );
    }

    #[test]
    fn test_empty_table_yields_empty_report() {
        let report = evaluate(&PayrollTable::default());
        assert!(report.is_empty());
        assert_eq!(report.trace.steps.len(), 4);
    }

    #[test]
    fn test_clean_table_yields_empty_report() {
        let table = PayrollTable::new(vec![
            record(1, "A", "40", "25"),
            record(2, "B", "60", "100"),
        ]);
        assert!(evaluate(&table).is_empty());
    }

    #[test]
    fn test_report_orders_by_rule_then_table() {
        // Row 0 only matches the rate rule, row 1 only the hours rule; hours come first.
        let table = PayrollTable::new(vec![
            record(1, "Rate", "10", "150"),
            record(2, "Hours", "70", "20"),
        ]);
        let report = evaluate(&table);
        let names: Vec<&str> = report.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Hours", "Rate"]);
    }

    #[test]
    fn test_multi_rule_record_appears_once_at_first_rule_position() {
        let table = PayrollTable::new(vec![
            record(1, "Plain", "61", "20"),
            record(2, "Both", "61", "150"),
        ]);
        let report = evaluate(&table);
        let names: Vec<&str> = report.records().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Plain", "Both"]);
        assert_eq!(
            report.entries[1].rules,
            vec![AnomalyRule::ExcessiveHours, AnomalyRule::HighHourlyRate]
        );
    }

    #[test]
    fn test_shared_id_with_different_hours_kept_twice() {
        let table = PayrollTable::new(vec![
            record(5, "Alice", "40", "25"),
            record(5, "Alice", "41", "25"),
        ]);
        let report = evaluate(&table);
        assert_eq!(report.len(), 2);
        assert!(report
            .entries
            .iter()
            .all(|e| e.rules == vec![AnomalyRule::DuplicateEmployeeId]));
    }

    #[test]
    fn test_identical_rows_differing_only_in_decimal_scale_collapse() {
        let table = PayrollTable::new(vec![
            record(5, "Alice", "40", "25"),
            record(5, "Alice", "40.0", "25.00"),
        ]);
        assert_eq!(evaluate(&table).len(), 1);
    }

    fn arb_record() -> impl Strategy<Value = PayrollRecord> {
        (
            1i64..8,
            prop::sample::select(vec!["Ann", "Bo", "Cy"]),
            prop::sample::select(vec!["IT", "HR"]),
            0i64..9000,
            0i64..15000,
        )
            .prop_map(|(id, name, dept, hours, rate)| {
                PayrollRecord::new(id, name, dept, Decimal::new(hours, 2), Decimal::new(rate, 2))
            })
    }

    proptest! {
        #[test]
        fn prop_no_field_wise_duplicates(records in prop::collection::vec(arb_record(), 0..30)) {
            let report = evaluate(&PayrollTable::new(records));
            let distinct: HashSet<&PayrollRecord> = report.records().collect();
            prop_assert_eq!(distinct.len(), report.len());
        }

        #[test]
        fn prop_evaluation_is_stable(records in prop::collection::vec(arb_record(), 0..30)) {
            let table = PayrollTable::new(records);
            prop_assert_eq!(evaluate(&table), evaluate(&table));
        }

        #[test]
        fn prop_rules_sound_and_complete(records in prop::collection::vec(arb_record(), 0..30)) {
            let table = PayrollTable::new(records);
            let report = evaluate(&table);
            let counts = employee_id_counts(&table);

            for (index, record) in table.iter().enumerate() {
                let over = record.hours_worked > dec("60");
                let high = record.hourly_rate > dec("100");
                let dup = counts[&record.employee_id] >= 2;

                prop_assert_eq!(report.matched_rows(AnomalyRule::ExcessiveHours).contains(&index), over);
                prop_assert_eq!(report.matched_rows(AnomalyRule::HighHourlyRate).contains(&index), high);
                prop_assert_eq!(report.matched_rows(AnomalyRule::DuplicateEmployeeId).contains(&index), dup);
                prop_assert_eq!(report.records().any(|r| r == record), over || high || dup);
            }
        }

        #[test]
        fn prop_gross_pay_attached(records in prop::collection::vec(arb_record(), 0..30)) {
            let report = evaluate(&PayrollTable::new(records));
            for record in report.records() {
                prop_assert_eq!(record.gross_pay, record.hours_worked * record.hourly_rate);
            }
        }
    }
}
