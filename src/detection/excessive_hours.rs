//! Excessive hours detection.
//!
//! Flags rows whose hours worked in the period exceed a fixed weekly ceiling.

use rust_decimal::Decimal;

use crate::models::{AnomalyRule, AuditStep, PayrollRecord, PayrollTable, RuleMatch};

use super::matches::{RuleDetection, rows_matching};

/// Hours ceiling for a single period. Rows strictly above it are flagged.
pub const EXCESSIVE_HOURS_THRESHOLD: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Returns true if the record's hours exceed [`EXCESSIVE_HOURS_THRESHOLD`].
///
/// # Examples
///
/// ```
/// use payroll_anomaly::detection::is_excessive_hours;
/// use payroll_anomaly::models::PayrollRecord;
/// use rust_decimal::Decimal;
///
/// let at_limit = PayrollRecord::new(1, "A", "IT", Decimal::from(60), Decimal::from(20));
/// let over = PayrollRecord::new(2, "B", "IT", Decimal::from(61), Decimal::from(20));
/// assert!(!is_excessive_hours(&at_limit));
/// assert!(is_excessive_hours(&over));
/// ```
pub fn is_excessive_hours(record: &PayrollRecord) -> bool {
    record.hours_worked > EXCESSIVE_HOURS_THRESHOLD
}

/// Finds every row with excessive hours, in table order.
///
/// # Arguments
///
/// * `table` - The payroll table to scan
/// * `step_number` - The step number for audit trail sequencing
pub fn detect_excessive_hours(table: &PayrollTable, step_number: u32) -> RuleDetection {
    let row_indices = rows_matching(table, is_excessive_hours);
    let audit_step = excessive_hours_audit_step(table, &row_indices, step_number);

    RuleDetection {
        rule_match: RuleMatch {
            rule: AnomalyRule::ExcessiveHours,
            row_indices,
        },
        audit_step,
    }
}

/// Builds the audit step for an excessive hours pass that matched `row_indices`.
pub(crate) fn excessive_hours_audit_step(
    table: &PayrollTable,
    row_indices: &[usize],
    step_number: u32,
) -> AuditStep {
    let rule = AnomalyRule::ExcessiveHours;
    AuditStep {
        step_number,
        rule_id: rule.id().to_string(),
        rule_name: rule.name().to_string(),
        input: serde_json::json!({
            "rows": table.len(),
            "threshold_hours": EXCESSIVE_HOURS_THRESHOLD.to_string()
        }),
        output: serde_json::json!({ "matched_rows": row_indices }),
        reasoning: format!(
            "{} of {} rows worked more than {} hours",
            row_indices.len(),
            table.len(),
            EXCESSIVE_HOURS_THRESHOLD
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record_with_hours(id: i64, hours: &str) -> PayrollRecord {
        PayrollRecord::new(id, "Test", "Ops", dec(hours), dec("25"))
    }

    #[test]
    fn test_threshold_constant() {
        assert_eq!(EXCESSIVE_HOURS_THRESHOLD, dec("60"));
    }

    #[test]
    fn test_exactly_sixty_hours_not_flagged() {
        assert!(!is_excessive_hours(&record_with_hours(1, "60")));
        assert!(!is_excessive_hours(&record_with_hours(1, "60.00")));
    }

    #[test]
    fn test_just_over_sixty_hours_flagged() {
        assert!(is_excessive_hours(&record_with_hours(1, "60.01")));
    }

    #[test]
    fn test_detect_keeps_table_order() {
        let table = PayrollTable::new(vec![
            record_with_hours(1, "65"),
            record_with_hours(2, "40"),
            record_with_hours(3, "80"),
            record_with_hours(4, "60"),
        ]);

        let result = detect_excessive_hours(&table, 1);
        assert_eq!(result.rule_match.rule, AnomalyRule::ExcessiveHours);
        assert_eq!(result.rule_match.row_indices, vec![0, 2]);
    }

    #[test]
    fn test_audit_step_records_threshold_and_matches() {
        let table = PayrollTable::new(vec![record_with_hours(1, "65")]);
        let result = detect_excessive_hours(&table, 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "excessive_hours");
        assert_eq!(result.audit_step.input["threshold_hours"], "60");
        assert_eq!(result.audit_step.output["matched_rows"], serde_json::json!([0]));
        assert_eq!(
            result.audit_step.reasoning,
            "1 of 1 rows worked more than 60 hours"
        );
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let result = detect_excessive_hours(&PayrollTable::default(), 1);
        assert!(result.rule_match.row_indices.is_empty());
    }
}
