//! High hourly rate detection.
//!
//! Flags rows paid at a suspiciously high hourly rate.

use rust_decimal::Decimal;

use crate::models::{AnomalyRule, AuditStep, PayrollRecord, PayrollTable, RuleMatch};

use super::matches::{RuleDetection, rows_matching};

/// Hourly rate ceiling. Rows strictly above it are flagged.
pub const HIGH_RATE_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Returns true if the record's hourly rate exceeds [`HIGH_RATE_THRESHOLD`].
pub fn is_high_hourly_rate(record: &PayrollRecord) -> bool {
    record.hourly_rate > HIGH_RATE_THRESHOLD
}

/// Finds every row with a high hourly rate, in table order.
///
/// # Examples
///
/// ```
/// use payroll_anomaly::detection::detect_high_hourly_rate;
/// use payroll_anomaly::models::{PayrollRecord, PayrollTable};
/// use rust_decimal::Decimal;
///
/// let table = PayrollTable::new(vec![
///     PayrollRecord::new(1, "A", "IT", Decimal::from(38), Decimal::from(100)),
///     PayrollRecord::new(2, "B", "IT", Decimal::from(38), Decimal::from(120)),
/// ]);
/// let result = detect_high_hourly_rate(&table, 2);
/// assert_eq!(result.rule_match.row_indices, vec![1]);
/// ```
pub fn detect_high_hourly_rate(table: &PayrollTable, step_number: u32) -> RuleDetection {
    let row_indices = rows_matching(table, is_high_hourly_rate);
    let audit_step = high_hourly_rate_audit_step(table, &row_indices, step_number);

    RuleDetection {
        rule_match: RuleMatch {
            rule: AnomalyRule::HighHourlyRate,
            row_indices,
        },
        audit_step,
    }
}

/// Builds the audit step for a high rate pass that matched `row_indices`.
pub(crate) fn high_hourly_rate_audit_step(
    table: &PayrollTable,
    row_indices: &[usize],
    step_number: u32,
) -> AuditStep {
    let rule = AnomalyRule::HighHourlyRate;
    AuditStep {
        step_number,
        rule_id: rule.id().to_string(),
        rule_name: rule.name().to_string(),
        input: serde_json::json!({
            "rows": table.len(),
            "threshold_rate": HIGH_RATE_THRESHOLD.to_string()
        }),
        output: serde_json::json!({ "matched_rows": row_indices }),
        reasoning: format!(
            "{} of {} rows paid above ${}/hr",
            row_indices.len(),
            table.len(),
            HIGH_RATE_THRESHOLD
        ),
    }
}
