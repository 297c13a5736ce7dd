//! Duplicate employee identity detection.
//!
//! An employee ID that appears on two or more rows flags every one of those
//! rows, not only the repeats. Only the ID is compared; names, departments and
//! amounts may differ.

use std::collections::HashMap;

use crate::models::{AnomalyRule, AuditStep, PayrollRecord, PayrollTable, RuleMatch};

use super::matches::{RuleDetection, rows_matching};

/// Occurrence count of each employee ID in a table.
pub type EmployeeIdCounts = HashMap<i64, usize>;

/// Counts how many rows carry each employee ID.
pub fn employee_id_counts(table: &PayrollTable) -> EmployeeIdCounts {
    let mut counts = EmployeeIdCounts::new();
    for record in table {
        *counts.entry(record.employee_id).or_default() += 1;
    }
    counts
}

/// Returns true if the record's employee ID occurs two or more times.
pub fn is_duplicate_employee_id(record: &PayrollRecord, counts: &EmployeeIdCounts) -> bool {
    counts
        .get(&record.employee_id)
        .is_some_and(|&count| count >= 2)
}

/// Finds every row whose employee ID is shared with another row, in table order.
///
/// # Arguments
///
/// * `table` - The payroll table to scan
/// * `counts` - ID occurrence counts for the same table
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_anomaly::detection::{detect_duplicate_employee_ids, employee_id_counts};
/// use payroll_anomaly::models::{PayrollRecord, PayrollTable};
/// use rust_decimal::Decimal;
///
/// let table = PayrollTable::new(vec![
///     PayrollRecord::new(203, "Mike Chan", "IT", Decimal::from(38), Decimal::from(120)),
///     PayrollRecord::new(204, "Jane Park", "HR", Decimal::from(45), Decimal::from(28)),
///     PayrollRecord::new(203, "M. Chan", "IT", Decimal::from(12), Decimal::from(40)),
/// ]);
/// let counts = employee_id_counts(&table);
/// let result = detect_duplicate_employee_ids(&table, &counts, 3);
/// assert_eq!(result.rule_match.row_indices, vec![0, 2]);
/// ```
pub fn detect_duplicate_employee_ids(
    table: &PayrollTable,
    counts: &EmployeeIdCounts,
    step_number: u32,
) -> RuleDetection {
    let row_indices = rows_matching(table, |record| is_duplicate_employee_id(record, counts));
    let audit_step = duplicate_employee_id_audit_step(table, counts, &row_indices, step_number);

    RuleDetection {
        rule_match: RuleMatch {
            rule: AnomalyRule::DuplicateEmployeeId,
            row_indices,
        },
        audit_step,
    }
}

/// Builds the audit step for a duplicate ID pass that matched `row_indices`.
pub(crate) fn duplicate_employee_id_audit_step(
    table: &PayrollTable,
    counts: &EmployeeIdCounts,
    row_indices: &[usize],
    step_number: u32,
) -> AuditStep {
    let rule = AnomalyRule::DuplicateEmployeeId;

    let mut duplicated_ids: Vec<i64> = counts
        .iter()
        .filter(|&(_, &count)| count >= 2)
        .map(|(&id, _)| id)
        .collect();
    duplicated_ids.sort_unstable();

    let reasoning = if duplicated_ids.is_empty() {
        "Every employee ID is unique".to_string()
    } else {
        format!(
            "{} employee IDs appear more than once across {} rows",
            duplicated_ids.len(),
            row_indices.len()
        )
    };

    AuditStep {
        step_number,
        rule_id: rule.id().to_string(),
        rule_name: rule.name().to_string(),
        input: serde_json::json!({
            "rows": table.len(),
            "distinct_ids": counts.len()
        }),
        output: serde_json::json!({
            "duplicated_ids": duplicated_ids,
            "matched_rows": row_indices
        }),
        reasoning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(id: i64, name: &str, hours: i64) -> PayrollRecord {
        PayrollRecord::new(id, name, "IT", Decimal::from(hours), Decimal::from(25))
    }

    #[test]
    fn test_counts_every_occurrence() {
        let table = PayrollTable::new(vec![record(1, "A", 8), record(2, "B", 8), record(1, "A", 8)]);
        let counts = employee_id_counts(&table);
        assert_eq!(counts[&1], 2);
        assert_eq!(counts[&2], 1);
    }

    #[test]
    fn test_unique_id_not_flagged() {
        let table = PayrollTable::new(vec![record(1, "A", 8), record(2, "B", 8)]);
        let counts = employee_id_counts(&table);
        let result = detect_duplicate_employee_ids(&table, &counts, 3);
        assert!(result.rule_match.row_indices.is_empty());
        assert_eq!(result.audit_step.reasoning, "Every employee ID is unique");
    }

    #[test]
    fn test_all_occurrences_flagged_including_first() {
        let table = PayrollTable::new(vec![
            record(7, "A", 8),
            record(8, "B", 8),
            record(7, "A", 8),
            record(7, "A", 8),
        ]);
        let counts = employee_id_counts(&table);
        let result = detect_duplicate_employee_ids(&table, &counts, 3);
        assert_eq!(result.rule_match.row_indices, vec![0, 2, 3]);
    }

    #[test]
    fn test_shared_id_with_different_fields_still_flagged() {
        let table = PayrollTable::new(vec![record(5, "Alice", 40), record(5, "Bob", 12)]);
        let counts = employee_id_counts(&table);
        assert!(is_duplicate_employee_id(&table.records()[0], &counts));
        assert!(is_duplicate_employee_id(&table.records()[1], &counts));
    }

    #[test]
    fn test_audit_step_lists_duplicated_ids_sorted() {
        let table = PayrollTable::new(vec![
            record(9, "A", 8),
            record(3, "B", 8),
            record(9, "A", 8),
            record(3, "B", 8),
        ]);
        let counts = employee_id_counts(&table);
        let result = detect_duplicate_employee_ids(&table, &counts, 3);
        assert_eq!(result.audit_step.output["duplicated_ids"], serde_json::json!([3, 9]));
        assert_eq!(
            result.audit_step.reasoning,
            "2 employee IDs appear more than once across 4 rows"
        );
    }
}
