//! Shared result type for a single rule pass.

use crate::models::{AuditStep, PayrollRecord, PayrollTable, RuleMatch};

/// The result of evaluating one rule over a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDetection {
    /// The rows the rule matched, in table order.
    pub rule_match: RuleMatch,
    /// The audit step recording this pass.
    pub audit_step: AuditStep,
}

/// Returns the indices of the rows satisfying `predicate`, in table order.
pub(crate) fn rows_matching<F>(table: &PayrollTable, predicate: F) -> Vec<usize>
where
    F: Fn(&PayrollRecord) -> bool,
{
    table
        .iter()
        .enumerate()
        .filter(|(_, record)| predicate(*record))
        .map(|(index, _)| index)
        .collect()
}
