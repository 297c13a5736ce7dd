//! Reference payroll data used by the demo command and tests.

use rust_decimal::Decimal;

use crate::models::{PayrollRecord, PayrollTable};

/// Returns the five-row reference data set.
///
/// It contains one overtime row (202), one high-rate employee entered twice
/// (203) and two clean rows (201, 204).
pub fn sample_payroll() -> PayrollTable {
    let rows: [(i64, &str, &str, i64, i64); 5] = [
        (201, "John Doe", "IT", 40, 25),
        (202, "Sarah Lee", "Finance", 65, 30),
        (203, "Mike Chan", "IT", 38, 120),
        (203, "Mike Chan", "IT", 38, 120),
        (204, "Jane Park", "HR", 45, 28),
    ];

    rows.into_iter()
        .map(|(id, name, department, hours, rate)| {
            PayrollRecord::new(id, name, department, Decimal::from(hours), Decimal::from(rate))
        })
        .collect::<Vec<_>>()
        .into()
}
