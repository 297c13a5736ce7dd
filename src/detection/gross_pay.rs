//! Gross pay derivation.
//!
//! Gross pay is a row-local value: hours worked multiplied by the hourly rate,
//! with no rounding and no dependency on any other row.

use rust_decimal::Decimal;

/// Calculates gross pay as `hours_worked * hourly_rate`.
///
/// The multiplication is exact; callers are expected to have rejected inputs
/// whose product cannot be represented (see [`checked_gross_pay`]).
///
/// # Examples
///
/// ```
/// use payroll_anomaly::detection::calculate_gross_pay;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let gross = calculate_gross_pay(
///     Decimal::from_str("37.5").unwrap(),
///     Decimal::from_str("28.54").unwrap(),
/// );
/// assert_eq!(gross, Decimal::from_str("1070.25").unwrap());
/// ```
pub fn calculate_gross_pay(hours_worked: Decimal, hourly_rate: Decimal) -> Decimal {
    hours_worked * hourly_rate
}

/// Calculates gross pay, returning `None` if the product overflows.
pub fn checked_gross_pay(hours_worked: Decimal, hourly_rate: Decimal) -> Option<Decimal> {
    hours_worked.checked_mul(hourly_rate)
}
