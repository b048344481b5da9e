//! Overhead allocation and the full hourly cost rate.
//!
//! The three allocators are pure and zero-safe: a zero divisor means "no
//! data yet" and yields a zero share rather than an error.

use rust_decimal::Decimal;

/// Statutory monthly working hours used to derive hourly rates.
pub const STATUTORY_MONTHLY_HOURS: Decimal = Decimal::from_parts(240, 0, 0, false, 0);

/// Splits a cost evenly over headcount. Returns 0 for an empty practice.
///
/// # Examples
///
/// ```
/// use comp_engine::calculation::allocate_per_employee;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     allocate_per_employee(Decimal::from(90000), 30),
///     Decimal::from(3000)
/// );
/// assert_eq!(allocate_per_employee(Decimal::from(90000), 0), Decimal::ZERO);
/// ```
pub fn allocate_per_employee(total: Decimal, headcount: u32) -> Decimal {
    if headcount == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(headcount)
    }
}

/// Splits a cost over total work hours. Returns 0 when no hours exist.
pub fn allocate_per_hour(total: Decimal, total_work_hours: Decimal) -> Decimal {
    if total_work_hours <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        total / total_work_hours
    }
}

/// Splits a cost over total revenue. Returns 0 when no revenue exists.
pub fn allocate_per_revenue(total: Decimal, total_revenue: Decimal) -> Decimal {
    if total_revenue <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        total / total_revenue
    }
}

/// Computes an employee's fully loaded hourly cost rate for a month.
///
/// The rate is the monthly base salary plus regular-payment salary items
/// over the statutory 240 hours, plus this employee's share of the
/// per-employee-allocated overhead over the same 240 hours.
pub fn full_hourly_cost_rate(
    base_monthly_salary: Decimal,
    regular_items_total: Decimal,
    per_employee_overhead_total: Decimal,
    headcount: u32,
) -> Decimal {
    let salary_rate = (base_monthly_salary + regular_items_total) / STATUTORY_MONTHLY_HOURS;
    let overhead_rate =
        allocate_per_employee(per_employee_overhead_total, headcount) / STATUTORY_MONTHLY_HOURS;
    salary_rate + overhead_rate
}
