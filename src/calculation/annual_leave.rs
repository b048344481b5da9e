//! Annual-leave entitlement and tenure arithmetic.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::config::AnnualEntitlementTable;

/// Computes full months of service between `hire_date` and `as_of`.
///
/// A month only counts once the day-of-month of the hire date has been
/// reached. Returns 0 when `as_of` precedes the hire date.
///
/// # Examples
///
/// ```
/// use comp_engine::calculation::tenure_months;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
/// let at = NaiveDate::from_ymd_opt(2026, 4, 14).unwrap();
/// assert_eq!(tenure_months(hire, at), 23);
///
/// let at = NaiveDate::from_ymd_opt(2026, 4, 15).unwrap();
/// assert_eq!(tenure_months(hire, at), 24);
/// ```
pub fn tenure_months(hire_date: NaiveDate, as_of: NaiveDate) -> u32 {
    if as_of < hire_date {
        return 0;
    }

    let mut months = (as_of.year() - hire_date.year()) * 12 + as_of.month() as i32
        - hire_date.month() as i32;
    if as_of.day() < hire_date.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Looks up entitled annual-leave days for a tenure in months.
///
/// The greatest step at or below the tenure applies; past the table's
/// extension point each additional full year adds one day, capped at the
/// table's maximum. Tenure below the first step entitles nothing.
pub fn entitled_days(tenure_months: u32, table: &AnnualEntitlementTable) -> Decimal {
    let Some(step) = table
        .steps
        .iter()
        .rev()
        .find(|s| s.min_tenure_months <= tenure_months)
    else {
        return Decimal::ZERO;
    };

    let mut days = step.days;
    if tenure_months > table.extra_day_after_months {
        let extra_years = (tenure_months - table.extra_day_after_months) / 12;
        days += Decimal::from(extra_years);
    }
    days.min(table.max_days)
}
