//! Compensatory-leave expiry dates and month arithmetic.
//!
//! Expiry is governed by a configurable rule; whichever rule is active,
//! the expiry date is always the last calendar day of the target month.

use chrono::{Datelike, Months, NaiveDate};

use crate::config::ExpiryRule;
use crate::error::{EngineError, EngineResult};

/// Returns the last calendar day of the given month.
///
/// # Examples
///
/// ```
/// use comp_engine::calculation::last_day_of_month;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     last_day_of_month(2026, 2),
///     NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
/// );
/// assert_eq!(
///     last_day_of_month(2026, 12),
///     NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
/// );
/// ```
pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Returns the inclusive (first day, last day) bounds of a calendar month.
///
/// Fails with a validation error for months outside 1-12.
pub fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| EngineError::Validation {
        field: "month".to_string(),
        message: format!("{}-{} is not a valid calendar month", year, month),
    })?;
    Ok((start, last_day_of_month(year, month)))
}

/// Computes the expiry date for a grant earned on `earned_date`.
///
/// The rule names the target month; the result is always that month's
/// last calendar day.
///
/// # Examples
///
/// ```
/// use comp_engine::calculation::expiry_date;
/// use comp_engine::config::ExpiryRule;
/// use chrono::NaiveDate;
///
/// let earned = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
/// assert_eq!(
///     expiry_date(earned, ExpiryRule::CurrentMonth),
///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
/// );
/// assert_eq!(
///     expiry_date(earned, ExpiryRule::ThreeMonths),
///     NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
/// );
/// ```
pub fn expiry_date(earned_date: NaiveDate, rule: ExpiryRule) -> NaiveDate {
    let months_ahead = match rule {
        ExpiryRule::CurrentMonth => 0,
        ExpiryRule::NextMonth => 1,
        ExpiryRule::ThreeMonths => 3,
        ExpiryRule::SixMonths => 6,
    };

    let target = earned_date
        .checked_add_months(Months::new(months_ahead))
        .unwrap_or(earned_date);
    last_day_of_month(target.year(), target.month())
}
