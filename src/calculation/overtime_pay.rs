//! Tiered statutory overtime pay.
//!
//! Overtime pay applies fixed statutory multipliers to the employee's
//! hourly base (monthly salary over 240 hours):
//!
//! - Weekday overtime and rest-day work: first two hours of a day at 4/3,
//!   every hour beyond at 5/3.
//! - National-holiday work: double time, no tiers.
//!
//! Hours are pooled per day within each tier family before the two-hour
//! threshold is applied, so split submissions cannot reset the tier.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{OvertimeCategory, OvertimeFamily, OvertimePayLine, TimeEntry};

/// Hours of a day paid at the first-tier rate before the second tier
/// starts.
pub const OVERTIME_TIER_ONE_THRESHOLD: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// The result of converting a month's overtime entries into pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimePayResult {
    /// One line per (day, tier) with hours, rate, and amount.
    pub lines: Vec<OvertimePayLine>,
    /// Sum over all lines.
    pub total: Decimal,
}

/// Returns the statutory multiplier for an overtime rate tier.
///
/// # Examples
///
/// ```
/// use comp_engine::calculation::overtime_multiplier;
/// use comp_engine::models::OvertimeCategory;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     overtime_multiplier(OvertimeCategory::NationalHoliday),
///     Decimal::from(2)
/// );
/// assert_eq!(
///     overtime_multiplier(OvertimeCategory::WeekdayFirstTwoHours),
///     Decimal::from(4) / Decimal::from(3)
/// );
/// ```
pub fn overtime_multiplier(category: OvertimeCategory) -> Decimal {
    match category {
        OvertimeCategory::WeekdayFirstTwoHours | OvertimeCategory::RestDayFirstTwoHours => {
            Decimal::from(4) / Decimal::from(3)
        }
        OvertimeCategory::WeekdayBeyondTwoHours | OvertimeCategory::RestDayBeyondTwoHours => {
            Decimal::from(5) / Decimal::from(3)
        }
        OvertimeCategory::NationalHoliday => Decimal::from(2),
    }
}

fn tier_categories(family: OvertimeFamily) -> (OvertimeCategory, OvertimeCategory) {
    match family {
        OvertimeFamily::Weekday => (
            OvertimeCategory::WeekdayFirstTwoHours,
            OvertimeCategory::WeekdayBeyondTwoHours,
        ),
        OvertimeFamily::RestDay => (
            OvertimeCategory::RestDayFirstTwoHours,
            OvertimeCategory::RestDayBeyondTwoHours,
        ),
        // Holiday work has no second tier; both slots share the flat rate.
        OvertimeFamily::Holiday => (
            OvertimeCategory::NationalHoliday,
            OvertimeCategory::NationalHoliday,
        ),
    }
}

/// Converts a month's overtime time entries into tiered pay lines.
///
/// Entries are pooled by (date, tier family); the two-hour first tier is
/// applied to the pooled total of each day. Deleted entries and
/// non-overtime work types contribute nothing.
pub fn calculate_overtime_pay(
    entries: &[TimeEntry],
    config: &EngineConfig,
    hourly_base: Decimal,
) -> EngineResult<OvertimePayResult> {
    let mut pooled: BTreeMap<(NaiveDate, OvertimeFamily), Decimal> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.is_active()) {
        let work_type = config.work_type(&entry.work_type)?;
        if !work_type.is_overtime {
            continue;
        }
        let Some(family) = work_type.category.pay_family() else {
            continue;
        };
        *pooled
            .entry((entry.work_date, family))
            .or_insert(Decimal::ZERO) += entry.hours;
    }

    let mut lines = Vec::new();
    let mut total = Decimal::ZERO;

    for ((date, family), hours) in pooled {
        if hours <= Decimal::ZERO {
            continue;
        }
        let (tier_one, tier_two) = tier_categories(family);

        if family == OvertimeFamily::Holiday {
            let rate = hourly_base * overtime_multiplier(tier_one);
            let amount = hours * rate;
            total += amount;
            lines.push(OvertimePayLine {
                date,
                category: tier_one,
                hours,
                rate,
                amount,
            });
            continue;
        }

        let tier_one_hours = hours.min(OVERTIME_TIER_ONE_THRESHOLD);
        let tier_two_hours = (hours - OVERTIME_TIER_ONE_THRESHOLD).max(Decimal::ZERO);

        let rate_one = hourly_base * overtime_multiplier(tier_one);
        let amount_one = tier_one_hours * rate_one;
        total += amount_one;
        lines.push(OvertimePayLine {
            date,
            category: tier_one,
            hours: tier_one_hours,
            rate: rate_one,
            amount: amount_one,
        });

        if tier_two_hours > Decimal::ZERO {
            let rate_two = hourly_base * overtime_multiplier(tier_two);
            let amount_two = tier_two_hours * rate_two;
            total += amount_two;
            lines.push(OvertimePayLine {
                date,
                category: tier_two,
                hours: tier_two_hours,
                rate: rate_two,
                amount: amount_two,
            });
        }
    }

    Ok(OvertimePayResult { lines, total })
}
