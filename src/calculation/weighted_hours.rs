//! Weighted-hours derivation.
//!
//! For most work types the weighted value is simply hours times the
//! type's rate multiplier. The two within-eight-hours holiday/rest-day
//! types instead carry a statutory floor: any entry up to eight hours is
//! weighted as a full 8.0, and earns 8.0 compensatory hours.

use rust_decimal::Decimal;

use crate::models::WorkType;

/// The statutory weighted-hours floor for the within-eight categories.
pub const STATUTORY_DAILY_FLOOR: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Computes the weighted hours for an entry of `hours` under `work_type`.
///
/// # Examples
///
/// ```
/// use comp_engine::calculation::weighted_hours;
/// use comp_engine::models::{WorkType, WorkTypeCategory};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let overtime = WorkType {
///     name: "Weekday overtime".to_string(),
///     category: WorkTypeCategory::WeekdayOvertime,
///     rate_multiplier: Decimal::from_str("1.34").unwrap(),
///     is_overtime: true,
///     generates_comp_leave: true,
/// };
/// assert_eq!(
///     weighted_hours(&overtime, Decimal::from(2)),
///     Decimal::from_str("2.68").unwrap()
/// );
///
/// let holiday = WorkType {
///     name: "National holiday work (within eight hours)".to_string(),
///     category: WorkTypeCategory::HolidayWithinEight,
///     rate_multiplier: Decimal::from(2),
///     is_overtime: true,
///     generates_comp_leave: true,
/// };
/// // The statutory floor applies regardless of actual hours.
/// assert_eq!(weighted_hours(&holiday, Decimal::from(3)), Decimal::from(8));
/// assert_eq!(weighted_hours(&holiday, Decimal::from(8)), Decimal::from(8));
/// ```
pub fn weighted_hours(work_type: &WorkType, hours: Decimal) -> Decimal {
    if work_type.category.has_statutory_floor() {
        STATUTORY_DAILY_FLOOR
    } else {
        hours * work_type.rate_multiplier
    }
}

/// Computes the compensatory-leave hours an entry earns.
///
/// The within-eight categories earn the full statutory floor; every other
/// qualifying type earns the actual hours worked. Callers are expected to
/// gate on `is_overtime && generates_comp_leave` before accruing.
pub fn comp_leave_hours(work_type: &WorkType, hours: Decimal) -> Decimal {
    if work_type.category.has_statutory_floor() {
        STATUTORY_DAILY_FLOOR
    } else {
        hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkTypeCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_type(category: WorkTypeCategory, multiplier: &str) -> WorkType {
        WorkType {
            name: "test".to_string(),
            category,
            rate_multiplier: dec(multiplier),
            is_overtime: true,
            generates_comp_leave: true,
        }
    }

    // =========================================================================
    // WH-001: regular hours weight at the plain multiplier
    // =========================================================================
    #[test]
    fn test_wh_001_regular_hours_use_multiplier() {
        let wt = make_type(WorkTypeCategory::Regular, "1.0");
        assert_eq!(weighted_hours(&wt, dec("8")), dec("8"));
        assert_eq!(weighted_hours(&wt, dec("0.5")), dec("0.5"));
    }

    // =========================================================================
    // WH-002: overtime multiplier is applied exactly
    // =========================================================================
    #[test]
    fn test_wh_002_overtime_multiplier_applied() {
        let wt = make_type(WorkTypeCategory::WeekdayOvertime, "1.34");
        assert_eq!(weighted_hours(&wt, dec("2")), dec("2.68"));
        assert_eq!(weighted_hours(&wt, dec("1.5")), dec("2.01"));
    }

    // =========================================================================
    // WH-003: statutory floor fixes weighted hours at 8.0
    // =========================================================================
    #[test]
    fn test_wh_003_rest_day_within_eight_floors_at_eight() {
        let wt = make_type(WorkTypeCategory::RestDayWithinEight, "1.34");
        assert_eq!(weighted_hours(&wt, dec("3")), dec("8"));
        assert_eq!(weighted_hours(&wt, dec("8")), dec("8"));
        assert_eq!(weighted_hours(&wt, dec("0.5")), dec("8"));
    }

    #[test]
    fn test_wh_004_holiday_within_eight_floors_at_eight() {
        let wt = make_type(WorkTypeCategory::HolidayWithinEight, "2.0");
        assert_eq!(weighted_hours(&wt, dec("3")), dec("8"));
        assert_eq!(weighted_hours(&wt, dec("6.5")), dec("8"));
    }

    // =========================================================================
    // WH-005: beyond-eight categories do NOT get the floor
    // =========================================================================
    #[test]
    fn test_wh_005_beyond_eight_uses_multiplier() {
        let rest = make_type(WorkTypeCategory::RestDayBeyondEight, "1.67");
        assert_eq!(weighted_hours(&rest, dec("2")), dec("3.34"));

        let holiday = make_type(WorkTypeCategory::HolidayBeyondEight, "2.0");
        assert_eq!(weighted_hours(&holiday, dec("2")), dec("4"));
    }

    #[test]
    fn test_comp_hours_floor_for_within_eight_types() {
        let wt = make_type(WorkTypeCategory::HolidayWithinEight, "2.0");
        assert_eq!(comp_leave_hours(&wt, dec("3")), dec("8"));
    }

    #[test]
    fn test_comp_hours_actual_for_other_types() {
        let wt = make_type(WorkTypeCategory::WeekdayOvertime, "1.34");
        assert_eq!(comp_leave_hours(&wt, dec("2.5")), dec("2.5"));
    }

    #[test]
    fn test_statutory_floor_constant() {
        assert_eq!(STATUTORY_DAILY_FLOOR, dec("8"));
    }
}
