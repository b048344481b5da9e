//! Work type model and related types.
//!
//! Work types are immutable reference data describing how an hour of work
//! is weighted, whether it counts as overtime, and whether it earns
//! compensatory leave.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The statutory category a work type belongs to.
///
/// The category drives the weighted-hours rule, the makeup-workday
/// restriction, and which overtime pay tier family applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkTypeCategory {
    /// Ordinary contracted hours.
    Regular,
    /// Overtime on a regular working day.
    WeekdayOvertime,
    /// Work on a rest day, within the first eight hours.
    RestDayWithinEight,
    /// Work on a rest day beyond the first eight hours.
    RestDayBeyondEight,
    /// Work on a national holiday, within the first eight hours.
    HolidayWithinEight,
    /// Work on a national holiday beyond the first eight hours.
    HolidayBeyondEight,
}

/// The tier family used when converting overtime hours into pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeFamily {
    /// Weekday overtime: first two hours at 4/3, beyond at 5/3.
    Weekday,
    /// Rest-day work: first two hours at 4/3, beyond at 5/3.
    RestDay,
    /// National-holiday work: flat double time.
    Holiday,
}

impl WorkTypeCategory {
    /// Returns true for the rest-day categories, which are rejected on
    /// statutory makeup workdays.
    pub fn is_rest_day(self) -> bool {
        matches!(
            self,
            WorkTypeCategory::RestDayWithinEight | WorkTypeCategory::RestDayBeyondEight
        )
    }

    /// Returns true for the two within-eight-hours categories whose
    /// weighted hours are fixed at the statutory floor of 8.0.
    pub fn has_statutory_floor(self) -> bool {
        matches!(
            self,
            WorkTypeCategory::RestDayWithinEight | WorkTypeCategory::HolidayWithinEight
        )
    }

    /// Returns the overtime pay tier family for this category, or `None`
    /// for ordinary hours.
    pub fn pay_family(self) -> Option<OvertimeFamily> {
        match self {
            WorkTypeCategory::Regular => None,
            WorkTypeCategory::WeekdayOvertime => Some(OvertimeFamily::Weekday),
            WorkTypeCategory::RestDayWithinEight | WorkTypeCategory::RestDayBeyondEight => {
                Some(OvertimeFamily::RestDay)
            }
            WorkTypeCategory::HolidayWithinEight | WorkTypeCategory::HolidayBeyondEight => {
                Some(OvertimeFamily::Holiday)
            }
        }
    }
}

/// A work type from the catalog.
///
/// Work types are keyed by code in the configuration; the struct carries
/// everything needed to weight an entry and decide its side effects.
///
/// # Example
///
/// ```
/// use comp_engine::models::{WorkType, WorkTypeCategory};
/// use rust_decimal::Decimal;
///
/// let regular = WorkType {
///     name: "Regular hours".to_string(),
///     category: WorkTypeCategory::Regular,
///     rate_multiplier: Decimal::ONE,
///     is_overtime: false,
///     generates_comp_leave: false,
/// };
/// assert!(!regular.category.is_rest_day());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkType {
    /// The human-readable name of the work type.
    pub name: String,
    /// The statutory category.
    pub category: WorkTypeCategory,
    /// Multiplier applied to hours when computing weighted hours.
    pub rate_multiplier: Decimal,
    /// Whether hours of this type count as overtime.
    pub is_overtime: bool,
    /// Whether hours of this type earn compensatory leave.
    pub generates_comp_leave: bool,
}
