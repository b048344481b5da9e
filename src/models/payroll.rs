//! Monthly payroll models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The statutory rate tier an overtime pay line was computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeCategory {
    /// Weekday overtime, first two hours (4/3 of the hourly base).
    WeekdayFirstTwoHours,
    /// Weekday overtime beyond two hours (5/3 of the hourly base).
    WeekdayBeyondTwoHours,
    /// Rest-day work, first two hours (4/3 of the hourly base).
    RestDayFirstTwoHours,
    /// Rest-day work beyond two hours (5/3 of the hourly base).
    RestDayBeyondTwoHours,
    /// National-holiday work (double the hourly base).
    NationalHoliday,
}

/// A single overtime pay line on a monthly payroll.
///
/// Each line captures the hours paid under one statutory tier on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimePayLine {
    /// The day the overtime was worked.
    pub date: NaiveDate,
    /// The statutory rate tier.
    pub category: OvertimeCategory,
    /// Hours paid under this tier.
    pub hours: Decimal,
    /// The hourly rate for this tier (base × multiplier).
    pub rate: Decimal,
    /// The amount for this line (hours × rate).
    pub amount: Decimal,
}

/// The computed payroll for one user and month.
///
/// One row per (user, year, month); recomputing with unchanged inputs
/// yields an identical row (upsert semantics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayroll {
    /// The employee the payroll belongs to.
    pub user_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Base monthly salary from the directory record.
    pub base_salary: Decimal,
    /// Sum of allowance-category salary items.
    pub allowances_total: Decimal,
    /// Sum of bonus-category salary items.
    pub bonuses_total: Decimal,
    /// The attendance bonus actually paid (zero when forfeited).
    pub attendance_bonus: Decimal,
    /// Sum of all overtime pay lines.
    pub overtime_pay: Decimal,
    /// Sum of deduction-category salary items.
    pub deductions_total: Decimal,
    /// base + allowances + bonuses + attendance bonus + overtime.
    pub gross_pay: Decimal,
    /// gross − deductions.
    pub net_pay: Decimal,
    /// The overtime pay lines behind `overtime_pay`.
    pub overtime_lines: Vec<OvertimePayLine>,
}
