//! Salary item and overhead cost models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The payroll bucket a salary item type falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryItemCategory {
    /// Recurring addition to gross pay (meal, transport, ...).
    Allowance,
    /// One-off or performance addition to gross pay.
    Bonus,
    /// The full-attendance bonus; forfeited by sick or personal leave.
    AttendanceBonus,
    /// Subtraction from gross pay (insurance, pension, ...).
    Deduction,
}

/// A salary item type from the catalog, keyed by code in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryItemType {
    /// The human-readable name of the item type.
    pub name: String,
    /// The payroll bucket.
    pub category: SalaryItemCategory,
}

/// A salary item assigned to an employee.
///
/// Open-ended items have no expiry date; a month-scoped item covering the
/// target month takes precedence over an open-ended one of the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSalaryItem {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// The employee the item applies to.
    pub user_id: String,
    /// The salary item type code.
    pub item_type: String,
    /// Monthly amount.
    pub amount: Decimal,
    /// First day the item is in force.
    pub effective_date: NaiveDate,
    /// Last day the item is in force, inclusive; open-ended when absent.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl EmployeeSalaryItem {
    /// Returns true if the item is in force at any point of the given month.
    pub fn is_effective_in(&self, year: i32, month: u32) -> bool {
        let Some(month_start) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return false;
        };
        let month_end = last_day_of(year, month);

        self.effective_date <= month_end
            && self.expiry_date.is_none_or(|expiry| expiry >= month_start)
    }

    /// Returns true if the item carries an expiry date (bounded validity).
    pub fn is_bounded(&self) -> bool {
        self.expiry_date.is_some()
    }
}

fn last_day_of(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// How a shared monthly cost is spread across the practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMethod {
    /// Split evenly over headcount.
    PerEmployee,
    /// Split over total work hours.
    PerHour,
    /// Split over total revenue.
    PerRevenue,
}

/// An overhead cost type from the catalog, keyed by code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverheadCostType {
    /// The human-readable name of the cost type.
    pub name: String,
    /// The allocation method fixed on the type.
    pub allocation_method: AllocationMethod,
}

/// A recorded overhead cost for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyOverheadCost {
    /// The cost type code.
    pub cost_type: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Cost amount.
    pub amount: Decimal,
}

impl MonthlyOverheadCost {
    /// Returns true if the cost belongs to the given month.
    pub fn is_for(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}
