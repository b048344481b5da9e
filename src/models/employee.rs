//! Employee directory record.
//!
//! The engine reads employees from an external user directory; only the
//! fields the ledger math needs are modeled here.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Gender;

/// Read-only employee record from the user directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Recorded gender, checked against gender-restricted leave types.
    pub gender: Gender,
    /// The date employment started; drives tenure-based entitlements.
    pub hire_date: NaiveDate,
    /// Base monthly salary; the hourly base is this over 240.
    pub base_monthly_salary: Decimal,
}
