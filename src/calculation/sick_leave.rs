//! Sick-leave usage with the menstrual-leave merge rule.
//!
//! Direct sick leave charges the quota; menstrual leave past the yearly
//! free threshold is flagged at application time and charges the same
//! quota. Usage is attributed to the year the leave starts in.

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{LeaveApplication, LeaveCategory};

/// Sick-leave days consumed in a year, split by origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SickLeaveUsage {
    /// Days of sick-category applications.
    pub direct_days: Decimal,
    /// Menstrual-leave days flagged as charging sick leave.
    pub menstrual_overflow_days: Decimal,
}

impl SickLeaveUsage {
    /// Total days charged against the sick-leave quota.
    pub fn total(&self) -> Decimal {
        self.direct_days + self.menstrual_overflow_days
    }
}

/// Sums the sick-leave days a user consumed in `year`.
pub fn sick_days_used(
    applications: &[LeaveApplication],
    config: &EngineConfig,
    year: i32,
) -> EngineResult<SickLeaveUsage> {
    let mut direct = Decimal::ZERO;
    let mut overflow = Decimal::ZERO;

    for application in applications.iter().filter(|a| a.is_active()) {
        if application.start_date.year() != year {
            continue;
        }
        let leave_type = config.leave_type(&application.leave_type)?;
        if leave_type.category == LeaveCategory::Sick {
            direct += application.days;
        } else if application.counts_as_sick_leave {
            overflow += application.days;
        }
    }

    Ok(SickLeaveUsage {
        direct_days: direct,
        menstrual_overflow_days: overflow,
    })
}
