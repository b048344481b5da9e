//! Full-attendance bonus eligibility.
//!
//! The bonus is forfeited by any sick or personal leave day touching the
//! month, including menstrual leave flagged as charging sick leave.
//! Annual and compensatory leave never forfeit it.

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{LeaveApplication, LeaveCategory};

use super::comp_expiry::month_bounds;

/// Returns whether the employee keeps the full-attendance bonus for the
/// given month.
pub fn attendance_bonus_eligible(
    applications: &[LeaveApplication],
    config: &EngineConfig,
    year: i32,
    month: u32,
) -> EngineResult<bool> {
    let (month_start, month_end) = month_bounds(year, month)?;

    for application in applications.iter().filter(|a| a.is_active()) {
        if !application.overlaps_range(month_start, month_end) {
            continue;
        }
        if application.counts_as_sick_leave {
            return Ok(false);
        }
        let leave_type = config.leave_type(&application.leave_type)?;
        if matches!(
            leave_type.category,
            LeaveCategory::Sick | LeaveCategory::Personal
        ) {
            return Ok(false);
        }
    }

    Ok(true)
}
