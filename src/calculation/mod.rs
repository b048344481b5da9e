//! Calculation logic for the Time & Compensation Ledger Engine.
//!
//! This module contains the pure calculation functions: weighted-hours
//! derivation, compensatory-leave expiry dates, tiered statutory overtime
//! pay, full-attendance bonus eligibility, overhead allocation and the
//! full hourly cost rate, annual-leave entitlement and tenure, and the
//! sick-leave merge rule.

mod annual_leave;
mod attendance_bonus;
mod comp_expiry;
mod overhead;
mod overtime_pay;
mod sick_leave;
mod weighted_hours;

pub use annual_leave::{entitled_days, tenure_months};
pub use attendance_bonus::attendance_bonus_eligible;
pub use comp_expiry::{expiry_date, last_day_of_month, month_bounds};
pub use overhead::{
    STATUTORY_MONTHLY_HOURS, allocate_per_employee, allocate_per_hour, allocate_per_revenue,
    full_hourly_cost_rate,
};
pub use overtime_pay::{
    OVERTIME_TIER_ONE_THRESHOLD, OvertimePayResult, calculate_overtime_pay, overtime_multiplier,
};
pub use sick_leave::{SickLeaveUsage, sick_days_used};
pub use weighted_hours::{STATUTORY_DAILY_FLOOR, comp_leave_hours, weighted_hours};
