//! Core data models for the Time & Compensation Ledger Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod comp_leave;
mod employee;
mod leave;
mod payroll;
mod salary;
mod time_entry;
mod work_type;

pub use comp_leave::{
    CompensatoryLeaveGrant, CompensatoryLeaveUsage, ConsumptionBreakdown, GrantStatus,
};
pub use employee::Employee;
pub use leave::{
    AnnualLeaveBalance, Gender, LeaveApplication, LeaveCategory, LeaveType, LifeEventLeaveGrant,
    LifeEventStatus, NewLeaveApplication,
};
pub use payroll::{MonthlyPayroll, OvertimeCategory, OvertimePayLine};
pub use salary::{
    AllocationMethod, EmployeeSalaryItem, MonthlyOverheadCost, OverheadCostType,
    SalaryItemCategory, SalaryItemType,
};
pub use time_entry::{NewTimeEntry, RecordStatus, TimeEntry};
pub use work_type::{OvertimeFamily, WorkType, WorkTypeCategory};
