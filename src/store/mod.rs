//! Storage interfaces and in-memory implementations.
//!
//! The engine talks to the shared relational store and its external
//! collaborators only through the narrow interfaces in this module. The
//! in-memory implementations serialize all multi-row mutations, and the
//! compensatory ledger additionally exposes an optimistic
//! compare-and-commit API so a read-plan-commit cycle either applies in
//! full or fails without partial state.

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{CompensatoryLeaveGrant, Employee, GrantStatus};

pub use memory::{
    CompLeaveStore, InMemoryDirectory, LeaveStore, OverheadStore, PayrollStore,
    RecordingNotificationStore, SalaryStore, StaticHolidayCalendar, TimeEntryStore,
};

/// Read-only statutory calendar consumed by time-entry validation.
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if `date` is a statutory makeup workday.
    fn is_makeup_workday(&self, date: NaiveDate) -> bool;
    /// Returns true if `date` is a national holiday.
    fn is_national_holiday(&self, date: NaiveDate) -> bool;
}

/// Fire-and-forget notification dismissal.
///
/// Implementations must not fail the calling operation; the engine treats
/// dismissal as best-effort.
pub trait NotificationSink: Send + Sync {
    /// Clears any pending missing-timesheet notification for the user/date.
    fn dismiss_missing_timesheet(&self, user_id: &str, date: NaiveDate);
}

/// Read-only employee records from the user directory.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up one employee.
    fn find(&self, user_id: &str) -> Option<Employee>;
    /// Returns all employees.
    fn list(&self) -> Vec<Employee>;
}

/// One staged mutation of a grant inside a ledger commit.
#[derive(Debug, Clone, PartialEq)]
pub struct GrantUpdate {
    /// The grant to update.
    pub grant_id: Uuid,
    /// The new remaining hours.
    pub hours_remaining: Decimal,
    /// The new status.
    pub status: GrantStatus,
}

/// A consistent read of one user's compensatory ledger.
///
/// The version is the commit token: a commit against a stale version is
/// rejected, so plans computed from this snapshot can never overdraw the
/// ledger.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    /// The ledger version at read time.
    pub version: u64,
    /// The user's grants in insertion order.
    pub grants: Vec<CompensatoryLeaveGrant>,
}
