//! Leave models: types, applications, balances, and life-event grants.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::RecordStatus;

/// Recorded gender of an employee, used for gender-restricted leave types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Returns the single-letter code used in configuration and errors.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// The quota family a leave type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    /// Annual leave with tenure-based accumulating quota and carryover.
    Annual,
    /// Sick leave against the fixed annual quota.
    Sick,
    /// Personal (casual) leave against the fixed annual quota.
    Personal,
    /// Menstrual leave; overflow past the free threshold charges sick leave.
    Menstrual,
    /// Leave paid out of the compensatory ledger.
    Compensatory,
    /// Time-boxed life-event leave backed by an explicit grant.
    LifeEvent,
}

/// A leave type from the catalog, keyed by code in the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    /// The human-readable name of the leave type.
    pub name: String,
    /// The quota family.
    pub category: LeaveCategory,
    /// Restricts the leave type to one gender when set.
    #[serde(default)]
    pub gender_specific: Option<Gender>,
    /// Whether taking this leave deducts from a quota.
    pub deduct_leave: bool,
    /// Whether the leave is paid.
    pub is_paid: bool,
}

/// Input for a new leave application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLeaveApplication {
    /// The applying user.
    pub user_id: String,
    /// The leave type code.
    pub leave_type: String,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Number of days applied for; may be fractional.
    pub days: Decimal,
}

/// A persisted leave application.
///
/// Immutable once approved as far as this engine is concerned; the engine
/// only computes balances from existing rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplication {
    /// Unique identifier for the application.
    pub id: Uuid,
    /// The applying user.
    pub user_id: String,
    /// The leave type code.
    pub leave_type: String,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Number of days applied for.
    pub days: Decimal,
    /// Set at creation when menstrual-leave overflow charges sick leave.
    pub counts_as_sick_leave: bool,
    /// Lifecycle state.
    pub status: RecordStatus,
}

impl LeaveApplication {
    /// Returns true if the application has not been soft-deleted.
    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }

    /// Returns true if the inclusive date range overlaps `[start, end]`.
    ///
    /// # Example
    ///
    /// ```
    /// use comp_engine::models::{LeaveApplication, RecordStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let app = LeaveApplication {
    ///     id: Uuid::new_v4(),
    ///     user_id: "u_001".to_string(),
    ///     leave_type: "annual".to_string(),
    ///     start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
    ///     days: Decimal::from(4),
    ///     counts_as_sick_leave: false,
    ///     status: RecordStatus::Active,
    /// };
    /// assert!(app.overlaps_range(
    ///     NaiveDate::from_ymd_opt(2026, 1, 8).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 1, 12).unwrap(),
    /// ));
    /// ```
    pub fn overlaps_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && start <= self.end_date
    }
}

/// Year-end snapshot of a user's remaining annual leave.
///
/// The following year's carryover reads this row; a missing snapshot
/// degrades to a zero carryover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualLeaveBalance {
    /// The user the snapshot belongs to.
    pub user_id: String,
    /// The year the snapshot closes.
    pub year: i32,
    /// Days left unused at the end of `year`.
    pub remaining_days: Decimal,
}

/// Derived status of a life-event leave grant; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventStatus {
    /// The grant is usable.
    Active,
    /// The validity window has closed.
    Expired,
    /// All granted days were taken.
    UsedUp,
}

/// A time-boxed leave grant created by a life event (marriage,
/// bereavement, parental leave, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEventLeaveGrant {
    /// Unique identifier for the grant.
    pub id: Uuid,
    /// The user the grant belongs to.
    pub user_id: String,
    /// The leave type code this grant backs.
    pub leave_type: String,
    /// The kind of event (e.g. "marriage", "bereavement").
    pub event_type: String,
    /// The date of the event.
    pub event_date: NaiveDate,
    /// Days granted in total.
    pub total_days: Decimal,
    /// Days still available.
    pub remaining_days: Decimal,
    /// First day the grant may be used, inclusive.
    pub valid_from: NaiveDate,
    /// Last day the grant may be used, inclusive.
    pub valid_until: NaiveDate,
}

impl LifeEventLeaveGrant {
    /// Derives the grant status as of the given date.
    ///
    /// Expiry wins over exhaustion: a drained grant whose window has also
    /// closed reports `Expired`.
    pub fn status(&self, as_of: NaiveDate) -> LifeEventStatus {
        if self.valid_until < as_of {
            LifeEventStatus::Expired
        } else if self.remaining_days <= Decimal::ZERO {
            LifeEventStatus::UsedUp
        } else {
            LifeEventStatus::Active
        }
    }
}
