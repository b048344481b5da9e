//! Compensatory leave grant and usage models.
//!
//! Grants are created once per qualifying overtime entry and drained FIFO
//! by consumption. Usages are the append-only audit of every drain.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The state of a compensatory leave grant.
///
/// `Active` is the only non-terminal state; a grant moves to exactly one
/// of the terminal states and never transitions again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantStatus {
    /// The grant still has hours available (or has not yet been swept).
    Active,
    /// All hours were consumed.
    Used,
    /// The grant passed its expiry date and was swept.
    Expired,
    /// The remaining hours were converted to a payment.
    Converted,
}

/// A compensatory leave credit earned by overtime work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensatoryLeaveGrant {
    /// Unique identifier for the grant.
    pub id: Uuid,
    /// The user the credit belongs to.
    pub user_id: String,
    /// Hours earned when the grant was created.
    pub hours_earned: Decimal,
    /// Hours still available; monotonically decreasing.
    pub hours_remaining: Decimal,
    /// The date the overtime was worked.
    pub earned_date: NaiveDate,
    /// Last day the credit may be used, inclusive.
    pub expiry_date: NaiveDate,
    /// The time entry that generated this grant, if any.
    pub source_entry_id: Option<Uuid>,
    /// Current state.
    pub status: GrantStatus,
}

impl CompensatoryLeaveGrant {
    /// Returns true if the grant can satisfy consumption on `as_of`.
    ///
    /// A grant is consumable while it is active, has hours remaining, and
    /// its expiry date has not passed. The expiry filter applies even
    /// before the maintenance sweep has flagged the grant, so a late sweep
    /// never lets stale credits through.
    pub fn is_consumable(&self, as_of: NaiveDate) -> bool {
        self.status == GrantStatus::Active
            && self.hours_remaining > Decimal::ZERO
            && self.expiry_date >= as_of
    }
}

/// One consumption drawn against a single grant.
///
/// Append-only: the sum of a grant's usages plus its remaining hours
/// always equals the hours earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensatoryLeaveUsage {
    /// Unique identifier for the usage row.
    pub id: Uuid,
    /// The grant that was drained.
    pub grant_id: Uuid,
    /// Hours taken from the grant.
    pub hours_used: Decimal,
    /// The date the hours were used.
    pub used_date: NaiveDate,
    /// The leave application the consumption was for, if any.
    pub leave_application_id: Option<Uuid>,
}

/// The result of a successful consumption: one usage per grant touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionBreakdown {
    /// Total hours consumed.
    pub total_hours: Decimal,
    /// Usage rows in the order the grants were drained (FIFO).
    pub usages: Vec<CompensatoryLeaveUsage>,
}
