//! The compensatory-leave ledger component.
//!
//! Grants accrue once per qualifying overtime entry and are drained
//! strictly FIFO by earned date. Every multi-grant mutation runs as a
//! snapshot → plan → version-checked commit cycle against the store, so
//! two racing consumers can never both drain the same hours: the loser's
//! commit is rejected and replanned from a fresh snapshot.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::calculation::expiry_date;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompensatoryLeaveGrant, CompensatoryLeaveUsage, ConsumptionBreakdown, GrantStatus,
};
use crate::store::{CompLeaveStore, GrantUpdate};

/// Replan attempts before a contended operation gives up.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// FIFO accrual, consumption, expiry, and conversion of compensatory
/// leave credits.
#[derive(Clone)]
pub struct CompensatoryLeaveLedger {
    config: Arc<EngineConfig>,
    store: Arc<CompLeaveStore>,
}

impl CompensatoryLeaveLedger {
    /// Creates a ledger over the given store.
    pub fn new(config: Arc<EngineConfig>, store: Arc<CompLeaveStore>) -> Self {
        Self { config, store }
    }

    /// Accrues a new grant for overtime worked on `earned_date`.
    ///
    /// The expiry date comes from the configured rule and always falls on
    /// the last calendar day of the target month.
    pub fn accrue(
        &self,
        user_id: &str,
        hours: Decimal,
        earned_date: NaiveDate,
        source_entry_id: Option<Uuid>,
    ) -> EngineResult<CompensatoryLeaveGrant> {
        if hours <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "hours".to_string(),
                message: format!("accrual must be positive, got {}", hours),
            });
        }

        let grant = CompensatoryLeaveGrant {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            hours_earned: hours,
            hours_remaining: hours,
            earned_date,
            expiry_date: expiry_date(earned_date, self.config.settings().comp_leave_expiry_rule),
            source_entry_id,
            status: GrantStatus::Active,
        };

        debug!(
            user_id,
            hours = %hours,
            expiry = %grant.expiry_date,
            "accrued compensatory leave grant"
        );
        self.store.append_grant(grant.clone());
        Ok(grant)
    }

    /// Returns the hours available to `user_id` on `as_of`.
    ///
    /// Grants past their expiry date are excluded even when the
    /// maintenance sweep has not flagged them yet.
    pub fn balance(&self, user_id: &str, as_of: NaiveDate) -> Decimal {
        self.store
            .snapshot(user_id)
            .grants
            .iter()
            .filter(|g| g.is_consumable(as_of))
            .map(|g| g.hours_remaining)
            .sum()
    }

    /// Consumes `hours_to_use` from the oldest-earned active grants.
    ///
    /// All-or-nothing: when the active, unexpired total is short the
    /// request fails with `InsufficientCompensatoryLeave` and no grant is
    /// touched. One usage row is written per grant drained; a grant
    /// reaching zero remaining flips to `used`.
    pub fn consume(
        &self,
        user_id: &str,
        hours_to_use: Decimal,
        used_date: NaiveDate,
        leave_application_id: Option<Uuid>,
    ) -> EngineResult<ConsumptionBreakdown> {
        if hours_to_use <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "hours_to_use".to_string(),
                message: format!("consumption must be positive, got {}", hours_to_use),
            });
        }

        for _ in 0..MAX_COMMIT_ATTEMPTS {
            let snapshot = self.store.snapshot(user_id);

            let mut eligible: Vec<&CompensatoryLeaveGrant> = snapshot
                .grants
                .iter()
                .filter(|g| g.is_consumable(used_date))
                .collect();
            // FIFO by earned date; insertion order breaks ties.
            eligible.sort_by_key(|g| g.earned_date);

            let available: Decimal = eligible.iter().map(|g| g.hours_remaining).sum();
            if available < hours_to_use {
                return Err(EngineError::InsufficientCompensatoryLeave {
                    requested: hours_to_use,
                    available,
                });
            }

            let mut updates = Vec::new();
            let mut usages = Vec::new();
            let mut outstanding = hours_to_use;

            for grant in eligible {
                if outstanding == Decimal::ZERO {
                    break;
                }
                let take = grant.hours_remaining.min(outstanding);
                outstanding -= take;

                let new_remaining = grant.hours_remaining - take;
                updates.push(GrantUpdate {
                    grant_id: grant.id,
                    hours_remaining: new_remaining,
                    status: if new_remaining == Decimal::ZERO {
                        GrantStatus::Used
                    } else {
                        GrantStatus::Active
                    },
                });
                usages.push(CompensatoryLeaveUsage {
                    id: Uuid::new_v4(),
                    grant_id: grant.id,
                    hours_used: take,
                    used_date,
                    leave_application_id,
                });
            }

            match self
                .store
                .commit(user_id, snapshot.version, updates, usages.clone())
            {
                Ok(()) => {
                    debug!(
                        user_id,
                        hours = %hours_to_use,
                        grants = usages.len(),
                        "consumed compensatory leave"
                    );
                    return Ok(ConsumptionBreakdown {
                        total_hours: hours_to_use,
                        usages,
                    });
                }
                Err(EngineError::ConcurrencyConflict { .. }) => continue,
                Err(other) => return Err(other),
            }
        }

        Err(EngineError::ConcurrencyConflict {
            resource: "compensatory leave ledger".to_string(),
        })
    }

    /// Flags active grants whose expiry date has passed.
    ///
    /// A maintenance sweep driven by an external scheduler; idempotent,
    /// so re-running for the same day is harmless. Returns the number of
    /// grants flagged.
    pub fn sweep_expired(&self, as_of: NaiveDate) -> EngineResult<usize> {
        let mut swept = 0;

        for user_id in self.store.users_with_grants() {
            'user: for _ in 0..MAX_COMMIT_ATTEMPTS {
                let snapshot = self.store.snapshot(&user_id);

                let updates: Vec<GrantUpdate> = snapshot
                    .grants
                    .iter()
                    .filter(|g| g.status == GrantStatus::Active && g.expiry_date < as_of)
                    .map(|g| GrantUpdate {
                        grant_id: g.id,
                        hours_remaining: g.hours_remaining,
                        status: GrantStatus::Expired,
                    })
                    .collect();

                if updates.is_empty() {
                    break 'user;
                }

                let count = updates.len();
                match self.store.commit(&user_id, snapshot.version, updates, vec![]) {
                    Ok(()) => {
                        swept += count;
                        break 'user;
                    }
                    Err(EngineError::ConcurrencyConflict { .. }) => continue,
                    Err(other) => return Err(other),
                }
            }
        }

        if swept > 0 {
            debug!(swept, as_of = %as_of, "swept expired compensatory leave grants");
        }
        Ok(swept)
    }

    /// Converts the remaining hours of the listed grants into a payment.
    ///
    /// Only active grants with hours remaining are eligible; the whole
    /// batch converts atomically or not at all. Returns the payment
    /// amount, Σ hours_remaining × `conversion_rate`.
    pub fn convert_to_payment(
        &self,
        user_id: &str,
        grant_ids: &[Uuid],
        conversion_rate: Decimal,
    ) -> EngineResult<Decimal> {
        if conversion_rate <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "conversion_rate".to_string(),
                message: format!("conversion rate must be positive, got {}", conversion_rate),
            });
        }
        if grant_ids.is_empty() {
            return Err(EngineError::Validation {
                field: "grant_ids".to_string(),
                message: "no grants listed for conversion".to_string(),
            });
        }

        for _ in 0..MAX_COMMIT_ATTEMPTS {
            let snapshot = self.store.snapshot(user_id);

            let mut updates = Vec::new();
            let mut payment = Decimal::ZERO;

            for grant_id in grant_ids {
                let grant = snapshot
                    .grants
                    .iter()
                    .find(|g| g.id == *grant_id)
                    .ok_or_else(|| EngineError::NotFound {
                        entity: "compensatory leave grant".to_string(),
                        id: grant_id.to_string(),
                    })?;

                if grant.status != GrantStatus::Active
                    || grant.hours_remaining <= Decimal::ZERO
                {
                    return Err(EngineError::Validation {
                        field: "grant_ids".to_string(),
                        message: format!(
                            "grant {} is not active with hours remaining",
                            grant_id
                        ),
                    });
                }

                payment += grant.hours_remaining * conversion_rate;
                updates.push(GrantUpdate {
                    grant_id: grant.id,
                    hours_remaining: grant.hours_remaining,
                    status: GrantStatus::Converted,
                });
            }

            match self.store.commit(user_id, snapshot.version, updates, vec![]) {
                Ok(()) => {
                    debug!(user_id, payment = %payment, "converted compensatory leave to payment");
                    return Ok(payment);
                }
                Err(EngineError::ConcurrencyConflict { .. }) => continue,
                Err(other) => return Err(other),
            }
        }

        Err(EngineError::ConcurrencyConflict {
            resource: "compensatory leave ledger".to_string(),
        })
    }
}
