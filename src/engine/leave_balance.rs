//! The leave-balance component.
//!
//! Handles leave application intake (gender restriction, overlap,
//! menstrual overflow flagging) and derives per-type balances from the
//! stored applications, snapshots, and grants.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculation::{entitled_days, last_day_of_month, sick_days_used, tenure_months};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AnnualLeaveBalance, LeaveApplication, LeaveCategory, LifeEventLeaveGrant, LifeEventStatus,
    NewLeaveApplication, RecordStatus,
};
use crate::store::{EmployeeDirectory, LeaveStore};

use super::comp_ledger::CompensatoryLeaveLedger;

/// Annual leave position for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveSummary {
    /// Days entitled from the tenure table.
    pub entitled_days: Decimal,
    /// Days carried over from the prior year's snapshot (0 when missing).
    pub carryover_days: Decimal,
    /// Days used this year.
    pub used_days: Decimal,
    /// entitled + carryover − used.
    pub remaining_days: Decimal,
}

/// Sick leave position for one year.
///
/// `remaining_days` may go negative past quota exhaustion; that is a
/// signal, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SickLeaveSummary {
    /// The fixed annual quota.
    pub quota_days: Decimal,
    /// Days of direct sick leave.
    pub direct_days_used: Decimal,
    /// Menstrual days flagged as charging sick leave.
    pub menstrual_overflow_days: Decimal,
    /// quota − (direct + overflow).
    pub remaining_days: Decimal,
}

/// Personal (casual) leave position for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalLeaveSummary {
    /// The fixed annual quota.
    pub quota_days: Decimal,
    /// Days used this year.
    pub used_days: Decimal,
    /// quota − used.
    pub remaining_days: Decimal,
}

/// Menstrual leave position for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenstrualLeaveSummary {
    /// Free days per year before overflow charges sick leave.
    pub free_days_per_year: Decimal,
    /// Days used this year, flagged or not.
    pub used_days: Decimal,
}

/// A life-event grant with its derived status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEventSummary {
    /// The underlying grant.
    pub grant: LifeEventLeaveGrant,
    /// Status derived as of the report date; never persisted.
    pub status: LifeEventStatus,
}

/// The per-type balance breakdown for one user and year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalanceReport {
    /// The user the report is for.
    pub user_id: String,
    /// The year the report covers.
    pub year: i32,
    /// Annual leave position.
    pub annual: AnnualLeaveSummary,
    /// Sick leave position.
    pub sick: SickLeaveSummary,
    /// Personal leave position.
    pub personal: PersonalLeaveSummary,
    /// Menstrual leave position.
    pub menstrual: MenstrualLeaveSummary,
    /// Compensatory hours still consumable as of the report date.
    pub compensatory_hours_remaining: Decimal,
    /// Life-event grants with derived status.
    pub life_events: Vec<LifeEventSummary>,
}

/// Derives leave balances and validates leave intake.
#[derive(Clone)]
pub struct LeaveBalanceCalculator {
    config: Arc<EngineConfig>,
    leave_store: Arc<LeaveStore>,
    comp_ledger: CompensatoryLeaveLedger,
    directory: Arc<dyn EmployeeDirectory>,
}

impl LeaveBalanceCalculator {
    /// Creates a calculator over the given stores and collaborators.
    pub fn new(
        config: Arc<EngineConfig>,
        leave_store: Arc<LeaveStore>,
        comp_ledger: CompensatoryLeaveLedger,
        directory: Arc<dyn EmployeeDirectory>,
    ) -> Self {
        Self {
            config,
            leave_store,
            comp_ledger,
            directory,
        }
    }

    /// Validates and records a leave application.
    ///
    /// Gender-restricted types are checked against the employee's
    /// recorded gender; the date range must not overlap any existing
    /// active application. A menstrual application past the yearly free
    /// threshold is flagged `counts_as_sick_leave` at creation.
    pub fn apply_leave(
        &self,
        new_application: NewLeaveApplication,
    ) -> EngineResult<LeaveApplication> {
        let leave_type = self.config.leave_type(&new_application.leave_type)?;

        let employee = self
            .directory
            .find(&new_application.user_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "employee".to_string(),
                id: new_application.user_id.clone(),
            })?;

        if let Some(required) = leave_type.gender_specific {
            if employee.gender != required {
                return Err(EngineError::GenderRestriction {
                    leave_type: new_application.leave_type.clone(),
                    required: required.as_str().to_string(),
                });
            }
        }

        if new_application.end_date < new_application.start_date {
            return Err(EngineError::Validation {
                field: "end_date".to_string(),
                message: "end date precedes start date".to_string(),
            });
        }
        if new_application.days <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "days".to_string(),
                message: format!("days must be positive, got {}", new_application.days),
            });
        }

        let counts_as_sick_leave = if leave_type.category == LeaveCategory::Menstrual {
            let used = self.menstrual_days_used(
                &new_application.user_id,
                new_application.start_date.year(),
            )?;
            used >= self.config.quotas().menstrual_free_days_per_year
        } else {
            false
        };

        let application = LeaveApplication {
            id: Uuid::new_v4(),
            user_id: new_application.user_id,
            leave_type: new_application.leave_type,
            start_date: new_application.start_date,
            end_date: new_application.end_date,
            days: new_application.days,
            counts_as_sick_leave,
            status: RecordStatus::Active,
        };

        let stored = self.leave_store.insert_application(application)?;
        debug!(
            user_id = %stored.user_id,
            leave_type = %stored.leave_type,
            days = %stored.days,
            counts_as_sick_leave = stored.counts_as_sick_leave,
            "recorded leave application"
        );
        Ok(stored)
    }

    /// Computes the per-type balance breakdown for a user and year.
    pub fn balance(
        &self,
        user_id: &str,
        year: i32,
        as_of: NaiveDate,
    ) -> EngineResult<LeaveBalanceReport> {
        let employee = self
            .directory
            .find(user_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "employee".to_string(),
                id: user_id.to_string(),
            })?;

        let applications = self.leave_store.applications_for_user(user_id);
        let quotas = self.config.quotas();

        // Annual leave: tenure entitlement + prior-year carryover − used.
        let year_end = last_day_of_month(year, 12);
        let entitled = entitled_days(
            tenure_months(employee.hire_date, year_end),
            self.config.entitlement_table(),
        );
        let carryover = match self.leave_store.annual_balance(user_id, year - 1) {
            Some(snapshot) => snapshot.remaining_days,
            None => {
                warn!(
                    user_id,
                    year,
                    "no annual leave snapshot for prior year, carryover defaults to 0"
                );
                Decimal::ZERO
            }
        };
        let annual_used = self.days_used_in_category(&applications, LeaveCategory::Annual, year)?;

        let sick_usage = sick_days_used(&applications, &self.config, year)?;
        let personal_used =
            self.days_used_in_category(&applications, LeaveCategory::Personal, year)?;
        let menstrual_used = self.menstrual_days_used(user_id, year)?;

        let life_events = self
            .leave_store
            .life_event_grants_for_user(user_id)
            .into_iter()
            .map(|grant| LifeEventSummary {
                status: grant.status(as_of),
                grant,
            })
            .collect();

        Ok(LeaveBalanceReport {
            user_id: user_id.to_string(),
            year,
            annual: AnnualLeaveSummary {
                entitled_days: entitled,
                carryover_days: carryover,
                used_days: annual_used,
                remaining_days: entitled + carryover - annual_used,
            },
            sick: SickLeaveSummary {
                quota_days: quotas.sick_days_per_year,
                direct_days_used: sick_usage.direct_days,
                menstrual_overflow_days: sick_usage.menstrual_overflow_days,
                remaining_days: quotas.sick_days_per_year - sick_usage.total(),
            },
            personal: PersonalLeaveSummary {
                quota_days: quotas.personal_days_per_year,
                used_days: personal_used,
                remaining_days: quotas.personal_days_per_year - personal_used,
            },
            menstrual: MenstrualLeaveSummary {
                free_days_per_year: quotas.menstrual_free_days_per_year,
                used_days: menstrual_used,
            },
            compensatory_hours_remaining: self.comp_ledger.balance(user_id, as_of),
            life_events,
        })
    }

    /// Creates the year-end annual-leave snapshots for every employee.
    ///
    /// The explicit year-rollover job: the following year's carryover
    /// reads these rows. Idempotent upsert, safe to re-run for the same
    /// year. Returns the number of snapshots written.
    pub fn snapshot_annual_balances(&self, year: i32) -> EngineResult<usize> {
        let employees = self.directory.list();
        let mut written = 0;

        for employee in employees {
            let applications = self.leave_store.applications_for_user(&employee.id);
            let year_end = last_day_of_month(year, 12);
            let entitled = entitled_days(
                tenure_months(employee.hire_date, year_end),
                self.config.entitlement_table(),
            );
            let carryover = self
                .leave_store
                .annual_balance(&employee.id, year - 1)
                .map(|s| s.remaining_days)
                .unwrap_or(Decimal::ZERO);
            let used = self.days_used_in_category(&applications, LeaveCategory::Annual, year)?;

            self.leave_store.upsert_annual_balance(AnnualLeaveBalance {
                user_id: employee.id.clone(),
                year,
                remaining_days: entitled + carryover - used,
            });
            written += 1;
        }

        debug!(year, written, "annual leave snapshots written");
        Ok(written)
    }

    /// Records a life-event grant for later balance reporting.
    pub fn grant_life_event_leave(&self, grant: LifeEventLeaveGrant) -> EngineResult<()> {
        let leave_type = self.config.leave_type(&grant.leave_type)?;
        if leave_type.category != LeaveCategory::LifeEvent {
            return Err(EngineError::Validation {
                field: "leave_type".to_string(),
                message: format!("'{}' is not a life-event leave type", grant.leave_type),
            });
        }
        self.leave_store.insert_life_event_grant(grant);
        Ok(())
    }

    fn days_used_in_category(
        &self,
        applications: &[LeaveApplication],
        category: LeaveCategory,
        year: i32,
    ) -> EngineResult<Decimal> {
        let mut total = Decimal::ZERO;
        for application in applications.iter().filter(|a| a.is_active()) {
            if application.start_date.year() != year {
                continue;
            }
            if self.config.leave_type(&application.leave_type)?.category == category {
                total += application.days;
            }
        }
        Ok(total)
    }

    fn menstrual_days_used(&self, user_id: &str, year: i32) -> EngineResult<Decimal> {
        let applications = self.leave_store.applications_for_user(user_id);
        self.days_used_in_category(&applications, LeaveCategory::Menstrual, year)
    }
}
