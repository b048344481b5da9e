//! Engine components and the typed-operation facade.
//!
//! The [`LedgerEngine`] wires the four components over shared stores and
//! exposes the engine's operations as plain functions over plain data; no
//! transport concern reaches this layer.

mod comp_ledger;
mod leave_balance;
mod payroll;
mod time_entry;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    ConsumptionBreakdown, LeaveApplication, LifeEventLeaveGrant, MonthlyPayroll, NewLeaveApplication,
    NewTimeEntry, TimeEntry,
};
use crate::store::{
    CompLeaveStore, EmployeeDirectory, HolidayCalendar, LeaveStore, NotificationSink,
    OverheadStore, PayrollStore, SalaryStore, TimeEntryStore,
};

pub use comp_ledger::CompensatoryLeaveLedger;
pub use leave_balance::{
    AnnualLeaveSummary, LeaveBalanceCalculator, LeaveBalanceReport, LifeEventSummary,
    MenstrualLeaveSummary, PersonalLeaveSummary, SickLeaveSummary,
};
pub use payroll::PayrollCalculator;
pub use time_entry::TimeEntryRecorder;

/// The stores the engine operates over.
///
/// Shared handles so callers can seed data and inspect results from
/// outside the engine.
#[derive(Clone)]
pub struct EngineStores {
    /// Time entry store.
    pub time_entries: Arc<TimeEntryStore>,
    /// Compensatory leave ledger store.
    pub comp_leave: Arc<CompLeaveStore>,
    /// Leave applications, snapshots, and life-event grants.
    pub leave: Arc<LeaveStore>,
    /// Employee salary items.
    pub salary: Arc<SalaryStore>,
    /// Monthly overhead costs.
    pub overhead: Arc<OverheadStore>,
    /// Computed payroll rows.
    pub payroll: Arc<PayrollStore>,
}

impl EngineStores {
    /// Creates a fresh set of empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            time_entries: Arc::new(TimeEntryStore::new()),
            comp_leave: Arc::new(CompLeaveStore::new()),
            leave: Arc::new(LeaveStore::new()),
            salary: Arc::new(SalaryStore::new()),
            overhead: Arc::new(OverheadStore::new()),
            payroll: Arc::new(PayrollStore::new()),
        }
    }
}

/// The assembled Time & Compensation Ledger Engine.
#[derive(Clone)]
pub struct LedgerEngine {
    recorder: TimeEntryRecorder,
    ledger: CompensatoryLeaveLedger,
    leave: LeaveBalanceCalculator,
    payroll: PayrollCalculator,
}

impl LedgerEngine {
    /// Wires the engine components over the given configuration, stores,
    /// and external collaborators.
    pub fn new(
        config: EngineConfig,
        stores: EngineStores,
        calendar: Arc<dyn HolidayCalendar>,
        notifications: Arc<dyn NotificationSink>,
        directory: Arc<dyn EmployeeDirectory>,
    ) -> Self {
        let config = Arc::new(config);
        let ledger =
            CompensatoryLeaveLedger::new(Arc::clone(&config), Arc::clone(&stores.comp_leave));
        let recorder = TimeEntryRecorder::new(
            Arc::clone(&config),
            Arc::clone(&stores.time_entries),
            ledger.clone(),
            calendar,
            notifications,
        );
        let leave = LeaveBalanceCalculator::new(
            Arc::clone(&config),
            Arc::clone(&stores.leave),
            ledger.clone(),
            Arc::clone(&directory),
        );
        let payroll = PayrollCalculator::new(
            config,
            directory,
            Arc::clone(&stores.time_entries),
            Arc::clone(&stores.leave),
            Arc::clone(&stores.salary),
            Arc::clone(&stores.overhead),
            Arc::clone(&stores.payroll),
        );

        Self {
            recorder,
            ledger,
            leave,
            payroll,
        }
    }

    /// Validates and records a time entry.
    pub fn record_time_entry(&self, entry: NewTimeEntry) -> EngineResult<TimeEntry> {
        self.recorder.record(entry)
    }

    /// Soft-deletes a time entry.
    pub fn remove_time_entry(&self, entry_id: Uuid) -> EngineResult<()> {
        self.recorder.remove(entry_id)
    }

    /// Consumes compensatory leave FIFO from the oldest active grant.
    pub fn consume_compensatory_leave(
        &self,
        user_id: &str,
        hours: Decimal,
        used_date: NaiveDate,
        leave_application_id: Option<Uuid>,
    ) -> EngineResult<ConsumptionBreakdown> {
        self.ledger
            .consume(user_id, hours, used_date, leave_application_id)
    }

    /// Converts the listed grants' remaining hours into a payment amount.
    pub fn convert_compensatory_leave_to_payment(
        &self,
        user_id: &str,
        grant_ids: &[Uuid],
        conversion_rate: Decimal,
    ) -> EngineResult<Decimal> {
        self.ledger
            .convert_to_payment(user_id, grant_ids, conversion_rate)
    }

    /// Returns the compensatory hours consumable on `as_of`.
    pub fn compensatory_balance(&self, user_id: &str, as_of: NaiveDate) -> Decimal {
        self.ledger.balance(user_id, as_of)
    }

    /// Flags expired grants; run by the external scheduler.
    pub fn sweep_expired_compensatory_leave(&self, as_of: NaiveDate) -> EngineResult<usize> {
        self.ledger.sweep_expired(as_of)
    }

    /// Validates and records a leave application.
    pub fn apply_leave(&self, application: NewLeaveApplication) -> EngineResult<LeaveApplication> {
        self.leave.apply_leave(application)
    }

    /// Records a life-event leave grant.
    pub fn grant_life_event_leave(&self, grant: LifeEventLeaveGrant) -> EngineResult<()> {
        self.leave.grant_life_event_leave(grant)
    }

    /// Computes the per-type leave balance breakdown.
    pub fn get_leave_balance(
        &self,
        user_id: &str,
        year: i32,
        as_of: NaiveDate,
    ) -> EngineResult<LeaveBalanceReport> {
        self.leave.balance(user_id, year, as_of)
    }

    /// Writes the year-end annual-leave snapshots; run by the external
    /// scheduler at year rollover.
    pub fn snapshot_annual_balances(&self, year: i32) -> EngineResult<usize> {
        self.leave.snapshot_annual_balances(year)
    }

    /// Computes and upserts the monthly payroll row.
    pub fn calculate_monthly_payroll(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<MonthlyPayroll> {
        self.payroll.calculate_monthly(user_id, year, month)
    }

    /// Computes the fully loaded hourly cost rate for a month.
    pub fn calculate_full_hourly_cost_rate(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Decimal> {
        self.payroll.full_hourly_cost_rate(user_id, year, month)
    }

    /// Returns the time entry recorder component.
    pub fn time_entries(&self) -> &TimeEntryRecorder {
        &self.recorder
    }

    /// Returns the compensatory leave ledger component.
    pub fn comp_ledger(&self) -> &CompensatoryLeaveLedger {
        &self.ledger
    }

    /// Returns the leave balance component.
    pub fn leave_balances(&self) -> &LeaveBalanceCalculator {
        &self.leave
    }

    /// Returns the payroll component.
    pub fn payroll(&self) -> &PayrollCalculator {
        &self.payroll
    }
}
