//! In-memory store implementations.
//!
//! Backed by non-poisoning `parking_lot` locks. Every query filters
//! soft-deleted rows here, in one place, rather than at each call site.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::CalendarConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AnnualLeaveBalance, CompensatoryLeaveGrant, CompensatoryLeaveUsage, Employee,
    EmployeeSalaryItem, LeaveApplication, LifeEventLeaveGrant, MonthlyOverheadCost,
    MonthlyPayroll, RecordStatus, TimeEntry,
};

use super::{EmployeeDirectory, GrantUpdate, HolidayCalendar, LedgerSnapshot, NotificationSink};

/// Statutory calendar backed by the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidayCalendar {
    holidays: HashSet<NaiveDate>,
    makeup_days: HashSet<NaiveDate>,
}

impl StaticHolidayCalendar {
    /// Builds the calendar from the configuration's day lists.
    pub fn from_config(config: &CalendarConfig) -> Self {
        Self {
            holidays: config.national_holidays.iter().map(|d| d.date).collect(),
            makeup_days: config.makeup_workdays.iter().map(|d| d.date).collect(),
        }
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn is_makeup_workday(&self, date: NaiveDate) -> bool {
        self.makeup_days.contains(&date)
    }

    fn is_national_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

/// Notification sink that records dismissals for inspection.
#[derive(Debug, Default)]
pub struct RecordingNotificationStore {
    dismissed: Mutex<Vec<(String, NaiveDate)>>,
}

impl RecordingNotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the dismissals recorded so far.
    pub fn dismissed(&self) -> Vec<(String, NaiveDate)> {
        self.dismissed.lock().clone()
    }
}

impl NotificationSink for RecordingNotificationStore {
    fn dismiss_missing_timesheet(&self, user_id: &str, date: NaiveDate) {
        self.dismissed.lock().push((user_id.to_string(), date));
    }
}

/// In-memory employee directory.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    employees: RwLock<HashMap<String, Employee>>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee record.
    pub fn insert(&self, employee: Employee) {
        self.employees
            .write()
            .insert(employee.id.clone(), employee);
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn find(&self, user_id: &str) -> Option<Employee> {
        self.employees.read().get(user_id).cloned()
    }

    fn list(&self) -> Vec<Employee> {
        let mut all: Vec<Employee> = self.employees.read().values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}

/// Store for time entries.
#[derive(Debug, Default)]
pub struct TimeEntryStore {
    entries: RwLock<Vec<TimeEntry>>,
}

impl TimeEntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists a new entry.
    pub fn insert(&self, entry: TimeEntry) {
        self.entries.write().push(entry);
    }

    /// Sums the active hours a user already logged on a date.
    pub fn total_hours_on(&self, user_id: &str, date: NaiveDate) -> Decimal {
        self.entries
            .read()
            .iter()
            .filter(|e| e.is_active() && e.user_id == user_id && e.work_date == date)
            .map(|e| e.hours)
            .sum()
    }

    /// Returns a user's active entries within an inclusive date range.
    pub fn entries_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<TimeEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| {
                e.is_active()
                    && e.user_id == user_id
                    && e.work_date >= start
                    && e.work_date <= end
            })
            .cloned()
            .collect()
    }

    /// Soft-deletes an entry.
    pub fn mark_deleted(&self, entry_id: Uuid) -> EngineResult<()> {
        let mut entries = self.entries.write();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == entry_id && e.is_active())
            .ok_or_else(|| EngineError::NotFound {
                entity: "time entry".to_string(),
                id: entry_id.to_string(),
            })?;
        entry.status = RecordStatus::Deleted;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CompLedgerInner {
    grants: Vec<CompensatoryLeaveGrant>,
    usages: Vec<CompensatoryLeaveUsage>,
    versions: HashMap<String, u64>,
}

/// Store for the compensatory-leave ledger.
///
/// Reads hand out a [`LedgerSnapshot`] carrying the per-user version;
/// writes go through [`CompLeaveStore::commit`], which rejects a stale
/// version and applies all staged mutations or none.
#[derive(Debug, Default)]
pub struct CompLeaveStore {
    inner: Mutex<CompLedgerInner>,
}

impl CompLeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a freshly accrued grant.
    pub fn append_grant(&self, grant: CompensatoryLeaveGrant) {
        let mut inner = self.inner.lock();
        *inner.versions.entry(grant.user_id.clone()).or_insert(0) += 1;
        inner.grants.push(grant);
    }

    /// Takes a consistent snapshot of one user's ledger.
    pub fn snapshot(&self, user_id: &str) -> LedgerSnapshot {
        let inner = self.inner.lock();
        LedgerSnapshot {
            version: inner.versions.get(user_id).copied().unwrap_or(0),
            grants: inner
                .grants
                .iter()
                .filter(|g| g.user_id == user_id)
                .cloned()
                .collect(),
        }
    }

    /// Applies staged grant updates and usage rows atomically.
    ///
    /// Fails with `ConcurrencyConflict` when the user's ledger changed
    /// since the snapshot the plan was computed from, and with `NotFound`
    /// when a staged grant does not exist; nothing is applied on failure.
    pub fn commit(
        &self,
        user_id: &str,
        expected_version: u64,
        updates: Vec<GrantUpdate>,
        usages: Vec<CompensatoryLeaveUsage>,
    ) -> EngineResult<()> {
        let mut inner = self.inner.lock();

        let current = inner.versions.get(user_id).copied().unwrap_or(0);
        if current != expected_version {
            return Err(EngineError::ConcurrencyConflict {
                resource: "compensatory leave ledger".to_string(),
            });
        }

        // Validate the whole plan before touching anything.
        for update in &updates {
            let found = inner
                .grants
                .iter()
                .any(|g| g.id == update.grant_id && g.user_id == user_id);
            if !found {
                return Err(EngineError::NotFound {
                    entity: "compensatory leave grant".to_string(),
                    id: update.grant_id.to_string(),
                });
            }
        }

        for update in updates {
            if let Some(grant) = inner.grants.iter_mut().find(|g| g.id == update.grant_id) {
                grant.hours_remaining = update.hours_remaining;
                grant.status = update.status;
            }
        }
        inner.usages.extend(usages);
        *inner.versions.entry(user_id.to_string()).or_insert(0) += 1;
        Ok(())
    }

    /// Looks up a single grant.
    pub fn grant(&self, grant_id: Uuid) -> Option<CompensatoryLeaveGrant> {
        self.inner
            .lock()
            .grants
            .iter()
            .find(|g| g.id == grant_id)
            .cloned()
    }

    /// Returns the usage rows recorded against a grant.
    pub fn usages_for_grant(&self, grant_id: Uuid) -> Vec<CompensatoryLeaveUsage> {
        self.inner
            .lock()
            .usages
            .iter()
            .filter(|u| u.grant_id == grant_id)
            .cloned()
            .collect()
    }

    /// Returns every user that has grants, for the maintenance sweep.
    pub fn users_with_grants(&self) -> Vec<String> {
        let inner = self.inner.lock();
        let mut users: Vec<String> = inner
            .grants
            .iter()
            .map(|g| g.user_id.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        users.sort();
        users
    }
}

/// Store for leave applications, annual snapshots, and life-event grants.
#[derive(Debug, Default)]
pub struct LeaveStore {
    applications: RwLock<Vec<LeaveApplication>>,
    annual_balances: RwLock<HashMap<(String, i32), AnnualLeaveBalance>>,
    life_event_grants: RwLock<Vec<LifeEventLeaveGrant>>,
}

impl LeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an application after checking for overlap.
    ///
    /// The overlap check and the insert run under one write lock, so two
    /// racing applications cannot both slip past the check.
    pub fn insert_application(&self, application: LeaveApplication) -> EngineResult<LeaveApplication> {
        let mut applications = self.applications.write();

        if let Some(conflict) = applications.iter().find(|a| {
            a.is_active()
                && a.user_id == application.user_id
                && a.overlaps_range(application.start_date, application.end_date)
        }) {
            return Err(EngineError::LeaveOverlap {
                start: application.start_date,
                end: application.end_date,
                conflict_start: conflict.start_date,
                conflict_end: conflict.end_date,
            });
        }

        applications.push(application.clone());
        Ok(application)
    }

    /// Returns a user's active applications.
    pub fn applications_for_user(&self, user_id: &str) -> Vec<LeaveApplication> {
        self.applications
            .read()
            .iter()
            .filter(|a| a.is_active() && a.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Soft-deletes an application.
    pub fn mark_application_deleted(&self, application_id: Uuid) -> EngineResult<()> {
        let mut applications = self.applications.write();
        let application = applications
            .iter_mut()
            .find(|a| a.id == application_id && a.is_active())
            .ok_or_else(|| EngineError::NotFound {
                entity: "leave application".to_string(),
                id: application_id.to_string(),
            })?;
        application.status = RecordStatus::Deleted;
        Ok(())
    }

    /// Creates or replaces the year-end snapshot for a user.
    pub fn upsert_annual_balance(&self, balance: AnnualLeaveBalance) {
        self.annual_balances
            .write()
            .insert((balance.user_id.clone(), balance.year), balance);
    }

    /// Reads the year-end snapshot for a user, if one was created.
    pub fn annual_balance(&self, user_id: &str, year: i32) -> Option<AnnualLeaveBalance> {
        self.annual_balances
            .read()
            .get(&(user_id.to_string(), year))
            .cloned()
    }

    /// Records a life-event grant.
    pub fn insert_life_event_grant(&self, grant: LifeEventLeaveGrant) {
        self.life_event_grants.write().push(grant);
    }

    /// Returns a user's life-event grants.
    pub fn life_event_grants_for_user(&self, user_id: &str) -> Vec<LifeEventLeaveGrant> {
        self.life_event_grants
            .read()
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect()
    }
}

/// Store for employee salary items.
#[derive(Debug, Default)]
pub struct SalaryStore {
    items: RwLock<Vec<EmployeeSalaryItem>>,
}

impl SalaryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a salary item.
    pub fn insert(&self, item: EmployeeSalaryItem) {
        self.items.write().push(item);
    }

    /// Returns all items assigned to a user.
    pub fn items_for_user(&self, user_id: &str) -> Vec<EmployeeSalaryItem> {
        self.items
            .read()
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect()
    }
}

/// Store for monthly overhead costs.
#[derive(Debug, Default)]
pub struct OverheadStore {
    costs: RwLock<Vec<MonthlyOverheadCost>>,
}

impl OverheadStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a cost.
    pub fn insert(&self, cost: MonthlyOverheadCost) {
        self.costs.write().push(cost);
    }

    /// Returns the costs recorded for a month.
    pub fn costs_for_month(&self, year: i32, month: u32) -> Vec<MonthlyOverheadCost> {
        self.costs
            .read()
            .iter()
            .filter(|c| c.is_for(year, month))
            .cloned()
            .collect()
    }
}

/// Store for computed monthly payroll rows.
#[derive(Debug, Default)]
pub struct PayrollStore {
    rows: RwLock<HashMap<(String, i32, u32), MonthlyPayroll>>,
}

impl PayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces the payroll row for (user, year, month).
    pub fn upsert(&self, payroll: MonthlyPayroll) {
        self.rows.write().insert(
            (payroll.user_id.clone(), payroll.year, payroll.month),
            payroll,
        );
    }

    /// Reads the payroll row for (user, year, month).
    pub fn get(&self, user_id: &str, year: i32, month: u32) -> Option<MonthlyPayroll> {
        self.rows
            .read()
            .get(&(user_id.to_string(), year, month))
            .cloned()
    }
}
