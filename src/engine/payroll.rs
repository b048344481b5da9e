//! The payroll calculator component.
//!
//! Aggregates base salary, active salary items, tiered overtime pay, the
//! full-attendance bonus, and overhead allocation into the monthly
//! payroll row. Recomputation is an idempotent upsert.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculation::{
    STATUTORY_MONTHLY_HOURS, attendance_bonus_eligible, calculate_overtime_pay,
    full_hourly_cost_rate, month_bounds,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationMethod, EmployeeSalaryItem, MonthlyPayroll, SalaryItemCategory,
};
use crate::store::{
    EmployeeDirectory, LeaveStore, OverheadStore, PayrollStore, SalaryStore, TimeEntryStore,
};

/// Computes and persists monthly payroll rows.
#[derive(Clone)]
pub struct PayrollCalculator {
    config: Arc<EngineConfig>,
    directory: Arc<dyn EmployeeDirectory>,
    time_entries: Arc<TimeEntryStore>,
    leave_store: Arc<LeaveStore>,
    salary_store: Arc<SalaryStore>,
    overhead_store: Arc<OverheadStore>,
    payroll_store: Arc<PayrollStore>,
}

impl PayrollCalculator {
    /// Creates a calculator over the given stores and collaborators.
    pub fn new(
        config: Arc<EngineConfig>,
        directory: Arc<dyn EmployeeDirectory>,
        time_entries: Arc<TimeEntryStore>,
        leave_store: Arc<LeaveStore>,
        salary_store: Arc<SalaryStore>,
        overhead_store: Arc<OverheadStore>,
        payroll_store: Arc<PayrollStore>,
    ) -> Self {
        Self {
            config,
            directory,
            time_entries,
            leave_store,
            salary_store,
            overhead_store,
            payroll_store,
        }
    }

    /// Computes the payroll for one user and month and upserts the row.
    ///
    /// Safe to re-run: unchanged inputs yield an identical row.
    pub fn calculate_monthly(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<MonthlyPayroll> {
        let employee = self
            .directory
            .find(user_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "employee".to_string(),
                id: user_id.to_string(),
            })?;
        let (month_start, month_end) = month_bounds(year, month)?;

        let items = self.select_effective_items(user_id, year, month);

        let mut allowances = Decimal::ZERO;
        let mut bonuses = Decimal::ZERO;
        let mut deductions = Decimal::ZERO;
        let mut attendance_bonus_amount = Decimal::ZERO;
        for item in &items {
            match self.config.salary_item_type(&item.item_type)?.category {
                SalaryItemCategory::Allowance => allowances += item.amount,
                SalaryItemCategory::Bonus => bonuses += item.amount,
                SalaryItemCategory::AttendanceBonus => attendance_bonus_amount += item.amount,
                SalaryItemCategory::Deduction => deductions += item.amount,
            }
        }

        let applications = self.leave_store.applications_for_user(user_id);
        let attendance_bonus =
            if attendance_bonus_eligible(&applications, &self.config, year, month)? {
                attendance_bonus_amount
            } else {
                Decimal::ZERO
            };

        let hourly_base = employee.base_monthly_salary / STATUTORY_MONTHLY_HOURS;
        let entries = self
            .time_entries
            .entries_in_range(user_id, month_start, month_end);
        let overtime = calculate_overtime_pay(&entries, &self.config, hourly_base)?;

        let gross =
            employee.base_monthly_salary + allowances + bonuses + attendance_bonus + overtime.total;
        let net = gross - deductions;

        let payroll = MonthlyPayroll {
            user_id: user_id.to_string(),
            year,
            month,
            base_salary: employee.base_monthly_salary,
            allowances_total: allowances,
            bonuses_total: bonuses,
            attendance_bonus,
            overtime_pay: overtime.total,
            deductions_total: deductions,
            gross_pay: gross,
            net_pay: net,
            overtime_lines: overtime.lines,
        };

        self.payroll_store.upsert(payroll.clone());
        debug!(
            user_id,
            year,
            month,
            gross = %payroll.gross_pay,
            net = %payroll.net_pay,
            "monthly payroll computed"
        );
        Ok(payroll)
    }

    /// Computes an employee's fully loaded hourly cost rate for a month.
    ///
    /// Base salary plus regular-payment (allowance) items over the
    /// statutory 240 hours, plus the per-employee share of overhead
    /// flagged `per_employee` over the same 240 hours.
    pub fn full_hourly_cost_rate(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Decimal> {
        let employee = self
            .directory
            .find(user_id)
            .ok_or_else(|| EngineError::NotFound {
                entity: "employee".to_string(),
                id: user_id.to_string(),
            })?;
        month_bounds(year, month)?;

        let items = self.select_effective_items(user_id, year, month);
        let mut regular_items_total = Decimal::ZERO;
        for item in &items {
            if self.config.salary_item_type(&item.item_type)?.category
                == SalaryItemCategory::Allowance
            {
                regular_items_total += item.amount;
            }
        }

        let mut per_employee_overhead = Decimal::ZERO;
        for cost in self.overhead_store.costs_for_month(year, month) {
            if self.config.overhead_cost_type(&cost.cost_type)?.allocation_method
                == AllocationMethod::PerEmployee
            {
                per_employee_overhead += cost.amount;
            }
        }

        let headcount = self.directory.list().len() as u32;

        Ok(full_hourly_cost_rate(
            employee.base_monthly_salary,
            regular_items_total,
            per_employee_overhead,
            headcount,
        ))
    }

    /// Selects the salary items in force for a month, one per item type.
    ///
    /// A month-scoped record (expiry date set) beats an open-ended one of
    /// the same type; among equals the later effective date wins.
    fn select_effective_items(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> Vec<EmployeeSalaryItem> {
        let mut selected: HashMap<String, EmployeeSalaryItem> = HashMap::new();

        for item in self
            .salary_store
            .items_for_user(user_id)
            .into_iter()
            .filter(|i| i.is_effective_in(year, month))
        {
            match selected.get(&item.item_type) {
                None => {
                    selected.insert(item.item_type.clone(), item);
                }
                Some(existing) => {
                    let replace = match (item.is_bounded(), existing.is_bounded()) {
                        (true, false) => true,
                        (false, true) => false,
                        _ => item.effective_date > existing.effective_date,
                    };
                    if replace {
                        selected.insert(item.item_type.clone(), item);
                    }
                }
            }
        }

        let mut items: Vec<EmployeeSalaryItem> = selected.into_values().collect();
        items.sort_by(|a, b| a.item_type.cmp(&b.item_type));
        items
    }
}
