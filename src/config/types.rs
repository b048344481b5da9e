//! Configuration types for the ledger engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. The assembled
//! [`EngineConfig`] is injected into the engine explicitly; nothing in the
//! engine reads ambient global state.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveType, OverheadCostType, SalaryItemType, WorkType};

/// How long a compensatory leave grant stays usable.
///
/// Whatever the rule, the expiry date is always rounded to the last
/// calendar day of the target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExpiryRule {
    /// Expires at the end of the month it was earned in.
    #[serde(rename = "current_month")]
    CurrentMonth,
    /// Expires at the end of the following month.
    #[serde(rename = "next_month")]
    NextMonth,
    /// Expires at the end of the third month after earning.
    #[serde(rename = "3_months")]
    ThreeMonths,
    /// Expires at the end of the sixth month after earning.
    #[serde(rename = "6_months")]
    SixMonths,
}

/// Engine settings from `settings.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Maximum total hours a user may log per day.
    pub daily_work_hours_limit: Decimal,
    /// The compensatory leave expiry rule.
    pub comp_leave_expiry_rule: ExpiryRule,
}

/// Work type catalog file structure (`work_types.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct WorkTypesConfig {
    /// Map of work type code to work type details.
    pub work_types: HashMap<String, WorkType>,
}

/// Fixed annual quotas from `leave.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveQuotas {
    /// Sick leave days per year.
    pub sick_days_per_year: Decimal,
    /// Personal (casual) leave days per year.
    pub personal_days_per_year: Decimal,
    /// Menstrual leave days per year that do not charge sick leave.
    pub menstrual_free_days_per_year: Decimal,
}

/// One step of the tenure-to-entitlement lookup table.
#[derive(Debug, Clone, Deserialize)]
pub struct EntitlementStep {
    /// Minimum tenure in months for this step to apply.
    pub min_tenure_months: u32,
    /// Annual leave days granted at this step.
    pub days: Decimal,
}

/// The tenure-based annual leave entitlement table.
///
/// Steps are matched greatest-first; past `extra_day_after_months` the
/// entitlement grows by one day per additional full year, capped at
/// `max_days`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnnualEntitlementTable {
    /// Lookup steps, sorted ascending by tenure on load.
    pub steps: Vec<EntitlementStep>,
    /// Tenure after which each extra year adds one day.
    pub extra_day_after_months: u32,
    /// Hard cap on entitled days.
    pub max_days: Decimal,
}

/// Leave configuration file structure (`leave.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveConfig {
    /// Map of leave type code to leave type details.
    pub leave_types: HashMap<String, LeaveType>,
    /// Fixed annual quotas.
    pub quotas: LeaveQuotas,
    /// The annual leave entitlement table.
    pub annual_entitlement: AnnualEntitlementTable,
}

/// Payroll reference data (`payroll.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Map of salary item type code to item type details.
    pub salary_item_types: HashMap<String, SalaryItemType>,
    /// Map of overhead cost type code to cost type details.
    pub overhead_cost_types: HashMap<String, OverheadCostType>,
}

/// One flagged day in the statutory calendar.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarDay {
    /// The flagged date.
    pub date: NaiveDate,
    /// The name of the holiday or makeup day.
    pub name: String,
}

/// Statutory calendar data (`calendar.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// National holidays.
    pub national_holidays: Vec<CalendarDay>,
    /// Statutory makeup workdays (weekend days worked to compensate for a
    /// bridged holiday).
    pub makeup_workdays: Vec<CalendarDay>,
}

/// The complete engine configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various YAML
/// files in a configuration directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    work_types: HashMap<String, WorkType>,
    leave: LeaveConfig,
    payroll: PayrollConfig,
    calendar: CalendarConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        settings: EngineSettings,
        work_types: HashMap<String, WorkType>,
        mut leave: LeaveConfig,
        payroll: PayrollConfig,
        calendar: CalendarConfig,
    ) -> Self {
        leave
            .annual_entitlement
            .steps
            .sort_by_key(|s| s.min_tenure_months);
        Self {
            settings,
            work_types,
            leave,
            payroll,
            calendar,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all work types.
    pub fn work_types(&self) -> &HashMap<String, WorkType> {
        &self.work_types
    }

    /// Gets a work type by its code.
    pub fn work_type(&self, code: &str) -> EngineResult<&WorkType> {
        self.work_types.get(code).ok_or_else(|| EngineError::NotFound {
            entity: "work type".to_string(),
            id: code.to_string(),
        })
    }

    /// Returns all leave types.
    pub fn leave_types(&self) -> &HashMap<String, LeaveType> {
        &self.leave.leave_types
    }

    /// Gets a leave type by its code.
    pub fn leave_type(&self, code: &str) -> EngineResult<&LeaveType> {
        self.leave
            .leave_types
            .get(code)
            .ok_or_else(|| EngineError::NotFound {
                entity: "leave type".to_string(),
                id: code.to_string(),
            })
    }

    /// Returns the fixed annual quotas.
    pub fn quotas(&self) -> &LeaveQuotas {
        &self.leave.quotas
    }

    /// Returns the annual leave entitlement table.
    pub fn entitlement_table(&self) -> &AnnualEntitlementTable {
        &self.leave.annual_entitlement
    }

    /// Gets a salary item type by its code.
    pub fn salary_item_type(&self, code: &str) -> EngineResult<&SalaryItemType> {
        self.payroll
            .salary_item_types
            .get(code)
            .ok_or_else(|| EngineError::NotFound {
                entity: "salary item type".to_string(),
                id: code.to_string(),
            })
    }

    /// Gets an overhead cost type by its code.
    pub fn overhead_cost_type(&self, code: &str) -> EngineResult<&OverheadCostType> {
        self.payroll
            .overhead_cost_types
            .get(code)
            .ok_or_else(|| EngineError::NotFound {
                entity: "overhead cost type".to_string(),
                id: code.to_string(),
            })
    }

    /// Returns the statutory calendar data.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }
}
