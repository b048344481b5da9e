//! Configuration for the Time & Compensation Ledger Engine.
//!
//! This module provides configuration loading from YAML files.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AnnualEntitlementTable, CalendarConfig, CalendarDay, EngineConfig, EngineSettings,
    EntitlementStep, ExpiryRule, LeaveConfig, LeaveQuotas, PayrollConfig, WorkTypesConfig,
};
