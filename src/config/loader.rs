//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CalendarConfig, EngineConfig, EngineSettings, LeaveConfig, PayrollConfig, WorkTypesConfig,
};

/// Loads and provides access to the engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// assembles the [`EngineConfig`] the engine is constructed with.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/engine/
/// ├── settings.yaml     # Daily cap and expiry rule
/// ├── work_types.yaml   # Work type catalog
/// ├── leave.yaml        # Leave types, quotas, entitlement table
/// ├── payroll.yaml      # Salary item and overhead cost types
/// └── calendar.yaml     # National holidays and makeup workdays
/// ```
///
/// # Example
///
/// ```no_run
/// use comp_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine").unwrap();
/// let work_type = loader.config().work_type("regular").unwrap();
/// println!("Multiplier: {}", work_type.rate_multiplier);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/engine")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if any
    /// required file is missing, contains invalid YAML, or lacks a
    /// required field.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("settings.yaml"))?;
        let work_types = Self::load_yaml::<WorkTypesConfig>(&path.join("work_types.yaml"))?;
        let leave = Self::load_yaml::<LeaveConfig>(&path.join("leave.yaml"))?;
        let payroll = Self::load_yaml::<PayrollConfig>(&path.join("payroll.yaml"))?;
        let calendar = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;

        let config = EngineConfig::new(
            settings,
            work_types.work_types,
            leave,
            payroll,
            calendar,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the assembled engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
