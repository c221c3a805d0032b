//! Planner configuration

use serde::Deserialize;

use core_kernel::Currency;
use domain_fees::{InstallmentPlanner, DEFAULT_DUE_DAY};

use crate::error::CliError;

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlannerConfig {
    /// ISO currency code fees are billed in
    pub currency: String,
    /// Day of the month installments fall due (1-28)
    pub due_day: u32,
    /// Log level
    pub log_level: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            currency: Currency::PKR.code().to_string(),
            due_day: DEFAULT_DUE_DAY,
            log_level: "info".to_string(),
        }
    }
}

impl PlannerConfig {
    /// Loads configuration from `FEES_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix("FEES"))
    }

    /// Loads configuration from an environment source, falling back to
    /// defaults for anything unset
    pub fn load(environment: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("currency", defaults.currency)?
            .set_default("due_day", i64::from(defaults.due_day))?
            .set_default("log_level", defaults.log_level)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Builds the planner this configuration describes
    ///
    /// An unknown currency or out-of-range due day is a configuration error,
    /// not a problem with the request being planned.
    pub fn planner(&self) -> Result<InstallmentPlanner, CliError> {
        let currency: Currency = self
            .currency
            .parse()
            .map_err(|e| settings_error("currency", e))?;
        InstallmentPlanner::new(currency)
            .with_due_day(self.due_day)
            .map_err(|e| settings_error("due_day", e))
    }
}

fn settings_error(key: &str, err: impl std::fmt::Display) -> CliError {
    CliError::Config(config::ConfigError::Message(format!(
        "FEES_{}: {}",
        key.to_uppercase(),
        err
    )))
}
