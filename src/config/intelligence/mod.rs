// ABOUTME: Analysis configuration for power curve, critical power, and training load modules
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analysis Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `power_curve` - Evaluated durations and normalized power window
//! - `critical_power` - Regression gates, W' bounds, confidence ladder, FTP hysteresis
//! - `training_load` - EMA time constants, lookback, TSS algorithm
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export RIDEMETRICS_CTL_DAYS=42
//!    export RIDEMETRICS_TSS_ALGORITHM=normalized_power
//!    ```
//!
//! 2. Default values from `ridemetrics_core::constants`

pub mod critical_power;
pub mod error;
pub mod power_curve;
pub mod training_load;

pub use critical_power::CriticalPowerConfig;
pub use error::ConfigError;
pub use power_curve::PowerCurveConfig;
pub use training_load::TrainingLoadConfig;

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::intelligence::algorithms::TssAlgorithm;

/// Global configuration singleton
static ANALYSIS_CONFIG: OnceLock<AnalysisConfig> = OnceLock::new();

/// Main analysis configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Best-effort extraction settings
    pub power_curve: PowerCurveConfig,
    /// Critical power / FTP estimation settings
    pub critical_power: CriticalPowerConfig,
    /// CTL/ATL/TSB settings
    pub training_load: TrainingLoadConfig,
}

impl AnalysisConfig {
    /// Get the global configuration instance
    ///
    /// Loaded once from the environment; invalid overrides fall back to defaults.
    pub fn global() -> &'static Self {
        ANALYSIS_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load analysis config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_power_curve()?;
        self.validate_critical_power()?;
        self.validate_training_load()
    }

    fn validate_power_curve(&self) -> Result<(), ConfigError> {
        let power_curve = &self.power_curve;
        if power_curve.durations.is_empty() || power_curve.durations.contains(&0) {
            return Err(ConfigError::ValueOutOfRange(
                "power curve durations must be non-empty and positive",
            ));
        }
        if power_curve.normalized_power_window_seconds == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "normalized power window must be positive",
            ));
        }
        Ok(())
    }

    fn validate_critical_power(&self) -> Result<(), ConfigError> {
        let cp = &self.critical_power;
        if cp.w_prime_min >= cp.w_prime_max {
            return Err(ConfigError::InvalidRange("w_prime_min must be < w_prime_max"));
        }
        if cp.default_w_prime_joules < cp.w_prime_min || cp.default_w_prime_joules > cp.w_prime_max
        {
            return Err(ConfigError::ValueOutOfRange(
                "default W' must lie within [w_prime_min, w_prime_max]",
            ));
        }
        if cp.min_duration_seconds == 0
            || cp.min_duration_seconds >= cp.max_regression_duration_seconds
        {
            return Err(ConfigError::InvalidRange(
                "min_duration must be positive and < max_regression_duration",
            ));
        }
        if cp.min_regression_points < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "regression needs at least 2 points",
            ));
        }
        if cp.min_duration_ratio < 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_duration_ratio must be at least 1.0",
            ));
        }
        if !(0.0..=1.0).contains(&cp.high_confidence_r_squared) {
            return Err(ConfigError::ValueOutOfRange(
                "high_confidence_r_squared must be between 0 and 1",
            ));
        }
        if cp.medium_confidence_duration_seconds > cp.high_confidence_duration_seconds {
            return Err(ConfigError::InvalidRange(
                "medium confidence duration must be <= high confidence duration",
            ));
        }
        if cp.ftp_hysteresis_watts < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "ftp_hysteresis_watts cannot be negative",
            ));
        }
        Ok(())
    }

    fn validate_training_load(&self) -> Result<(), ConfigError> {
        let load = &self.training_load;
        if !(load.ctl_days > 0.0 && load.atl_days > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "CTL and ATL time constants must be positive",
            ));
        }
        if load.lookback_days < 0 {
            return Err(ConfigError::ValueOutOfRange(
                "lookback_days cannot be negative",
            ));
        }
        TssAlgorithm::from_str(&load.tss_algorithm)
            .map_err(|e| ConfigError::Parse(e.message))?;
        Ok(())
    }

    /// Apply environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Training load overrides
        Self::apply_env_var("RIDEMETRICS_CTL_DAYS", &mut self.training_load.ctl_days)?;
        Self::apply_env_var("RIDEMETRICS_ATL_DAYS", &mut self.training_load.atl_days)?;
        Self::apply_env_var(
            "RIDEMETRICS_LOOKBACK_DAYS",
            &mut self.training_load.lookback_days,
        )?;
        Self::apply_env_var(
            "RIDEMETRICS_TSS_ALGORITHM",
            &mut self.training_load.tss_algorithm,
        )?;

        // Critical power overrides
        Self::apply_env_var(
            "RIDEMETRICS_DEFAULT_W_PRIME",
            &mut self.critical_power.default_w_prime_joules,
        )?;
        Self::apply_env_var(
            "RIDEMETRICS_FTP_HYSTERESIS_WATTS",
            &mut self.critical_power.ftp_hysteresis_watts,
        )?;

        Ok(self)
    }
}
