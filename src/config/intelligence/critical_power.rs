// ABOUTME: Critical power estimation configuration
// ABOUTME: Regression gates, physiological bounds, confidence ladder, and FTP update hysteresis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::critical_power::{
    DEFAULT_W_PRIME_JOULES, FTP_HYSTERESIS_WATTS, HIGH_CONFIDENCE_DURATION_SECONDS,
    HIGH_CONFIDENCE_R_SQUARED, MAX_REGRESSION_DURATION_SECONDS, MAX_W_PRIME_JOULES,
    MEDIUM_CONFIDENCE_DURATION_SECONDS, MIN_CP_DURATION_SECONDS, MIN_CRITICAL_POWER_WATTS,
    MIN_DURATION_RATIO, MIN_REGRESSION_POINTS, MIN_W_PRIME_JOULES,
};

/// Critical power estimator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPowerConfig {
    /// W' assumed by the single-point estimate (joules)
    pub default_w_prime_joules: f64,
    /// Shortest effort used for any CP work (seconds)
    pub min_duration_seconds: u32,
    /// Longest effort used by the regression (seconds)
    pub max_regression_duration_seconds: u32,
    /// Minimum distinct durations for the regression
    pub min_regression_points: usize,
    /// Minimum longest/shortest duration ratio for the regression
    pub min_duration_ratio: f64,
    /// Fitted CP must exceed this (watts)
    pub min_cp_watts: f64,
    /// Fitted W' lower bound (joules)
    pub w_prime_min: f64,
    /// Fitted W' upper bound (joules)
    pub w_prime_max: f64,
    /// R² for a high confidence regression
    pub high_confidence_r_squared: f64,
    /// Single-point winner duration for high confidence (seconds)
    pub high_confidence_duration_seconds: u32,
    /// Single-point winner duration for medium confidence (seconds)
    pub medium_confidence_duration_seconds: u32,
    /// Estimated CP must beat current FTP by more than this to auto-apply (watts)
    pub ftp_hysteresis_watts: f64,
}

impl Default for CriticalPowerConfig {
    fn default() -> Self {
        Self {
            default_w_prime_joules: DEFAULT_W_PRIME_JOULES,
            min_duration_seconds: MIN_CP_DURATION_SECONDS,
            max_regression_duration_seconds: MAX_REGRESSION_DURATION_SECONDS,
            min_regression_points: MIN_REGRESSION_POINTS,
            min_duration_ratio: MIN_DURATION_RATIO,
            min_cp_watts: MIN_CRITICAL_POWER_WATTS,
            w_prime_min: MIN_W_PRIME_JOULES,
            w_prime_max: MAX_W_PRIME_JOULES,
            high_confidence_r_squared: HIGH_CONFIDENCE_R_SQUARED,
            high_confidence_duration_seconds: HIGH_CONFIDENCE_DURATION_SECONDS,
            medium_confidence_duration_seconds: MEDIUM_CONFIDENCE_DURATION_SECONDS,
            ftp_hysteresis_watts: FTP_HYSTERESIS_WATTS,
        }
    }
}
