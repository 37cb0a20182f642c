// ABOUTME: Training load configuration for CTL/ATL/TSB calculation
// ABOUTME: EMA time constants, lookback window, and TSS algorithm selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::training_load::{
    ATL_TIME_CONSTANT_DAYS, CTL_TIME_CONSTANT_DAYS, DEFAULT_LOOKBACK_DAYS,
};

/// Training load settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoadConfig {
    /// CTL (fitness) time constant in days
    pub ctl_days: f64,
    /// ATL (fatigue) time constant in days
    pub atl_days: f64,
    /// Days of history walked before the target date
    pub lookback_days: i64,
    /// TSS algorithm: `avg_power`, `normalized_power`, or `hybrid`
    #[serde(default = "default_tss_algorithm")]
    pub tss_algorithm: String,
}

/// Default TSS algorithm (`hybrid` prefers normalized power when present)
fn default_tss_algorithm() -> String {
    "hybrid".to_owned()
}

impl Default for TrainingLoadConfig {
    fn default() -> Self {
        Self {
            ctl_days: CTL_TIME_CONSTANT_DAYS,
            atl_days: ATL_TIME_CONSTANT_DAYS,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            tss_algorithm: default_tss_algorithm(),
        }
    }
}
