// ABOUTME: Power curve configuration for best-effort extraction
// ABOUTME: Configures evaluated durations and the normalized power rolling window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::power_curve::{CANONICAL_DURATIONS, NORMALIZED_POWER_WINDOW_SECONDS};

/// Power curve extraction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerCurveConfig {
    /// Durations (seconds) evaluated for every ride
    pub durations: Vec<u32>,
    /// Rolling window for normalized power (seconds)
    pub normalized_power_window_seconds: usize,
}

impl Default for PowerCurveConfig {
    fn default() -> Self {
        Self {
            durations: CANONICAL_DURATIONS.to_vec(),
            normalized_power_window_seconds: NORMALIZED_POWER_WINDOW_SECONDS,
        }
    }
}
