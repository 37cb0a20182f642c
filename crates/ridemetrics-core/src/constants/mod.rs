// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for power curves, critical power, and training load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.
//! Configurable values (see the root crate's `config` module) take their defaults from here.

/// Time unit conversions
pub mod time {
    /// Seconds in one hour as a float for intensity math
    pub const SECONDS_PER_HOUR_F64: f64 = 3600.0;
    /// Seconds in one minute
    pub const SECONDS_PER_MINUTE: u32 = 60;
}

/// Power curve extraction
pub mod power_curve {
    /// Canonical best-effort durations in seconds (1, 3, 5, 8, 10, 15, 20, 30, 45, 60 minutes)
    pub const CANONICAL_DURATIONS: [u32; 10] =
        [60, 180, 300, 480, 600, 900, 1200, 1800, 2700, 3600];

    /// Rolling window used by normalized power (seconds)
    pub const NORMALIZED_POWER_WINDOW_SECONDS: usize = 30;
}

/// Critical power model and FTP estimation
pub mod critical_power {
    /// W' assumed by the duration-adjusted single-point estimate (joules)
    pub const DEFAULT_W_PRIME_JOULES: f64 = 20_000.0;

    /// Shortest effort usable for CP work; shorter efforts are W'-dominated (seconds)
    pub const MIN_CP_DURATION_SECONDS: u32 = 180;

    /// Longest effort included in the multi-point regression (seconds)
    pub const MAX_REGRESSION_DURATION_SECONDS: u32 = 1800;

    /// Minimum distinct durations for the regression
    pub const MIN_REGRESSION_POINTS: usize = 3;

    /// Longest/shortest duration ratio needed to separate CP from W'
    pub const MIN_DURATION_RATIO: f64 = 2.5;

    /// A fitted CP at or below this is not physiological (watts)
    pub const MIN_CRITICAL_POWER_WATTS: f64 = 100.0;

    /// Lower bound of a plausible W' (joules)
    pub const MIN_W_PRIME_JOULES: f64 = 5_000.0;

    /// Upper bound of a plausible W' (joules)
    pub const MAX_W_PRIME_JOULES: f64 = 40_000.0;

    /// R² at or above which a regression estimate is high confidence
    pub const HIGH_CONFIDENCE_R_SQUARED: f64 = 0.99;

    /// Single-point winner at or above this duration is high confidence (seconds)
    pub const HIGH_CONFIDENCE_DURATION_SECONDS: u32 = 2700;

    /// Single-point winner at or above this duration is medium confidence (seconds)
    pub const MEDIUM_CONFIDENCE_DURATION_SECONDS: u32 = 1200;

    /// Estimated CP must exceed current FTP by more than this to auto-apply (watts)
    pub const FTP_HYSTERESIS_WATTS: f64 = 5.0;
}

/// Training load (CTL/ATL/TSB)
pub mod training_load {
    /// Chronic Training Load time constant (days)
    pub const CTL_TIME_CONSTANT_DAYS: f64 = 42.0;

    /// Acute Training Load time constant (days)
    pub const ATL_TIME_CONSTANT_DAYS: f64 = 7.0;

    /// History walked before the target date so CTL has converged from its zero seed
    pub const DEFAULT_LOOKBACK_DAYS: i64 = 90;

    /// TSS multiplier (TSS is expressed as a percentage of one hour at FTP)
    pub const TSS_BASE_MULTIPLIER: f64 = 100.0;
}

/// TSB breakpoints for training status classification
pub mod tsb_thresholds {
    /// Above this TSB the athlete is fresh
    pub const FRESH_ABOVE: f64 = 10.0;
    /// At or above this TSB (and not fresh) form is optimal
    pub const OPTIMAL_MIN: f64 = -5.0;
    /// At or above this TSB (and not optimal) training is productive
    pub const PRODUCTIVE_MIN: f64 = -15.0;
    /// At or above this TSB (and not productive) the athlete is overreaching
    pub const OVERREACHING_MIN: f64 = -30.0;
}

/// Overtraining heuristics on a single day's load
pub mod overtraining {
    /// ATL above CTL times this factor is an acute spike
    pub const ACUTE_SPIKE_RATIO: f64 = 1.3;
    /// ATL above this is very high acute load
    pub const VERY_HIGH_ATL: f64 = 150.0;
    /// TSB below this is deep fatigue
    pub const DEEP_FATIGUE_TSB: f64 = -10.0;
}
