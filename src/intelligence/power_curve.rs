// ABOUTME: Best sustained power extraction from per-second power samples of one ride
// ABOUTME: Sliding-window best efforts, per-ride power curves, normalized power, parallel fan-out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: sample counts stay far below 2^52

//! Power curve analysis
//!
//! A best effort for duration `d` is the window of `d` consecutive samples with the
//! highest arithmetic mean. Windows are scanned with a running sum, so each duration
//! costs one pass over the samples. For integer watt readings the running sum is
//! exact, which keeps tie-breaking (earliest window wins) deterministic.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::intelligence::PowerCurveConfig;
use crate::constants::power_curve::{CANONICAL_DURATIONS, NORMALIZED_POWER_WINDOW_SECONDS};
use crate::models::{PowerCurve, RideCurve, RidePowerStream};

/// Best average power over one window of a ride
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestEffort {
    /// Mean power over the window in watts
    pub average_power: f64,
    /// Index of the first sample in the window
    pub start_index: usize,
    /// Index one past the last sample in the window
    pub end_index: usize,
}

/// Extracts best efforts and power curves from raw power samples
#[derive(Debug, Clone)]
pub struct PowerCurveAnalyzer {
    durations: Vec<u32>,
    normalized_power_window: usize,
}

impl Default for PowerCurveAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerCurveAnalyzer {
    /// Analyzer over the ten canonical durations (1 to 60 minutes)
    #[must_use]
    pub fn new() -> Self {
        Self {
            durations: CANONICAL_DURATIONS.to_vec(),
            normalized_power_window: NORMALIZED_POWER_WINDOW_SECONDS,
        }
    }

    /// Analyzer using the durations and NP window from configuration
    #[must_use]
    pub fn with_config(config: &PowerCurveConfig) -> Self {
        Self {
            durations: config.durations.clone(),
            normalized_power_window: config.normalized_power_window_seconds,
        }
    }

    /// Durations this analyzer evaluates, in seconds
    #[must_use]
    pub fn durations(&self) -> &[u32] {
        &self.durations
    }

    /// Highest mean power over any window of `duration_seconds` consecutive samples
    ///
    /// Returns `None` when the duration is zero or longer than the sample sequence.
    /// Ties resolve to the earliest window. Negative or non-finite readings count as 0 W.
    #[must_use]
    pub fn best_effort(samples: &[f64], duration_seconds: u32) -> Option<BestEffort> {
        let width = duration_seconds as usize;
        if width == 0 || samples.len() < width {
            return None;
        }

        let mut window_sum: f64 = samples[..width].iter().copied().map(sanitize).sum();
        let mut best_sum = window_sum;
        let mut best_start = 0;

        for start in 1..=samples.len() - width {
            window_sum += sanitize(samples[start + width - 1]) - sanitize(samples[start - 1]);
            if window_sum > best_sum {
                best_sum = window_sum;
                best_start = start;
            }
        }

        Some(BestEffort {
            average_power: best_sum / width as f64,
            start_index: best_start,
            end_index: best_start + width,
        })
    }

    /// Best effort for every configured duration that fits inside the ride
    ///
    /// Durations without a valid window are omitted rather than zero-filled.
    #[must_use]
    pub fn analyze_ride(&self, samples: &[f64]) -> PowerCurve {
        let invalid = samples
            .iter()
            .filter(|w| !w.is_finite() || **w < 0.0)
            .count();
        if invalid > 0 {
            warn!(
                invalid_samples = invalid,
                "Treating negative or non-finite power samples as 0 W"
            );
        }

        let curve: PowerCurve = self
            .durations
            .iter()
            .filter_map(|&duration| {
                Self::best_effort(samples, duration).map(|effort| (duration, effort.average_power))
            })
            .collect();

        debug!(
            samples = samples.len(),
            durations = curve.len(),
            "Analyzed ride power curve"
        );
        curve
    }

    /// Analyze many rides in parallel, one task per ride
    ///
    /// Rides without any samples are skipped. Output keeps input order.
    #[must_use]
    pub fn analyze_rides(&self, rides: &[RidePowerStream]) -> Vec<RideCurve> {
        rides
            .par_iter()
            .filter(|ride| !ride.samples.is_empty())
            .map(|ride| RideCurve {
                ride_id: ride.ride_id.clone(),
                date: ride.date,
                curve: self.analyze_ride(&ride.samples),
            })
            .collect()
    }

    /// Normalized power using this analyzer's rolling window
    #[must_use]
    pub fn ride_normalized_power(&self, samples: &[f64]) -> Option<f64> {
        Self::normalized_power(samples, self.normalized_power_window)
    }

    /// Normalized power: 4th root of the mean of 4th powers of rolling-window means
    ///
    /// Returns `None` when the ride is shorter than the window.
    #[must_use]
    pub fn normalized_power(samples: &[f64], window_seconds: usize) -> Option<f64> {
        if window_seconds == 0 || samples.len() < window_seconds {
            return None;
        }

        let window = window_seconds as f64;
        let mut rolling_sum: f64 = samples[..window_seconds].iter().copied().map(sanitize).sum();
        let mut fourth_power_sum = (rolling_sum / window).powi(4);

        for end in window_seconds..samples.len() {
            rolling_sum += sanitize(samples[end]) - sanitize(samples[end - window_seconds]);
            // Running sums can drift a hair below zero on float input
            fourth_power_sum += (rolling_sum.max(0.0) / window).powi(4);
        }

        let count = (samples.len() - window_seconds + 1) as f64;
        Some((fourth_power_sum / count).powf(0.25))
    }
}

fn sanitize(watts: f64) -> f64 {
    if watts.is_finite() && watts > 0.0 {
        watts
    } else {
        0.0
    }
}
