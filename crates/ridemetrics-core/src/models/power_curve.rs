// ABOUTME: Per-ride power curve (duration -> best average watts) and its ride metadata
// ABOUTME: Also defines the duration/power pair fed to critical power estimation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Best average power per duration for one ride
///
/// Durations with no valid window are absent, never zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PowerCurve {
    efforts: BTreeMap<u32, f64>,
}

impl PowerCurve {
    /// Create an empty curve
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the best power for a duration, replacing any previous value
    pub fn insert(&mut self, duration_seconds: u32, watts: f64) {
        self.efforts.insert(duration_seconds, watts);
    }

    /// Best power at exactly this duration
    #[must_use]
    pub fn power_at(&self, duration_seconds: u32) -> Option<f64> {
        self.efforts.get(&duration_seconds).copied()
    }

    /// Iterate `(duration, watts)` in ascending duration order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.efforts.iter().map(|(d, w)| (*d, *w))
    }

    /// Number of durations present
    #[must_use]
    pub fn len(&self) -> usize {
        self.efforts.len()
    }

    /// True when no duration had enough samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.efforts.is_empty()
    }
}

impl FromIterator<(u32, f64)> for PowerCurve {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self {
            efforts: iter.into_iter().collect(),
        }
    }
}

/// A power curve together with the ride that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideCurve {
    /// Ride identifier
    pub ride_id: String,
    /// Ride date
    pub date: NaiveDate,
    /// The ride's best efforts
    pub curve: PowerCurve,
}

/// A best effort expressed as a duration and the average power held for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationPower {
    /// Effort duration in seconds
    pub duration_seconds: u32,
    /// Average power in watts
    pub power: f64,
}

impl DurationPower {
    /// Create a pair
    #[must_use]
    pub const fn new(duration_seconds: u32, power: f64) -> Self {
        Self {
            duration_seconds,
            power,
        }
    }

    /// Total work of the effort in joules
    #[must_use]
    pub fn work_joules(&self) -> f64 {
        self.power * f64::from(self.duration_seconds)
    }

    /// Finite, non-negative power over a non-zero duration
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.duration_seconds > 0 && self.power.is_finite() && self.power >= 0.0
    }
}
