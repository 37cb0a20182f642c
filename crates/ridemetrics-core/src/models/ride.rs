// ABOUTME: Ride summary and per-ride TSS records used by training load calculation
// ABOUTME: Metadata only; raw power samples are passed separately as slices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary of one ride as reported by an activity-data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideSummary {
    /// Provider ride identifier
    pub id: String,
    /// Calendar date the ride started on (athlete local time)
    pub date: NaiveDate,
    /// Moving duration in seconds
    pub moving_time_seconds: Option<u32>,
    /// Average power in watts
    pub average_power: Option<f64>,
    /// Normalized power in watts, when the provider computed it
    pub normalized_power: Option<f64>,
}

impl RideSummary {
    /// Create a summary with just identity and date; power fields start empty
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            moving_time_seconds: None,
            average_power: None,
            normalized_power: None,
        }
    }

    /// Set moving time
    #[must_use]
    pub fn moving_time(mut self, seconds: u32) -> Self {
        self.moving_time_seconds = Some(seconds);
        self
    }

    /// Set average power
    #[must_use]
    pub fn average_power(mut self, watts: f64) -> Self {
        self.average_power = Some(watts);
        self
    }

    /// Set normalized power
    #[must_use]
    pub fn normalized_power(mut self, watts: f64) -> Self {
        self.normalized_power = Some(watts);
        self
    }
}

/// TSS of one ride on a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RideTss {
    /// Calendar date of the ride
    pub date: NaiveDate,
    /// Training Stress Score of the ride
    pub tss: f64,
}

/// Per-second power samples of one ride, as delivered by an activity-data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidePowerStream {
    /// Ride identifier
    pub ride_id: String,
    /// Ride date
    pub date: NaiveDate,
    /// One reading per second in watts; zeros are coasting
    pub samples: Vec<f64>,
}
