// ABOUTME: All-time best power per duration folded from many rides' power curves
// ABOUTME: Derived view recomputed on demand; ties keep the first ride encountered
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::power_curve::CANONICAL_DURATIONS;
use crate::models::RideCurve;

/// Best power at one duration and the ride that set it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    /// Effort duration in seconds
    pub duration_seconds: u32,
    /// Best average power in watts (0 when no ride covered this duration)
    pub power: f64,
    /// Ride that set the record
    pub ride_id: Option<String>,
    /// Date of that ride
    pub date: Option<NaiveDate>,
}

impl PersonalRecord {
    fn empty(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            power: 0.0,
            ride_id: None,
            date: None,
        }
    }

    /// Whether any ride has set this record
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.ride_id.is_some()
    }
}

/// Personal records keyed by duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecords {
    records: BTreeMap<u32, PersonalRecord>,
}

impl PersonalRecords {
    /// Zero/null record for every duration
    #[must_use]
    pub fn empty(durations: &[u32]) -> Self {
        Self {
            records: durations
                .iter()
                .map(|&d| (d, PersonalRecord::empty(d)))
                .collect(),
        }
    }

    /// Record at a duration
    #[must_use]
    pub fn get(&self, duration_seconds: u32) -> Option<&PersonalRecord> {
        self.records.get(&duration_seconds)
    }

    /// All records in ascending duration order
    pub fn iter(&self) -> impl Iterator<Item = &PersonalRecord> {
        self.records.values()
    }

    /// Fold one ride's curve in, returning the durations it improved
    ///
    /// Only strictly higher power replaces a record, so ties keep the earlier ride.
    pub fn update(&mut self, ride: &RideCurve) -> Vec<u32> {
        let mut improved = Vec::new();
        for record in self.records.values_mut() {
            let Some(power) = ride.curve.power_at(record.duration_seconds) else {
                continue;
            };
            if power > record.power {
                record.power = power;
                record.ride_id = Some(ride.ride_id.clone());
                record.date = Some(ride.date);
                improved.push(record.duration_seconds);
            }
        }
        improved
    }

    /// Best power per duration for the durations that have a record
    ///
    /// This is the input shape the critical power estimator takes.
    #[must_use]
    pub fn best_by_duration(&self) -> BTreeMap<u32, f64> {
        self.records
            .values()
            .filter(|r| r.is_set())
            .map(|r| (r.duration_seconds, r.power))
            .collect()
    }

    /// Number of distinct rides holding at least one record
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.records
            .values()
            .filter_map(|r| r.ride_id.as_deref())
            .collect::<HashSet<_>>()
            .len()
    }
}

/// Folds power curves from many rides into all-time bests
#[derive(Debug, Clone)]
pub struct PersonalRecordsAggregator {
    durations: Vec<u32>,
}

impl Default for PersonalRecordsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalRecordsAggregator {
    /// Aggregator over the canonical durations
    #[must_use]
    pub fn new() -> Self {
        Self {
            durations: CANONICAL_DURATIONS.to_vec(),
        }
    }

    /// Aggregator over a custom duration set
    #[must_use]
    pub fn with_durations(durations: &[u32]) -> Self {
        Self {
            durations: durations.to_vec(),
        }
    }

    /// Single pass over `curves` keeping a running best per duration
    ///
    /// An empty collection yields the all-zero record set.
    #[must_use]
    pub fn aggregate(&self, curves: &[RideCurve]) -> PersonalRecords {
        let mut records = PersonalRecords::empty(&self.durations);
        for ride in curves {
            records.update(ride);
        }
        debug!(
            rides = curves.len(),
            record_rides = records.activity_count(),
            "Aggregated personal records"
        );
        records
    }
}
