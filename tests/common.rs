// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, seeded sample generators, and brute-force reference helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `ridemetrics`

use std::collections::BTreeMap;
use std::sync::Once;

use chrono::NaiveDate;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ridemetrics::models::{PowerCurve, RideCurve};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("ridemetrics=warn")
            .with_test_writer()
            .try_init();
    });
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Reproducible generator for property checks
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Integer-watt samples with coasting zeros and occasional surges
pub fn random_samples(rng: &mut ChaCha8Rng, len: usize) -> Vec<f64> {
    (0..len)
        .map(|_| match rng.gen_range(0_u32..10) {
            0 => 0.0,
            1 => f64::from(rng.gen_range(500_u32..900)),
            _ => f64::from(rng.gen_range(120_u32..320)),
        })
        .collect()
}

/// Best mean over every window, computed the slow way
pub fn brute_force_best(samples: &[f64], width: usize) -> (f64, usize) {
    let mut best = f64::NEG_INFINITY;
    let mut best_start = 0;
    for start in 0..=samples.len() - width {
        let mean = samples[start..start + width].iter().sum::<f64>() / width as f64;
        if mean > best {
            best = mean;
            best_start = start;
        }
    }
    (best, best_start)
}

/// Best efforts following the two-parameter model `P = CP + W'/t` exactly
pub fn model_best_efforts(cp: f64, w_prime: f64, durations: &[u32]) -> BTreeMap<u32, f64> {
    durations
        .iter()
        .map(|&d| (d, cp + w_prime / f64::from(d)))
        .collect()
}

/// Ride curve from `(duration, watts)` pairs
pub fn ride_curve(ride_id: &str, day: NaiveDate, efforts: &[(u32, f64)]) -> RideCurve {
    RideCurve {
        ride_id: ride_id.to_owned(),
        date: day,
        curve: efforts.iter().copied().collect::<PowerCurve>(),
    }
}
