// ABOUTME: Main library entry point for ride power and training load analysis
// ABOUTME: Power curves, personal records, critical power estimation, and CTL/ATL/TSB modeling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ridemetrics
//!
//! Physiological training metrics computed from cycling power data.
//!
//! ## Components
//!
//! - **`PowerCurveAnalyzer`**: best sustained average power for canonical durations
//! - **`PersonalRecordsAggregator`**: all-time bests per duration across rides
//! - **`CriticalPowerEstimator`**: CP (treated as FTP) and W' from best efforts
//! - **`TrainingLoadCalculator`**: TSS, CTL (fitness), ATL (fatigue), TSB (form)
//!
//! Storage, provider access, and scheduling stay with the caller; every component
//! takes already-materialized inputs and returns plain values.
//!
//! ## Example Usage
//!
//! ```rust
//! use ridemetrics::intelligence::{CriticalPowerEstimator, PowerCurveAnalyzer};
//! use std::collections::BTreeMap;
//!
//! let samples = vec![250.0; 1200];
//! let curve = PowerCurveAnalyzer::new().analyze_ride(&samples);
//! assert_eq!(curve.power_at(600), Some(250.0));
//!
//! let best: BTreeMap<u32, f64> = curve.iter().collect();
//! let estimate = CriticalPowerEstimator::new().estimate(&best);
//! assert!(estimate.is_some());
//! ```

// ── Foundation re-exports ───────────────────────────────────────────────
pub use ridemetrics_core::{constants, errors, models};

/// Configuration defaults, environment overrides and validation
pub mod config;

/// Power and training load analysis
pub mod intelligence;

/// Structured logging setup
pub mod logging;
