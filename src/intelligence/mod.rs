// ABOUTME: Intelligence module grouping the power and training load analysis components
// ABOUTME: Re-exports the analyzers, estimators, and their result types for flat import paths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Intelligence Module
//!
//! Pure, synchronous computations over already-fetched ride data:
//!
//! - [`power_curve`] - best sustained power per duration from per-second samples
//! - [`personal_records`] - all-time bests folded across rides
//! - [`critical_power`] - CP/W' estimation and FTP auto-update decisions
//! - [`training_load`] - TSS, CTL/ATL/TSB and training status
//!
//! Nothing here performs I/O or holds shared mutable state, so calls for different
//! rides or athletes can run concurrently without coordination.

/// Pluggable algorithm selection (TSS)
pub mod algorithms;
/// Critical power and W' estimation
pub mod critical_power;
/// Cross-ride personal records
pub mod personal_records;
/// Best-effort extraction and normalized power
pub mod power_curve;
/// Least squares regression
pub mod statistical_analysis;
/// CTL/ATL/TSB training load
pub mod training_load;

pub use algorithms::TssAlgorithm;
pub use critical_power::{
    Confidence, CpEstimate, CpRegression, CriticalPowerEstimator, EstimationMethod,
    FtpUpdateDecision, FtpUpdateReason, SinglePointEstimate,
};
pub use personal_records::{PersonalRecord, PersonalRecords, PersonalRecordsAggregator};
pub use power_curve::{BestEffort, PowerCurveAnalyzer};
pub use statistical_analysis::{RegressionResult, StatisticalAnalyzer};
pub use training_load::{
    OvertrainingRisk, RiskLevel, StatusClassification, TrainingLoadCalculator, TrainingLoadPoint,
    TrainingLoadSummary, TrainingStatus,
};
