// ABOUTME: Configuration management module for analysis parameters
// ABOUTME: Defaults from physiological constants, environment overrides, and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module
//!
//! Components take their configuration section explicitly, so the numeric core reads
//! no global state unless a caller opts into [`intelligence::AnalysisConfig::global`].

/// Analysis configuration (power curve, critical power, training load)
pub mod intelligence;

pub use intelligence::{AnalysisConfig, ConfigError};
