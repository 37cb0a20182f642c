// ABOUTME: Algorithm abstraction layer enabling pluggable calculation methods
// ABOUTME: Provides enum-based dispatch for TSS input selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Algorithm Selection Module
//!
//! Algorithms are enums, not strings or booleans, so a caller choosing a TSS strategy
//! gets a type-checked value and the numeric code dispatches without a vtable.
//!
//! # Example
//!
//! ```rust
//! use ridemetrics::intelligence::algorithms::TssAlgorithm;
//!
//! let algorithm: TssAlgorithm = "np".parse().unwrap_or_default();
//! assert_eq!(algorithm.name(), "normalized_power");
//! ```

pub mod tss;

pub use tss::{training_stress_score, TssAlgorithm};
