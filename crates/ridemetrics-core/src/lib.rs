// ABOUTME: Core types and constants for the ridemetrics power analysis library
// ABOUTME: Foundation crate with error handling, ride input models, and physiological constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ridemetrics Core
//!
//! Foundation crate providing shared types and constants for the ridemetrics
//! analysis library. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Physiological and time constants organized by domain
//! - **models**: Ride inputs supplied by collaborators (summaries, curves, TSS records)

/// Unified error handling system with standard error codes
pub mod errors;

/// Physiological constants organized by domain
pub mod constants;

/// Ride input models consumed by the analysis components
pub mod models;
