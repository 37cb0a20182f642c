// ABOUTME: Ride input models supplied by collaborators outside the analysis core
// ABOUTME: Re-exports ride summaries, per-ride power curves, and duration/power pairs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared by the analysis components.
//!
//! Everything here is already-fetched data. Storage, provider sync and persistence
//! happen outside this workspace; callers materialize these structs and hand them in.

mod power_curve;
mod ride;

pub use power_curve::{DurationPower, PowerCurve, RideCurve};
pub use ride::{RidePowerStream, RideSummary, RideTss};
