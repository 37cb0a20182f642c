// ABOUTME: Training Stress Score (TSS) calculation with selectable power inputs
// ABOUTME: Supports average power, normalized power, and hybrid approaches for TSS computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::power_curve::NORMALIZED_POWER_WINDOW_SECONDS;
use crate::constants::time::SECONDS_PER_HOUR_F64;
use crate::constants::training_load::TSS_BASE_MULTIPLIER;
use crate::errors::AppError;
use crate::intelligence::power_curve::PowerCurveAnalyzer;
use crate::models::RideSummary;

/// Training Stress Score of one ride
///
/// `np = normalized_power` when provided and positive, else `average_power`.
/// `TSS = duration_seconds x np x IF / (ftp x 3600) x 100` with `IF = np / ftp`.
///
/// Fails soft: returns 0 when duration, power, or FTP is zero, negative, or not finite.
#[must_use]
pub fn training_stress_score(
    duration_seconds: f64,
    average_power: f64,
    ftp: f64,
    normalized_power: Option<f64>,
) -> f64 {
    let np = normalized_power
        .filter(|np| np.is_finite() && *np > 0.0)
        .unwrap_or(average_power);

    if !(duration_seconds.is_finite() && duration_seconds > 0.0)
        || !(np.is_finite() && np > 0.0)
        || !(ftp.is_finite() && ftp > 0.0)
    {
        return 0.0;
    }

    let intensity_factor = np / ftp;
    duration_seconds * np * intensity_factor / (ftp * SECONDS_PER_HOUR_F64) * TSS_BASE_MULTIPLIER
}

/// TSS calculation algorithm selection
///
/// - `AvgPower`: always works, but underestimates variable efforts
/// - `NormalizedPower`: physiologically accurate, needs a power stream or a provider NP
/// - `Hybrid`: provider NP, then NP from the stream, then average power
///
/// # Scientific References
///
/// - Coggan, A. & Allen, H. (2010). "Training and Racing with a Power Meter." `VeloPress`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TssAlgorithm {
    /// Average power based TSS
    ///
    /// Formula: `duration_hours x (avg_power/FTP)² x 100`
    AvgPower,

    /// Normalized Power based TSS
    ///
    /// Formula: `duration_hours x (NP/FTP)² x 100`
    NormalizedPower {
        /// Rolling window size in seconds (standard: 30)
        window_seconds: u32,
    },

    /// Provider NP if present, else NP from samples, else average power
    #[default]
    Hybrid,
}

impl TssAlgorithm {
    /// Calculate TSS for a ride
    ///
    /// `samples` are the ride's per-second power readings when the caller has them.
    /// Missing duration or power yields 0, matching [`training_stress_score`].
    #[must_use]
    pub fn calculate(&self, ride: &RideSummary, samples: Option<&[f64]>, ftp: f64) -> f64 {
        let duration = ride.moving_time_seconds.map_or(0.0, f64::from);
        let average_power = ride.average_power.unwrap_or(0.0);

        match self {
            Self::AvgPower => training_stress_score(duration, average_power, ftp, None),
            Self::NormalizedPower { window_seconds } => {
                let np = samples
                    .and_then(|s| PowerCurveAnalyzer::normalized_power(s, *window_seconds as usize))
                    .or(ride.normalized_power);
                np.map_or(0.0, |np| training_stress_score(duration, np, ftp, Some(np)))
            }
            Self::Hybrid => {
                let np = ride
                    .normalized_power
                    .filter(|np| *np > 0.0)
                    .or_else(|| {
                        samples.and_then(|s| {
                            PowerCurveAnalyzer::normalized_power(s, NORMALIZED_POWER_WINDOW_SECONDS)
                        })
                    });
                training_stress_score(duration, average_power, ftp, np)
            }
        }
    }

    /// Get algorithm name for logging and debugging
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AvgPower => "avg_power",
            Self::NormalizedPower { .. } => "normalized_power",
            Self::Hybrid => "hybrid",
        }
    }

    /// Get algorithm description
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AvgPower => "Average power based TSS (fast, always works)",
            Self::NormalizedPower { .. } => {
                "Normalized Power based TSS (accurate, requires power stream or provider NP)"
            }
            Self::Hybrid => "Hybrid TSS (provider NP, then stream NP, then avg_power)",
        }
    }
}

impl FromStr for TssAlgorithm {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avg_power" | "average_power" => Ok(Self::AvgPower),
            "normalized_power" | "np" => Ok(Self::NormalizedPower {
                window_seconds: NORMALIZED_POWER_WINDOW_SECONDS as u32,
            }),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(AppError::invalid_input(format!(
                "Unknown TSS algorithm: '{other}'. Valid options: avg_power, normalized_power, hybrid"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::NaiveDate;

    use super::*;

    fn ride() -> RideSummary {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        RideSummary::new("r1", date).moving_time(3600).average_power(200.0)
    }

    #[test]
    fn test_one_hour_at_ftp_is_100() {
        let tss = training_stress_score(3600.0, 250.0, 250.0, None);
        assert!((tss - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_hybrid_prefers_provider_np() {
        let ride = ride().normalized_power(250.0);
        let tss = TssAlgorithm::Hybrid.calculate(&ride, None, 250.0);
        assert!((tss - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_hybrid_falls_back_to_average_power() {
        let tss = TssAlgorithm::Hybrid.calculate(&ride(), None, 200.0);
        assert!((tss - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_np_without_any_source_is_zero() {
        let algorithm = TssAlgorithm::NormalizedPower { window_seconds: 30 };
        assert!(algorithm.calculate(&ride(), None, 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("np".parse::<TssAlgorithm>().unwrap().name(), "normalized_power");
        assert_eq!(
            "Average_Power".parse::<TssAlgorithm>().unwrap(),
            TssAlgorithm::AvgPower
        );
        assert!("trimp".parse::<TssAlgorithm>().is_err());
    }
}
