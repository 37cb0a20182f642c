// ABOUTME: Critical Power (CP) and W' estimation from best efforts across durations
// ABOUTME: Multi-point work/time regression with duration-adjusted single-point fallback, FTP auto-update
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Critical power estimation
//!
//! Two estimates are computed from the athlete's best power per duration:
//!
//! - **Duration-adjusted single point** (always): for every effort of at least 3 minutes,
//!   `power - W'_default / duration` is a lower bound on CP. The largest one wins.
//! - **Regression** (when the data spans enough durations): ordinary least squares of
//!   `work = power x duration` against `duration`. Slope is CP, intercept is W'.
//!   Fits with CP at or below 100 W or W' outside [5000, 40000] J are discarded.
//!
//! The higher of the two becomes the estimate; ties go to the regression.
//!
//! # Scientific References
//!
//! - Monod, H. & Scherrer, J. (1965). "The work capacity of a synergic muscular group."
//!   *Ergonomics*, 8(3), 329-338.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::intelligence::CriticalPowerConfig;
use crate::constants::time::SECONDS_PER_MINUTE;
use crate::intelligence::statistical_analysis::StatisticalAnalyzer;
use crate::models::{DurationPower, RideCurve};

/// How much the estimate can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Tight regression or a long single effort
    High,
    /// Loose regression or a 20-45 minute single effort
    Medium,
    /// Single effort shorter than 20 minutes
    Low,
}

/// Which method produced the winning estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimationMethod {
    /// Multi-point work/time regression
    Regression,
    /// Best effort minus default W' spread over its duration
    DurationAdjusted,
}

/// Accepted regression fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpRegression {
    /// Fitted CP (slope) in watts
    pub critical_power: f64,
    /// Fitted W' (intercept) in joules
    pub w_prime: f64,
    /// Coefficient of determination of the work/time fit
    pub r_squared: f64,
    /// Standard error of the fitted work in joules
    pub standard_error: f64,
    /// Durations that went into the fit, ascending
    pub durations: Vec<u32>,
}

/// Best duration-adjusted single-point candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinglePointEstimate {
    /// `power - W'_default / duration` in watts
    pub critical_power: f64,
    /// Duration that produced the candidate
    pub duration_seconds: u32,
    /// Best power at that duration
    pub power: f64,
}

/// Critical power estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpEstimate {
    /// Estimated CP (treated as FTP) in watts
    pub critical_power: f64,
    /// W' in joules (fitted, or the default for single-point estimates)
    pub w_prime: f64,
    /// Confidence classification
    pub confidence: Confidence,
    /// Method of the winning estimate
    pub method: EstimationMethod,
    /// Labels of the durations behind the winning estimate (e.g. `"3min"`)
    pub supporting_durations: Vec<String>,
    /// Human-readable source, e.g. `"regression (3min, 5min, 10min)"`
    pub based_on: String,
    /// Distinct rides that contributed best efforts (0 when unknown)
    pub activity_count: usize,
    /// Regression diagnostics whenever a fit was accepted, even if it lost
    pub regression: Option<CpRegression>,
    /// Single-point candidate, if any effort was long enough
    pub single_point: Option<SinglePointEstimate>,
}

impl CpEstimate {
    /// Sustainable power for `duration_seconds` under the CP model: `CP + W' / t`
    #[must_use]
    pub fn power_at_duration(&self, duration_seconds: f64) -> Option<f64> {
        (duration_seconds > 0.0).then(|| self.critical_power + self.w_prime / duration_seconds)
    }

    /// Seconds until W' is exhausted at `power`: `W' / (P - CP)`
    ///
    /// `None` at or below CP, where the model predicts no exhaustion.
    #[must_use]
    pub fn time_to_exhaustion(&self, power: f64) -> Option<f64> {
        (power > self.critical_power).then(|| self.w_prime / (power - self.critical_power))
    }
}

/// Why an FTP update was or was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FtpUpdateReason {
    /// Athlete has no FTP yet
    NoCurrentFtp,
    /// Estimate beats the current FTP by more than the hysteresis band
    Improved,
    /// Estimate is within the hysteresis band of the current FTP
    WithinHysteresis,
    /// Estimate is below the current FTP; lowering needs an explicit action
    BelowCurrent,
    /// Low confidence estimates are never applied
    LowConfidence,
}

impl fmt::Display for FtpUpdateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoCurrentFtp => "no current FTP",
            Self::Improved => "estimate exceeds current FTP",
            Self::WithinHysteresis => "estimate within hysteresis band",
            Self::BelowCurrent => "estimate below current FTP",
            Self::LowConfidence => "estimate confidence too low",
        };
        f.write_str(text)
    }
}

/// Outcome of [`CriticalPowerEstimator::auto_update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FtpUpdateDecision {
    /// Whether the caller should persist `new_ftp`
    pub apply: bool,
    /// Rounded CP to store when applying
    pub new_ftp: Option<u32>,
    /// Reason for the decision
    pub reason: FtpUpdateReason,
}

impl FtpUpdateDecision {
    const fn skip(reason: FtpUpdateReason) -> Self {
        Self {
            apply: false,
            new_ftp: None,
            reason,
        }
    }
}

/// Estimates CP and W' from best efforts
#[derive(Debug, Clone, Default)]
pub struct CriticalPowerEstimator {
    config: CriticalPowerConfig,
}

impl CriticalPowerEstimator {
    /// Estimator with default physiological bounds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator using the given configuration section
    #[must_use]
    pub fn with_config(config: &CriticalPowerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Estimate CP from best power per duration
    ///
    /// Returns `None` when the map is empty, or when no effort is long enough for either method.
    #[must_use]
    pub fn estimate(&self, best_by_duration: &BTreeMap<u32, f64>) -> Option<CpEstimate> {
        let efforts = Self::valid_efforts(best_by_duration);
        if efforts.is_empty() {
            return None;
        }

        let single_point = self.single_point(&efforts);
        let regression = self.fit_regression(&efforts);

        let use_regression = match (&regression, &single_point) {
            (Some(fit), Some(single)) => fit.critical_power >= single.critical_power,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => {
                debug!(
                    efforts = efforts.len(),
                    "No effort long enough for critical power estimation"
                );
                return None;
            }
        };

        let estimate = if let (true, Some(fit)) = (use_regression, &regression) {
            let labels: Vec<String> = fit.durations.iter().map(|&d| duration_label(d)).collect();
            CpEstimate {
                critical_power: fit.critical_power,
                w_prime: fit.w_prime,
                confidence: if fit.r_squared >= self.config.high_confidence_r_squared {
                    Confidence::High
                } else {
                    Confidence::Medium
                },
                method: EstimationMethod::Regression,
                based_on: format!("regression ({})", labels.join(", ")),
                supporting_durations: labels,
                activity_count: 0,
                regression: regression.clone(),
                single_point,
            }
        } else {
            let single = single_point?;
            let label = duration_label(single.duration_seconds);
            CpEstimate {
                critical_power: single.critical_power,
                w_prime: self.config.default_w_prime_joules,
                confidence: self.single_point_confidence(single.duration_seconds),
                method: EstimationMethod::DurationAdjusted,
                based_on: format!("{label} effort"),
                supporting_durations: vec![label],
                activity_count: 0,
                regression,
                single_point: Some(single),
            }
        };

        debug!(
            critical_power = estimate.critical_power,
            method = ?estimate.method,
            confidence = ?estimate.confidence,
            "Estimated critical power"
        );
        Some(estimate)
    }

    /// Estimate CP from a materialized collection of ride curves
    ///
    /// Builds the best power per duration in one pass, ties keeping the first ride,
    /// and counts the distinct rides that hold a best effort.
    #[must_use]
    pub fn estimate_from_curves(&self, curves: &[RideCurve]) -> Option<CpEstimate> {
        let mut best: BTreeMap<u32, (f64, &str)> = BTreeMap::new();
        for ride in curves {
            for (duration, power) in ride.curve.iter().filter(|(_, p)| p.is_finite()) {
                let entry = best.entry(duration).or_insert((power, ride.ride_id.as_str()));
                if power > entry.0 {
                    *entry = (power, ride.ride_id.as_str());
                }
            }
        }

        let activity_count = best.values().map(|(_, id)| *id).collect::<HashSet<_>>().len();
        let best_by_duration = best.into_iter().map(|(d, (p, _))| (d, p)).collect();

        self.estimate(&best_by_duration).map(|estimate| CpEstimate {
            activity_count,
            ..estimate
        })
    }

    /// Method A: highest `power - W'_default / duration` over efforts of at least 3 minutes
    ///
    /// Candidates at or below 0 W are ignored.
    #[must_use]
    pub fn single_point(&self, efforts: &[DurationPower]) -> Option<SinglePointEstimate> {
        efforts
            .iter()
            .filter(|e| e.duration_seconds >= self.config.min_duration_seconds)
            .map(|e| SinglePointEstimate {
                critical_power: e.power
                    - self.config.default_w_prime_joules / f64::from(e.duration_seconds),
                duration_seconds: e.duration_seconds,
                power: e.power,
            })
            .filter(|candidate| candidate.critical_power > 0.0)
            .fold(None, |best: Option<SinglePointEstimate>, candidate| match best {
                Some(b) if b.critical_power >= candidate.critical_power => Some(b),
                _ => Some(candidate),
            })
    }

    /// Method B: work/time regression over 3-30 minute efforts
    ///
    /// Returns `None` when too few durations qualify, the durations span too narrow a
    /// range, or the fit fails the physiological gates.
    #[must_use]
    pub fn fit_regression(&self, efforts: &[DurationPower]) -> Option<CpRegression> {
        let cfg = &self.config;
        let mut points: Vec<&DurationPower> = efforts
            .iter()
            .filter(|e| {
                e.duration_seconds >= cfg.min_duration_seconds
                    && e.duration_seconds <= cfg.max_regression_duration_seconds
            })
            .collect();
        points.sort_by_key(|e| e.duration_seconds);
        points.dedup_by_key(|e| e.duration_seconds);

        if points.len() < cfg.min_regression_points {
            debug!(
                points = points.len(),
                required = cfg.min_regression_points,
                "Too few durations for CP regression"
            );
            return None;
        }

        let (Some(shortest), Some(longest)) = (points.first(), points.last()) else {
            return None;
        };
        let ratio = f64::from(longest.duration_seconds) / f64::from(shortest.duration_seconds);
        if ratio < cfg.min_duration_ratio {
            debug!(ratio, "Duration span too narrow for CP regression");
            return None;
        }

        let work_points: Vec<(f64, f64)> = points
            .iter()
            .map(|e| (f64::from(e.duration_seconds), e.work_joules()))
            .collect();
        let fit = match StatisticalAnalyzer::linear_regression(&work_points) {
            Ok(fit) => fit,
            Err(e) => {
                debug!(error = %e, "CP regression failed, falling back to single point");
                return None;
            }
        };

        let (critical_power, w_prime) = (fit.slope, fit.intercept);
        if !critical_power.is_finite()
            || critical_power <= cfg.min_cp_watts
            || !(cfg.w_prime_min..=cfg.w_prime_max).contains(&w_prime)
        {
            debug!(
                critical_power,
                w_prime, "CP regression rejected by physiological bounds"
            );
            return None;
        }

        Some(CpRegression {
            critical_power,
            w_prime,
            r_squared: fit.r_squared,
            standard_error: fit.standard_error,
            durations: points.iter().map(|e| e.duration_seconds).collect(),
        })
    }

    /// Decide whether an estimate should replace the athlete's FTP
    ///
    /// Never lowers FTP and never applies a low-confidence estimate. A current FTP of 0
    /// counts as unset.
    #[must_use]
    pub fn auto_update(&self, current_ftp: Option<u32>, estimate: &CpEstimate) -> FtpUpdateDecision {
        if estimate.confidence == Confidence::Low {
            return FtpUpdateDecision::skip(FtpUpdateReason::LowConfidence);
        }

        let new_ftp = estimate.critical_power.round() as u32;
        match current_ftp.filter(|&ftp| ftp > 0) {
            None => FtpUpdateDecision {
                apply: true,
                new_ftp: Some(new_ftp),
                reason: FtpUpdateReason::NoCurrentFtp,
            },
            Some(current) => {
                let current = f64::from(current);
                if estimate.critical_power > current + self.config.ftp_hysteresis_watts {
                    FtpUpdateDecision {
                        apply: true,
                        new_ftp: Some(new_ftp),
                        reason: FtpUpdateReason::Improved,
                    }
                } else if estimate.critical_power < current {
                    FtpUpdateDecision::skip(FtpUpdateReason::BelowCurrent)
                } else {
                    FtpUpdateDecision::skip(FtpUpdateReason::WithinHysteresis)
                }
            }
        }
    }

    fn single_point_confidence(&self, duration_seconds: u32) -> Confidence {
        if duration_seconds >= self.config.high_confidence_duration_seconds {
            Confidence::High
        } else if duration_seconds >= self.config.medium_confidence_duration_seconds {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }

    /// Drop pairs that cannot describe a real effort
    fn valid_efforts(best_by_duration: &BTreeMap<u32, f64>) -> Vec<DurationPower> {
        let efforts: Vec<DurationPower> = best_by_duration
            .iter()
            .map(|(&d, &p)| DurationPower::new(d, p))
            .filter(DurationPower::is_valid)
            .collect();

        let rejected = best_by_duration.len() - efforts.len();
        if rejected > 0 {
            warn!(rejected, "Ignoring invalid duration/power pairs");
        }
        efforts
    }
}

/// `"3min"` for whole minutes, `"45s"` otherwise
fn duration_label(duration_seconds: u32) -> String {
    if duration_seconds >= SECONDS_PER_MINUTE && duration_seconds % SECONDS_PER_MINUTE == 0 {
        format!("{}min", duration_seconds / SECONDS_PER_MINUTE)
    } else {
        format!("{duration_seconds}s")
    }
}
