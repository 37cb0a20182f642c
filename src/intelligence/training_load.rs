// ABOUTME: Training load calculations including TSS, CTL, ATL, and TSB for fitness tracking
// ABOUTME: Day-by-day exponential moving averages over a daily TSS series, status and risk ladders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Training load
//!
//! CTL (fitness) and ATL (fatigue) follow the recurrence
//! `load = load + (day_tss - load) / time_constant`, evaluated for every calendar day
//! in the window. Days without rides contribute 0 TSS and still decay the loads.
//! TSB (form) is `CTL - ATL` of the emitted, rounded loads.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::intelligence::TrainingLoadConfig;
use crate::constants::overtraining::{ACUTE_SPIKE_RATIO, DEEP_FATIGUE_TSB, VERY_HIGH_ATL};
use crate::constants::training_load::{
    ATL_TIME_CONSTANT_DAYS, CTL_TIME_CONSTANT_DAYS, DEFAULT_LOOKBACK_DAYS,
};
use crate::constants::tsb_thresholds::{FRESH_ABOVE, OPTIMAL_MIN, OVERREACHING_MIN, PRODUCTIVE_MIN};
use crate::errors::{AppError, AppResult};
use crate::intelligence::algorithms::{training_stress_score, TssAlgorithm};
use crate::models::{RideSummary, RideTss};

/// EMA state for one calendar day, rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoadPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Chronic Training Load (fitness)
    pub ctl: f64,
    /// Acute Training Load (fatigue)
    pub atl: f64,
    /// Training Stress Balance (form)
    pub tsb: f64,
}

/// Training status based on TSB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// TSB > 10: rested, ready to race
    Fresh,
    /// -5 <= TSB <= 10: balanced load and recovery
    Optimal,
    /// -15 <= TSB < -5: building fitness
    Productive,
    /// -30 <= TSB < -15: fatigue accumulating
    Overreaching,
    /// TSB < -30: recovery needed
    Overtraining,
}

impl TrainingStatus {
    /// Place a TSB value on the status ladder
    #[must_use]
    pub fn from_tsb(tsb: f64) -> Self {
        if tsb > FRESH_ABOVE {
            Self::Fresh
        } else if tsb >= OPTIMAL_MIN {
            Self::Optimal
        } else if tsb >= PRODUCTIVE_MIN {
            Self::Productive
        } else if tsb >= OVERREACHING_MIN {
            Self::Overreaching
        } else {
            Self::Overtraining
        }
    }

    /// Short description of the state
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Fresh => "Well rested with fatigue cleared",
            Self::Optimal => "Training load and recovery are in balance",
            Self::Productive => "Carrying fatigue that drives fitness gains",
            Self::Overreaching => "Fatigue is outpacing fitness",
            Self::Overtraining => "Fatigue far exceeds fitness",
        }
    }

    /// What to do next
    #[must_use]
    pub const fn recommendation(&self) -> &'static str {
        match self {
            Self::Fresh => "Good time for a race or a hard block; long rest risks detraining",
            Self::Optimal => "Continue the current training plan",
            Self::Productive => "Keep building, schedule recovery within the week",
            Self::Overreaching => "Reduce volume and intensity for a few days",
            Self::Overtraining => "Take several easy or rest days before training hard again",
        }
    }
}

/// Status with its copy text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusClassification {
    /// Status band
    pub status: TrainingStatus,
    /// Description of the band
    pub description: String,
    /// Recommended action
    pub recommendation: String,
}

/// Training load over a window ending at a target date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoadSummary {
    /// One point per day, oldest first
    pub series: Vec<TrainingLoadPoint>,
    /// Point for the target date
    pub current: TrainingLoadPoint,
    /// Status of the current point
    pub status: StatusClassification,
}

/// Risk level for overtraining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk of overtraining
    Low,
    /// Moderate risk - monitor closely
    Moderate,
    /// High risk - rest recommended
    High,
}

/// Overtraining risk assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertrainingRisk {
    /// Overall risk level
    pub risk_level: RiskLevel,
    /// Specific risk factors identified
    pub risk_factors: Vec<String>,
}

/// Calculator for training load metrics
#[derive(Debug, Clone, Copy)]
pub struct TrainingLoadCalculator {
    ctl_time_constant: f64,
    atl_time_constant: f64,
    lookback_days: i64,
    tss_algorithm: TssAlgorithm,
}

impl Default for TrainingLoadCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingLoadCalculator {
    /// Calculator with the standard 42/7 day time constants, a 90 day lookback and hybrid TSS
    #[must_use]
    pub const fn new() -> Self {
        Self::with_time_constants(CTL_TIME_CONSTANT_DAYS, ATL_TIME_CONSTANT_DAYS)
    }

    /// Calculator with custom time constants
    ///
    /// Constants are checked when a series is computed.
    #[must_use]
    pub const fn with_time_constants(ctl_days: f64, atl_days: f64) -> Self {
        Self {
            ctl_time_constant: ctl_days,
            atl_time_constant: atl_days,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            tss_algorithm: TssAlgorithm::Hybrid,
        }
    }

    /// Calculator from the training load configuration section
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the configured TSS algorithm name is unknown
    pub fn with_config(config: &TrainingLoadConfig) -> AppResult<Self> {
        Ok(Self::with_time_constants(config.ctl_days, config.atl_days)
            .with_lookback_days(config.lookback_days)
            .with_tss_algorithm(TssAlgorithm::from_str(&config.tss_algorithm)?))
    }

    /// Replace the default lookback used by [`Self::training_load_at`]
    ///
    /// A negative value is rejected when the load is calculated.
    #[must_use]
    pub const fn with_lookback_days(mut self, lookback_days: i64) -> Self {
        self.lookback_days = lookback_days;
        self
    }

    /// Default lookback in days
    #[must_use]
    pub const fn lookback_days(&self) -> i64 {
        self.lookback_days
    }

    /// Replace the TSS algorithm
    #[must_use]
    pub const fn with_tss_algorithm(mut self, algorithm: TssAlgorithm) -> Self {
        self.tss_algorithm = algorithm;
        self
    }

    /// TSS algorithm in use
    #[must_use]
    pub const fn tss_algorithm(&self) -> TssAlgorithm {
        self.tss_algorithm
    }

    /// Training Stress Score of one ride; 0 when any input is missing or FTP is 0
    #[must_use]
    pub fn tss(
        duration_seconds: f64,
        average_power: f64,
        ftp: f64,
        normalized_power: Option<f64>,
    ) -> f64 {
        training_stress_score(duration_seconds, average_power, ftp, normalized_power)
    }

    /// TSS of a ride using the configured algorithm
    #[must_use]
    pub fn ride_tss(&self, ride: &RideSummary, samples: Option<&[f64]>, ftp: f64) -> RideTss {
        RideTss {
            date: ride.date,
            tss: self.tss_algorithm.calculate(ride, samples, ftp),
        }
    }

    /// Sum TSS per calendar day
    ///
    /// Days without rides are absent; [`Self::ema_series`] treats them as 0.
    #[must_use]
    pub fn daily_series(rides: &[RideTss]) -> BTreeMap<NaiveDate, f64> {
        let mut daily = BTreeMap::new();
        for ride in rides {
            if !ride.tss.is_finite() {
                warn!(date = %ride.date, "Skipping non-finite TSS");
                continue;
            }
            *daily.entry(ride.date).or_insert(0.0) += ride.tss;
        }
        daily
    }

    /// CTL/ATL/TSB for every day from `start_date` to `end_date` inclusive
    ///
    /// Both loads start at 0. An inverted range yields an empty series.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either time constant is not a positive finite number
    pub fn ema_series(
        &self,
        daily: &BTreeMap<NaiveDate, f64>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<Vec<TrainingLoadPoint>> {
        self.validate_time_constants()?;

        let mut ctl = 0.0;
        let mut atl = 0.0;
        let series: Vec<TrainingLoadPoint> = start_date
            .iter_days()
            .take_while(|day| *day <= end_date)
            .map(|day| {
                let day_tss = daily.get(&day).copied().unwrap_or(0.0);
                ctl += (day_tss - ctl) / self.ctl_time_constant;
                atl += (day_tss - atl) / self.atl_time_constant;
                let (ctl, atl) = (round_one_decimal(ctl), round_one_decimal(atl));
                TrainingLoadPoint {
                    date: day,
                    ctl,
                    atl,
                    tsb: round_one_decimal(ctl - atl),
                }
            })
            .collect();

        debug!(
            days = series.len(),
            ride_days = daily.len(),
            "Computed training load series"
        );
        Ok(series)
    }

    /// Place a TSB value on the status ladder with its copy text
    #[must_use]
    pub fn classify_status(tsb: f64) -> StatusClassification {
        let status = TrainingStatus::from_tsb(tsb);
        StatusClassification {
            status,
            description: status.description().to_owned(),
            recommendation: status.recommendation().to_owned(),
        }
    }

    /// Full training load picture for `target_date`
    ///
    /// TSS per ride uses the configured algorithm. The EMA walks `lookback_days` of
    /// history before the target date so CTL has converged from its zero seed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a negative lookback, a window starting before the
    /// representable calendar, or invalid time constants
    pub fn calculate_training_load(
        &self,
        rides: &[RideSummary],
        ftp: f64,
        target_date: NaiveDate,
        lookback_days: i64,
    ) -> AppResult<TrainingLoadSummary> {
        let lookback = u64::try_from(lookback_days).map_err(|_| {
            AppError::invalid_input(format!("Lookback days cannot be negative: {lookback_days}"))
        })?;
        let start_date = target_date
            .checked_sub_days(Days::new(lookback))
            .ok_or_else(|| AppError::invalid_input("Lookback window exceeds the supported date range"))?;

        let ride_tss: Vec<RideTss> = rides
            .iter()
            .filter(|ride| ride.date >= start_date && ride.date <= target_date)
            .map(|ride| self.ride_tss(ride, None, ftp))
            .collect();
        let daily = Self::daily_series(&ride_tss);
        let series = self.ema_series(&daily, start_date, target_date)?;

        let current = series.last().copied().unwrap_or(TrainingLoadPoint {
            date: target_date,
            ctl: 0.0,
            atl: 0.0,
            tsb: 0.0,
        });

        debug!(
            algorithm = self.tss_algorithm.name(),
            rides = ride_tss.len(),
            ctl = current.ctl,
            atl = current.atl,
            tsb = current.tsb,
            "Calculated training load"
        );

        Ok(TrainingLoadSummary {
            series,
            status: Self::classify_status(current.tsb),
            current,
        })
    }

    /// [`Self::calculate_training_load`] over the calculator's own lookback window
    ///
    /// # Errors
    ///
    /// Same as [`Self::calculate_training_load`]
    pub fn training_load_at(
        &self,
        rides: &[RideSummary],
        ftp: f64,
        target_date: NaiveDate,
    ) -> AppResult<TrainingLoadSummary> {
        self.calculate_training_load(rides, ftp, target_date, self.lookback_days)
    }

    /// Check if athlete is at risk of overtraining
    ///
    /// Warning conditions:
    /// - ATL > CTL x 1.3: Acute load spike
    /// - ATL > 150: Very high acute load
    /// - TSB < -10: Deep fatigue
    #[must_use]
    pub fn check_overtraining_risk(point: &TrainingLoadPoint) -> OvertrainingRisk {
        let mut risk_factors = Vec::new();

        if point.ctl > 0.0 && point.atl > point.ctl * ACUTE_SPIKE_RATIO {
            risk_factors
                .push("Acute training load spike detected (>30% above chronic load)".to_owned());
        }
        if point.atl > VERY_HIGH_ATL {
            risk_factors.push("Very high acute training load (>150 TSS/day)".to_owned());
        }
        if point.tsb < DEEP_FATIGUE_TSB {
            risk_factors.push("Deep fatigue detected (TSB < -10) - recovery needed".to_owned());
        }

        let risk_level = match risk_factors.len() {
            0 => RiskLevel::Low,
            1 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        };

        OvertrainingRisk {
            risk_level,
            risk_factors,
        }
    }

    /// Calculate recommended recovery days based on TSB
    #[must_use]
    pub fn recommend_recovery_days(tsb: f64) -> u32 {
        const VERY_DEEP_FATIGUE: f64 = -20.0;
        const DEEP_FATIGUE: f64 = -15.0;
        const MODERATE_FATIGUE: f64 = -10.0;
        const LIGHT_FATIGUE: f64 = 0.0;

        if tsb < VERY_DEEP_FATIGUE {
            5
        } else if tsb < DEEP_FATIGUE {
            3
        } else if tsb < MODERATE_FATIGUE {
            2
        } else if tsb < LIGHT_FATIGUE {
            1
        } else {
            0
        }
    }

    fn validate_time_constants(&self) -> AppResult<()> {
        for (name, value) in [
            ("CTL", self.ctl_time_constant),
            ("ATL", self.atl_time_constant),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::invalid_input(format!(
                    "{name} time constant must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
