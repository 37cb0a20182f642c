// ABOUTME: Integration tests for TSS, daily series, CTL/ATL/TSB recurrence, and status ladder
// ABOUTME: Includes the hand-computed build-then-rest scenario and long-run convergence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use ridemetrics::config::intelligence::TrainingLoadConfig;
use ridemetrics::errors::ErrorCode;
use ridemetrics::intelligence::algorithms::TssAlgorithm;
use ridemetrics::intelligence::{
    RiskLevel, TrainingLoadCalculator, TrainingLoadPoint, TrainingStatus,
};
use ridemetrics::models::{RideSummary, RideTss};

fn constant_daily(start: NaiveDate, days: u64, tss: f64) -> BTreeMap<NaiveDate, f64> {
    (0..days)
        .map(|offset| (start.checked_add_days(Days::new(offset)).unwrap(), tss))
        .collect()
}

fn assert_point(point: &TrainingLoadPoint, ctl: f64, atl: f64, tsb: f64) {
    assert!(
        (point.ctl - ctl).abs() < 1e-9 && (point.atl - atl).abs() < 1e-9 && (point.tsb - tsb).abs() < 1e-9,
        "{}: got ctl {} atl {} tsb {}, expected {ctl} {atl} {tsb}",
        point.date,
        point.ctl,
        point.atl,
        point.tsb
    );
}

#[test]
fn test_tss_fails_soft_to_zero() {
    assert!(TrainingLoadCalculator::tss(0.0, 250.0, 250.0, None).abs() < f64::EPSILON);
    assert!(TrainingLoadCalculator::tss(3600.0, 250.0, 0.0, None).abs() < f64::EPSILON);
    assert!(TrainingLoadCalculator::tss(3600.0, 0.0, 250.0, None).abs() < f64::EPSILON);
    assert!(TrainingLoadCalculator::tss(3600.0, 250.0, -10.0, Some(260.0)).abs() < f64::EPSILON);
    assert!(TrainingLoadCalculator::tss(f64::NAN, 250.0, 250.0, None).abs() < f64::EPSILON);
}

#[test]
fn test_tss_uses_normalized_power_when_positive() {
    let with_np = TrainingLoadCalculator::tss(3600.0, 200.0, 250.0, Some(250.0));
    assert!((with_np - 100.0).abs() < 1e-9);

    // Zero NP falls back to average power: 0.8^2 x 100
    let zero_np = TrainingLoadCalculator::tss(3600.0, 200.0, 250.0, Some(0.0));
    assert!((zero_np - 64.0).abs() < 1e-9);

    let half_hour = TrainingLoadCalculator::tss(1800.0, 250.0, 250.0, None);
    assert!((half_hour - 50.0).abs() < 1e-9);
}

#[test]
fn test_daily_series_sums_same_day() {
    let day = common::date(2025, 2, 10);
    let rides = [
        RideTss { date: day, tss: 45.0 },
        RideTss { date: day, tss: 30.5 },
        RideTss {
            date: common::date(2025, 2, 12),
            tss: 60.0,
        },
    ];

    let daily = TrainingLoadCalculator::daily_series(&rides);
    assert_eq!(daily.len(), 2);
    assert!((daily[&day] - 75.5).abs() < 1e-9);
}

#[test]
fn test_build_then_rest_scenario() {
    let start = common::date(2025, 1, 1);
    let daily = constant_daily(start, 14, 80.0);
    let end = start.checked_add_days(Days::new(22)).unwrap();

    let series = TrainingLoadCalculator::new()
        .ema_series(&daily, start, end)
        .unwrap();
    assert_eq!(series.len(), 23);

    assert_point(&series[0], 1.9, 11.4, -9.5);
    assert_point(&series[13], 22.9, 70.8, -47.9);
    assert_point(&series[20], 19.4, 24.1, -4.7);
    assert_point(&series[22], 18.4, 17.7, 0.7);

    // Every emitted point is internally consistent
    for point in &series {
        assert!((point.tsb - (point.ctl - point.atl)).abs() < 1e-9, "{}", point.date);
    }

    // Fatigue drains faster than fitness once training stops
    for pair in series[13..].windows(2) {
        assert!(pair[1].tsb > pair[0].tsb);
        assert!(pair[1].atl < pair[0].atl);
        assert!(pair[1].ctl < pair[0].ctl);
    }
}

#[test]
fn test_rest_days_decay_between_rides() {
    let start = common::date(2025, 3, 1);
    let end = common::date(2025, 3, 10);
    let daily = BTreeMap::from([(start, 100.0), (end, 100.0)]);

    let series = TrainingLoadCalculator::new()
        .ema_series(&daily, start, end)
        .unwrap();

    assert_eq!(series.len(), 10);
    assert!(series
        .iter()
        .zip(series.iter().skip(1))
        .all(|(a, b)| b.date == a.date.succ_opt().unwrap()));
    assert!(series[8].atl < series[0].atl);
}

#[test]
fn test_constant_load_converges() {
    let start = common::date(2024, 1, 1);
    let daily = constant_daily(start, 400, 50.0);
    let end = start.checked_add_days(Days::new(399)).unwrap();

    let series = TrainingLoadCalculator::new()
        .ema_series(&daily, start, end)
        .unwrap();
    let last = series.last().unwrap();

    assert!((last.ctl - 50.0).abs() < 0.05);
    assert!((last.atl - 50.0).abs() < 0.05);
    assert!(last.tsb.abs() < 0.05);
}

#[test]
fn test_inverted_range_is_empty() {
    let series = TrainingLoadCalculator::new()
        .ema_series(
            &BTreeMap::new(),
            common::date(2025, 5, 2),
            common::date(2025, 5, 1),
        )
        .unwrap();
    assert!(series.is_empty());
}

#[test]
fn test_non_positive_time_constants_rejected() {
    let day = common::date(2025, 5, 1);
    for (ctl, atl) in [(0.0, 7.0), (42.0, -1.0), (f64::NAN, 7.0)] {
        let err = TrainingLoadCalculator::with_time_constants(ctl, atl)
            .ema_series(&BTreeMap::new(), day, day)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}

#[test]
fn test_status_breakpoints() {
    let cases = [
        (25.0, TrainingStatus::Fresh),
        (10.1, TrainingStatus::Fresh),
        (10.0, TrainingStatus::Optimal),
        (-5.0, TrainingStatus::Optimal),
        (-5.1, TrainingStatus::Productive),
        (-15.0, TrainingStatus::Productive),
        (-15.1, TrainingStatus::Overreaching),
        (-30.0, TrainingStatus::Overreaching),
        (-30.1, TrainingStatus::Overtraining),
    ];
    for (tsb, expected) in cases {
        let classification = TrainingLoadCalculator::classify_status(tsb);
        assert_eq!(classification.status, expected, "tsb {tsb}");
        assert!(!classification.description.is_empty());
        assert!(!classification.recommendation.is_empty());
    }
}

#[test]
fn test_calculate_training_load_over_lookback() {
    let target = common::date(2025, 6, 30);
    let mut rides: Vec<RideSummary> = (0..14)
        .map(|offset| {
            let day = target.checked_sub_days(Days::new(offset)).unwrap();
            RideSummary::new(format!("ride-{offset}"), day)
                .moving_time(3600)
                .average_power(250.0)
        })
        .collect();
    // Outside the 90 day window
    rides.push(
        RideSummary::new("old", common::date(2025, 1, 1))
            .moving_time(7200)
            .average_power(300.0),
    );

    let calculator = TrainingLoadCalculator::new();
    let summary = calculator
        .calculate_training_load(&rides, 250.0, target, 90)
        .unwrap();

    assert_eq!(summary.series.len(), 91);
    assert_eq!(summary.current.date, target);
    assert_eq!(summary.current, *summary.series.last().unwrap());

    let daily = constant_daily(target.checked_sub_days(Days::new(13)).unwrap(), 14, 100.0);
    let expected = calculator
        .ema_series(&daily, target.checked_sub_days(Days::new(90)).unwrap(), target)
        .unwrap();
    assert_eq!(summary.series, expected);
    assert_eq!(
        summary.status.status,
        TrainingStatus::from_tsb(summary.current.tsb)
    );
}

#[test]
fn test_training_load_at_uses_configured_lookback() {
    let target = common::date(2025, 6, 30);
    let rides: Vec<RideSummary> = [0_u64, 20, 60]
        .into_iter()
        .map(|offset| {
            let day = target.checked_sub_days(Days::new(offset)).unwrap();
            RideSummary::new(format!("ride-{offset}"), day)
                .moving_time(3600)
                .average_power(250.0)
        })
        .collect();

    let default = TrainingLoadCalculator::new();
    assert_eq!(default.lookback_days(), 90);
    assert_eq!(
        default.training_load_at(&rides, 250.0, target).unwrap(),
        default.calculate_training_load(&rides, 250.0, target, 90).unwrap()
    );

    let config = TrainingLoadConfig {
        lookback_days: 30,
        ..TrainingLoadConfig::default()
    };
    let short = TrainingLoadCalculator::with_config(&config).unwrap();
    assert_eq!(short.lookback_days(), 30);

    let summary = short.training_load_at(&rides, 250.0, target).unwrap();
    assert_eq!(summary.series.len(), 31);
    assert_eq!(
        summary,
        default.calculate_training_load(&rides, 250.0, target, 30).unwrap()
    );
}

#[test]
fn test_calculate_training_load_rejects_negative_lookback() {
    let err = TrainingLoadCalculator::new()
        .calculate_training_load(&[], 250.0, common::date(2025, 6, 30), -1)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = TrainingLoadCalculator::new()
        .with_lookback_days(-7)
        .training_load_at(&[], 250.0, common::date(2025, 6, 30))
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_ride_tss_respects_algorithm() {
    let ride = RideSummary::new("r", common::date(2025, 4, 4))
        .moving_time(3600)
        .average_power(200.0)
        .normalized_power(250.0);

    let hybrid = TrainingLoadCalculator::new().ride_tss(&ride, None, 250.0);
    assert!((hybrid.tss - 100.0).abs() < 1e-9);

    let avg = TrainingLoadCalculator::new()
        .with_tss_algorithm(TssAlgorithm::AvgPower)
        .ride_tss(&ride, None, 250.0);
    assert!((avg.tss - 64.0).abs() < 1e-9);
}

#[test]
fn test_with_config_parses_algorithm() {
    let config = TrainingLoadConfig {
        tss_algorithm: "avg_power".into(),
        ..TrainingLoadConfig::default()
    };
    let calculator = TrainingLoadCalculator::with_config(&config).unwrap();
    assert_eq!(calculator.tss_algorithm(), TssAlgorithm::AvgPower);

    let bad = TrainingLoadConfig {
        tss_algorithm: "trimp".into(),
        ..TrainingLoadConfig::default()
    };
    assert!(TrainingLoadCalculator::with_config(&bad).is_err());
}

#[test]
fn test_overtraining_risk_levels() {
    let day = common::date(2025, 8, 1);
    let point = |ctl: f64, atl: f64| TrainingLoadPoint {
        date: day,
        ctl,
        atl,
        tsb: ctl - atl,
    };

    let low = TrainingLoadCalculator::check_overtraining_risk(&point(50.0, 55.0));
    assert_eq!(low.risk_level, RiskLevel::Low);
    assert!(low.risk_factors.is_empty());

    let moderate = TrainingLoadCalculator::check_overtraining_risk(&point(50.0, 62.0));
    assert_eq!(moderate.risk_level, RiskLevel::Moderate);

    let high = TrainingLoadCalculator::check_overtraining_risk(&point(40.0, 80.0));
    assert_eq!(high.risk_level, RiskLevel::High);
    assert_eq!(high.risk_factors.len(), 2);
}
