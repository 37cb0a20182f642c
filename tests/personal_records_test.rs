// ABOUTME: Integration tests for cross-ride personal record aggregation
// ABOUTME: Covers running bests, first-ride tie breaking, and the empty collection case
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use ridemetrics::constants::power_curve::CANONICAL_DURATIONS;
use ridemetrics::intelligence::{PersonalRecords, PersonalRecordsAggregator, PowerCurveAnalyzer};
use ridemetrics::models::RidePowerStream;

#[test]
fn test_empty_collection_yields_zero_records() {
    let records = PersonalRecordsAggregator::new().aggregate(&[]);

    assert_eq!(records.iter().count(), CANONICAL_DURATIONS.len());
    for record in records.iter() {
        assert!(record.power.abs() < f64::EPSILON);
        assert!(record.ride_id.is_none());
        assert!(record.date.is_none());
        assert!(!record.is_set());
    }
    assert!(records.best_by_duration().is_empty());
    assert_eq!(records.activity_count(), 0);
}

#[test]
fn test_keeps_best_per_duration_with_origin() {
    let curves = vec![
        common::ride_curve(
            "morning",
            common::date(2025, 4, 1),
            &[(60, 410.0), (300, 330.0)],
        ),
        common::ride_curve(
            "race",
            common::date(2025, 4, 6),
            &[(60, 450.0), (300, 320.0), (1200, 290.0)],
        ),
    ];

    let records = PersonalRecordsAggregator::new().aggregate(&curves);

    let one_minute = records.get(60).unwrap();
    assert!((one_minute.power - 450.0).abs() < f64::EPSILON);
    assert_eq!(one_minute.ride_id.as_deref(), Some("race"));
    assert_eq!(one_minute.date, Some(common::date(2025, 4, 6)));

    let five_minute = records.get(300).unwrap();
    assert_eq!(five_minute.ride_id.as_deref(), Some("morning"));

    assert_eq!(records.get(1200).unwrap().ride_id.as_deref(), Some("race"));
    assert!(!records.get(3600).unwrap().is_set());
    assert_eq!(records.activity_count(), 2);
}

#[test]
fn test_ties_keep_first_ride() {
    let curves = vec![
        common::ride_curve("first", common::date(2025, 1, 1), &[(180, 350.0)]),
        common::ride_curve("second", common::date(2025, 1, 2), &[(180, 350.0)]),
    ];

    let records = PersonalRecordsAggregator::new().aggregate(&curves);
    assert_eq!(records.get(180).unwrap().ride_id.as_deref(), Some("first"));
}

#[test]
fn test_update_reports_improved_durations() {
    let mut records = PersonalRecords::empty(&[60, 300]);

    let first = common::ride_curve("a", common::date(2025, 2, 1), &[(60, 400.0), (300, 300.0)]);
    assert_eq!(records.update(&first), vec![60, 300]);

    let second = common::ride_curve("b", common::date(2025, 2, 2), &[(60, 390.0), (300, 310.0)]);
    assert_eq!(records.update(&second), vec![300]);
}

#[test]
fn test_custom_durations_ignore_others() {
    let curves = vec![common::ride_curve(
        "a",
        common::date(2025, 3, 3),
        &[(60, 400.0), (90, 380.0)],
    )];

    let records = PersonalRecordsAggregator::with_durations(&[90]).aggregate(&curves);
    assert_eq!(records.iter().count(), 1);
    assert_eq!(records.best_by_duration().get(&90), Some(&380.0));
}

#[test]
fn test_aggregates_analyzed_rides() {
    let mut rng = common::seeded_rng(11);
    let rides: Vec<RidePowerStream> = (1..=4)
        .map(|i| RidePowerStream {
            ride_id: format!("ride-{i}"),
            date: common::date(2025, 6, i),
            samples: common::random_samples(&mut rng, 1500),
        })
        .collect();

    let curves = PowerCurveAnalyzer::new().analyze_rides(&rides);
    let records = PersonalRecordsAggregator::new().aggregate(&curves);

    for (duration, best) in records.best_by_duration() {
        let expected = curves
            .iter()
            .filter_map(|c| c.curve.power_at(duration))
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((best - expected).abs() < f64::EPSILON);
    }
    assert!(records.get(1800).is_some_and(|r| !r.is_set()));
}
