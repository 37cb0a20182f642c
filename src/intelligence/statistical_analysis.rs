// ABOUTME: Ordinary least squares regression with goodness-of-fit measures
// ABOUTME: Backs the critical power work-vs-duration fit with slope, intercept, and R-squared
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: point counts are tiny

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Complete linear regression analysis results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line
    pub slope: f64,
    /// Y-intercept of the regression line
    pub intercept: f64,
    /// Coefficient of determination (goodness of fit, 0-1)
    pub r_squared: f64,
    /// Standard error of the estimate
    pub standard_error: f64,
    /// Degrees of freedom (n - 2)
    pub degrees_of_freedom: usize,
}

/// Statistical analyzer with least squares implementations
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Fit `y = slope * x + intercept` over `(x, y)` points
    ///
    /// Sums are taken over deviations from the means, which keeps the fit stable
    /// when `x` is in seconds and `y` in joules.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` with fewer than 2 points and `InvalidInput` when all
    /// `x` values are equal.
    pub fn linear_regression(points: &[(f64, f64)]) -> AppResult<RegressionResult> {
        if points.len() < 2 {
            return Err(AppError::insufficient_data(format!(
                "Insufficient data points for regression: need at least 2, got {}",
                points.len()
            )));
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let (sxx, sxy, syy) = points
            .iter()
            .fold((0.0_f64, 0.0_f64, 0.0_f64), |(sxx, sxy, syy), (x, y)| {
                let dx = x - mean_x;
                let dy = y - mean_y;
                (dx.mul_add(dx, sxx), dx.mul_add(dy, sxy), dy.mul_add(dy, syy))
            });

        if sxx.abs() < f64::EPSILON {
            return Err(AppError::invalid_input(
                "Cannot calculate regression: zero variance in x",
            ));
        }

        let slope = sxy / sxx;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let denominator_corr = (sxx * syy).sqrt();
        let correlation = if denominator_corr == 0.0 {
            0.0
        } else {
            sxy / denominator_corr
        };
        let r_squared = correlation * correlation;

        let sse = points
            .iter()
            .map(|(x, y)| {
                let diff = y - slope.mul_add(*x, intercept);
                diff * diff
            })
            .sum::<f64>();

        let degrees_of_freedom = points.len().saturating_sub(2);
        let standard_error = if degrees_of_freedom > 0 {
            (sse / degrees_of_freedom as f64).sqrt()
        } else {
            0.0
        };

        Ok(RegressionResult {
            slope,
            intercept,
            r_squared,
            standard_error,
            degrees_of_freedom,
        })
    }
}
