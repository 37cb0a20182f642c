// ABOUTME: Unified error handling with standard error codes for the analysis library
// ABOUTME: Defines AppError, ErrorCode and the AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Numeric paths in this library fail soft (absent results, zero scores). `AppError`
//! is reserved for caller mistakes that are not simply "not enough data yet":
//! invalid time constants, unknown algorithm names, broken configuration.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Input could not be used as given
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Data availability (4000-4999)
    /// Not enough data to produce a result
    #[serde(rename = "INSUFFICIENT_DATA")]
    InsufficientData = 4004,

    // Configuration (6000-6999)
    /// Configuration could not be loaded or validated
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InsufficientData => "Not enough data to complete the calculation",
            Self::ConfigError => "Configuration error encountered",
        }
    }
}

/// Unified error type for the library
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Not enough data for the requested calculation
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientData, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::error::Error as _;
    use std::num::ParseFloatError;

    use super::*;

    #[test]
    fn test_app_error_creation() {
        let error = AppError::invalid_input("ctl time constant must be positive");

        assert_eq!(error.code, ErrorCode::InvalidInput);
        assert!(error.source.is_none());
        assert!(error.to_string().starts_with("The provided input is invalid"));
        assert!(error.to_string().contains("ctl time constant"));
    }

    #[test]
    fn test_source_chaining() {
        let parse_error = "fast".parse::<f64>().unwrap_err();
        let error = AppError::config("RIDEMETRICS_CTL_DAYS is not a number").with_source(parse_error);

        assert_eq!(error.code, ErrorCode::ConfigError);
        let source = error.source().and_then(|s| s.downcast_ref::<ParseFloatError>());
        assert!(source.is_some());
    }

    #[test]
    fn test_error_code_serialization() {
        let code = serde_json::to_string(&ErrorCode::InsufficientData).unwrap();
        assert_eq!(code, "\"INSUFFICIENT_DATA\"");
    }
}
