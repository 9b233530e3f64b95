// Copyright 2025 the TDS Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for widget construction.

/// Result type alias for widget operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building widgets from their attribute records.
///
/// Geometry helpers and event handlers are total; only construction and
/// explicit value parsing can fail.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A required attribute is missing or out of range.
    #[error("invalid configuration for '{field}': {message}")]
    Configuration {
        /// Name of the offending attribute.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A slider range is empty, inverted or not finite, so values cannot be
    /// mapped to coordinates.
    #[error("invalid slider range: min {min} must be below max {max}, both finite")]
    InvalidRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(field: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            field,
            message: message.into(),
        }
    }

    /// Create a range error.
    pub fn invalid_range(min: f64, max: f64) -> Self {
        Self::InvalidRange { min, max }
    }
}
