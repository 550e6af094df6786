// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Contains the error type returned by the soundness estimator.

use core::fmt;

use utils::string::String;

use crate::Regime;

// SOUNDNESS ERROR
// ================================================================================================
/// Represents an error returned by the estimator.
///
/// The estimator never produces a partial report: every computation either yields a complete
/// [SoundnessReport](crate::SoundnessReport) or one of these errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundnessError {
    /// This error occurs when a protocol parameter is malformed or out of its domain. The
    /// computation does not proceed.
    InvalidParameter {
        /// Name of the offending parameter.
        field: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
    /// This error occurs when a proximity parameter `theta` does not satisfy `theta < bound`, the
    /// feasibility condition of the soundness theorem for the specified regime. Within a Johnson
    /// parameter sweep this only discards the offending candidate.
    ConstraintViolation { regime: Regime, theta: f64, bound: f64 },
    /// This error occurs when every candidate in a Johnson parameter sweep was discarded.
    NoFeasibleParameter { first: u32, last: u32 },
    /// This error occurs when a computed quantity is non-finite or negative, which indicates
    /// that the requested parameters are outside of what the arithmetic backend can resolve.
    NumericPrecisionError {
        /// Name of the quantity which could not be computed.
        quantity: &'static str,
        /// Base-2 logarithm of the offending value (`NaN` for negative values).
        log2: f64,
    },
}

impl SoundnessError {
    /// Returns a new [SoundnessError::InvalidParameter] error.
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { field, reason: reason.into() }
    }

    /// Returns the margin `bound - theta` for constraint violations (non-positive by definition).
    pub fn margin(&self) -> Option<f64> {
        match self {
            Self::ConstraintViolation { theta, bound, .. } => Some(bound - theta),
            _ => None,
        }
    }
}

impl fmt::Display for SoundnessError {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { field, reason } => {
                write!(f, "invalid parameter '{field}': {reason}")
            }
            Self::ConstraintViolation { regime, theta, bound } => {
                write!(f, "proximity parameter {theta} violates the {regime} bound {bound} (margin {})", bound - theta)
            }
            Self::NoFeasibleParameter { first, last } => {
                write!(f, "no Johnson parameter in [{first}, {last}] satisfies the proximity constraint")
            }
            Self::NumericPrecisionError { quantity, log2 } => {
                write!(f, "{quantity} could not be computed with sufficient precision (log2 = {log2})")
            }
        }
    }
}

impl core::error::Error for SoundnessError {}
