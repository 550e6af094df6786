// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::ops::RangeInclusive;

use math::{
    utils::{ceil, exp2, sqrt},
    LogValue,
};
use tracing::{debug, instrument};
use utils::collections::Vec;
#[cfg(feature = "concurrent")]
use utils::iterators::*;

use super::{check_proximity_parameter, terms};
use crate::{DerivedQuantities, ProtocolParameters, Regime, SoundnessError, SoundnessReport};

// CONSTANTS
// ================================================================================================

/// Largest Johnson parameter considered by an automatic search. Large values of `m` inflate the
/// FRI commit-phase error by `m^7`, so the optimum always lies far below this cap.
pub const MAX_PROXIMITY_PARAMETER: u32 = 1000;

// JOHNSON BOUND
// ================================================================================================

/// Proximity parameter and list size bound implied by a Johnson parameter `m`.
///
/// For `α = (1 + 1/(2m))·√ρ` the proximity parameter is `θ = 1 - α`. The list size is bounded via
/// the smallest `m⁺` for which `α ≥ √ρ⁺·(1 + 1/(2m⁺))` still holds, i.e. `L⁺ = (m⁺ + 1/2) / √ρ⁺`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JohnsonBound {
    m: u32,
    theta: f64,
    m_plus: u64,
    list_size: LogValue,
}

impl JohnsonBound {
    /// Computes the Johnson bound for the specified `m`.
    ///
    /// # Errors
    /// Returns [SoundnessError::ConstraintViolation] if `θ` is not below the Johnson bound
    /// `1 - √ρ⁺`, and [SoundnessError::NumericPrecisionError] if `m⁺` cannot be determined.
    pub fn new(m: u32, derived: &DerivedQuantities) -> Result<Self, SoundnessError> {
        if m == 0 {
            return Err(SoundnessError::invalid("johnson_parameter", "must be greater than 0"));
        }
        let alpha = (1.0 + 0.5 / m as f64) * derived.sqrt_rate();
        let theta = 1.0 - alpha;
        check_proximity_parameter(Regime::ListDecodingProvable, theta, derived)?;

        let sqrt_rate_plus = derived.sqrt_rate_plus();
        let m_plus = compute_m_plus(theta, alpha, sqrt_rate_plus)?;
        let list_size = LogValue::new(m_plus as f64 + 0.5) / LogValue::new(sqrt_rate_plus);

        Ok(Self { m, theta, m_plus, list_size })
    }

    /// Returns the Johnson parameter `m`.
    pub fn m(&self) -> u32 {
        self.m
    }

    /// Returns the proximity parameter `θ = 1 - (1 + 1/(2m))·√ρ`.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Returns `m⁺`.
    pub fn m_plus(&self) -> u64 {
        self.m_plus
    }

    /// Returns the list size bound `L⁺ = (m⁺ + 1/2) / √ρ⁺`.
    pub fn list_size(&self) -> LogValue {
        self.list_size
    }
}

/// Returns true if `theta` is within the list-decoding radius `1 - √ρ⁺·(1 + 1/(2m⁺))` of the
/// code with effective rate `ρ⁺`.
pub fn is_within_list_decoding_radius(theta: f64, m_plus: u64, sqrt_rate_plus: f64) -> bool {
    theta <= 1.0 - sqrt_rate_plus * (1.0 + 0.5 / m_plus as f64)
}

/// Returns the range of Johnson parameters searched when none is specified: `1..=m_max` where
/// `m_max` is the largest integer for which `θ < 1 - √ρ⁺` holds, capped at
/// [MAX_PROXIMITY_PARAMETER].
pub fn default_johnson_range(params: &ProtocolParameters) -> RangeInclusive<u32> {
    // ρ⁺ / ρ = 1 + x; √(1 + x) - 1 is evaluated as x / (√(1 + x) + 1) to avoid cancellation.
    // The constraint holds iff m < (√(1 + x) + 1) / (2x), so the bound itself is excluded.
    let x = exp2(1.0 - params.log_trace_length() as f64);
    let m_max = ceil((sqrt(1.0 + x) + 1.0) / (2.0 * x)) - 1.0;
    let m_max = if m_max < MAX_PROXIMITY_PARAMETER as f64 {
        m_max as u32
    } else {
        MAX_PROXIMITY_PARAMETER
    };
    1..=m_max.max(1)
}

// JOHNSON PARAMETER SEARCH
// ================================================================================================

/// Searches the specified range for the Johnson parameter which maximizes the bits of security
/// in the provable list-decoding regime.
///
/// Candidates whose proximity parameter violates the Johnson bound are discarded. Among the
/// remaining candidates the one with the most bits of security is returned; ties are resolved in
/// favor of the smallest `m`. When `concurrent` feature is enabled, candidates are evaluated in
/// parallel; the result does not depend on the number of threads.
///
/// # Errors
/// Returns [SoundnessError::NoFeasibleParameter] if every candidate was discarded, or any other
/// error encountered while evaluating a candidate.
#[instrument(skip_all, fields(first = range.start(), last = range.end()))]
pub fn optimize_johnson_parameter(
    params: &ProtocolParameters,
    derived: &DerivedQuantities,
    range: RangeInclusive<u32>,
) -> Result<(JohnsonBound, SoundnessReport), SoundnessError> {
    let (first, last) = (*range.start(), *range.end());

    let candidates: Vec<_> = utils::into_iter!(range)
        .map(|m| evaluate_candidate(params, derived, m))
        .collect();

    let mut best: Option<(JohnsonBound, SoundnessReport)> = None;
    for candidate in candidates {
        match candidate {
            Ok((bound, report)) => {
                let improves = match &best {
                    Some((_, best_report)) => report.bits() > best_report.bits(),
                    None => true,
                };
                if improves {
                    best = Some((bound, report));
                }
            },
            Err(SoundnessError::ConstraintViolation { theta, bound, .. }) => {
                debug!(theta, bound, "discarding infeasible Johnson parameter");
            },
            Err(err) => return Err(err),
        }
    }

    match best {
        Some((bound, report)) => {
            debug!(m = bound.m(), bits = report.bits(), "selected Johnson parameter");
            Ok((bound, report))
        },
        None => Err(SoundnessError::NoFeasibleParameter { first, last }),
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn evaluate_candidate(
    params: &ProtocolParameters,
    derived: &DerivedQuantities,
    m: u32,
) -> Result<(JohnsonBound, SoundnessReport), SoundnessError> {
    let bound = JohnsonBound::new(m, derived)?;
    let report = terms::provable_report(params, derived, &bound)?;
    Ok((bound, report))
}

/// Computes the smallest `m⁺` such that `θ` is within the list-decoding radius for `m⁺`.
///
/// The closed form `⌈1 / (2·(α / √ρ⁺ - 1))⌉` may be off by one due to rounding; the result is
/// corrected towards the smallest value satisfying the radius condition.
fn compute_m_plus(theta: f64, alpha: f64, sqrt_rate_plus: f64) -> Result<u64, SoundnessError> {
    let estimate = ceil(1.0 / (2.0 * (alpha / sqrt_rate_plus - 1.0)));
    if !(estimate.is_finite() && estimate >= 1.0 && estimate < u64::MAX as f64) {
        return Err(SoundnessError::NumericPrecisionError { quantity: "m_plus", log2: f64::NAN });
    }

    let mut m_plus = estimate as u64;
    if !is_within_list_decoding_radius(theta, m_plus, sqrt_rate_plus) {
        m_plus += 1;
    } else if m_plus > 1 && is_within_list_decoding_radius(theta, m_plus - 1, sqrt_rate_plus) {
        m_plus -= 1;
    }

    if is_within_list_decoding_radius(theta, m_plus, sqrt_rate_plus) {
        Ok(m_plus)
    } else {
        Err(SoundnessError::NumericPrecisionError { quantity: "m_plus", log2: f64::NAN })
    }
}

// TESTS
// ================================================================================================
