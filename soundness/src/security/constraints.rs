// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::{DerivedQuantities, Regime, SoundnessError};

// PROXIMITY CONSTRAINTS
// ================================================================================================

/// Returns the bound which a proximity parameter must stay strictly below for the soundness
/// theorem of the specified regime to apply:
///
/// * `1 - √ρ⁺` (the Johnson bound) in the provable list-decoding regime;
/// * `1 - ρ⁺` in the conjectured list-decoding regime, as the conjecture is stated directly in
///   terms of `ρ⁺`.
///
/// Unique decoding fixes its proximity parameter inside the unique decoding radius, so no bound
/// is returned for it.
pub fn proximity_bound(regime: Regime, derived: &DerivedQuantities) -> Option<f64> {
    match regime {
        Regime::ListDecodingProvable => Some(1.0 - derived.sqrt_rate_plus()),
        Regime::ListDecodingConjectured => Some(1.0 - derived.rate_plus()),
        Regime::UniqueDecoding => None,
    }
}

/// Checks that the proximity parameter `theta` is feasible in the specified regime.
///
/// # Errors
/// Returns [SoundnessError::ConstraintViolation] if `theta` is not strictly below the bound
/// returned by [proximity_bound()].
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn check_proximity_parameter(
    regime: Regime,
    theta: f64,
    derived: &DerivedQuantities,
) -> Result<(), SoundnessError> {
    match proximity_bound(regime, derived) {
        Some(bound) if !(theta < bound) => {
            Err(SoundnessError::ConstraintViolation { regime, theta, bound })
        },
        _ => Ok(()),
    }
}

// TESTS
// ================================================================================================
