// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use math::{
    utils::{exact_pow, exp2, pow2, sqrt},
    BigUint, LogValue,
};

use crate::ProtocolParameters;

// DERIVED QUANTITIES
// ================================================================================================

/// Algebraic quantities derived from [ProtocolParameters].
///
/// Domain and field sizes are kept as exact integers; the rate and the effective rate are kept as
/// `f64` as they only enter comparisons and factors close to one. These values are recomputed for
/// every estimation and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedQuantities {
    log_blowup: u32,
    rate: f64,
    trace_domain_size: BigUint,
    lde_domain_size: BigUint,
    field_size: BigUint,
    batch_width: u64,
    rate_plus: f64,
}

impl DerivedQuantities {
    /// Computes derived quantities for the specified parameters:
    ///
    /// * rate `ρ = 2^-k`,
    /// * trace domain size `H = 2^h` and LDE domain size `D = H / ρ`,
    /// * field size `F = p^e`,
    /// * FRI batch width `L = C + extra_batched_polys`,
    /// * effective rate `ρ⁺ = (H + 2) / D`.
    pub fn new(params: &ProtocolParameters) -> Self {
        let log_blowup = params.log_blowup();
        let log_trace_length = params.log_trace_length();

        let rate = exp2(-(log_blowup as f64));
        let trace_domain_size = pow2(log_trace_length);
        let lde_domain_size = pow2(log_trace_length + log_blowup);
        let field_size = exact_pow(params.field_modulus(), params.extension_degree());
        let batch_width =
            params.num_columns().saturating_add(params.constants().extra_batched_polys());

        // (H + 2) / D = 2^-k + 2^(1 - h - k); both summands are exact in f64
        let rate_plus = rate + exp2(1.0 - (log_trace_length + log_blowup) as f64);
        debug_assert!(lde_domain_size > trace_domain_size);
        debug_assert!(rate_plus > 0.0 && rate_plus < 1.0);

        Self {
            log_blowup,
            rate,
            trace_domain_size,
            lde_domain_size,
            field_size,
            batch_width,
            rate_plus,
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the code rate `ρ`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the code rate `ρ` in the log domain (exactly `2^-k`).
    pub fn rate_log(&self) -> LogValue {
        LogValue::from_log2(-(self.log_blowup as f64))
    }

    /// Returns `√ρ`.
    pub fn sqrt_rate(&self) -> f64 {
        sqrt(self.rate)
    }

    /// Returns the effective rate `ρ⁺ = (H + 2) / D` of the function field.
    ///
    /// For `h > 53` the excess `2^(1 - h - k)` is below the resolution of `ρ` in `f64`, and the
    /// returned value equals `ρ`.
    pub fn rate_plus(&self) -> f64 {
        self.rate_plus
    }

    /// Returns `√ρ⁺`.
    pub fn sqrt_rate_plus(&self) -> f64 {
        sqrt(self.rate_plus)
    }

    /// Returns the trace domain size `H`.
    pub fn trace_domain_size(&self) -> &BigUint {
        &self.trace_domain_size
    }

    /// Returns the LDE domain size `D`.
    pub fn lde_domain_size(&self) -> &BigUint {
        &self.lde_domain_size
    }

    /// Returns the field size `F`.
    pub fn field_size(&self) -> &BigUint {
        &self.field_size
    }

    /// Returns the number of polynomials `L` batched into a single FRI instance.
    pub fn batch_width(&self) -> u64 {
        self.batch_width
    }
}

// TESTS
// ================================================================================================
