// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Error term formulas of the three soundness regimes.
//!
//! All regimes share the ALI, DEEP, PLONK and PLOOKUP terms and differ in the FRI terms and in
//! the list size `L⁺` which the ALI and DEEP terms are scaled by.

use math::{
    utils::{ceil, exp2, powf, F64_MANTISSA_BITS},
    BigUint, LogValue,
};

use super::{check_proximity_parameter, JohnsonBound};
use crate::{
    report::ErrorTermKind, ConjectureParams, DerivedQuantities, ErrorTerm, ProtocolParameters,
    Regime, SoundnessError, SoundnessReport,
};

// REGIME-SPECIFIC TERMS
// ================================================================================================

/// FRI terms and list size computed by one of the regimes.
struct RegimeTerms {
    regime: Regime,
    theta: f64,
    list_size: LogValue,
    johnson_parameter: Option<u32>,
    fri_constant: LogValue,
    fri_queries: LogValue,
}

/// Computes the soundness report in the provable list-decoding regime for the specified Johnson
/// bound.
pub(super) fn provable_report(
    params: &ProtocolParameters,
    derived: &DerivedQuantities,
    bound: &JohnsonBound,
) -> Result<SoundnessReport, SoundnessError> {
    let m = bound.m() as f64;
    let lde_domain_size = LogValue::from_biguint(derived.lde_domain_size());
    let field_size = LogValue::from_biguint(derived.field_size());

    // (m + 1/2)^7 / (3 * ρ^1.5) * D^2 / F
    let proximity_error = LogValue::new(m + 0.5).powi(7)
        / (LogValue::from_int(3) * derived.rate_log().powf(1.5))
        * lde_domain_size.powi(2)
        / field_size;

    let fri_constant = LogValue::new(derived.batch_width() as f64 - 0.5) * proximity_error
        + folding_error(params, derived, bound.m());

    finalize(
        params,
        derived,
        RegimeTerms {
            regime: Regime::ListDecodingProvable,
            theta: bound.theta(),
            list_size: bound.list_size(),
            johnson_parameter: Some(bound.m()),
            fri_constant,
            fri_queries: query_error(params, bound.theta()),
        },
    )
}

/// Computes the soundness report in the conjectured list-decoding regime; `m` is the Johnson
/// parameter used for the folding error.
pub(super) fn conjectured_report(
    params: &ProtocolParameters,
    derived: &DerivedQuantities,
    m: u32,
    conjecture: &ConjectureParams,
) -> Result<SoundnessReport, SoundnessError> {
    let epsilon = conjecture.epsilon();
    let theta = 1.0 - derived.rate() - epsilon;
    check_proximity_parameter(Regime::ListDecodingConjectured, theta, derived)?;
    let epsilon_plus = 1.0 - derived.rate_plus() - theta;

    let lde_domain_size = LogValue::from_biguint(derived.lde_domain_size());
    let field_size = LogValue::from_biguint(derived.field_size());

    // 1 / (ε * ρ)^c1 * L * D^c2 / F
    let proximity_error = (LogValue::new(epsilon) * derived.rate_log())
        .powf(conjecture.c1())
        .recip()
        * LogValue::from_int(derived.batch_width())
        * lde_domain_size.powf(conjecture.c2())
        / field_size;

    let fri_constant = LogValue::new(derived.batch_width() as f64 - 0.5) * proximity_error
        + folding_error(params, derived, m);

    let list_size = conjectured_list_size(params, epsilon_plus, conjecture.c_rho())?;

    finalize(
        params,
        derived,
        RegimeTerms {
            regime: Regime::ListDecodingConjectured,
            theta,
            list_size,
            johnson_parameter: Some(m),
            fri_constant,
            fri_queries: query_error(params, theta),
        },
    )
}

/// Computes the soundness report in the unique-decoding regime.
pub(super) fn unique_decoding_report(
    params: &ProtocolParameters,
    derived: &DerivedQuantities,
) -> Result<SoundnessReport, SoundnessError> {
    let alpha = 1.0 - (1.0 - derived.rate()) / 2.0;
    let theta = 1.0 - alpha;
    check_proximity_parameter(Regime::UniqueDecoding, theta, derived)?;

    let proximity_error = LogValue::from_biguint(derived.lde_domain_size())
        / LogValue::from_biguint(derived.field_size());
    let fri_constant =
        LogValue::from_int(derived.batch_width().saturating_add(1)) * proximity_error;

    finalize(
        params,
        derived,
        RegimeTerms {
            regime: Regime::UniqueDecoding,
            theta,
            list_size: LogValue::ONE,
            johnson_parameter: None,
            fri_constant,
            fri_queries: query_error(params, theta),
        },
    )
}

// SHARED TERMS
// ================================================================================================

/// Builds the report from the regime-specific terms and the ALI, DEEP, PLONK and PLOOKUP terms.
fn finalize(
    params: &ProtocolParameters,
    derived: &DerivedQuantities,
    terms: RegimeTerms,
) -> Result<SoundnessReport, SoundnessError> {
    let constants = params.constants();
    let trace_domain_size = derived.trace_domain_size();
    let field_size = derived.field_size();
    let field_size_log = LogValue::from_biguint(field_size);

    // L⁺ * C / F
    let ali = terms.list_size * LogValue::from_int(params.num_columns()) / field_size_log;

    // L⁺ * (d * (H + n - 1) + (H - 1)) / (F - H - D)
    let openings = trace_domain_size + BigUint::from(constants.num_openings() - 1);
    let deep_numerator = openings * constants.max_constraint_degree()
        + (trace_domain_size - BigUint::from(1u32));
    let excluded = trace_domain_size + derived.lde_domain_size();
    if *field_size <= excluded {
        return Err(SoundnessError::NumericPrecisionError {
            quantity: "DEEP denominator",
            log2: f64::NAN,
        });
    }
    let deep = terms.list_size * LogValue::from_biguint(&deep_numerator)
        / LogValue::from_biguint(&(field_size - excluded));

    // e * multiplicity * H / F
    let extension_degree = BigUint::from(params.extension_degree());
    let plonk = LogValue::from_biguint(
        &(&extension_degree * constants.plonk_multiplicity() * trace_domain_size),
    ) / field_size_log;
    let plookup = LogValue::from_biguint(
        &(&extension_degree * constants.plookup_multiplicity() * trace_domain_size),
    ) / field_size_log;

    let error_terms = [
        ErrorTerm::new(ErrorTermKind::FriConstant, terms.fri_constant)?,
        ErrorTerm::new(ErrorTermKind::FriQueries, terms.fri_queries)?,
        ErrorTerm::new(ErrorTermKind::Ali, ali)?,
        ErrorTerm::new(ErrorTermKind::Deep, deep)?,
        ErrorTerm::new(ErrorTermKind::Plonk, plonk)?,
        ErrorTerm::new(ErrorTermKind::Plookup, plookup)?,
    ];

    let list_size = terms.list_size;
    if !list_size.is_valid() {
        return Err(SoundnessError::NumericPrecisionError {
            quantity: "list size",
            log2: list_size.log2(),
        });
    }

    Ok(SoundnessReport::new(
        terms.regime,
        error_terms,
        terms.theta,
        list_size,
        terms.johnson_parameter,
    ))
}

/// Computes the FRI query-phase error `(1 - θ)^s`, reduced by the grinding factor.
fn query_error(params: &ProtocolParameters, theta: f64) -> LogValue {
    LogValue::new(1.0 - theta).powi(params.num_queries())
        * LogValue::from_log2(-(params.grinding_factor() as f64))
}

/// Computes the folding error `(2m + 1) * (D + 1) * f * r / (√ρ * F)` where `f` is the FRI folding
/// factor and `r = ⌊(h + 2) / log2(f) - 2⌋` is the number of folding rounds.
///
/// For traces too short to fold even once, `r` saturates at zero instead of turning negative as
/// the formula would, and the folding error is zero.
fn folding_error(params: &ProtocolParameters, derived: &DerivedQuantities, m: u32) -> LogValue {
    let folding_factor = params.constants().fri_folding_factor();
    let num_rounds = ((params.log_trace_length() + 2) / folding_factor.ilog2()).saturating_sub(2);

    let numerator = BigUint::from(2 * m as u64 + 1)
        * (derived.lde_domain_size() + BigUint::from(1u32))
        * folding_factor
        * num_rounds;

    LogValue::from_biguint(&numerator)
        / derived.rate_log().sqrt()
        / LogValue::from_biguint(derived.field_size())
}

/// Computes the conjectured list size `⌈(D / ε⁺)^c_rho⌉`.
///
/// Rounding up only matters while the list size is exactly representable; above 2^53 the value
/// is kept as is.
fn conjectured_list_size(
    params: &ProtocolParameters,
    epsilon_plus: f64,
    c_rho: f64,
) -> Result<LogValue, SoundnessError> {
    let log_lde_domain_size = (params.log_trace_length() + params.log_blowup()) as f64;
    let list_size = (LogValue::from_log2(log_lde_domain_size) / LogValue::new(epsilon_plus))
        .powf(c_rho);
    if !list_size.is_valid() {
        return Err(SoundnessError::NumericPrecisionError {
            quantity: "conjectured list size",
            log2: list_size.log2(),
        });
    }

    if list_size.log2() < F64_MANTISSA_BITS as f64 {
        let exact = powf(exp2(log_lde_domain_size) / epsilon_plus, c_rho);
        Ok(LogValue::new(ceil(exact)))
    } else {
        Ok(list_size)
    }
}

// TESTS
// ================================================================================================
