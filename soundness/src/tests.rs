// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use math::utils::{ceil, log2};
use proptest::prelude::*;
use utils::collections::{vec, Vec};

use crate::{
    compare_regimes, estimate, optimize_johnson_parameter, ConjectureParams, DerivedQuantities,
    ErrorTermKind, JohnsonParameter, ProtocolParameters, Regime, RegimeOptions, SoundnessError,
    SoundnessReport,
};

const FIELD_MODULUS: u64 = (1 << 32) - (1 << 27) + 1;
const GOLDILOCKS: u64 = 0xffff_ffff_0000_0001;

const TOLERANCE: f64 = 0.01;

// HELPER FUNCTIONS
// ================================================================================================

fn provable(m: u32) -> RegimeOptions {
    RegimeOptions::ListDecodingProvable { johnson: JohnsonParameter::Fixed(m) }
}

fn conjectured(epsilon: f64) -> RegimeOptions {
    RegimeOptions::ListDecodingConjectured {
        johnson: JohnsonParameter::Fixed(16),
        conjecture: ConjectureParams::new(epsilon, 1.0, 1.0, 1.0),
    }
}

fn test_params(
    log_trace_length: u32,
    num_queries: u32,
    regime: RegimeOptions,
) -> ProtocolParameters {
    ProtocolParameters::new(2, log_trace_length, num_queries, 4, FIELD_MODULUS, 274, regime)
        .unwrap()
}

fn assert_bits(expected: f64, report: &SoundnessReport) {
    assert!(
        (report.bits() - expected).abs() < TOLERANCE,
        "expected {expected} bits, but got {}",
        report.bits()
    );
}

fn assert_terms(expected: [f64; 6], report: &SoundnessReport) {
    for (term, expected) in report.terms().iter().zip(expected) {
        assert!(
            (term.log2() - expected).abs() < TOLERANCE,
            "expected log2({}) = {expected}, but got {}",
            term.kind(),
            term.log2()
        );
    }
}

// END-TO-END SCENARIOS
// ================================================================================================

#[test]
fn provable_list_decoding() {
    let params = test_params(18, 50, provable(16));
    let report = estimate(&params).unwrap();

    assert_eq!(Regime::ListDecodingProvable, report.regime());
    assert_eq!(Some(16), report.johnson_parameter());
    assert_eq!(0.484_375, report.proximity_parameter());
    assert_bits(47.495, &report);
    assert_terms([-49.975, -47.780, -114.589, -102.366, -105.495, -103.910], &report);
    assert_eq!(ErrorTermKind::FriQueries, report.dominant_term().kind());
}

#[test]
fn provable_list_decoding_auto_search() {
    let regime = RegimeOptions::ListDecodingProvable { johnson: JohnsonParameter::Auto };
    let report = estimate(&test_params(18, 50, regime)).unwrap();

    // m = 16 balances the commit-phase and the query-phase errors
    assert_eq!(Some(16), report.johnson_parameter());
    assert_bits(47.495, &report);
}

#[test]
fn conjectured_list_decoding() {
    let params = test_params(18, 50, conjectured(0.05));
    let report = estimate(&params).unwrap();

    assert_eq!(Regime::ListDecodingConjectured, report.regime());
    assert_eq!(Some(16), report.johnson_parameter());
    assert!((report.proximity_parameter() - 0.7).abs() < 1e-12);
    assert_bits(82.779, &report);
    assert_terms([-85.259, -86.848, -95.397, -83.173, -105.495, -103.910], &report);
    assert_eq!(ErrorTermKind::Deep, report.dominant_term().kind());

    // L⁺ = ⌈D / ε⁺⌉ with ε⁺ = 1 - ρ⁺ - θ
    let derived = DerivedQuantities::new(&params);
    let epsilon_plus = 1.0 - derived.rate_plus() - report.proximity_parameter();
    let expected = log2(ceil(1_048_576.0 / epsilon_plus));
    assert!((report.list_size().log2() - expected).abs() < 1e-9);
}

#[test]
fn unique_decoding() {
    let report = estimate(&test_params(18, 150, RegimeOptions::UniqueDecoding)).unwrap();
    assert_eq!(Regime::UniqueDecoding, report.regime());
    assert_eq!(None, report.johnson_parameter());
    assert_eq!(0.375, report.proximity_parameter());
    assert_bits(99.289, &report);
    assert_terms([-99.693, -101.711, -119.719, -107.495, -105.495, -103.910], &report);

    // a 4 times longer trace costs two bits in FRI_CONSTANT, DEEP, PLONK and PLOOKUP
    let report = estimate(&test_params(20, 150, RegimeOptions::UniqueDecoding)).unwrap();
    assert_bits(97.506, &report);
}

// PROPERTIES
// ================================================================================================

#[test]
fn estimation_is_deterministic() {
    for regime in [provable(16), conjectured(0.05), RegimeOptions::UniqueDecoding] {
        let params = test_params(18, 50, regime);
        assert_eq!(estimate(&params).unwrap(), estimate(&params).unwrap());
    }
}

#[test]
fn unique_decoding_list_size_is_one() {
    for (log_blowup, log_trace_length) in [(1, 2), (2, 18), (3, 10), (8, 30), (64, 64)] {
        let params = ProtocolParameters::new(
            log_blowup,
            log_trace_length,
            80,
            3,
            GOLDILOCKS,
            100,
            RegimeOptions::UniqueDecoding,
        )
        .unwrap();
        let report = estimate(&params).unwrap();
        assert!(report.list_size().log2() == 0.0);
    }
}

#[test]
fn protocol_argument_terms_are_regime_independent() {
    let reports = [provable(16), conjectured(0.05), RegimeOptions::UniqueDecoding]
        .map(|regime| estimate(&test_params(18, 50, regime)).unwrap());

    for kind in [ErrorTermKind::Plonk, ErrorTermKind::Plookup] {
        let value = reports[0].term(kind).value();
        assert!(reports.iter().all(|report| report.term(kind).value() == value));
    }
}

#[test]
fn infeasible_fixed_johnson_parameter() {
    // for h = 4 the Johnson bound only admits m <= 8
    let err = estimate(&test_params(4, 50, provable(9))).unwrap_err();
    assert!(matches!(
        err,
        SoundnessError::ConstraintViolation { regime: Regime::ListDecodingProvable, .. }
    ));
    assert!(estimate(&test_params(4, 50, provable(8))).is_ok());
}

#[test]
fn infeasible_conjecture_slack() {
    // ε below 2 / D pushes θ beyond 1 - ρ⁺
    let err = estimate(&test_params(18, 50, conjectured(1e-7))).unwrap_err();
    assert!(matches!(
        err,
        SoundnessError::ConstraintViolation { regime: Regime::ListDecodingConjectured, .. }
    ));
}

#[test]
fn johnson_search_selects_best_candidate() {
    let params = test_params(18, 50, provable(16));
    let derived = DerivedQuantities::new(&params);

    let (bound, report) = optimize_johnson_parameter(&params, &derived, 10..=30).unwrap();
    assert_eq!(16, bound.m());
    assert_eq!(Some(16), report.johnson_parameter());

    // every candidate above 16 is worse, so the lower end of the range wins
    let (bound, _) = optimize_johnson_parameter(&params, &derived, 20..=40).unwrap();
    assert_eq!(20, bound.m());

    let (bound, _) = optimize_johnson_parameter(&params, &derived, 7..=7).unwrap();
    assert_eq!(7, bound.m());
}

#[test]
fn johnson_search_discards_infeasible_candidates() {
    let params = test_params(4, 50, provable(1));
    let derived = DerivedQuantities::new(&params);

    let (bound, _) = optimize_johnson_parameter(&params, &derived, 1..=20).unwrap();
    assert!(bound.m() <= 8);

    let err = optimize_johnson_parameter(&params, &derived, 9..=20).unwrap_err();
    assert_eq!(SoundnessError::NoFeasibleParameter { first: 9, last: 20 }, err);

    let regime = RegimeOptions::ListDecodingProvable { johnson: JohnsonParameter::Range(9..=20) };
    let err = estimate(&test_params(4, 50, regime)).unwrap_err();
    assert_eq!(SoundnessError::NoFeasibleParameter { first: 9, last: 20 }, err);
}

#[test]
fn grinding_reduces_query_error() {
    let params = test_params(18, 50, provable(16)).with_grinding_factor(16).unwrap();
    let report = estimate(&params).unwrap();

    assert!((report.term(ErrorTermKind::FriQueries).log2() + 63.780).abs() < TOLERANCE);
    assert_bits(49.975, &report);
    assert_eq!(ErrorTermKind::FriConstant, report.dominant_term().kind());
}

#[test]
fn zero_columns_yield_zero_ali_term() {
    let regime = RegimeOptions::UniqueDecoding;
    let params = ProtocolParameters::new(2, 18, 50, 4, FIELD_MODULUS, 0, regime).unwrap();
    let report = estimate(&params).unwrap();
    assert!(report.term(ErrorTermKind::Ali).value().is_zero());
    assert!(report.bits().is_finite());
}

#[test]
fn tiny_field_is_rejected() {
    // F = 2 cannot accommodate the trace and LDE domains
    let params =
        ProtocolParameters::new(2, 18, 50, 1, 2, 1, RegimeOptions::UniqueDecoding).unwrap();
    let err = estimate(&params).unwrap_err();
    assert!(matches!(
        err,
        SoundnessError::NumericPrecisionError { quantity: "DEEP denominator", .. }
    ));
}

#[test]
fn extreme_parameters_are_resolved() {
    let params =
        ProtocolParameters::new(64, 64, 1 << 16, 64, GOLDILOCKS, u64::MAX, provable(16)).unwrap();
    let report = estimate(&params).unwrap();
    assert!(report.bits().is_finite());
    assert!(report.terms().iter().all(|term| term.value().is_valid()));
}

#[test]
fn compare_all_regimes() {
    let params = test_params(18, 50, RegimeOptions::UniqueDecoding);
    let conjecture = ConjectureParams::new(0.05, 1.0, 1.0, 1.0);
    let results = compare_regimes(&params, &JohnsonParameter::Fixed(16), Some(conjecture));

    let regimes: Vec<_> = results.iter().map(|(regime, _)| *regime).collect();
    assert_eq!(
        vec![Regime::ListDecodingProvable, Regime::ListDecodingConjectured, Regime::UniqueDecoding],
        regimes
    );
    assert_bits(47.495, results[0].1.as_ref().unwrap());
    assert_bits(82.779, results[1].1.as_ref().unwrap());

    // a failing regime does not suppress the others
    let conjecture = ConjectureParams::new(1e-7, 1.0, 1.0, 1.0);
    let results = compare_regimes(&params, &JohnsonParameter::Auto, Some(conjecture));
    assert_eq!(3, results.len());
    assert!(results[0].1.is_ok());
    assert!(matches!(results[1].1, Err(SoundnessError::ConstraintViolation { .. })));
    assert!(results[2].1.is_ok());

    let results = compare_regimes(&params, &JohnsonParameter::Fixed(16), None);
    assert_eq!(2, results.len());
}

proptest! {
    #[test]
    fn more_queries_never_reduce_security(
        log_trace_length in 4u32..40,
        num_queries in 1u32..400,
        regime_idx in 0usize..3,
    ) {
        // m = 4 satisfies the Johnson bound for every h >= 3
        let regime = match regime_idx {
            0 => provable(4),
            1 => RegimeOptions::ListDecodingConjectured {
                johnson: JohnsonParameter::Fixed(4),
                conjecture: ConjectureParams::new(0.05, 1.0, 1.0, 1.0),
            },
            _ => RegimeOptions::UniqueDecoding,
        };
        let fewer = estimate(&test_params(log_trace_length, num_queries, regime.clone())).unwrap();
        let more = estimate(&test_params(log_trace_length, num_queries + 1, regime)).unwrap();

        let kind = ErrorTermKind::FriQueries;
        prop_assert!(more.term(kind).value() < fewer.term(kind).value());
        prop_assert!(more.bits() >= fewer.bits());

        // the increase is only visible in f64 while FRI_QUERIES is not negligible in the total
        if fewer.term(kind).log2() + fewer.bits() > -30.0 {
            prop_assert!(more.bits() > fewer.bits());
        }
    }

    #[test]
    fn unique_decoding_list_size_is_one_for_any_field(
        log_blowup in 1u32..16,
        extension_degree in 1u32..8,
        num_columns in 0u64..10_000,
    ) {
        let params = ProtocolParameters::new(
            log_blowup,
            16,
            100,
            extension_degree,
            GOLDILOCKS,
            num_columns,
            RegimeOptions::UniqueDecoding,
        )
        .unwrap();
        let report = estimate(&params).unwrap();
        prop_assert_eq!(crate::LogValue::ONE, report.list_size());
        prop_assert_eq!(None, report.johnson_parameter());
    }
}
