// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use proptest::prelude::*;

use super::LogValue;
use crate::utils::{exact_pow, log2};

// MANUAL TESTS
// ================================================================================================

#[test]
fn constants() {
    assert!(LogValue::ZERO.is_zero());
    assert!(LogValue::ZERO.is_valid());
    assert_eq!(0.0, LogValue::ONE.log2());
    assert_eq!(1.0, LogValue::ONE.to_f64());
    assert_eq!(LogValue::ZERO, LogValue::new(0.0));
    assert_eq!(LogValue::ZERO, LogValue::from_int(0));
}

#[test]
fn invalid_values() {
    assert!(!LogValue::new(-1.0).is_valid());
    assert!(!LogValue::new(f64::NAN).is_valid());
    assert!(!(LogValue::ONE / LogValue::ZERO).is_valid());
    assert!(!(LogValue::ZERO * LogValue::from_log2(f64::INFINITY)).is_valid());

    // invalid values propagate through addition
    assert!(!(LogValue::new(-1.0) + LogValue::ONE).is_valid());
    assert!(!(LogValue::ONE + LogValue::new(-1.0)).is_valid());
}

#[test]
fn add_zero_is_identity() {
    let a = LogValue::from_log2(-150.0);
    assert_eq!(a, a + LogValue::ZERO);
    assert_eq!(a, LogValue::ZERO + a);
    assert_eq!(LogValue::ZERO, LogValue::ZERO + LogValue::ZERO);
}

#[test]
fn add_tiny_values() {
    // 2^-150 + 2^-150 = 2^-149, far below anything an f64 sum of raw values can keep accurate
    let a = LogValue::from_log2(-150.0);
    assert!(((a + a).log2() + 149.0).abs() < 1e-12);

    // a much smaller term does not disappear entirely
    let b = LogValue::from_log2(-160.0);
    let sum = a + b;
    assert!(sum > a);
    assert!((sum.log2() + 150.0).abs() < 2e-3);
}

#[test]
fn sum_of_terms() {
    let terms = [
        LogValue::from_log2(-49.975),
        LogValue::from_log2(-47.780),
        LogValue::from_log2(-114.589),
    ];
    let total: LogValue = terms.iter().sum();
    let expected = log2(2f64.powf(-49.975) + 2f64.powf(-47.780) + 2f64.powf(-114.589));
    assert!((total.log2() - expected).abs() < 1e-9);
}

#[test]
fn powers_and_roots() {
    let quarter = LogValue::new(0.25);
    assert_eq!(-2.0, quarter.log2());
    assert_eq!(-1.0, quarter.sqrt().log2());
    assert_eq!(-3.0, quarter.powf(1.5).log2());
    assert_eq!(-100.0, LogValue::new(0.5).powi(100).log2());
    assert_eq!(2.0, quarter.recip().log2());
    assert_eq!(LogValue::ONE, LogValue::ZERO.powf(0.0));
}

#[test]
fn field_size_quotients() {
    let p = (1u64 << 32) - (1u64 << 27) + 1;
    let f = LogValue::from_biguint(&exact_pow(p, 4));
    let h = LogValue::from_int(1 << 18);

    // e * 5 * H / F for the quartic extension of the field with p = 2^32 - 2^27 + 1
    let plonk = LogValue::from_int(4 * 5) * h / f;
    assert!((plonk.log2() + 105.494857).abs() < 1e-5);
}

#[test]
fn min_and_ordering() {
    let a = LogValue::from_log2(0.5);
    assert_eq!(LogValue::ONE, a.min(LogValue::ONE));
    assert_eq!(LogValue::ONE, LogValue::ONE.min(a));
    assert!(LogValue::ZERO < LogValue::from_log2(-1000.0));
    assert!(!a.min(LogValue::new(-2.0)).is_valid());
}

#[test]
fn display() {
    assert_eq!("2^-47.780", std::format!("{}", LogValue::from_log2(-47.78)));
}

// RANDOMIZED TESTS
// ================================================================================================

proptest! {
    #[test]
    fn mul_matches_f64(a in 1e-30f64..1e30, b in 1e-30f64..1e30) {
        let result = LogValue::new(a) * LogValue::new(b);
        prop_assert!((result.log2() - log2(a * b)).abs() < 1e-9);
    }

    #[test]
    fn add_matches_f64(a in 1e-30f64..1e30, b in 1e-30f64..1e30) {
        let result = LogValue::new(a) + LogValue::new(b);
        prop_assert!((result.log2() - log2(a + b)).abs() < 1e-9);
    }

    #[test]
    fn add_is_commutative(a in -500f64..500.0, b in -500f64..500.0) {
        let x = LogValue::from_log2(a);
        let y = LogValue::from_log2(b);
        prop_assert_eq!(x + y, y + x);
    }

    #[test]
    fn add_is_monotone(a in -500f64..0.0, b in -500f64..0.0) {
        let x = LogValue::from_log2(a);
        let y = LogValue::from_log2(b);
        prop_assert!(x + y >= x);
        prop_assert!(x + y >= y);
    }
}
