// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use num_bigint::BigUint;


// CONSTANTS
// ================================================================================================

/// Number of bits in the mantissa of an `f64`; every integer below `2^53` is represented exactly.
pub const F64_MANTISSA_BITS: u32 = f64::MANTISSA_DIGITS;

// INTEGER FUNCTIONS
// ================================================================================================

/// Returns `2^exponent` as a big integer.
pub fn pow2(exponent: u32) -> BigUint {
    BigUint::from(1u32) << exponent as usize
}

/// Returns `base^exponent` computed exactly.
pub fn exact_pow(base: u64, exponent: u32) -> BigUint {
    BigUint::from(base).pow(exponent)
}

/// Returns log2 of the specified integer; this is -infinity for zero.
///
/// Only the 64 most significant bits of `value` take part in the floating-point conversion; the
/// remaining bits are accounted for exactly through the exponent.
pub fn log2_biguint(value: &BigUint) -> f64 {
    let num_bits = value.bits();
    if num_bits == 0 {
        return f64::NEG_INFINITY;
    }
    let shift = num_bits.saturating_sub(64);
    let top = (value >> shift).iter_u64_digits().next().unwrap_or(0);
    log2(top as f64) + shift as f64
}

// FLOATING POINT FUNCTIONS
// ================================================================================================

#[cfg(feature = "std")]
pub fn log2(value: f64) -> f64 {
    value.log2()
}

#[cfg(not(feature = "std"))]
pub fn log2(value: f64) -> f64 {
    libm::log2(value)
}

#[cfg(feature = "std")]
pub fn exp2(value: f64) -> f64 {
    value.exp2()
}

#[cfg(not(feature = "std"))]
pub fn exp2(value: f64) -> f64 {
    libm::exp2(value)
}

#[cfg(feature = "std")]
pub fn ln_1p(value: f64) -> f64 {
    value.ln_1p()
}

#[cfg(not(feature = "std"))]
pub fn ln_1p(value: f64) -> f64 {
    libm::log1p(value)
}

#[cfg(feature = "std")]
pub fn sqrt(value: f64) -> f64 {
    value.sqrt()
}

#[cfg(not(feature = "std"))]
pub fn sqrt(value: f64) -> f64 {
    libm::sqrt(value)
}

#[cfg(feature = "std")]
pub fn ceil(value: f64) -> f64 {
    value.ceil()
}

#[cfg(not(feature = "std"))]
pub fn ceil(value: f64) -> f64 {
    libm::ceil(value)
}

#[cfg(feature = "std")]
pub fn powf(value: f64, exp: f64) -> f64 {
    value.powf(exp)
}

#[cfg(not(feature = "std"))]
pub fn powf(value: f64, exp: f64) -> f64 {
    libm::pow(value, exp)
}
