// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::{
    f64::consts::LOG2_E,
    fmt::{self, Display, Formatter},
    iter::Sum,
    ops::{Add, Div, Mul},
};

use num_bigint::BigUint;

use crate::utils::{exp2, ln_1p, log2, log2_biguint};

#[cfg(test)]
mod tests;

// LOG VALUE
// ================================================================================================

/// A non-negative real number represented by its base-2 logarithm.
///
/// Zero is represented by a logarithm of -infinity. Values which cannot be represented (e.g.
/// those constructed from negative inputs or produced by `0 * inf`) carry a `NaN` logarithm and
/// can be detected via [LogValue::is_valid()]. Invalid values propagate through all arithmetic
/// operations.
///
/// Ordering of [LogValue]s coincides with ordering of the values they represent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct LogValue(f64);

impl LogValue {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// The value 0.
    pub const ZERO: Self = Self(f64::NEG_INFINITY);

    /// The value 1.
    pub const ONE: Self = Self(0.0);

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Returns a [LogValue] representing `value`.
    ///
    /// Negative and `NaN` inputs result in an invalid value.
    pub fn new(value: f64) -> Self {
        if value < 0.0 {
            Self(f64::NAN)
        } else {
            Self(log2(value))
        }
    }

    /// Returns a [LogValue] whose base-2 logarithm is `log2`, i.e. the value `2^log2`.
    pub const fn from_log2(log2: f64) -> Self {
        Self(log2)
    }

    /// Returns a [LogValue] representing the specified integer.
    pub fn from_int(value: u64) -> Self {
        Self(log2(value as f64))
    }

    /// Returns a [LogValue] representing the specified big integer.
    pub fn from_biguint(value: &BigUint) -> Self {
        Self(log2_biguint(value))
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the base-2 logarithm of this value.
    pub fn log2(&self) -> f64 {
        self.0
    }

    /// Converts this value into an `f64`.
    ///
    /// Values below `2^-1074` are flushed to zero; this is intended for display only.
    pub fn to_f64(&self) -> f64 {
        exp2(self.0)
    }

    /// Returns true if this value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0 == f64::NEG_INFINITY
    }

    /// Returns true if this value is a finite non-negative real.
    pub fn is_valid(&self) -> bool {
        !self.0.is_nan() && self.0 != f64::INFINITY
    }

    // ARITHMETIC
    // --------------------------------------------------------------------------------------------

    /// Returns this value raised to the specified real power.
    pub fn powf(self, exp: f64) -> Self {
        if exp == 0.0 && !self.0.is_nan() {
            Self::ONE
        } else {
            Self(self.0 * exp)
        }
    }

    /// Returns this value raised to the specified integer power.
    pub fn powi(self, exp: u32) -> Self {
        self.powf(exp as f64)
    }

    /// Returns the square root of this value.
    pub fn sqrt(self) -> Self {
        Self(self.0 / 2.0)
    }

    /// Returns `1 / self`.
    pub fn recip(self) -> Self {
        Self(-self.0)
    }

    /// Returns the smaller of `self` and `other`; an invalid operand results in an invalid value.
    pub fn min(self, other: Self) -> Self {
        if self.0.is_nan() || other.0.is_nan() {
            Self(f64::NAN)
        } else if self.0 <= other.0 {
            self
        } else {
            other
        }
    }
}

// OVERLOADED OPERATORS
// ================================================================================================

impl Mul for LogValue {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Div for LogValue {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Add for LogValue {
    type Output = Self;

    /// Computes `log2(2^a + 2^b)` as `max + log2(1 + 2^(min - max))`.
    fn add(self, rhs: Self) -> Self {
        if self.0.is_nan() || rhs.0.is_nan() {
            return Self(f64::NAN);
        }
        let (hi, lo) = if self.0 >= rhs.0 { (self.0, rhs.0) } else { (rhs.0, self.0) };
        if lo == f64::NEG_INFINITY || hi == f64::INFINITY {
            return Self(hi);
        }
        Self(hi + ln_1p(exp2(lo - hi)) * LOG2_E)
    }
}

impl Sum for LogValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a LogValue> for LogValue {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for LogValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "2^{:.3}", self.0)
    }
}
