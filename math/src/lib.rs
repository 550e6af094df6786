// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Arithmetic backend of the FRI soundness estimator.
//!
//! Soundness error terms range from roughly `2^-40` down to well below `2^-150`, and the field
//! sizes they are divided by are far beyond the 53-bit mantissa of an `f64`. This crate provides
//! two tools which together keep every computation exact or relative-error bounded:
//!
//! * [LogValue] - a non-negative real stored as its base-2 logarithm. Products, quotients and
//!   powers become additions and multiplications of logarithms, and sums are computed with a
//!   stable log-sum-exp, so tiny values never underflow.
//! * [BigUint] - arbitrary-precision integers (re-exported from `num-bigint`) for all exact
//!   integer quantities such as domain sizes and `p^e`. These are converted into [LogValue]
//!   only once they are final.
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod log_value;
pub use log_value::LogValue;

pub mod utils;

pub use num_bigint::BigUint;
