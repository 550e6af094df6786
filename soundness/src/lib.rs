// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains an estimator of the soundness error of FRI-based polynomial IOPs.
//!
//! The soundness error of such a protocol is the sum of six error terms: the FRI commit-phase
//! error (`FRI_CONSTANT`), the FRI query-phase error (`FRI_QUERIES`), the errors of constraint
//! linking (`ALI`) and out-of-domain sampling (`DEEP`), and the errors of the PLONK permutation
//! and PLOOKUP lookup arguments. The estimator computes these terms for a set of
//! [ProtocolParameters] and reports the total error together with the resulting bits of
//! security.
//!
//! Three soundness regimes are supported:
//!
//! * Provable list decoding - the proximity parameter is tied to the Johnson bound. The Johnson
//!   parameter `m` is either fixed or chosen to maximize the bits of security.
//! * Conjectured list decoding - the proximity parameter approaches capacity and the FRI
//!   commit-phase error and list sizes follow conjectured bounds.
//! * Unique decoding - the proximity parameter is within the unique decoding radius.
//!
//! # Usage
//! ```
//! use fri_soundness::{estimate, JohnsonParameter, ProtocolParameters, RegimeOptions};
//!
//! let modulus = (1u64 << 32) - (1 << 27) + 1;
//! let regime = RegimeOptions::ListDecodingProvable { johnson: JohnsonParameter::Fixed(16) };
//! let params = ProtocolParameters::new(2, 18, 50, 4, modulus, 274, regime).unwrap();
//!
//! let report = estimate(&params).unwrap();
//! assert!(report.is_at_least(47));
//! ```
//!
//! All computations are carried out in the log domain (see [LogValue]) on top of exact big
//! integers, so error terms far below `2^-1074` are still resolved.
//!
//! # Crate features
//! * `std` - enabled by default; relies on the Rust standard library. When disabled, `libm`
//!   provides floating-point functions.
//! * `concurrent` - implies `std`; evaluates candidates of a Johnson parameter search in multiple
//!   threads.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod derived;
pub use derived::DerivedQuantities;

mod errors;
pub use errors::SoundnessError;

mod options;
pub use options::{
    ConjectureParams, JohnsonParameter, ProtocolConstants, ProtocolParameters, Regime,
    RegimeOptions,
};

mod report;
pub use report::{ErrorTerm, ErrorTermKind, SoundnessReport, NUM_ERROR_TERMS};

mod security;
pub use math::{BigUint, LogValue};
pub use security::{
    check_proximity_parameter, compare_regimes, default_johnson_range, estimate,
    is_within_list_decoding_radius, optimize_johnson_parameter, proximity_bound, JohnsonBound,
    MAX_PROXIMITY_PARAMETER,
};

#[cfg(test)]
mod tests;
