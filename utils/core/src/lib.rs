// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! This crate contains utility macros and re-exports used by other crates of the FRI soundness
//! estimator.
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod collections;
pub mod iterators;
pub mod string;


// FEATURE-BASED RE-EXPORTS
// ================================================================================================

#[cfg(feature = "concurrent")]
pub use rayon;
