// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Feature-based re-export of string components.
//!
//! Error messages produced by the estimator carry owned strings; these are taken from `alloc` so
//! that the library crates build without the standard library.

pub use alloc::{format, string::String};
