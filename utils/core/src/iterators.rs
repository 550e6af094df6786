// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Components needed for parallel iterators.
//!
//! When `concurrent` feature is enabled, this module re-exports `rayon::prelude`. Otherwise,
//! this is an empty module.

#[cfg(feature = "concurrent")]
pub use rayon::prelude::*;

/// Returns either a regular or a parallel consuming iterator depending on whether `concurrent`
/// feature is enabled.
///
/// This is intended for ranges of independent candidates (e.g. a parameter sweep): when
/// `concurrent` feature is enabled, the range is split across the `rayon` thread pool; otherwise,
/// the range is walked in order in the current thread.
///
/// The feature flag is evaluated in the calling crate, so callers must forward their own
/// `concurrent` feature to this crate.
#[macro_export]
macro_rules! into_iter {
    ($e:expr) => {{
        #[cfg(feature = "concurrent")]
        let result = $e.into_par_iter();

        #[cfg(not(feature = "concurrent"))]
        let result = $e.into_iter();

        result
    }};
}
