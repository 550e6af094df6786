// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Feature-based re-export of the collection components used by the estimator.

pub use alloc::{vec, vec::Vec};
