// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::fmt;

use math::LogValue;
use tracing::warn;

use crate::{Regime, SoundnessError};

// ERROR TERMS
// ================================================================================================

/// Number of error terms which make up the soundness error of the protocol.
pub const NUM_ERROR_TERMS: usize = 6;

/// Named contributions to the soundness error of the protocol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorTermKind {
    /// FRI commit-phase error (proximity gaps of the batched FRI instance and folding).
    FriConstant,
    /// FRI query-phase error.
    FriQueries,
    /// Error of the algebraic linking of the constraints.
    Ali,
    /// Error of the out-of-domain (DEEP) sampling.
    Deep,
    /// Error of the PLONK permutation argument.
    Plonk,
    /// Error of the PLOOKUP lookup argument.
    Plookup,
}

impl ErrorTermKind {
    /// All error terms in the order in which they appear in a report.
    pub const ALL: [Self; NUM_ERROR_TERMS] =
        [Self::FriConstant, Self::FriQueries, Self::Ali, Self::Deep, Self::Plonk, Self::Plookup];

    /// Returns the name of this error term.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FriConstant => "FRI_CONSTANT",
            Self::FriQueries => "FRI_QUERIES",
            Self::Ali => "ALI",
            Self::Deep => "DEEP",
            Self::Plonk => "PLONK",
            Self::Plookup => "PLOOKUP",
        }
    }
}

impl fmt::Display for ErrorTermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single contribution to the soundness error.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ErrorTerm {
    kind: ErrorTermKind,
    value: LogValue,
}

impl ErrorTerm {
    /// Returns a new error term with the specified probability.
    ///
    /// A probability bound above one carries no information and is capped at one.
    ///
    /// # Errors
    /// Returns [SoundnessError::NumericPrecisionError] if `value` is not a finite non-negative
    /// number.
    pub fn new(kind: ErrorTermKind, value: LogValue) -> Result<Self, SoundnessError> {
        if !value.is_valid() {
            return Err(SoundnessError::NumericPrecisionError {
                quantity: kind.name(),
                log2: value.log2(),
            });
        }
        if value > LogValue::ONE {
            warn!(term = kind.name(), log2 = value.log2(), "error term exceeds one; capping");
        }
        Ok(Self { kind, value: value.min(LogValue::ONE) })
    }

    /// Returns the kind of this error term.
    pub fn kind(&self) -> ErrorTermKind {
        self.kind
    }

    /// Returns the probability of this error term.
    pub fn value(&self) -> LogValue {
        self.value
    }

    /// Returns the probability of this error term as an `f64`.
    pub fn probability(&self) -> f64 {
        self.value.to_f64()
    }

    /// Returns log2 of the probability of this error term.
    pub fn log2(&self) -> f64 {
        self.value.log2()
    }
}

// SOUNDNESS REPORT
// ================================================================================================

/// Soundness error of the protocol broken down into its contributions.
///
/// The total error is the sum of all error terms, and the security level (in bits) is its
/// negative log2. Reports are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundnessReport {
    regime: Regime,
    terms: [ErrorTerm; NUM_ERROR_TERMS],
    total: LogValue,
    proximity_parameter: f64,
    list_size: LogValue,
    johnson_parameter: Option<u32>,
}

impl SoundnessReport {
    /// Aggregates the specified error terms into a report.
    pub(crate) fn new(
        regime: Regime,
        terms: [ErrorTerm; NUM_ERROR_TERMS],
        proximity_parameter: f64,
        list_size: LogValue,
        johnson_parameter: Option<u32>,
    ) -> Self {
        debug_assert!(terms.iter().map(ErrorTerm::kind).eq(ErrorTermKind::ALL));
        let total = terms.iter().map(ErrorTerm::value).sum();
        Self {
            regime,
            terms,
            total,
            proximity_parameter,
            list_size,
            johnson_parameter,
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the regime under which this report was computed.
    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Returns all error terms in the order of [ErrorTermKind::ALL].
    pub fn terms(&self) -> &[ErrorTerm] {
        &self.terms
    }

    /// Returns the error term of the specified kind.
    pub fn term(&self, kind: ErrorTermKind) -> &ErrorTerm {
        &self.terms[kind as usize]
    }

    /// Returns the total soundness error, i.e., the sum of all error terms.
    pub fn total(&self) -> LogValue {
        self.total
    }

    /// Returns the security level (in bits), i.e., `-log2` of the total soundness error.
    pub fn bits(&self) -> f64 {
        -self.total.log2()
    }

    /// Returns the proximity parameter `θ` of the FRI analysis.
    pub fn proximity_parameter(&self) -> f64 {
        self.proximity_parameter
    }

    /// Returns the list size `L⁺` used in the ALI and DEEP error terms.
    pub fn list_size(&self) -> LogValue {
        self.list_size
    }

    /// Returns the Johnson parameter `m` the FRI commit-phase error was computed with; this is
    /// `None` in the unique-decoding regime.
    pub fn johnson_parameter(&self) -> Option<u32> {
        self.johnson_parameter
    }

    /// Returns the largest error term; ties are resolved in favor of the earlier term.
    pub fn dominant_term(&self) -> &ErrorTerm {
        self.terms[1..].iter().fold(&self.terms[0], |dominant, term| {
            if term.value() > dominant.value() {
                term
            } else {
                dominant
            }
        })
    }

    /// Returns whether or not the security level is greater than or equal to the specified
    /// security level in bits.
    pub fn is_at_least(&self, bits: u32) -> bool {
        self.bits() >= bits as f64
    }
}

// TESTS
// ================================================================================================
