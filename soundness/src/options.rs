// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::{fmt, ops::RangeInclusive};

use math::utils::exp2;
use utils::string::format;

use crate::SoundnessError;

// TYPES AND INTERFACES
// ================================================================================================

/// Soundness regime under which error terms are computed.
///
/// The regime determines which proximity parameter the FRI analysis may use and, consequently,
/// how large the list of codewords close to a received word can be:
///
/// * In the provable list-decoding regime the proximity parameter is tied to the Johnson bound
///   `1 - √ρ⁺` and list sizes follow from the Guruswami-Sudan analysis.
/// * In the conjectured list-decoding regime the proximity parameter approaches capacity
///   `1 - ρ⁺`, and list sizes are given by a conjectured bound.
/// * In the unique-decoding regime the proximity parameter stays within `(1 - ρ) / 2` and the
///   list size is exactly one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Regime {
    ListDecodingProvable,
    ListDecodingConjectured,
    UniqueDecoding,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListDecodingProvable => write!(f, "list-decoding (provable)"),
            Self::ListDecodingConjectured => write!(f, "list-decoding (conjectured)"),
            Self::UniqueDecoding => write!(f, "unique-decoding"),
        }
    }
}

/// Specifies how the Johnson parameter `m` of the list-decoding analysis is chosen.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum JohnsonParameter {
    /// Use exactly this value of `m`; the estimation fails if it violates the proximity
    /// constraint.
    Fixed(u32),
    /// Search the specified range for the `m` which maximizes the bits of security.
    Range(RangeInclusive<u32>),
    /// Search the range `1..=m_max`, where `m_max` is the largest value for which the proximity
    /// constraint can hold (capped at 1000).
    Auto,
}

/// Parameters of the conjectured list-decoding bound.
///
/// The conjecture states that, for a proximity parameter `θ = 1 - ρ - ε`, FRI commit-phase error
/// is bounded by `L·D^c2 / ((ε·ρ)^c1 · F)` and list sizes by `(D / ε⁺)^c_rho`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ConjectureParams {
    epsilon: f64,
    c1: f64,
    c2: f64,
    c_rho: f64,
}

impl ConjectureParams {
    /// Returns a new set of conjecture parameters; these are validated when passed to
    /// [ProtocolParameters::new()].
    pub fn new(epsilon: f64, c1: f64, c2: f64, c_rho: f64) -> Self {
        Self { epsilon, c1, c2, c_rho }
    }

    /// Returns the proximity slack `ε`.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the exponent of `1 / (ε·ρ)` in the commit-phase error.
    pub fn c1(&self) -> f64 {
        self.c1
    }

    /// Returns the exponent of the LDE domain size in the commit-phase error.
    pub fn c2(&self) -> f64 {
        self.c2
    }

    /// Returns the exponent of the conjectured list size bound.
    pub fn c_rho(&self) -> f64 {
        self.c_rho
    }
}

/// Regime selector together with regime-specific inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum RegimeOptions {
    ListDecodingProvable {
        johnson: JohnsonParameter,
    },
    /// The folding error of the conjectured regime reuses the Johnson parameter `m` obtained
    /// from a provable-regime computation with the same protocol parameters.
    ListDecodingConjectured {
        johnson: JohnsonParameter,
        conjecture: ConjectureParams,
    },
    UniqueDecoding,
}

impl RegimeOptions {
    /// Returns the regime tag of these options.
    pub fn regime(&self) -> Regime {
        match self {
            Self::ListDecodingProvable { .. } => Regime::ListDecodingProvable,
            Self::ListDecodingConjectured { .. } => Regime::ListDecodingConjectured,
            Self::UniqueDecoding => Regime::UniqueDecoding,
        }
    }
}

// PROTOCOL CONSTANTS
// ================================================================================================

/// Protocol-specific constants which enter the error terms.
///
/// These are fixed by the proof system being analyzed rather than by its users; they are carried
/// explicitly so that analyses of different systems can run side by side.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProtocolConstants {
    plonk_multiplicity: u64,
    plookup_multiplicity: u64,
    extra_batched_polys: u64,
    fri_folding_factor: u32,
    max_constraint_degree: u64,
    num_openings: u64,
}

impl ProtocolConstants {
    /// Returns a new set of protocol constants.
    ///
    /// # Errors
    /// Returns an error if:
    /// * `plonk_multiplicity` or `plookup_multiplicity` is zero.
    /// * `fri_folding_factor` is smaller than 2 or is not a power of two.
    /// * `max_constraint_degree` or `num_openings` is zero.
    pub fn new(
        plonk_multiplicity: u64,
        plookup_multiplicity: u64,
        extra_batched_polys: u64,
        fri_folding_factor: u32,
        max_constraint_degree: u64,
        num_openings: u64,
    ) -> Result<Self, SoundnessError> {
        if plonk_multiplicity == 0 {
            return Err(SoundnessError::invalid("plonk_multiplicity", "must be greater than 0"));
        }
        if plookup_multiplicity == 0 {
            return Err(SoundnessError::invalid("plookup_multiplicity", "must be greater than 0"));
        }
        if fri_folding_factor < 2 || !fri_folding_factor.is_power_of_two() {
            return Err(SoundnessError::invalid(
                "fri_folding_factor",
                "must be a power of two greater than 1",
            ));
        }
        if max_constraint_degree == 0 {
            return Err(SoundnessError::invalid("max_constraint_degree", "must be greater than 0"));
        }
        if num_openings == 0 {
            return Err(SoundnessError::invalid("num_openings", "must be greater than 0"));
        }

        Ok(Self {
            plonk_multiplicity,
            plookup_multiplicity,
            extra_batched_polys,
            fri_folding_factor,
            max_constraint_degree,
            num_openings,
        })
    }

    /// Returns the number of field-extension-scaled `H / F` contributions of the PLONK argument.
    pub fn plonk_multiplicity(&self) -> u64 {
        self.plonk_multiplicity
    }

    /// Returns the number of field-extension-scaled `H / F` contributions of the PLOOKUP argument.
    pub fn plookup_multiplicity(&self) -> u64 {
        self.plookup_multiplicity
    }

    /// Returns the number of polynomials batched into FRI in addition to the circuit columns.
    pub fn extra_batched_polys(&self) -> u64 {
        self.extra_batched_polys
    }

    /// Returns the FRI folding factor; each folding round reduces the domain by this factor.
    pub fn fri_folding_factor(&self) -> u32 {
        self.fri_folding_factor
    }

    /// Returns the bound on the degree of the constraints used in the DEEP error term.
    pub fn max_constraint_degree(&self) -> u64 {
        self.max_constraint_degree
    }

    /// Returns the number of out-of-domain openings per trace column.
    pub fn num_openings(&self) -> u64 {
        self.num_openings
    }
}

impl Default for ProtocolConstants {
    fn default() -> Self {
        Self {
            plonk_multiplicity: 5,
            plookup_multiplicity: 15,
            extra_batched_polys: 4,
            fri_folding_factor: 16,
            max_constraint_degree: 4,
            num_openings: 2,
        }
    }
}

// PROTOCOL PARAMETERS
// ================================================================================================

/// Parameters of a FRI-based polynomial IOP for which the soundness error is estimated.
///
/// 1. Rate - the code rate is `ρ = 2^-k` where `k` is the log2 of the blowup factor. Lower rates
///    make every FRI query more effective but increase the LDE domain size `D = 2^(h + k)`.
/// 2. Trace length - the trace domain has size `H = 2^h`.
/// 3. Number of queries - each FRI query multiplies the query-phase error by `1 - θ`.
/// 4. Field - all random challenges are drawn from the degree `e` extension of the prime field
///    of characteristic `p`, i.e., from a field of size `F = p^e`. Most error terms are inversely
///    proportional to `F`.
/// 5. Columns - the number of control, data and accumulation columns of the circuit; these are
///    batched together with a fixed number of extra polynomials into a single FRI instance.
///
/// Parameters are validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolParameters {
    log_blowup: u32,
    log_trace_length: u32,
    num_queries: u32,
    extension_degree: u32,
    field_modulus: u64,
    num_columns: u64,
    grinding_factor: u32,
    regime: RegimeOptions,
    constants: ProtocolConstants,
}

impl ProtocolParameters {
    // CONSTANTS
    // --------------------------------------------------------------------------------------------

    /// Largest supported log2 of the blowup factor.
    pub const MAX_LOG_BLOWUP: u32 = 64;

    /// Largest supported log2 of the trace length.
    pub const MAX_LOG_TRACE_LENGTH: u32 = 64;

    /// Largest supported field extension degree.
    pub const MAX_EXTENSION_DEGREE: u32 = 64;

    /// Largest supported number of FRI queries.
    pub const MAX_NUM_QUERIES: u32 = 1 << 16;

    /// Largest supported grinding factor.
    pub const MAX_GRINDING_FACTOR: u32 = 32;

    /// Largest number of candidates a Johnson parameter range may contain.
    pub const MAX_JOHNSON_CANDIDATES: u32 = 1 << 16;

    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------
    /// Returns a new instance of [ProtocolParameters] constructed from the specified parameters
    /// and the default [ProtocolConstants].
    ///
    /// # Errors
    /// Returns [SoundnessError::InvalidParameter] if:
    /// * `log_blowup` is zero or greater than 64.
    /// * `log_trace_length` is zero or greater than 64, or both `log_trace_length` and
    ///   `log_blowup` are 1 (the effective rate `ρ⁺` would be 1).
    /// * `num_queries` is zero or greater than 2^16.
    /// * `extension_degree` is zero or greater than 64.
    /// * `field_modulus` is smaller than 2.
    /// * a fixed Johnson parameter is zero, or a Johnson range is empty, starts at zero, or
    ///   contains more than 2^16 candidates.
    /// * the conjecture slack `ε` is not in `(0, 1 - ρ)`, or any conjecture exponent is not a
    ///   finite positive number.
    pub fn new(
        log_blowup: u32,
        log_trace_length: u32,
        num_queries: u32,
        extension_degree: u32,
        field_modulus: u64,
        num_columns: u64,
        regime: RegimeOptions,
    ) -> Result<Self, SoundnessError> {
        if log_blowup == 0 || log_blowup > Self::MAX_LOG_BLOWUP {
            return Err(SoundnessError::invalid(
                "log_blowup",
                format!("must be in [1, {}] but was {log_blowup}", Self::MAX_LOG_BLOWUP),
            ));
        }
        if log_trace_length == 0 || log_trace_length > Self::MAX_LOG_TRACE_LENGTH {
            return Err(SoundnessError::invalid(
                "log_trace_length",
                format!(
                    "must be in [1, {}] but was {log_trace_length}",
                    Self::MAX_LOG_TRACE_LENGTH
                ),
            ));
        }
        // H + 2 < D holds for all other combinations
        if log_trace_length == 1 && log_blowup == 1 {
            return Err(SoundnessError::invalid(
                "log_trace_length",
                "trace domain of size 2 with blowup factor 2 leaves no room for the openings",
            ));
        }
        if num_queries == 0 || num_queries > Self::MAX_NUM_QUERIES {
            return Err(SoundnessError::invalid(
                "num_queries",
                format!("must be in [1, {}] but was {num_queries}", Self::MAX_NUM_QUERIES),
            ));
        }
        if extension_degree == 0 || extension_degree > Self::MAX_EXTENSION_DEGREE {
            return Err(SoundnessError::invalid(
                "extension_degree",
                format!(
                    "must be in [1, {}] but was {extension_degree}",
                    Self::MAX_EXTENSION_DEGREE
                ),
            ));
        }
        if field_modulus < 2 {
            return Err(SoundnessError::invalid(
                "field_modulus",
                format!("must be at least 2 but was {field_modulus}"),
            ));
        }
        validate_regime(&regime, log_blowup)?;

        Ok(Self {
            log_blowup,
            log_trace_length,
            num_queries,
            extension_degree,
            field_modulus,
            num_columns,
            grinding_factor: 0,
            regime,
            constants: ProtocolConstants::default(),
        })
    }

    /// Replaces the protocol constants of these parameters.
    pub fn with_constants(mut self, constants: ProtocolConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Sets the number of grinding bits applied to the query seed; every grinding bit halves the
    /// FRI query-phase error.
    ///
    /// # Errors
    /// Returns an error if `grinding_factor` is greater than 32.
    pub fn with_grinding_factor(mut self, grinding_factor: u32) -> Result<Self, SoundnessError> {
        if grinding_factor > Self::MAX_GRINDING_FACTOR {
            return Err(SoundnessError::invalid(
                "grinding_factor",
                format!(
                    "cannot be greater than {} but was {grinding_factor}",
                    Self::MAX_GRINDING_FACTOR
                ),
            ));
        }
        self.grinding_factor = grinding_factor;
        Ok(self)
    }

    /// Returns a copy of these parameters with the regime replaced.
    ///
    /// # Errors
    /// Returns an error if the regime-specific inputs are invalid for these parameters.
    pub fn with_regime(mut self, regime: RegimeOptions) -> Result<Self, SoundnessError> {
        validate_regime(&regime, self.log_blowup)?;
        self.regime = regime;
        Ok(self)
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns `k`, the negative log2 of the code rate.
    pub fn log_blowup(&self) -> u32 {
        self.log_blowup
    }

    /// Returns `h`, the log2 of the trace length.
    pub fn log_trace_length(&self) -> u32 {
        self.log_trace_length
    }

    /// Returns `s`, the number of FRI queries.
    pub fn num_queries(&self) -> u32 {
        self.num_queries
    }

    /// Returns `e`, the degree of the field extension from which challenges are drawn.
    pub fn extension_degree(&self) -> u32 {
        self.extension_degree
    }

    /// Returns `p`, the characteristic of the base field.
    pub fn field_modulus(&self) -> u64 {
        self.field_modulus
    }

    /// Returns `C`, the number of circuit columns.
    pub fn num_columns(&self) -> u64 {
        self.num_columns
    }

    /// Returns the number of grinding bits applied to the query seed.
    pub fn grinding_factor(&self) -> u32 {
        self.grinding_factor
    }

    /// Returns the regime options of these parameters.
    pub fn regime(&self) -> &RegimeOptions {
        &self.regime
    }

    /// Returns the protocol constants of these parameters.
    pub fn constants(&self) -> &ProtocolConstants {
        &self.constants
    }
}

// HELPER FUNCTIONS
// ================================================================================================

fn validate_regime(regime: &RegimeOptions, log_blowup: u32) -> Result<(), SoundnessError> {
    match regime {
        RegimeOptions::ListDecodingProvable { johnson } => validate_johnson(johnson),
        RegimeOptions::ListDecodingConjectured { johnson, conjecture } => {
            validate_johnson(johnson)?;
            validate_conjecture(conjecture, log_blowup)
        },
        RegimeOptions::UniqueDecoding => Ok(()),
    }
}

fn validate_johnson(johnson: &JohnsonParameter) -> Result<(), SoundnessError> {
    match johnson {
        JohnsonParameter::Fixed(0) => {
            Err(SoundnessError::invalid("johnson_parameter", "must be greater than 0"))
        },
        JohnsonParameter::Range(range) => {
            let (first, last) = (*range.start(), *range.end());
            if first == 0 {
                Err(SoundnessError::invalid("johnson_range", "must start at 1 or above"))
            } else if first > last {
                Err(SoundnessError::invalid(
                    "johnson_range",
                    format!("range [{first}, {last}] is empty"),
                ))
            } else if last - first >= ProtocolParameters::MAX_JOHNSON_CANDIDATES {
                Err(SoundnessError::invalid(
                    "johnson_range",
                    format!(
                        "cannot contain more than {} candidates",
                        ProtocolParameters::MAX_JOHNSON_CANDIDATES
                    ),
                ))
            } else {
                Ok(())
            }
        },
        JohnsonParameter::Fixed(_) | JohnsonParameter::Auto => Ok(()),
    }
}

fn validate_conjecture(
    conjecture: &ConjectureParams,
    log_blowup: u32,
) -> Result<(), SoundnessError> {
    let rate = exp2(-(log_blowup as f64));
    let epsilon = conjecture.epsilon();
    if !(epsilon > 0.0 && epsilon < 1.0 - rate) {
        return Err(SoundnessError::invalid(
            "epsilon",
            format!("must be in (0, {}) but was {epsilon}", 1.0 - rate),
        ));
    }
    for (field, value) in
        [("c1", conjecture.c1()), ("c2", conjecture.c2()), ("c_rho", conjecture.c_rho())]
    {
        if !(value.is_finite() && value > 0.0) {
            return Err(SoundnessError::invalid(
                field,
                format!("must be a finite positive number but was {value}"),
            ));
        }
    }
    Ok(())
}

// TESTS
// ================================================================================================
