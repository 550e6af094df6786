// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use tracing::{debug, instrument};
use utils::collections::{vec, Vec};

use crate::{
    ConjectureParams, DerivedQuantities, JohnsonParameter, ProtocolParameters, Regime,
    RegimeOptions, SoundnessError, SoundnessReport,
};

mod constraints;
pub use constraints::{check_proximity_parameter, proximity_bound};

mod johnson;
pub use johnson::{
    default_johnson_range, is_within_list_decoding_radius, optimize_johnson_parameter,
    JohnsonBound, MAX_PROXIMITY_PARAMETER,
};

mod terms;

// SOUNDNESS ESTIMATION
// ================================================================================================

/// Computes the soundness report for the specified protocol parameters in the regime selected
/// by the parameters.
///
/// In the list-decoding regimes the Johnson parameter is either fixed or chosen by a search
/// which maximizes the bits of security of the provable regime; the conjectured regime reuses
/// that parameter for its folding error.
///
/// # Errors
/// Returns an error if the proximity parameter of the regime is infeasible for these parameters,
/// if no Johnson parameter in the searched range is feasible, or if an error term cannot be
/// computed.
#[instrument(skip_all, fields(regime = %params.regime().regime()))]
pub fn estimate(params: &ProtocolParameters) -> Result<SoundnessReport, SoundnessError> {
    let derived = DerivedQuantities::new(params);
    let report = match params.regime() {
        RegimeOptions::ListDecodingProvable { johnson } => {
            let (_, report) = select_johnson_bound(params, &derived, johnson)?;
            report
        },
        RegimeOptions::ListDecodingConjectured { johnson, conjecture } => {
            let (bound, _) = select_johnson_bound(params, &derived, johnson)?;
            terms::conjectured_report(params, &derived, bound.m(), conjecture)?
        },
        RegimeOptions::UniqueDecoding => terms::unique_decoding_report(params, &derived)?,
    };

    debug!(
        bits = report.bits(),
        dominant = %report.dominant_term().kind(),
        "estimated soundness"
    );
    Ok(report)
}

/// Computes the soundness reports of the specified parameters in each of the regimes.
///
/// The regime options of `params` are replaced by the provable regime with the specified Johnson
/// parameter options, by the conjectured regime (only when `conjecture` is provided) and by the
/// unique-decoding regime. A failure in one regime does not prevent the others from being
/// computed.
pub fn compare_regimes(
    params: &ProtocolParameters,
    johnson: &JohnsonParameter,
    conjecture: Option<ConjectureParams>,
) -> Vec<(Regime, Result<SoundnessReport, SoundnessError>)> {
    let mut regimes = vec![RegimeOptions::ListDecodingProvable { johnson: johnson.clone() }];
    if let Some(conjecture) = conjecture {
        regimes.push(RegimeOptions::ListDecodingConjectured {
            johnson: johnson.clone(),
            conjecture,
        });
    }
    regimes.push(RegimeOptions::UniqueDecoding);

    regimes
        .into_iter()
        .map(|options| {
            let regime = options.regime();
            let result = params.clone().with_regime(options).and_then(|params| estimate(&params));
            (regime, result)
        })
        .collect()
}

// HELPER FUNCTIONS
// ================================================================================================

/// Resolves the Johnson parameter options into a Johnson bound together with the provable-regime
/// report computed with it.
fn select_johnson_bound(
    params: &ProtocolParameters,
    derived: &DerivedQuantities,
    johnson: &JohnsonParameter,
) -> Result<(JohnsonBound, SoundnessReport), SoundnessError> {
    match johnson {
        JohnsonParameter::Fixed(m) => {
            let bound = JohnsonBound::new(*m, derived)?;
            let report = terms::provable_report(params, derived, &bound)?;
            Ok((bound, report))
        },
        JohnsonParameter::Range(range) => {
            optimize_johnson_parameter(params, derived, range.clone())
        },
        JohnsonParameter::Auto => {
            optimize_johnson_parameter(params, derived, default_johnson_range(params))
        },
    }
}
