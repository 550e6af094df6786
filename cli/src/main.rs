// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use std::process;

use fri_soundness::{compare_regimes, estimate};
use fri_soundness_cli::{render_comparison, render_report, EstimatorOptions, RegimeType};
use structopt::StructOpt;
use tracing::{error, info};
#[cfg(feature = "tracing-forest")]
use tracing_forest::ForestLayer;
#[cfg(not(feature = "tracing-forest"))]
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

// ESTIMATOR RUNNER
// ================================================================================================

fn main() {
    setup_tracing();

    // read command-line args
    let options = EstimatorOptions::from_args();

    let params = match options.to_protocol_parameters() {
        Ok(params) => params,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        },
    };
    info!(
        log_blowup = params.log_blowup(),
        log_trace_length = params.log_trace_length(),
        num_queries = params.num_queries(),
        extension_degree = params.extension_degree(),
        field_modulus = params.field_modulus(),
        num_columns = params.num_columns(),
        "estimating soundness"
    );

    match &options.regime {
        RegimeType::Compare { johnson, conjecture } => {
            let results = compare_regimes(
                &params,
                &johnson.to_johnson_parameter(),
                Some(conjecture.to_conjecture_params()),
            );
            print!("{}", render_comparison(&results));
        },
        _ => match estimate(&params) {
            Ok(report) => print!("{}", render_report(&report)),
            Err(err) => {
                error!("{err}");
                process::exit(1);
            },
        },
    }
}

// HELPER FUNCTIONS
// ================================================================================================

/// Installs a tracing subscriber filtered by `RUST_LOG` (defaults to `info`); events are written
/// to stderr so that the report on stdout stays clean.
fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = Registry::default().with(env_filter);

    #[cfg(feature = "tracing-forest")]
    let _ = registry.with(ForestLayer::default()).try_init();

    #[cfg(not(feature = "tracing-forest"))]
    let _ = registry
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE),
        )
        .try_init();
}
