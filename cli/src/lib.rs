// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use core::{fmt::Write, str::FromStr};

use fri_soundness::{
    ConjectureParams, JohnsonParameter, ProtocolParameters, Regime, RegimeOptions, SoundnessError,
    SoundnessReport, MAX_PROXIMITY_PARAMETER,
};
use structopt::StructOpt;


// FIELD PRESETS
// ================================================================================================

/// Prime fields commonly used by FRI-based proof systems.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldPreset {
    /// p = 2^31 - 2^27 + 1
    BabyBear,
    /// p = 2^31 - 2^24 + 1
    KoalaBear,
    /// p = 2^64 - 2^32 + 1
    Goldilocks,
    /// p = 2^31 - 1
    Mersenne31,
}

impl FieldPreset {
    /// Returns the modulus of this field.
    pub fn modulus(&self) -> u64 {
        match self {
            Self::BabyBear => (1 << 31) - (1 << 27) + 1,
            Self::KoalaBear => (1 << 31) - (1 << 24) + 1,
            Self::Goldilocks => 0xffff_ffff_0000_0001,
            Self::Mersenne31 => (1 << 31) - 1,
        }
    }
}

impl FromStr for FieldPreset {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "babybear" => Ok(Self::BabyBear),
            "koalabear" => Ok(Self::KoalaBear),
            "goldilocks" => Ok(Self::Goldilocks),
            "mersenne31" => Ok(Self::Mersenne31),
            val => Err(format!("'{val}' is not a valid field option")),
        }
    }
}

// ESTIMATOR OPTIONS
// ================================================================================================

#[derive(StructOpt, Debug)]
#[structopt(name = "fri-soundness", about = "Soundness estimator for FRI-based polynomial IOPs")]
pub struct EstimatorOptions {
    #[structopt(subcommand)]
    pub regime: RegimeType,

    /// Log2 of the blowup factor; the code rate is 2^-k
    #[structopt(short = "k", long = "log-blowup", default_value = "2")]
    log_blowup: u32,

    /// Log2 of the trace length
    #[structopt(short = "t", long = "log-trace-length", default_value = "18")]
    log_trace_length: u32,

    /// Number of FRI queries
    #[structopt(short = "q", long = "queries", default_value = "50")]
    num_queries: u32,

    /// Degree of the field extension from which challenges are drawn
    #[structopt(short = "e", long = "extension", default_value = "4")]
    extension_degree: u32,

    /// Modulus of the base field; takes precedence over --field
    #[structopt(short = "p", long = "modulus")]
    modulus: Option<u64>,

    /// Base field: babybear, koalabear, goldilocks or mersenne31
    #[structopt(long = "field", default_value = "babybear")]
    field: FieldPreset,

    /// Number of circuit columns
    #[structopt(short = "c", long = "columns", default_value = "274")]
    num_columns: u64,

    /// Grinding factor for the query seed
    #[structopt(short = "g", long = "grinding", default_value = "0")]
    grinding_factor: u32,
}

impl EstimatorOptions {
    /// Returns the modulus of the base field.
    pub fn field_modulus(&self) -> u64 {
        self.modulus.unwrap_or_else(|| self.field.modulus())
    }

    /// Assembles protocol parameters from these options.
    ///
    /// For the `compare` command the regime of the returned parameters is unique decoding; the
    /// regimes are replaced during the comparison.
    pub fn to_protocol_parameters(&self) -> Result<ProtocolParameters, SoundnessError> {
        let regime = match &self.regime {
            RegimeType::Provable { johnson } => {
                RegimeOptions::ListDecodingProvable { johnson: johnson.to_johnson_parameter() }
            },
            RegimeType::Conjectured { johnson, conjecture } => {
                RegimeOptions::ListDecodingConjectured {
                    johnson: johnson.to_johnson_parameter(),
                    conjecture: conjecture.to_conjecture_params(),
                }
            },
            RegimeType::Unique | RegimeType::Compare { .. } => RegimeOptions::UniqueDecoding,
        };

        ProtocolParameters::new(
            self.log_blowup,
            self.log_trace_length,
            self.num_queries,
            self.extension_degree,
            self.field_modulus(),
            self.num_columns,
            regime,
        )?
        .with_grinding_factor(self.grinding_factor)
    }
}

#[derive(StructOpt, Debug)]
pub enum RegimeType {
    /// Provable list-decoding regime (proximity up to the Johnson bound)
    Provable {
        #[structopt(flatten)]
        johnson: JohnsonOptions,
    },
    /// Conjectured list-decoding regime (proximity up to capacity)
    Conjectured {
        #[structopt(flatten)]
        johnson: JohnsonOptions,
        #[structopt(flatten)]
        conjecture: ConjectureOptions,
    },
    /// Unique-decoding regime
    Unique,
    /// Evaluate the same parameters in all three regimes
    Compare {
        #[structopt(flatten)]
        johnson: JohnsonOptions,
        #[structopt(flatten)]
        conjecture: ConjectureOptions,
    },
}

#[derive(StructOpt, Debug)]
pub struct JohnsonOptions {
    /// Fixed Johnson parameter m; when omitted, m is chosen to maximize the bits of security
    #[structopt(short = "m", long = "johnson")]
    johnson: Option<u32>,

    /// Smallest Johnson parameter to search
    #[structopt(long = "johnson-min")]
    johnson_min: Option<u32>,

    /// Largest Johnson parameter to search
    #[structopt(long = "johnson-max")]
    johnson_max: Option<u32>,
}

impl JohnsonOptions {
    /// Returns the Johnson parameter options; a fixed parameter takes precedence over a range.
    pub fn to_johnson_parameter(&self) -> JohnsonParameter {
        match (self.johnson, self.johnson_min, self.johnson_max) {
            (Some(m), ..) => JohnsonParameter::Fixed(m),
            (None, None, None) => JohnsonParameter::Auto,
            (None, first, last) => JohnsonParameter::Range(
                first.unwrap_or(1)..=last.unwrap_or(MAX_PROXIMITY_PARAMETER),
            ),
        }
    }
}

#[derive(StructOpt, Debug)]
pub struct ConjectureOptions {
    /// Proximity slack of the conjectured bound
    #[structopt(long = "epsilon", default_value = "0.05")]
    epsilon: f64,

    /// Exponent of 1 / (epsilon * rate) in the commit-phase error
    #[structopt(long = "c1", default_value = "1")]
    c1: f64,

    /// Exponent of the LDE domain size in the commit-phase error
    #[structopt(long = "c2", default_value = "1")]
    c2: f64,

    /// Exponent of the conjectured list size bound
    #[structopt(long = "c-rho", default_value = "1")]
    c_rho: f64,
}

impl ConjectureOptions {
    pub fn to_conjecture_params(&self) -> ConjectureParams {
        ConjectureParams::new(self.epsilon, self.c1, self.c2, self.c_rho)
    }
}

// RENDERING
// ================================================================================================

/// Renders the specified report as a table of error terms followed by the total.
pub fn render_report(report: &SoundnessReport) -> String {
    let mut output = String::new();
    let _ = write_report(&mut output, report);
    output
}

/// Renders the results of a regime comparison; failed regimes are listed with their errors.
pub fn render_comparison(results: &[(Regime, Result<SoundnessReport, SoundnessError>)]) -> String {
    let mut output = String::new();
    for (regime, result) in results {
        match result {
            Ok(report) => {
                let _ = write_report(&mut output, report);
            },
            Err(err) => {
                let _ = writeln!(output, "regime: {regime}\n  error: {err}");
            },
        }
        output.push('\n');
    }

    let _ = writeln!(output, "{:<30} {:>10}", "regime", "bits");
    for (regime, result) in results {
        let _ = match result {
            Ok(report) => writeln!(output, "{:<30} {:>10.3}", regime.to_string(), report.bits()),
            Err(_) => writeln!(output, "{:<30} {:>10}", regime.to_string(), "-"),
        };
    }
    output
}

fn write_report(output: &mut String, report: &SoundnessReport) -> core::fmt::Result {
    write!(output, "regime: {}", report.regime())?;
    if let Some(m) = report.johnson_parameter() {
        write!(output, " (m = {m})")?;
    }
    writeln!(output)?;
    writeln!(
        output,
        "proximity parameter: {:.6}, list size: {:.3}",
        report.proximity_parameter(),
        report.list_size().to_f64()
    )?;

    writeln!(output, "{:<14} {:>12} {:>10}", "term", "probability", "log2")?;
    let dominant = report.dominant_term().kind();
    for term in report.terms() {
        let marker = if term.kind() == dominant { " *" } else { "" };
        writeln!(
            output,
            "{:<14} {:>12.3e} {:>10.3}{marker}",
            term.kind().name(),
            term.probability(),
            term.log2()
        )?;
    }
    writeln!(output, "total: {} ({:.3} bits)", report.total(), report.bits())
}
