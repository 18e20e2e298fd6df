use thiserror::Error;

use crate::engine::conjugation::TargetForm;

/// Data-integrity failures raised by the conjugation and sampling engines.
///
/// None of these are retried: they propagate to `main` and end the run.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DrillError {
    #[error("unknown syllabic unit `{0}`")]
    UnknownSymbol(String),

    #[error("unsupported form `{0}`")]
    UnsupportedForm(String),

    #[error("found more than one record for {base} {form}形 in practice history")]
    DuplicateRecord { base: String, form: TargetForm },

    #[error("no record for {base} {form}形 in practice history")]
    MissingRecord { base: String, form: TargetForm },

    #[error("cannot sample from an empty or zero-weight distribution")]
    EmptyDistribution,

    #[error("weight {weight} at index {index} is not a finite non-negative number")]
    InvalidWeight { index: usize, weight: f64 },
}
