//! Error types for the render-context pipeline.
//!
//! Every failure aborts the request; there is no partial rendering. The three
//! families mirror where a request can go wrong: the parameters are
//! inconsistent ([`ConfigurationError`]), a value could not be read
//! ([`ParseError`]), or the diagram library produced something unusable
//! ([`CollaboratorError`]).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error(
        "num_one_handle ({expected}) does not match length of num_strands_per_handle ({actual})"
    )]
    HandleCountMismatch { expected: i64, actual: usize },

    #[error("sum of strands per handle ({sum}) exceeds total number of strands ({n_strands})")]
    HandleStrandsExceedTotal { sum: i64, n_strands: i64 },

    #[error("all strands per handle must be positive, got {0}")]
    NonPositiveHandle(i64),

    #[error("cannot close the remaining {0} strands into a plat")]
    OddRemainder(i64),

    #[error("n_strands must be at least 1")]
    NoStrands,

    #[error("n_copy must be at least 1")]
    NoCopies,

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("parameter '{key}' expects an integer, got '{value}'")]
    NotAnInteger { key: &'static str, value: String },

    #[error("malformed preset table: {0}")]
    Presets(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    #[error("diagram construction failed: {0}")]
    Construction(String),

    #[error("unsupported orientation '{0}'")]
    UnsupportedOrientation(String),

    #[error("{dga}: generator '{symbol}' has no grading")]
    MissingGrading { dga: String, symbol: String },

    #[error("{dga}: generator '{symbol}' has no differential")]
    MissingDifferential { dga: String, symbol: String },

    #[error("{dga}: augmentation {index} has no value for '{symbol}'")]
    MissingAugmentationValue {
        dga: String,
        index: usize,
        symbol: String,
    },
}

/// Top-level error for a single render request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("diagram library error: {0}")]
    Collaborator(#[from] CollaboratorError),
}
