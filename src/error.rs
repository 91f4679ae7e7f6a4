//! Errors of the configuration layer
//!
//! Generators themselves never fail: numeric edge cases such as overflow
//! propagate as `inf`/`NaN`. Only turning user input into a generator can go
//! wrong.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Unknown generator kind: {0} (expected linear, exp, exp2, cossin or sin)")]
    UnknownKind(String),

    #[error("Parameter {name} must be finite in the sample type, got {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    #[error("Resync interval must be positive")]
    ZeroInterval,

    #[error("Sample count must be positive")]
    InvalidSampleCount,
}
