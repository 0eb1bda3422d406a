//! Error type shared by all modules of this crate.
use thiserror::Error;

/// Errors that can occur while building sequences or integrating.
///
/// `PrecisionUnmet` is the only error that an integration with a valid configuration can
/// produce; all other variants report a configuration problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A dimension, digit depth, or integration range is unusable.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// The base (modulus) of a matrix or sequence is smaller than two, or a matrix entry is not
    /// a digit of the base.
    #[error("invalid base {base}: the base must be at least 2 and bound all digits")]
    InvalidBase {
        /// The offending base
        base: u64,
    },

    /// A parameter of an integration strategy is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The sequence (or the sample budget) was exhausted before the stopping rule was met.
    #[error("integration precision can't be met after {calls} calls")]
    PrecisionUnmet {
        /// Number of integrand calls performed before giving up
        calls: usize,
    },

    /// Modular digit arithmetic would not fit into 64-bit integers.
    #[error("numeric overflow: base {base} is too large for 64-bit digit arithmetic")]
    NumericOverflow {
        /// The offending base
        base: u64,
    },
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
