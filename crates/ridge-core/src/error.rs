//! Error types for the ridge-core crate.
//!
//! Statistics over a numeric sequence have divisors that depend on the
//! sample count; rather than returning NaN or a silently wrong number,
//! those operations report a typed error.

use thiserror::Error;

/// Error type for signal analysis operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The input sequence was empty where at least one sample is required.
    #[error("{operation} requires a non-empty input")]
    EmptyInput {
        /// Name of the operation that rejected the input.
        operation: &'static str,
    },

    /// The input sequence was too short for the requested estimator.
    #[error("{operation} requires at least {needed} samples, got {got}")]
    InsufficientData {
        /// Name of the operation that rejected the input.
        operation: &'static str,
        /// Minimum number of samples the operation needs.
        needed: usize,
        /// Number of samples actually provided.
        got: usize,
    },
}

/// Result alias for signal analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
