//! Error types for the scoring core

/// Errors surfaced to callers of the scoring core.
///
/// Numerical trouble (flat likelihood, exponent overflow) is absorbed inside
/// the estimator and never shows up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AlgoError {
    #[error("invalid difficulty: {0} (expected 1-10)")]
    InvalidDifficulty(i64),
}
