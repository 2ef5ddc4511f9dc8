use thiserror::Error;

/// Convenience alias used throughout the workspace
pub type Result<T> = std::result::Result<T, MapperError>;

/// Everything that can go wrong while training or querying a mapper
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapperError {
    /// Operand shapes violate the precondition of an operation
    #[error("dimension mismatch in {op}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the operation that was attempted
        op: &'static str,
        /// The dimension the operation required
        expected: usize,
        /// The dimension it was handed
        got: usize,
    },

    /// A prediction was requested before any sample has been observed
    #[error("model not established, call update first")]
    ModelNotEstablished,

    /// A denominator collapsed to zero, went subnormal or stopped being finite
    #[error("numerical instability: {what} = {value}")]
    NumericalInstability {
        /// The quantity that could not be divided by
        what: &'static str,
        /// Its offending value
        value: f64,
    },

    /// Inverting the model is only defined for a single tap
    #[error("y -> x inversion is not defined for {tap_count} taps")]
    UnsupportedInversion {
        /// Tap count of the model that was asked to invert
        tap_count: usize,
    },

    /// A construction parameter is out of its admissible range
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParam {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Admissible range
        reason: &'static str,
    },

    /// The batch regression could not be solved
    #[error("regression failed: {0}")]
    Regression(String),
}

impl MapperError {
    /// Build a `DimensionMismatch` if `expected != got`
    #[inline(always)]
    pub fn check_dim(op: &'static str, expected: usize, got: usize) -> Result<()> {
        if expected != got {
            return Err(MapperError::DimensionMismatch { op, expected, got });
        }
        Ok(())
    }

    /// Reciprocal of `value`, refusing zero, subnormal and non-finite inputs
    pub fn checked_recip(what: &'static str, value: f64) -> Result<f64> {
        if !value.is_normal() {
            return Err(MapperError::NumericalInstability { what, value });
        }
        Ok(1.0 / value)
    }
}
