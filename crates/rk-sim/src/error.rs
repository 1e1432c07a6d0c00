//! Error types for integration operations.

use thiserror::Error;

/// Errors raised by the integrator itself.
///
/// Failures of a caller's derivative function never pass through this type;
/// they reach the caller unchanged as `OdeSystem::Error`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("State dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Step {step} cannot reach {to} from {from}")]
    StepDirection { from: f64, to: f64, step: f64 },

    #[error("Sub-step {dt} makes no progress at t={t}")]
    StepUnderflow { t: f64, dt: f64 },

    #[error("Scratch allocation of {bytes} bytes failed")]
    AllocFailed { bytes: usize },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<rk_core::CoreError> for SimError {
    fn from(e: rk_core::CoreError) -> Self {
        match e {
            rk_core::CoreError::NonFinite { what, value } => SimError::NonFinite { what, value },
        }
    }
}
