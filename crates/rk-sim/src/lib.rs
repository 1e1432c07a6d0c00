//! Fixed-step fourth-order Runge-Kutta integration for state-space ODEs.
//!
//! Provides:
//! - `OdeSystem`: the derivative capability `x' = f(t, x)` supplied by the caller
//! - `Rk4`: the integrator, advancing a state vector across an interval
//! - `Scratch`: the single-allocation stage arena backing `Rk4`

pub mod error;
pub mod integrator;
pub mod scratch;
pub mod system;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::Rk4;
pub use scratch::{SCRATCH_VECTORS, Scratch, Stages};
pub use system::OdeSystem;
pub use rk_core::Real;
