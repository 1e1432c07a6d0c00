//! rk-core: numeric foundation for the rk4 workspace.
//!
//! Contains:
//! - numeric (Real float trait + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
