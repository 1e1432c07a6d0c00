//! The derivative capability an integrator needs from its caller.

use rk_core::Real;

use crate::error::SimError;

/// A first-order system `x' = f(t, x)` in state-space form.
///
/// Implementations write the instantaneous rate of every degree of freedom
/// into `x_dot` and leave `x` untouched. The integrator calls
/// [`derivatives`](OdeSystem::derivatives) four times per sub-step, always
/// with state vectors it owns.
///
/// `Error` is the caller's own error type. Whatever `derivatives` returns
/// is handed back from `Rk4::integrate` as-is; the integrator only needs to
/// be able to inject its own precondition failures via `From<SimError>`.
pub trait OdeSystem<F: Real> {
    type Error: From<SimError>;

    /// Compute `x_dot = f(t, x)`.
    ///
    /// Takes `&mut self` so models can cache between evaluations.
    fn derivatives(&mut self, t: F, x: &[F], x_dot: &mut [F]) -> Result<(), Self::Error>;
}

/// Plain closures are infallible systems.
impl<F, C> OdeSystem<F> for C
where
    F: Real,
    C: FnMut(F, &[F], &mut [F]),
{
    type Error = SimError;

    fn derivatives(&mut self, t: F, x: &[F], x_dot: &mut [F]) -> Result<(), SimError> {
        self(t, x, x_dot);
        Ok(())
    }
}
