//! Fixed-step RK4 integrator.
//!
//! [`Rk4`] advances a caller-owned state vector from one instant to another
//! in sub-steps of a nominal size, shortening the last sub-step so the
//! state lands exactly on the requested end time.

use rk_core::{Real, ensure_finite};
use tracing::{debug, trace};

use crate::error::{SimError, SimResult};
use crate::scratch::{Scratch, Stages};
use crate::system::OdeSystem;

/// Classical RK4 (Runge-Kutta 4th order) integrator with private scratch.
///
/// The scratch arena is sized once for `n` degrees of freedom and reused by
/// every [`integrate`](Rk4::integrate) call; nothing carries over between
/// calls. `integrate` takes `&mut self`, so one instance serves one caller
/// at a time. Give each thread its own instance to run systems in parallel.
#[derive(Clone, Debug)]
pub struct Rk4<F> {
    step: F,
    scratch: Scratch<F>,
}

impl<F: Real> Rk4<F> {
    /// Create an integrator for `n` degrees of freedom with nominal `step`.
    ///
    /// Fails with [`SimError::InvalidArg`] for `n == 0`,
    /// [`SimError::NonFinite`] for a NaN or infinite step, and
    /// [`SimError::AllocFailed`] if the scratch arena cannot be allocated.
    /// The step may be zero here (e.g. when a model tunes it right after
    /// construction) but must be non-zero by the time `integrate` runs.
    pub fn new(n: usize, step: F) -> SimResult<Self> {
        let step = ensure_finite(step, "step")?;
        let scratch = Scratch::new(n)?;
        debug!(dof = n, step = step.as_f64(), "rk4 integrator allocated");
        Ok(Self { step, scratch })
    }

    /// Degrees of freedom.
    pub fn dof(&self) -> usize {
        self.scratch.dof()
    }

    /// Nominal sub-step size.
    pub fn step(&self) -> F {
        self.step
    }

    /// Retune the nominal sub-step; read at the start of the next `integrate`.
    pub fn set_step(&mut self, step: F) -> SimResult<()> {
        self.step = ensure_finite(step, "step")?;
        Ok(())
    }

    /// Advance `x` in place from `from` to `to`.
    ///
    /// Sub-steps of the nominal size are taken until the next one would reach
    /// or pass `to`; that one is shortened to `to - t` and its endpoint stage
    /// is evaluated at exactly `to`. An empty interval returns immediately
    /// without calling the system.
    ///
    /// Time is accumulated in `F`, so a step that does not divide the interval
    /// exactly in binary (0.1 over [0, 1]) can leave a final sub-step as short
    /// as one ulp. It costs four more evaluations and does not move the state
    /// measurably.
    ///
    /// The nominal step's sign must match the interval direction (negative
    /// for `to < from`). Errors from `system` are returned unchanged; sub-steps
    /// completed before the failure stay applied to `x`.
    pub fn integrate<S>(
        &mut self,
        system: &mut S,
        x: &mut [F],
        from: F,
        to: F,
    ) -> Result<(), S::Error>
    where
        S: OdeSystem<F>,
    {
        let n = self.dof();
        if x.len() != n {
            return Err(SimError::DimensionMismatch {
                expected: n,
                actual: x.len(),
            }
            .into());
        }
        ensure_finite(from, "from").map_err(SimError::from)?;
        ensure_finite(to, "to").map_err(SimError::from)?;

        if from == to {
            trace!(t = from.as_f64(), "empty interval, state unchanged");
            return Ok(());
        }

        let step = self.step;
        let forward = to > from;
        if step == F::zero() || (step > F::zero()) != forward {
            return Err(SimError::StepDirection {
                from: from.as_f64(),
                to: to.as_f64(),
                step: step.as_f64(),
            }
            .into());
        }

        let two = F::one() + F::one();
        let six = two + two + two;
        let Stages {
            k1,
            k2,
            k3,
            k4,
            x2,
            x3,
            x4,
        } = self.scratch.stages();

        let mut t = from;
        let mut substeps = 0usize;
        let mut running = true;
        while running {
            let mut dt = step;
            let t_end = if (forward && t + dt >= to) || (!forward && t + dt <= to) {
                // shorter time step, so we do not over shoot
                dt = to - t;
                running = false;
                to
            } else {
                let t_end = t + dt;
                if t_end == t {
                    return Err(SimError::StepUnderflow {
                        t: t.as_f64(),
                        dt: dt.as_f64(),
                    }
                    .into());
                }
                t_end
            };
            let t_mid = t + dt / two;

            system.derivatives(t, x, k1)?;
            for ((k, &xi), xs) in k1.iter_mut().zip(x.iter()).zip(x2.iter_mut()) {
                *k *= dt;
                *xs = xi + *k / two;
            }

            system.derivatives(t_mid, x2, k2)?;
            for ((k, &xi), xs) in k2.iter_mut().zip(x.iter()).zip(x3.iter_mut()) {
                *k *= dt;
                *xs = xi + *k / two;
            }

            system.derivatives(t_mid, x3, k3)?;
            for ((k, &xi), xs) in k3.iter_mut().zip(x.iter()).zip(x4.iter_mut()) {
                *k *= dt;
                *xs = xi + *k;
            }

            system.derivatives(t_end, x4, k4)?;
            for (i, xi) in x.iter_mut().enumerate() {
                k4[i] *= dt;
                *xi += (k1[i] + two * k2[i] + two * k3[i] + k4[i]) / six;
            }

            trace!(t = t.as_f64(), dt = dt.as_f64(), "rk4 sub-step");
            t = t_end;
            substeps += 1;
        }

        debug!(
            from = from.as_f64(),
            to = to.as_f64(),
            substeps,
            "rk4 interval integrated"
        );
        Ok(())
    }
}
