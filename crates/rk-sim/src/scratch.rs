//! Single-allocation scratch arena for the RK4 stages.

use rk_core::Real;

use crate::error::{SimError, SimResult};

/// Number of length-n vectors the arena holds.
pub const SCRATCH_VECTORS: usize = 7;

/// One contiguous buffer of `7n` values, carved into named stage views.
#[derive(Clone, Debug)]
pub struct Scratch<F> {
    n: usize,
    buf: Vec<F>,
}

/// Disjoint mutable views into a [`Scratch`] arena.
///
/// `k1..k4` hold step-scaled stage derivatives, `x2..x4` the intermediate
/// states the later stages are evaluated at.
pub struct Stages<'a, F> {
    pub k1: &'a mut [F],
    pub k2: &'a mut [F],
    pub k3: &'a mut [F],
    pub k4: &'a mut [F],
    pub x2: &'a mut [F],
    pub x3: &'a mut [F],
    pub x4: &'a mut [F],
}

impl<F: Real> Scratch<F> {
    /// Allocate the arena for `n` degrees of freedom.
    ///
    /// Memory is requested with `try_reserve_exact`, so exhaustion surfaces as
    /// [`SimError::AllocFailed`] rather than an abort.
    pub fn new(n: usize) -> SimResult<Self> {
        if n == 0 {
            return Err(SimError::InvalidArg {
                what: "degrees of freedom must be at least 1",
            });
        }
        let len = n.checked_mul(SCRATCH_VECTORS).ok_or(SimError::AllocFailed {
            bytes: usize::MAX,
        })?;
        let bytes = len.saturating_mul(std::mem::size_of::<F>());

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| SimError::AllocFailed { bytes })?;
        buf.resize(len, F::zero());

        Ok(Self { n, buf })
    }

    /// Degrees of freedom each view covers.
    pub fn dof(&self) -> usize {
        self.n
    }

    pub fn stages(&mut self) -> Stages<'_, F> {
        let n = self.n;
        let (k1, rest) = self.buf.split_at_mut(n);
        let (k2, rest) = rest.split_at_mut(n);
        let (k3, rest) = rest.split_at_mut(n);
        let (k4, rest) = rest.split_at_mut(n);
        let (x2, rest) = rest.split_at_mut(n);
        let (x3, x4) = rest.split_at_mut(n);
        Stages {
            k1,
            k2,
            k3,
            k4,
            x2,
            x3,
            x4,
        }
    }
}
