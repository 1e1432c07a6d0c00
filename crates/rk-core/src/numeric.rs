use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use crate::{CoreError, CoreResult};

/// Floating point element type for state, time and step.
///
/// Implemented for `f32` and `f64`.
pub trait Real:
    num_traits::Float
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + 'static
{
    /// Widening used for diagnostics and error payloads.
    fn as_f64(self) -> f64;
}

impl Real for f32 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl Real for f64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

/// Absolute/relative tolerance pair for comparing integrated states.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `true` when `a` and `b` agree within `tol.abs`, or within `tol.rel`
/// of the larger magnitude.
pub fn nearly_equal<F: Real>(a: F, b: F, tol: Tolerances) -> bool {
    let (a, b) = (a.as_f64(), b.as_f64());
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite<F: Real>(v: F, what: &'static str) -> CoreResult<F> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite {
            what,
            value: v.as_f64(),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1e6_f64..1e6, b in -1e6_f64..1e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn finite_values_pass_through(v in -1e30_f64..1e30) {
            prop_assert_eq!(ensure_finite(v, "v"), Ok(v));
        }
    }
}
