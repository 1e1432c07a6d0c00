//! Integration test: interval bookkeeping.
//!
//! The last stage of every call is evaluated at exactly `to`, no stage is
//! evaluated past it, and trivial intervals or systems leave the state alone.

use proptest::prelude::*;
use rk_core::{Tolerances, nearly_equal};
use rk_sim::Rk4;

/// Integrate x' = 1 and return (final x, stage times seen).
fn run_clock(from: f64, to: f64, step: f64) -> (f64, Vec<f64>) {
    let mut seen = Vec::new();
    let mut rk = Rk4::new(1, step).unwrap();
    let mut x = [0.0];
    rk.integrate(
        &mut |t: f64, _x: &[f64], x_dot: &mut [f64]| {
            seen.push(t);
            x_dot[0] = 1.0;
        },
        &mut x,
        from,
        to,
    )
    .unwrap();
    (x[0], seen)
}

#[test]
fn last_stage_lands_on_end_time() {
    let (elapsed, seen) = run_clock(0.1, 0.75, 0.2);
    assert_eq!(seen.last().copied(), Some(0.75));
    assert!(nearly_equal(elapsed, 0.65, Tolerances { abs: 1e-12, rel: 0.0 }));
    // 0.2, 0.2, 0.2, 0.05
    assert_eq!(seen.len(), 16);
}

#[test]
fn exact_multiple_takes_no_extra_substep() {
    let (_, seen) = run_clock(0.0, 1.0, 0.5);
    assert_eq!(seen, vec![0.0, 0.25, 0.25, 0.5, 0.5, 0.75, 0.75, 1.0]);
}

#[test]
fn inexact_step_can_leave_ulp_sized_final_substep() {
    // 0.1 summed ten times is 0.9999999999999999, so an 11th sub-step of
    // ~1.1e-16 finishes the interval.
    let (elapsed, seen) = run_clock(0.0, 1.0, 0.1);
    assert_eq!(seen.len(), 44);
    assert_eq!(seen.last().copied(), Some(1.0));
    assert!(nearly_equal(elapsed, 1.0, Tolerances { abs: 1e-12, rel: 0.0 }));
}

#[test]
fn step_longer_than_interval_is_shortened() {
    let (elapsed, seen) = run_clock(2.0, 2.5, 10.0);
    assert_eq!(seen, vec![2.0, 2.25, 2.25, 2.5]);
    assert!(nearly_equal(elapsed, 0.5, Tolerances { abs: 1e-15, rel: 0.0 }));
}

#[test]
fn degenerate_interval_leaves_state_untouched() {
    let mut calls = 0usize;
    let mut rk = Rk4::new(3, 0.1_f64).unwrap();
    let mut x = [1.5, -2.0, 1e-9];
    rk.integrate(
        &mut |_t: f64, _x: &[f64], x_dot: &mut [f64]| {
            calls += 1;
            x_dot.fill(1e6);
        },
        &mut x,
        4.2,
        4.2,
    )
    .unwrap();
    assert_eq!(x, [1.5, -2.0, 1e-9]);
    assert_eq!(calls, 0);
}

proptest! {
    #[test]
    fn endpoint_is_exact_for_any_interval(
        from in -100.0_f64..100.0,
        span in 1e-3_f64..50.0,
        step in 1e-2_f64..10.0,
        reverse in any::<bool>(),
    ) {
        let (to, step) = if reverse { (from - span, -step) } else { (from + span, step) };
        let (elapsed, seen) = run_clock(from, to, step);

        prop_assert_eq!(seen.last().copied(), Some(to));
        if reverse {
            prop_assert!(seen.iter().all(|&t| t >= to));
        } else {
            prop_assert!(seen.iter().all(|&t| t <= to));
        }
        let tol = Tolerances { abs: 1e-9, rel: 1e-9 };
        prop_assert!(nearly_equal(elapsed, to - from, tol));
    }

    #[test]
    fn zero_derivative_is_idempotent(
        x0 in prop::collection::vec(-1e6_f64..1e6, 1..8),
        from in -10.0_f64..10.0,
        span in 0.0_f64..20.0,
        step in 1e-2_f64..5.0,
    ) {
        let mut rk = Rk4::new(x0.len(), step).unwrap();
        let mut x = x0.clone();
        rk.integrate(
            &mut |_t: f64, _x: &[f64], x_dot: &mut [f64]| x_dot.fill(0.0),
            &mut x,
            from,
            from + span,
        )
        .unwrap();
        prop_assert_eq!(x, x0);
    }
}
