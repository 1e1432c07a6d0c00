//! Sine-wave oscillator driven through the RK4 integrator.

use std::f32::consts::TAU;
use std::io::Write;

use rk_sim::{OdeSystem, Rk4, SimError, SimResult};
use tracing::{debug, info};

use crate::config::OscillatorRun;
use crate::error::CliResult;

/// Sub-steps per period used for the nominal step.
const STEPS_PER_PERIOD: f32 = 6.0;

/// x' = v, v' = -w^2 x with w = 2*pi / period.
#[derive(Clone, Copy, Debug)]
pub struct SineWave {
    omega_sq: f32,
}

impl SineWave {
    pub fn new(period: f32) -> Self {
        let omega = TAU / period;
        Self {
            omega_sq: omega * omega,
        }
    }
}

impl OdeSystem<f32> for SineWave {
    type Error = SimError;

    fn derivatives(&mut self, _t: f32, x: &[f32], x_dot: &mut [f32]) -> Result<(), SimError> {
        x_dot[0] = x[1];
        x_dot[1] = -self.omega_sq * x[0];
        Ok(())
    }
}

/// A [`SineWave`] paired with an integrator whose step tracks its period.
#[derive(Debug)]
pub struct Sine {
    period: f32,
    wave: SineWave,
    rk: Rk4<f32>,
}

impl Sine {
    pub fn new(period: f32) -> SimResult<Self> {
        // step gets set in set_period()
        let mut sine = Self {
            period,
            wave: SineWave::new(period),
            rk: Rk4::new(2, 0.0)?,
        };
        sine.set_period(period)?;
        Ok(sine)
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    /// Change the period and retune the nominal step to match.
    pub fn set_period(&mut self, period: f32) -> SimResult<()> {
        self.rk.set_step(period / STEPS_PER_PERIOD)?;
        self.period = period;
        self.wave = SineWave::new(period);
        Ok(())
    }

    pub fn advance(&mut self, x: &mut [f32; 2], from: f32, to: f32) -> SimResult<()> {
        self.rk.integrate(&mut self.wave, x, from, to)
    }
}

/// Final values of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub t: f32,
    pub x: [f32; 2],
    pub samples: usize,
}

/// Integrate `run` sample by sample, writing `t x v cos(2*pi*t)` lines to `out`.
pub fn run<W: Write>(cfg: &OscillatorRun, out: &mut W) -> CliResult<RunSummary> {
    cfg.validate()?;

    let mut sine = Sine::new(cfg.period)?;
    let mut x = [cfg.x0, cfg.v0];
    let mut t = 0.0_f32;
    let mut samples = 0;

    info!(
        period = cfg.period,
        duration = cfg.duration,
        sample_dt = cfg.sample_dt,
        "starting oscillator run"
    );

    while t < cfg.duration {
        let from = t;
        t += cfg.sample_dt;
        sine.advance(&mut x, from, t)?;
        writeln!(out, "{} {} {} {}", t, x[0], x[1], (TAU * t).cos())?;
        samples += 1;

        if let Some(factor) = cfg.retune {
            let next = if sine.period() > cfg.max_period {
                cfg.reset_period
            } else {
                sine.period() * factor
            };
            sine.set_period(next)?;
        }
    }

    debug!(samples, t, "oscillator run finished");
    Ok(RunSummary { t, x, samples })
}
