//! Run configuration for the sine demo, loaded from YAML and/or flags.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CliError, CliResult};

/// Parameters of one oscillator run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct OscillatorRun {
    /// Initial oscillation period (seconds)
    pub period: f32,
    /// Simulated time to cover (seconds)
    pub duration: f32,
    /// Interval between printed samples (seconds)
    pub sample_dt: f32,
    /// Period growth factor applied after every sample, if any
    pub retune: Option<f32>,
    /// Period above which the schedule resets
    pub max_period: f32,
    /// Period the schedule resets to
    pub reset_period: f32,
    /// Initial position
    pub x0: f32,
    /// Initial velocity
    pub v0: f32,
}

impl Default for OscillatorRun {
    fn default() -> Self {
        Self {
            period: 1.0,
            duration: 10.0,
            sample_dt: 0.01,
            retune: Some(1.003),
            max_period: 5.0,
            reset_period: 1.0,
            x0: 1.0,
            v0: 0.0,
        }
    }
}

impl OscillatorRun {
    pub fn load_yaml(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let run: OscillatorRun = serde_yaml::from_str(&content)?;
        Ok(run)
    }

    pub fn validate(&self) -> CliResult<()> {
        fn positive(v: f32, what: &'static str) -> CliResult<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(CliError::InvalidConfig { what })
            }
        }

        positive(self.period, "period must be positive")?;
        positive(self.sample_dt, "sample_dt must be positive")?;
        positive(self.max_period, "max_period must be positive")?;
        positive(self.reset_period, "reset_period must be positive")?;
        if let Some(factor) = self.retune {
            positive(factor, "retune factor must be positive")?;
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(CliError::InvalidConfig {
                what: "duration must be non-negative",
            });
        }
        if !self.x0.is_finite() || !self.v0.is_finite() {
            return Err(CliError::InvalidConfig {
                what: "initial state must be finite",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_demo() {
        let run = OscillatorRun::default();
        assert_eq!(run.period, 1.0);
        assert_eq!(run.sample_dt, 0.01);
        assert_eq!(run.retune, Some(1.003));
        assert!(run.validate().is_ok());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let run: OscillatorRun = serde_yaml::from_str("period: 2.0\nretune: null\n").unwrap();
        assert_eq!(run.period, 2.0);
        assert_eq!(run.retune, None);
        assert_eq!(run.duration, 10.0);
    }

    #[test]
    fn rejects_non_positive_sample_interval() {
        let run = OscillatorRun {
            sample_dt: 0.0,
            ..OscillatorRun::default()
        };
        assert!(matches!(
            run.validate(),
            Err(CliError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = OscillatorRun::load_yaml(Path::new("/nonexistent/rk-run.yaml")).unwrap_err();
        assert!(format!("{err}").contains("rk-run.yaml"));
    }
}
