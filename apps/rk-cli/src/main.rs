use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod oscillator;

use config::OscillatorRun;
use error::CliResult;

#[derive(Parser)]
#[command(name = "rk-cli")]
#[command(
    about = "Sine-wave oscillator integrated with fixed-step RK4",
    long_about = "Prints `t x v cos(2*pi*t)` per sample interval to stdout for comparison \
                  against the analytic solution. Logs go to stderr (RUST_LOG)."
)]
struct Cli {
    /// Optional YAML run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Initial oscillation period in seconds
    #[arg(long)]
    period: Option<f32>,
    /// Simulated time to cover in seconds
    #[arg(long)]
    duration: Option<f32>,
    /// Interval between printed samples in seconds
    #[arg(long)]
    sample_dt: Option<f32>,
    /// Period growth factor applied after each sample
    #[arg(long, conflicts_with = "no_retune")]
    retune: Option<f32>,
    /// Keep the period fixed
    #[arg(long)]
    no_retune: bool,
    /// Period above which the retune schedule resets
    #[arg(long)]
    max_period: Option<f32>,
    /// Period the retune schedule resets to
    #[arg(long)]
    reset_period: Option<f32>,
    /// Initial position
    #[arg(long, allow_negative_numbers = true)]
    x0: Option<f32>,
    /// Initial velocity
    #[arg(long, allow_negative_numbers = true)]
    v0: Option<f32>,
}

impl Cli {
    fn resolve(&self) -> CliResult<OscillatorRun> {
        let mut run = match &self.config {
            Some(path) => OscillatorRun::load_yaml(path)?,
            None => OscillatorRun::default(),
        };

        if let Some(v) = self.period {
            run.period = v;
        }
        if let Some(v) = self.duration {
            run.duration = v;
        }
        if let Some(v) = self.sample_dt {
            run.sample_dt = v;
        }
        if self.no_retune {
            run.retune = None;
        } else if let Some(v) = self.retune {
            run.retune = Some(v);
        }
        if let Some(v) = self.max_period {
            run.max_period = v;
        }
        if let Some(v) = self.reset_period {
            run.reset_period = v;
        }
        if let Some(v) = self.x0 {
            run.x0 = v;
        }
        if let Some(v) = self.v0 {
            run.v0 = v;
        }
        Ok(run)
    }
}

fn main() -> CliResult<()> {
    // Initialize tracing; stdout carries the samples
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let run = cli.resolve()?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = oscillator::run(&run, &mut out)?;
    out.flush()?;

    tracing::info!(
        samples = summary.samples,
        t = summary.t,
        x = summary.x[0],
        v = summary.x[1],
        "done"
    );
    Ok(())
}
