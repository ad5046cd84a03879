//! rehabrisk — fuses functioning, gait and IMU assessments into one risk tier
//! per patient.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rehabrisk_common::TierCounts;
use rehabrisk_runtime::{run_fusion_pipeline_with_policy, RuntimeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "rehabrisk", version, about = "Rehabilitation risk fusion pipeline")]
struct Args {
    /// Config file (TOML, YAML or JSON). Defaults to $REHABRISK_CONFIG or ./rehabrisk.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Functioning (ICF) assessment CSV
    #[arg(long)]
    icf: Option<PathBuf>,

    /// Gait abnormality CSV
    #[arg(long)]
    gait: Option<PathBuf>,

    /// IMU action quality CSV
    #[arg(long)]
    sensor: Option<PathBuf>,

    /// Output decision CSV
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rehabrisk=debug,info")),
        )
        .init();

    let args = Args::parse();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => RuntimeConfig::from_path(path)?,
        None => RuntimeConfig::load()?,
    };
    if let Some(p) = args.icf {
        config.paths.icf_path = p;
    }
    if let Some(p) = args.gait {
        config.paths.gait_path = p;
    }
    if let Some(p) = args.sensor {
        config.paths.sensor_path = p;
    }
    if let Some(p) = args.output {
        config.paths.output_path = p;
    }

    let decisions = run_fusion_pipeline_with_policy(&config.paths, &config.policy)
        .context("Fusion pipeline failed")?;

    let counts = TierCounts::from_decisions(&decisions);
    println!("Fusion output rows: {}", decisions.len());
    println!("  high: {}  medium: {}  low: {}", counts.high, counts.medium, counts.low);
    println!("Saved to: {}", config.paths.output_path.display());
    Ok(())
}
