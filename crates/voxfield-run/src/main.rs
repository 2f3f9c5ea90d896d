//! Voxfield Run - samples a field model into an isosurface volume
//!
//! This binary selects a built-in model preset, runs a solve with progress
//! logging, and optionally writes the assembled volume to a JSON file.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voxfield_kernels::presets;
use voxfield_solver::{Assembly, FieldSolver, SolverConfig};

#[derive(Parser, Debug)]
#[command(name = "voxfield-run")]
#[command(about = "Sample a built-in field model into an isosurface volume")]
struct Cli {
    /// Model preset name (see --list)
    #[arg(long, default_value = "wire-loop")]
    model: String,

    /// List available model presets and exit
    #[arg(long)]
    list: bool,

    /// Override the preset's grid resolution
    #[arg(long)]
    resolution: Option<usize>,

    /// Normalize every channel before assembling the volume
    #[arg(long)]
    normalized: bool,

    /// Keep physical units even if the preset defaults to normalized
    #[arg(long, conflicts_with = "normalized")]
    raw: bool,

    /// Points sampled between cooperative yields
    #[arg(long, default_value = "1000")]
    batch_size: usize,

    /// Chunk length for the aggregation passes
    #[arg(long, default_value = "100000")]
    chunk_size: usize,

    /// Inter-batch delay in milliseconds (0 = bare scheduler yield)
    #[arg(long, default_value = "0")]
    delay_ms: u64,

    /// Write the assembled volume as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voxfield_run=info,voxfield_solver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let models = presets();

    if cli.list {
        for (name, preset) in &models {
            info!("{name}: {}", preset.description);
        }
        return;
    }

    let Some(preset) = models.get(cli.model.as_str()) else {
        error!("unknown model: {} (try --list)", cli.model);
        std::process::exit(1);
    };

    let config = SolverConfig {
        resolution: cli.resolution.unwrap_or(preset.resolution),
        batch_size: cli.batch_size,
        process_batch_size: cli.chunk_size,
        batch_delay_ms: cli.delay_ms,
        ..SolverConfig::default()
    };

    let assembly = if cli.normalized {
        Assembly::Normalized
    } else if cli.raw {
        Assembly::Raw
    } else {
        preset.assembly
    };

    info!(
        model = %cli.model,
        resolution = config.resolution,
        ?assembly,
        "starting solve"
    );

    let mut solver = match FieldSolver::new(config) {
        Ok(solver) => solver,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    solver.set_kernel((preset.build)());
    solver.set_progress_callback(Box::new(|percent, message| {
        info!(percent, "{message}");
    }));

    let volume = match solver.solve(&preset.bounds, assembly, 0).await {
        Ok(volume) => volume,
        Err(e) => {
            error!("solve failed: {e}");
            std::process::exit(1);
        }
    };

    info!(dimensions = ?volume.dimensions, points = volume.x.len(), "volume assembled");
    info!(
        x = ?volume.bounds.x,
        y = ?volume.bounds.y,
        z = ?volume.bounds.z,
        values = ?volume.bounds.values,
        "bounds"
    );

    if let Some(path) = cli.output {
        let json = match serde_json::to_string(&volume) {
            Ok(json) => json,
            Err(e) => {
                error!("serialization failed: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = fs::write(&path, json) {
            error!("failed to write {}: {e}", path.display());
            std::process::exit(1);
        }
        info!("volume written to {}", path.display());
    }
}
