use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use tokio::sync::{oneshot, watch};
use workflow::config::SimConfig;
use workflow::runner::Runner;

mod devices;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Runs the sight controller against simulated devices")]
struct Args {
    /// Load a simulator config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding the model file
    #[arg(long, default_value = "simulator/assets")]
    model_dir: PathBuf,
    /// Stop after this many main-cycle ticks instead of waiting for Ctrl+C
    #[arg(long)]
    ticks: Option<usize>,
    #[arg(long, default_value_t = 1000)]
    period_ms: u64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        SimConfig::load(path)?
    } else {
        SimConfig::from_args(args.period_ms, args.seed)
    };
    let runner = Runner::new(config, args.model_dir);

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating runtime for the simulation")?;

    let summary = runtime.block_on(async move {
        let (ready_tx, ready_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                log::info!("Ctrl+C received, stopping main cycle");
                let _ = shutdown_tx.send(true);
            }
        });

        println!("[sim] operator console ready (Ctrl+C to stop)");
        let _ = ready_tx.send(());
        runner.execute(ready_rx, shutdown_rx, args.ticks).await
    })?;

    println!(
        "[sim] state {} -> ticks {}, skipped {}, detections {}, payloads {}, transmitted {}",
        summary.state,
        summary.metrics.ticks,
        summary.metrics.skipped,
        summary.metrics.detections,
        summary.handed_off,
        summary.transmitted.len()
    );
    if let Some(err) = summary.startup_error {
        println!("[sim] start-up failed: {}", err);
    }
    for payload in &summary.transmitted {
        println!("[sim] on air: {}", payload.hex());
    }

    Ok(())
}
