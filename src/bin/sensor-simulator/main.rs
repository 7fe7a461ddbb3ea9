mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use clap::Parser as _;
use home_sensor_simulator::{
    clock::SystemClock,
    simulator::Simulator,
    sink::{InfluxDbSink, PostgresSink, Sink, connect_unless_cancelled},
};
use rand::{SeedableRng as _, rngs::StdRng};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let clock = SystemClock::new(args.timezone);
    let cancel = CancellationToken::new();
    tokio::spawn(stop_on_interrupt(cancel.clone()));

    match &args.database_url {
        Some(database_url) => {
            let connect = PostgresSink::connect(database_url);
            let Some(sink) = connect_unless_cancelled(&cancel, connect)
                .await
                .context("failed to connect to database")?
            else {
                return Ok(());
            };
            simulate(sink, clock, cancel).await
        }
        None => {
            let sink = InfluxDbSink::connect(args.influxdb_config())
                .context("failed to create InfluxDB client")?;
            simulate(sink, clock, cancel).await
        }
    }
}

async fn simulate<S: Sink>(sink: S, clock: SystemClock, cancel: CancellationToken) -> Result<()> {
    Simulator::new(sink, clock, StdRng::from_os_rng())
        .run(cancel)
        .await
        .context("sensor simulation failed")?;

    Ok(())
}

async fn stop_on_interrupt(cancel: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for interrupt: {err}");
        return;
    }

    println!("Stopping sensor simulation...");
    cancel.cancel();
}
