//! # Portfolio Motion
//!
//! Prints the simulated choreography timeline as JSON lines on stdout.

use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use motion_cli::{run_realtime, CliArgs, SimSettings, Simulator};
use motion_core::MotionConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,motion_core=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output. Logs go to stderr so stdout
/// carries frames only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,motion_core=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(args: &CliArgs) -> anyhow::Result<MotionConfig> {
    let mut config = match &args.config {
        Some(path) => MotionConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => MotionConfig::default(),
    };
    if let Some(variant) = args.variant {
        config.variant = variant.into();
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    tracing::info!(
        variant = ?config.variant,
        width = args.width,
        until = args.until,
        realtime = args.realtime,
        "starting simulation"
    );

    let mut sim = Simulator::new(&config, SimSettings::from(&args));
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let frames = if args.realtime {
        run_realtime(&mut sim, args.until, args.step, &mut out).await?
    } else {
        sim.run(args.until, args.step, &mut out)?
    };
    out.flush().context("failed to flush stdout")?;

    tracing::info!(frames, "simulation finished");
    Ok(())
}
