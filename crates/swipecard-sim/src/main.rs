//! swipecard-sim - replay a gesture trace against a swipe card.
//!
//! Usage: `swipecard-sim <trace.json> [config.toml]`
//!
//! Prints one JSON line per event with the frame the host would draw.
//! Logs go to stderr and are filtered with `RUST_LOG`.

mod trace;

use std::path::PathBuf;

use swipecard_core::{load_config, load_config_from, SwipeConfig};
use trace::{replay, Trace, TraceError};

fn load(config_path: Option<PathBuf>) -> Result<SwipeConfig, TraceError> {
    let config = match config_path {
        Some(path) => load_config_from(&path)?,
        None => load_config()?,
    };
    Ok(config)
}

fn run(trace_path: PathBuf, config_path: Option<PathBuf>) -> Result<(), TraceError> {
    let config = load(config_path)?;
    let trace = Trace::load(&trace_path)?;
    tracing::info!(
        "Replaying {} events against {} actions",
        trace.events.len(),
        trace.actions.len()
    );

    for report in replay(trace, config)? {
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = std::env::args_os().skip(1);
    let Some(trace_path) = args.next().map(PathBuf::from) else {
        eprintln!("Usage: swipecard-sim <trace.json> [config.toml]");
        std::process::exit(2);
    };
    let config_path = args.next().map(PathBuf::from);

    if let Err(e) = run(trace_path, config_path) {
        tracing::error!("Replay failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
