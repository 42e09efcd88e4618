// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;

use anyhow::Context as _;
use switchboard::orchestrator::Orchestrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <config.yaml>", args[0]);
        eprintln!("Example: {} configs/timer-console.yaml", args[0]);
        std::process::exit(1);
    }
    let config_path = &args[1];

    let mut orch = Orchestrator::new();
    orch.load_config(config_path)
        .with_context(|| format!("loading {config_path}"))?;
    orch.init().await.context("initializing components")?;
    orch.start().await.context("starting services")?;
    tracing::info!(config = %config_path, "running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;
    tracing::info!("shutting down");

    orch.stop().await.context("stopping services")?;
    orch.deinit().await.context("releasing components")?;
    Ok(())
}
