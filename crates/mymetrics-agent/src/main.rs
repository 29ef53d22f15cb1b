//! mymetrics agent binary.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mymetrics_agent::{config::AgentArgs, Agent, HttpSink, SysinfoSource};
use mymetrics_core::Result;

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "mymetrics-agent failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = AgentArgs::parse().resolve()?;
    let endpoint = cfg.endpoint();
    tracing::info!(?cfg, %endpoint, "start agent");

    let sink = HttpSink::new(endpoint, cfg.report_interval())?;
    let agent = Agent::new(
        Box::new(SysinfoSource::new()),
        Arc::new(sink),
        cfg.poll_interval(),
        cfg.report_interval(),
    );
    agent.run(shutdown_signal()).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("signal received");
}
