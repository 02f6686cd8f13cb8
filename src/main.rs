//! Launch Dashboard - Interactive launch records web dashboard
//!
//! Loads a CSV of rocket launches once and serves a page with a site
//! dropdown, a payload range slider, a success pie chart and a
//! payload/outcome scatter chart.

mod charts;
mod cli;
mod data;
mod stats;
mod web;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use data::DataLoader;
use stats::StatsCalculator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let table = DataLoader::load_csv(&args.data)
        .with_context(|| format!("Failed to load launch records from {}", args.data.display()))?;

    let rates = StatsCalculator::booster_success_rates(&table);
    info!("Booster success rates over {} categories", rates.len());
    for rate in &rates {
        debug!(
            "{:>8}: {:.3} ({} launches)",
            rate.category, rate.success_rate, rate.launches
        );
    }

    let state = Arc::new(AppState::new(table, args.slider())?);
    let addr = args.addr();

    web::run_server(addr, state)
        .await
        .with_context(|| format!("Server failed on {}", addr))?;

    Ok(())
}
