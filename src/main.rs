use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

mod config;
mod dashboard;
mod data;
mod error;
mod report;
mod summary;

use config::Config;
use dashboard::AppState;
use summary::SummaryDeriver;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let slate = match &config.fixtures_path {
        Some(path) => data::load_slate(path)?,
        None => {
            let slate = data::builtin_slate()?;
            info!("Using built-in matchday ({} matches)", slate.len());
            slate
        }
    };
    if slate.is_empty() {
        warn!("Fixture slate is empty; nothing to predict");
    }

    let deriver = SummaryDeriver::new(config.deriver_options());

    if config.report {
        let today = chrono::Local::now().date_naive();
        print!("{}", report::render_report(&slate, &deriver, today));
        return Ok(());
    }

    let state = AppState {
        slate: Arc::new(slate),
        deriver,
        min_confidence: config.min_confidence,
        high_only: config.high_only,
    };
    info!(
        "Serving {} match(es), top {} scores per summary",
        state.slate.len(),
        state.deriver.options().top_scores
    );
    let app = dashboard::router(state);
    let addr: SocketAddr = config.dashboard_addr.parse()?;
    info!("Dashboard listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
