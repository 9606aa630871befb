// src/main.rs

use anyhow::Context;
use dashboard_server::config::Settings;
use dashboard_server::dashboard::DashboardState;
use dashboard_server::{init_tracing, run_server};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::load_or_default(Settings::DEFAULT_PATH)?;
    let (host, port) = settings.address();
    let state = DashboardState::initialize(settings).context("failed to load ticker data")?;

    info!("Starting stock price dashboard at http://{}:{}", host, port);
    run_server(state).await?;
    Ok(())
}
