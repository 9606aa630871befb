// src/lib.rs

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod handlers;
pub mod models;
pub mod page;

use actix_web::web;
use dashboard::DashboardState;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "dashboard_server=info,stock_data=info";

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::{dashboard, filter_options, health_check, index, query_error};

    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .service(index)
        .service(filter_options)
        .service(dashboard)
        .service(health_check);
}

pub async fn run_server(state: DashboardState) -> std::io::Result<()> {
    use actix_web::{App, HttpServer};

    let address = state.settings.address();
    let state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(address)?
    .run()
    .await
}
