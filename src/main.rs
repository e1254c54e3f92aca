//! Sky Report HTTP server.
//!
//! # Environment Variables
//!
//! - `SKY_REPORT_CONFIG`: path to a TOML config file
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8080)
//! - `RUST_LOG`: log filter (default: info)

use std::net::SocketAddr;

use anyhow::{Context, Result};
use skyreport_core::Config;
use skyreport_http::{create_router, AppState};
use skyreport_services::SkyReportService;
use skyreport_sky::LightPollutionEstimator;
use skyreport_weather::WeatherProvider;

#[tokio::main]
async fn main() -> Result<()> {
    skyreport_core::init()?;

    let (config, _) = Config::load_validated()?;

    let weather = WeatherProvider::new(&config.weather).context("Failed to create weather client")?;
    let service = SkyReportService::new(weather, LightPollutionEstimator::new());
    let app = create_router(AppState::new(service));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid bind address")?;

    tracing::info!("Sky Report Service starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
