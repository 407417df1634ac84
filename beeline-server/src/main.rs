use std::error::Error;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use beeline_server::config::AppConfig;
use beeline_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("beeline_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env().inspect_err(|e| error!("{e}"))?;

    if let Some(dir) = &config.fixtures_dir {
        info!(dir = %dir.display(), "serving geocoder and station feeds from fixtures");
    } else {
        info!(gbfs = %config.gbfs_base_url, "using live OpenCage and GBFS backends");
    }

    let geocoder = config.geocoder()?;
    let feed = config.station_feed()?;

    let shutdown = CancellationToken::new();
    let state = AppState::new(geocoder, feed, config.finder.clone(), shutdown.clone());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, radius_km = config.finder.radius_km, "Beeline listening");
    info!("  GET  /            - Search page");
    info!("  GET  /health      - Health check");
    info!("  GET  /search      - Stations for both ends (?start=&bikes=&end=&docks=)");
    info!("  GET  /api/bikes   - Stations with bikes (?location=&count=)");
    info!("  GET  /api/docks   - Stations with docks (?location=&count=)");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutting down");
            }
            shutdown.cancel();
        })
        .await?;

    Ok(())
}
