use tfl_dashboard::cache::CachedTflClient;
use tfl_dashboard::config::DashboardConfig;
use tfl_dashboard::tfl::{MockTflClient, TflBackend, TflClient};
use tfl_dashboard::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DashboardConfig::from_env();

    let backend = match &config.mock_dir {
        Some(dir) => {
            let mock = MockTflClient::new(dir)?;
            info!(dir = %dir.display(), modes = ?mock.available_modes(), "serving mock TfL data");
            TflBackend::Mock(mock)
        }
        None => {
            info!(base_url = %config.base_url, "using live TfL API");
            TflBackend::Live(TflClient::new(config.tfl_config())?)
        }
    };

    let client = CachedTflClient::new(backend, &config.cache_config());
    let addr = config.addr;
    let static_dir = config.static_dir.clone();

    let state = AppState::new(client, config);
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("TfL dashboard listening on http://{addr}");
    info!("API endpoints: /health /api/summary /api/lines /api/bus /api/stations /api/stations/map /api/journey");

    axum::serve(listener, app).await?;
    Ok(())
}
