mod cache;
mod config;
mod errors;
mod outlook;
mod programs;
mod regions;
mod routes;
mod state;
mod unit_groups;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::TtlCache;
use crate::config::Config;
use crate::outlook::client::{OutlookClient, OutlookSource};
use crate::outlook::OUTLOOK_CACHE_TTL;
use crate::programs::client::ProgramsClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::unit_groups::UnitGroupDirectory;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Outlook API v{}", env!("CARGO_PKG_VERSION"));

    // Static NOC reference data compiled into the binary
    let unit_groups = Arc::new(UnitGroupDirectory::bundled()?);
    info!("Loaded {} NOC unit groups", unit_groups.len());

    // Upstream clients
    let outlook: Arc<dyn OutlookSource> = Arc::new(OutlookClient::new(
        config.lmi_api_base_url.clone(),
        config.gc_api_user_key.clone(),
    ));
    let programs = ProgramsClient::new(config.programs_api_base_url.clone());
    info!("Upstream API clients initialized");

    // Process-wide outlook cache, fixed two-month expiry
    let outlook_cache = Arc::new(TtlCache::new(OUTLOOK_CACHE_TTL));

    // Build app state
    let state = AppState {
        outlook,
        programs,
        unit_groups,
        outlook_cache,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the API is consumed by a browser frontend

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
