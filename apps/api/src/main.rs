use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio::config::Config;
use folio::routes::build_router;
use folio::sections::SectionRegistry;
use folio::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("folio={0},folio_api={0}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    let registry = SectionRegistry::with_builtins();
    info!("Section registry initialized: {registry:?}");
    info!(
        "Page box: {:.0}x{:.0}pt, {:.0}pt margins; default layout {}",
        config.page_box.width_pt,
        config.page_box.height_pt,
        config.page_box.margin_pt,
        config.default_layout.as_str()
    );

    // Build app state
    let state = AppState::new(config.clone(), registry);

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
