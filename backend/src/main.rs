use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripgen_backend::{
    AppState,
    config::{DEFAULT_LOG_FILTER, Settings},
    create_router,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;
    if let Some(seed) = settings.seed {
        tracing::info!("plans are seeded with {seed}");
    }
    let app = create_router(AppState {
        seed: settings.seed,
    });

    tracing::info!("starting itinerary API on http://{}", settings.addr);
    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
