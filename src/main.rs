use hostel::server::{
    config::Config, model::app::AppState, router, scheduler::Scheduler, startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), hostel::server::error::Error> {
    let config = Config::from_env()?;

    let session = startup::connect_to_session(&config).await?;
    let db = startup::connect_to_database(&config).await?;

    let state = AppState::from(db).with_policy(config.policy.clone());

    Scheduler::new(state.clone()).await?.start().await?;

    let app = router::routes().with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .map_err(|e| {
            hostel::server::error::Error::InternalError(format!(
                "Failed to bind {}: {}",
                config.bind_address, e
            ))
        })?;

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app)
        .await
        .map_err(|e| hostel::server::error::Error::InternalError(format!("Server error: {}", e)))
}
