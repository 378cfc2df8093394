use pulse_server::api;
use pulse_server::config::Config;
use pulse_server::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_server=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(period = ?config.submission_period, "starting pulse-server");

    let state = AppState::new(&config).await?;
    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("pulse-server listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
