use helpdesk_api::handlers;
use helpdesk_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = helpdesk_api::config::config();
    tracing::info!("Starting Helpdesk API in {:?} mode", config.environment);

    let state = AppState::from_env().await?;
    let app = handlers::app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("HELPDESK_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Helpdesk API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
