//! Acontext server entry point.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use acontext::adapters::http::session::{session_routes, SessionHandlers};
use acontext::adapters::postgres::PostgresMessageReader;
use acontext::adapters::token::HeuristicTokenEstimator;
use acontext::application::handlers::GetMessagesHandler;
use acontext::config::AppConfig;
use acontext::ports::NoopAssetUrlResolver;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    let get_messages = Arc::new(GetMessagesHandler::new(
        Arc::new(PostgresMessageReader::new(pool)),
        Arc::new(NoopAssetUrlResolver),
        Arc::new(HeuristicTokenEstimator),
    ));

    let app = session_routes(SessionHandlers::new(get_messages))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    info!(%addr, "starting acontext server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
