use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::EnvFilter;

use phoenix_flow::adapters::ai::GeminiClient;
use phoenix_flow::adapters::http::middleware::SessionTokenVerifier;
use phoenix_flow::adapters::http::{build_router, AppState};
use phoenix_flow::adapters::postgres::{PostgresChurnStore, PostgresShopStore, PostgresUsageLedger};
use phoenix_flow::adapters::shopify::{AdminGraphqlClient, ShopifyWebhookVerifier};
use phoenix_flow::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.server.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // One connection-pooled client shared by every outbound adapter.
    let http_client = reqwest::Client::builder()
        .timeout(config.ai.timeout())
        .build()?;

    let state = AppState {
        shop_store: Arc::new(PostgresShopStore::new(pool.clone())),
        ledger: Arc::new(PostgresUsageLedger::new(pool.clone())),
        churn_store: Arc::new(PostgresChurnStore::new(pool)),
        model: Arc::new(GeminiClient::new(http_client.clone(), config.ai.clone())),
        admin: Arc::new(AdminGraphqlClient::new(
            http_client,
            config.shopify.api_version.clone(),
        )),
        session_verifier: Arc::new(SessionTokenVerifier::new(&config.shopify.api_secret)),
        webhook_verifier: Arc::new(ShopifyWebhookVerifier::new(
            config.shopify.webhook_secret.clone(),
        )),
        admin_shops: config.shopify.admin_shop_list(),
    };

    let app = build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
