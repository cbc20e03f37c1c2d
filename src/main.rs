mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use services::storage::S3Signer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("database init failed");

    let signer = S3Signer::new(&config.storage).expect("storage signer init failed");

    let state = state::AppState::new(
        pool,
        Arc::new(signer),
        Duration::from_secs(config.upload_url_expiry_secs),
        Duration::from_secs(config.download_url_expiry_secs),
    );

    let app = routes::app(state, config.cors_origin.as_deref());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, bucket = %config.storage.bucket, "viewport presign service listening");
    axum::serve(listener, app).await.expect("server failed");
}
