use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gradebook_server::config::{AppConfig, CorsConfig};
use gradebook_server::state::AppState;
use gradebook_server::utils::revocation::{RevokedTokens, run_revocation_sweeper};
use gradebook_server::{build_router, database, seed};

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let weights = config.grading.weights()?;

    let db = database::init_db(&config.database)
        .await
        .context("failed to connect to database")?;
    seed::seed_role_permissions(&db).await?;
    seed::ensure_indexes(&db).await?;

    let revoked = Arc::new(RevokedTokens::new());
    tokio::spawn(run_revocation_sweeper(
        revoked.clone(),
        config.auth.revocation_sweep_secs,
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let cors = cors_layer(&config.server.cors);

    let state = AppState {
        db,
        config,
        weights,
        revoked,
    };
    let app = build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
