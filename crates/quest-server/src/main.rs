mod cleanup;
mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use quest_api::AppStateInner;
use quest_core::{GameConfig, GameFacade, UserDirectory};
use quest_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quest_server=debug,quest_api=debug,quest_core=info,quest_db=info,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Init database and facades
    let db = Arc::new(Database::open(&config.db_path)?);
    let users = Arc::new(UserDirectory::new(db.clone())?);
    let game_config = GameConfig {
        position_ttl: chrono::Duration::seconds(config.position_ttl_secs),
        ..GameConfig::default()
    };
    let game = Arc::new(GameFacade::new(db, users, game_config)?);

    // Background TTL pruning
    tokio::spawn(cleanup::run_cleanup_loop(game.clone(), config.cleanup_interval_secs));

    let state = AppStateInner::new(game, config.graphql_auth);
    let app = quest_api::router(state, config.public_dir.as_deref())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Quest server listening on {}", addr);
    info!(
        "Position TTL: {}s, cleanup every {}s, GraphQL auth: {}",
        config.position_ttl_secs, config.cleanup_interval_secs, config.graphql_auth
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
