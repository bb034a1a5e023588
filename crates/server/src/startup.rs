use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::auth::AuthService;
use service::character::{CharacterRepository, CharacterService, SeaOrmCharacterRepository};
use service::pagination::PageLimits;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

/// Wire the storage-backed service and the auth service into handler state.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let repo: Arc<dyn CharacterRepository> = Arc::new(
        SeaOrmCharacterRepository::new(db).with_timeout(Duration::from_secs(cfg.database.query_timeout_secs)),
    );
    let characters = CharacterService::new(repo).with_page_limits(PageLimits::from(cfg.pagination));
    let auth = AuthService::from_config(&cfg.auth);
    Ok(ServerState::with_characters(characters, auth))
}

/// Public entry: load configuration, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    init_logging(cfg.logging.json);

    if cfg.auth.password_hash.trim().is_empty() {
        warn!("auth.password_hash is empty; /auth/login will reject every request");
    }

    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting character server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(err = %e, "failed to listen for shutdown signal");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_from_config() {
        let mut cfg = AppConfig::default();
        assert_eq!(bind_addr(&cfg).unwrap().port(), 8080);
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
