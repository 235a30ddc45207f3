//! orgman server — application entry point.

use orgman_db::DbManager;
use orgman_db::repository::{
    SurrealAdminRepository, SurrealOrganizationRepository, SurrealPartitionStore,
};
use orgman_lifecycle::OrgService;
use orgman_server::{AppState, ServerConfig, build_router};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("orgman=info".parse()?),
        )
        .json()
        .init();

    let config = ServerConfig::from_env()?;

    let manager = DbManager::connect(&config.db).await?;
    let db = manager.client().clone();
    orgman_db::run_migrations(&db).await?;

    let service = OrgService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealAdminRepository::new(db.clone()),
        SurrealPartitionStore::new(db),
        config.auth.clone(),
    );

    let app = build_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!(addr = %config.http_addr, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("HTTP server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
    }
}
