//! Student Service server bootstrap

use anyhow::Context;
use figment::{
    providers::{Env, Format, Yaml},
    Figment,
};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use student_service::api::rest::routes::register_routes;
use student_service::config::Config;
use student_service::domain::{NoOpEventPublisher, Service};
use student_service::infra::peers::HttpPeerGateway;
use student_service::infra::storage::migrations::Migrator;
use student_service::infra::storage::repositories::{
    SeaOrmAcademicYearRepository, SeaOrmClassRepository, SeaOrmStudentRepository,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn,sea_orm=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path =
        std::env::var("STUDENT_SERVICE_CONFIG").unwrap_or_else(|_| "student-service.yaml".into());
    let config: Config = Figment::new()
        .merge(Yaml::file(&config_path))
        .merge(Env::prefixed("STUDENT_SERVICE_").ignore(&["CONFIG"]).split("__"))
        .extract()
        .context("invalid configuration")?;

    prepare_sqlite_dir(&config.database_url)?;

    let conn = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&conn, None)
        .await
        .context("database migration failed")?;
    tracing::info!("database ready at {}", config.database_url);

    let conn = Arc::new(conn);

    // Build repositories
    let students = Arc::new(SeaOrmStudentRepository::new(conn.clone()));
    let classes = Arc::new(SeaOrmClassRepository::new(conn.clone()));
    let academic_years = Arc::new(SeaOrmAcademicYearRepository::new(conn));

    // Outbound peers and event publisher
    let peers = Arc::new(HttpPeerGateway::new(&config.peers)?);
    let events = Arc::new(NoOpEventPublisher);

    // Build domain service
    let service = Arc::new(Service::new(students, classes, academic_years, peers, events));

    let router = register_routes(axum::Router::new(), service)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("student service listening on {}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// SQLite URLs point into the local filesystem; create the parent
/// directory so a fresh checkout can boot
fn prepare_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
}
