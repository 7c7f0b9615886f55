use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, sanitize_db_url, DbKind, RuntimeEnv};
use crate::error::AppError;

const PG_CONNECT_ATTEMPTS: u32 = 5;
const PG_CONNECT_INTERVAL_MS: u64 = 500;

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Open a pool for the given environment and store. Runs no migrations.
///
/// In-memory SQLite is pinned to a single long-lived connection: every new
/// connection would otherwise see its own empty database.
pub async fn connect_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, kind)?;
    let mut opt = ConnectOptions::new(url.clone());
    opt.acquire_timeout(Duration::from_secs(5)).sqlx_logging(false);

    match kind {
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::SqliteFile => {
            opt.max_connections(1);
        }
        DbKind::Postgres => {
            opt.max_connections(10);
        }
    }

    let conn = if kind == DbKind::Postgres {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt)
                        .await
                        .map_err(|e| AppError::db_unavailable(format!("failed to connect: {e}")))
                }
            },
            PG_CONNECT_ATTEMPTS,
            PG_CONNECT_INTERVAL_MS,
        )
        .await?
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| AppError::db_unavailable(format!("failed to connect: {e}")))?
    };

    info!(db = %sanitize_db_url(&url), ?kind, ?env, "database connected");
    Ok(conn)
}

/// True when every defined migration has been applied.
async fn schema_is_current(conn: &DatabaseConnection) -> Result<bool, AppError> {
    let applied = migration::count_applied_migrations(conn).await?;
    let latest = migration::get_latest_migration_version(conn).await?;
    let expected_last = Migrator::migrations().last().map(|m| m.name().to_string());
    Ok(applied == Migrator::migrations().len() && latest == expected_last)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(env: RuntimeEnv, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(env, kind).await?;
    if !schema_is_current(&conn).await? {
        migrate(&conn, MigrationCommand::Up).await?;
    }
    Ok(conn)
}

/// Entry point for the migration CLI.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    kind: DbKind,
    command: MigrationCommand,
) -> Result<(), AppError> {
    if kind == DbKind::SqliteMemory {
        return Err(AppError::config(
            "in-memory SQLite cannot be migrated from the CLI; the database vanishes on exit",
        ));
    }
    let conn = connect_db(env, kind).await?;
    migrate(&conn, command).await?;
    Ok(())
}
