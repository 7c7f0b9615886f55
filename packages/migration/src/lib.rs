pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20250901_000001_init;
mod m20250901_000002_seed_sports;

pub use m20250901_000002_seed_sports::SEEDED_SPORTS;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_init::Migration),
            Box::new(m20250901_000002_seed_sports::Migration),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run one migration command against an open connection.
///
/// Shared by the CLI and by backend startup; logs the backend, database
/// name and applied/defined counts before and after the command.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = Snapshot::take(db).await?;
    tracing::info!(
        ?command,
        backend = before.backend,
        database = %before.database,
        applied = before.applied,
        defined = before.defined,
        "migration starting"
    );

    let outcome = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = outcome {
        tracing::error!(?command, backend = before.backend, error = %e, "migration failed");
        return Err(e);
    }

    let after = Snapshot::take(db).await?;
    tracing::info!(
        ?command,
        backend = after.backend,
        applied = after.applied,
        defined = after.defined,
        "migration finished"
    );
    Ok(())
}

struct Snapshot {
    backend: &'static str,
    database: String,
    applied: usize,
    defined: usize,
}

impl Snapshot {
    async fn take(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let backend = db.get_database_backend();
        let (label, sql) = match backend {
            sea_orm::DatabaseBackend::Postgres => {
                ("postgres", "SELECT current_database() AS name")
            }
            sea_orm::DatabaseBackend::Sqlite => (
                "sqlite",
                "SELECT file AS name FROM pragma_database_list WHERE name = 'main'",
            ),
            _ => ("other", ""),
        };

        let database = if sql.is_empty() {
            "<unsupported>".to_string()
        } else {
            db.query_one(Statement::from_string(backend, sql))
                .await?
                .and_then(|row| row.try_get::<String>("", "name").ok())
                .map(|name| if name.is_empty() { ":memory:".to_string() } else { name })
                .unwrap_or_else(|| "<unknown>".to_string())
        };

        Ok(Self {
            backend: label,
            database,
            applied: count_applied_migrations(db).await.unwrap_or(0),
            defined: Migrator::migrations().len(),
        })
    }
}

/// Applied migration count; 0 before the bookkeeping table exists.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the newest applied migration, reported by `/health`.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
