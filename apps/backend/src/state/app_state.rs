use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;

const DEFAULT_MAX_JSON_BYTES: usize = 64 * 1024;

/// Shared resources handed to every handler through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub security: SecurityConfig,
    /// Body limit enforced by `ValidatedJson`
    pub max_json_bytes: usize,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db,
            security,
            max_json_bytes: DEFAULT_MAX_JSON_BYTES,
        }
    }

    pub fn with_max_json_bytes(mut self, max_json_bytes: usize) -> Self {
        self.max_json_bytes = max_json_bytes;
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
