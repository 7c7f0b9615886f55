//! Application configuration loaded once from environment variables.

use std::env;

use crate::config::db::{DbKind, RuntimeEnv};
use crate::error::AppError;

const DEFAULT_MAX_JSON_BYTES: usize = 64 * 1024;
const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,

    // Database
    pub runtime_env: RuntimeEnv,
    pub db_kind: DbKind,

    // Security
    pub jwt_secret: String,

    // HTTP payload limits
    pub max_json_bytes: usize,
}

impl Config {
    /// Load and validate all configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "3001".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match env::var("BACKEND_JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_JWT_SECRET_LEN => secret,
            Ok(_) => {
                return Err(AppError::config(format!(
                    "BACKEND_JWT_SECRET is too short; use at least {MIN_JWT_SECRET_LEN} characters"
                )))
            }
            Err(_) => return Err(AppError::config("BACKEND_JWT_SECRET must be set")),
        };

        let db_kind = match env::var("PICKUP_DB_KIND") {
            Ok(raw) => raw.parse::<DbKind>()?,
            Err(_) => DbKind::Postgres,
        };

        let max_json_bytes = match env::var("BACKEND_MAX_JSON_BYTES") {
            Ok(raw) => raw.parse::<usize>().map_err(|_| {
                AppError::config(format!(
                    "BACKEND_MAX_JSON_BYTES must be a byte count, got '{raw}'"
                ))
            })?,
            Err(_) => DEFAULT_MAX_JSON_BYTES,
        };

        Ok(Config {
            host,
            port,
            runtime_env: RuntimeEnv::Prod,
            db_kind,
            jwt_secret,
            max_json_bytes,
        })
    }
}
