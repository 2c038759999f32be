//! Configuration for Catalog API

use axum::http::HeaderValue;
use axum_helpers::parse_origins;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_products::NameMatch;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// `None` leaves the CORS layer off
    pub cors_origins: Option<Vec<HeaderValue>>,
    pub name_match: NameMatch,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080

        let case_insensitive: bool = env_parse("PRODUCT_SEARCH_CASE_INSENSITIVE", "false")?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            cors_origins: cors_origins_from_env()?,
            name_match: NameMatch::from_case_insensitive(case_insensitive),
        })
    }
}

/// Reads `CORS_ALLOWED_ORIGIN` as a comma-separated list.
fn cors_origins_from_env() -> Result<Option<Vec<HeaderValue>>, ConfigError> {
    let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        return Ok(None);
    };

    let origins = parse_origins(&raw).map_err(|e| ConfigError::ParseError {
        key: "CORS_ALLOWED_ORIGIN".to_string(),
        details: e.to_string(),
    })?;

    Ok((!origins.is_empty()).then_some(origins))
}
