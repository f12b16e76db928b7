use anyhow::{Context, Result};
use serde::Deserialize;

/// PostgreSQL connection settings, read from `DB_*` environment variables
/// (usually supplied through the local `.env` file).
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        envy::prefixed("DB_").from_env().context(
            "Invalid database configuration. Required env vars: \
             DB_NAME, DB_USER, DB_PASSWORD, DB_HOST, DB_PORT",
        )
    }

    /// Key/value connection string in the form tokio-postgres expects.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            self.host, self.port, self.user, self.password, self.name
        )
    }
}

/// Yandex Weather API settings, read from `YANDEX_*` environment variables.
///
/// The coordinates default to the logger's original observation point, so
/// only the API key is strictly required.
#[derive(Debug, Clone, Deserialize)]
pub struct YandexConfig {
    pub api_key: String,
    #[serde(default = "default_lat")]
    pub lat: f64,
    #[serde(default = "default_lon")]
    pub lon: f64,
}

fn default_lat() -> f64 {
    55.698538
}

fn default_lon() -> f64 {
    37.359576
}

impl YandexConfig {
    pub fn from_env() -> Result<Self> {
        envy::prefixed("YANDEX_")
            .from_env()
            .context("Invalid weather API configuration. Required env var: YANDEX_API_KEY")
    }
}
