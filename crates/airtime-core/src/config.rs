use std::path::PathBuf;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
    /// Seconds a request waits for a pooled connection before failing.
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the listen address in the format "host:port".
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where uploaded artwork images live on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub artwork_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Longest inclusive date range a single series may span.
    pub max_series_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    ///
    /// Environment variables use the `AIRTIME_` prefix and `__` between nested keys,
    /// e.g. `AIRTIME_DATABASE__URL` or `AIRTIME_STORAGE__ARTWORK_DIR`.
    ///
    /// ## Errors
    /// Returns an error if building, deserializing or validating the configuration fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.max_connections", 4)?
            .set_default("database.connect_timeout_secs", 10)?
            .set_default("storage.artwork_dir", "public/schedule")?
            .set_default("schedule.max_series_days", 731)?
            .set_default("logging.level", "debug")?
            .add_source(
                config::Environment::with_prefix("AIRTIME")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Rejects values the server cannot run with.
    ///
    /// ## Errors
    /// Returns `InvalidConfiguration` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "database.url must be set".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(CoreError::InvalidConfiguration(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.database.connect_timeout_secs == 0 {
            return Err(CoreError::InvalidConfiguration(
                "database.connect_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.schedule.max_series_days == 0 {
            return Err(CoreError::InvalidConfiguration(
                "schedule.max_series_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Ignoring unreadable environment file"),
    }

    Settings::load()
}
