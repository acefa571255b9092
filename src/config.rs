use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Host configuration for the `web` binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// In-memory tournament store housekeeping.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Tournaments untouched for this long are dropped.
    pub inactivity_timeout_secs: u64,
    pub cleanup_interval_secs: u64,
}

impl StoreSettings {
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Settings {
    /// Load configuration, later sources overriding earlier ones:
    /// 1. Built-in defaults
    /// 2. `config/default.toml`, then `config/local.toml` (both optional)
    /// 3. Environment variables prefixed with `BRACKET`, e.g. `BRACKET__SERVER__PORT`
    /// 4. The plain `HOST` / `PORT` variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("store.inactivity_timeout_secs", 12 * 3600_i64)?
            .set_default("store.cleanup_interval_secs", 30 * 60_i64)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("BRACKET")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(host) = std::env::var("HOST") {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        builder.build()?.try_deserialize()
    }
}
