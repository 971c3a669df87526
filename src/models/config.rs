use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options of the category service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub address: String,
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
}

impl ServerConfig {
    /// Load `config/default.yaml`, then `config/local.yaml`, then `APP_*`
    /// environment variables, each overriding the previous.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("address", "127.0.0.1")?
            .set_default("port", 3000)?
            .set_default("database_url", "app.db")?
            .set_default("pool_size", 8)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> (&str, u16) {
        (self.address.as_str(), self.port)
    }
}
