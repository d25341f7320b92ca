use std::net::SocketAddr;

use anyhow::Context;
use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl ApplicationSettings {
    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

/// Layers, lowest priority first: built-in defaults, `configuration/base.toml`,
/// the file named by `TRIVIA_CONFIG`, then `TRIVIA__SECTION__KEY` variables.
pub fn get_settings() -> anyhow::Result<Settings> {
    dotenv::dotenv().ok();

    let mut builder = Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 5000)?
        .set_default("database.url", "sqlite:trivia.db")?
        .set_default("database.max_connections", 5)?
        .set_default("database.run_migrations", true)?
        .add_source(File::with_name("configuration/base").required(false));

    if let Ok(path) = dotenv::var("TRIVIA_CONFIG") {
        builder = builder.add_source(File::with_name(&path));
    }

    builder
        .add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
