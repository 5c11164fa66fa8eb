use std::env;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::poster::{DEFAULT_ALLOWED_EXTENSIONS, MAX_POSTER_SIZE};

const DEFAULT_CONFIG_FILE: &str = "movies";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub poster: PosterSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PosterSettings {
    pub allowed_extensions: Vec<String>,
    pub max_size: usize,
}

impl Settings {
    /// Defaults, then `movies.toml` (or `$MOVIES_CONFIG`) if present, then
    /// `MOVIES__*` variables. `DATABASE_URL` wins over everything for the
    /// database url.
    pub fn load() -> Result<Self, ConfigError> {
        let file = env::var("MOVIES_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let mut builder = defaults()?
            .add_source(File::with_name(&file).required(false))
            .add_source(environment());
        if let Ok(url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", url)?;
        }
        builder.build()?.try_deserialize()
    }
}

/// `MOVIES__POSTER__ALLOWED_EXTENSIONS` takes a comma separated list.
fn environment() -> Environment {
    Environment::with_prefix("MOVIES")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("poster.allowed_extensions")
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080_i64)?
        .set_default("database.pool_size", 10_i64)?
        .set_default(
            "poster.allowed_extensions",
            DEFAULT_ALLOWED_EXTENSIONS.to_vec(),
        )?
        .set_default("poster.max_size", MAX_POSTER_SIZE as i64)
}
