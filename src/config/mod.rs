use std::path::PathBuf;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "CLIENT_MANAGER_";

/// Configuration for the application
#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Store file opened when no `--db` flag is given
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// `tracing` filter directives
    #[serde(default = "default_log_filter")]
    pub log: String,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("clients.sqlite")
}

fn default_log_filter() -> String {
    "client_manager=info,sqlx=warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log: default_log_filter(),
        }
    }
}

impl Config {
    /// Load configuration from `CLIENT_MANAGER_*` environment variables
    pub fn load() -> Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<Config>()
            .context("invalid CLIENT_MANAGER_* environment configuration")
    }

    /// Build configuration from explicit key/value pairs
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(pairs)
            .context("invalid client manager configuration")
    }
}

/// Load `.env` if present, then read the configuration
pub fn init() -> Result<Config> {
    dotenv().ok();
    Config::load()
}
