use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

const DEFAULT_NOTIFY_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => bail!("Unknown STORAGE_BACKEND '{other}', expected postgres or memory"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub api_keys: String,
    pub storage_backend: StorageBackend,
    pub notify_channel_capacity: usize,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let storage_backend = match std::env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Postgres,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            bail!("Cannot load DATABASE_URL env variable");
        }

        let notify_channel_capacity = match std::env::var("NOTIFY_CHANNEL_CAPACITY") {
            Ok(value) => value
                .parse()
                .context("NOTIFY_CHANNEL_CAPACITY must be a number")?,
            Err(_) => DEFAULT_NOTIFY_CHANNEL_CAPACITY,
        };

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            storage_backend,
            notify_channel_capacity,
            seed_file: std::env::var("SEED_FILE").ok().map(PathBuf::from),
        })
    }
}
