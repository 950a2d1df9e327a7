use crate::error::ClientError;
use reqwest::Url;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

const DEFAULT_PROTOCOL: &str = "http";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "9090";
const DEFAULT_STORAGE: &str = ".polldance/storage.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub storage_path: PathBuf,
}

impl Config {
    /// Reads `SERVER_PROTOCOL`, `SERVER_IP`, `SERVER_PORT` and `POLLDANCE_STORAGE`,
    /// falling back to the local development server.
    pub fn load() -> Result<Self, ClientError> {
        Ok(Self {
            protocol: try_load("SERVER_PROTOCOL", DEFAULT_PROTOCOL)?,
            host: try_load("SERVER_IP", DEFAULT_HOST)?,
            port: try_load("SERVER_PORT", DEFAULT_PORT)?,
            storage_path: try_load("POLLDANCE_STORAGE", DEFAULT_STORAGE)?,
        })
    }

    pub fn base_url(&self) -> Result<Url, ClientError> {
        let raw = format!("{}://{}:{}", self.protocol, self.host, self.port);
        Url::parse(&raw).map_err(|e| ClientError::Config(format!("{raw}: {e}")))
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ClientError>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ClientError::Config(format!("{key}={raw}: {e}"))
    })
}
