use std::env;
use std::path::PathBuf;

use anyhow::Context;

pub mod cors;
pub mod request_id;
pub mod security;

pub use cors::create_cors_layer;
pub use request_id::MakeRequestUuid;
pub use security::SecurityHeadersLayer;

const DEFAULT_DATA_FILE: &str = "data/reviews.json";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8501";

#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    /// `RUST_ENV=production`; turns on HSTS.
    pub production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("KHOLLPOLL_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("KHOLLPOLL_PORT is not a valid port: '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            data_file: lookup("KHOLLPOLL_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
            host: lookup("KHOLLPOLL_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            allowed_origins,
            production: lookup("RUST_ENV")
                .map(|v| v.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        })
    }
}
