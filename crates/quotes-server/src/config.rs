use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

/// Server settings, read from `QUOTES_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    /// Public site root used in permalinks.
    pub base_url: String,
    pub random_limit: usize,
    pub request_timeout: Duration,
    /// Token registered at startup so a fresh database can accept writes.
    pub bootstrap_token: Option<String>,
    /// Tokens marked inactive at startup.
    pub revoke_tokens: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port: u16 = var("QUOTES_PORT", "3000")
            .parse()
            .context("QUOTES_PORT must be a port number")?;
        let random_limit: usize = var("QUOTES_RANDOM_LIMIT", "25")
            .parse()
            .context("QUOTES_RANDOM_LIMIT must be a positive integer")?;
        if random_limit == 0 {
            bail!("QUOTES_RANDOM_LIMIT must be at least 1");
        }
        let timeout_secs: u64 = var("QUOTES_REQUEST_TIMEOUT_SECS", "10")
            .parse()
            .context("QUOTES_REQUEST_TIMEOUT_SECS must be a number of seconds")?;

        Ok(Self {
            host: var("QUOTES_HOST", "0.0.0.0"),
            port,
            db_path: var("QUOTES_DB_PATH", "quotes.db").into(),
            base_url: var("QUOTES_BASE_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
            random_limit,
            request_timeout: Duration::from_secs(timeout_secs),
            bootstrap_token: lookup("QUOTES_BOOTSTRAP_TOKEN").filter(|t| !t.trim().is_empty()),
            revoke_tokens: var("QUOTES_REVOKE_TOKENS", "")
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
