//! Server configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `BLOG_*` environment variables over config
//! files. Only the database URL has no default.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// A setting that is present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is required (set BLOG_DATABASE_URL)")]
    MissingDatabaseUrl,
    #[error("bind_addr {value:?} is not a socket address")]
    InvalidBindAddr { value: String },
}

/// Settings for the HTTP server and its database pool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Listen address, `host:port`.
    pub bind_addr: Option<String>,
    /// Upper bound on open connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Connections the pool keeps warm.
    #[ortho_config(default = 2)]
    pub pool_min_idle: u32,
    /// Seconds to wait for a free connection before failing a request.
    #[ortho_config(default = 30)]
    pub pool_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: None,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            pool_min_idle: DEFAULT_POOL_MIN_IDLE,
            pool_timeout_secs: DEFAULT_POOL_TIMEOUT_SECS,
        }
    }
}

impl AppSettings {
    /// The configured database URL.
    ///
    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// The listen address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim()
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
            })
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size
    }

    /// Warm connections, never more than the pool may hold.
    pub fn pool_min_idle(&self) -> u32 {
        self.pool_min_idle.min(self.pool_max_size)
    }

    pub fn pool_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_timeout_secs)
    }

    /// Pool configuration assembled from these settings.
    ///
    /// # Errors
    ///
    /// Fails when no database URL is configured.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size())
            .with_min_idle(Some(self.pool_min_idle()))
            .with_connection_timeout(self.pool_timeout()))
    }
}
