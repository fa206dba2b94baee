//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                    | Default                          |
//! |-----------------------------|----------------------------------|
//! | `TIENDA_HTTP_PORT`          | `8000`                           |
//! | `TIENDA_BIND_ADDR`          | `0.0.0.0`                        |
//! | `TIENDA_DB_PATH`            | platform data dir + `tienda.db`  |
//! | `TIENDA_DB_MAX_CONNECTIONS` | `5`                              |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use directories::ProjectDirs;

/// REST server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_addr: IpAddr,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: lookup("TIENDA_HTTP_PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TIENDA_HTTP_PORT".to_string()))?,

            bind_addr: lookup("TIENDA_BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TIENDA_BIND_ADDR".to_string()))?,

            db_path: match lookup("TIENDA_DB_PATH") {
                Some(path) if !path.trim().is_empty() => PathBuf::from(path),
                Some(_) => return Err(ConfigError::InvalidValue("TIENDA_DB_PATH".to_string())),
                None => default_db_path()?,
            },

            db_max_connections: lookup("TIENDA_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TIENDA_DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "TIENDA_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

/// Platform data directory:
/// - **Linux**: `~/.local/share/tienda-pos/tienda.db`
/// - **macOS**: `~/Library/Application Support/ec.tienda.pos/tienda.db`
/// - **Windows**: `%APPDATA%\tienda\pos\data\tienda.db`
fn default_db_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("ec", "tienda", "pos")
        .ok_or_else(|| ConfigError::MissingRequired("TIENDA_DB_PATH".to_string()))?;
    Ok(dirs.data_dir().join("tienda.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
