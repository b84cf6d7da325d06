//! Configuration types and loading

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Attachment storage configuration
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory uploaded files are written to
    pub local_path: String,
    /// URL prefix attachment references are issued under
    pub public_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                max_body_size_bytes: 25 * 1024 * 1024, // 25MB
            },
            storage: StorageConfig {
                local_path: "uploads".to_string(),
                public_path: "/uploads".to_string(),
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Server
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse_value("PORT", &port)?;
        }
        if let Some(size) = lookup("MAX_BODY_SIZE_BYTES") {
            config.server.max_body_size_bytes = parse_value("MAX_BODY_SIZE_BYTES", &size)?;
        }

        // Storage
        if let Some(path) = lookup("ROSTER_UPLOADS_PATH") {
            config.storage.local_path = path;
        }
        if let Some(url) = lookup("ROSTER_UPLOADS_URL") {
            config.storage.public_path = parse_public_path("ROSTER_UPLOADS_URL", &url)?;
        }

        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// Public paths are absolute and never the bare root
fn parse_public_path(key: &str, raw: &str) -> Result<String, ConfigError> {
    let path = raw.trim().trim_end_matches('/');
    if !path.starts_with('/') {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{:?} must be an absolute path such as /uploads", raw),
        });
    }
    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.local_path, "uploads");
        assert_eq!(config.storage.public_path, "/uploads");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8088"),
            ("ROSTER_UPLOADS_PATH", "/tmp/roster"),
            ("ROSTER_UPLOADS_URL", "/files/"),
        ]))
        .unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.storage.local_path, "/tmp/roster");
        assert_eq!(config.storage.public_path, "/files");
    }

    #[test]
    fn test_invalid_port() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == "PORT"));
    }

    #[test]
    fn test_invalid_uploads_url() {
        for raw in ["uploads", "uploads/", "/", "", "  "] {
            let result = AppConfig::from_lookup(lookup_from(&[("ROSTER_UPLOADS_URL", raw)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { ref key, .. }) if key == "ROSTER_UPLOADS_URL"),
                "expected InvalidValue for {raw:?}"
            );
        }
    }

    #[test]
    fn test_server_addr() {
        let config = AppConfig::default();
        let addr = config.server_addr();
        assert_eq!(addr.port(), 5000);
    }
}
