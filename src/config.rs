use anyhow::{Context, Result};
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog snapshot
    pub catalog_path: String,

    // Server
    pub bind_addr: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            catalog_path: std::env::var("CATALOG_PATH").context("CATALOG_PATH not set")?,

            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.bind_addr, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["CATALOG_PATH", "BIND_ADDR", "PORT"] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        std::env::set_var("CATALOG_PATH", "/etc/catalog.json");

        let config = Config::from_env().expect("config");
        assert_eq!(config.catalog_path, "/etc/catalog.json");
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 8080);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("CATALOG_PATH", "catalog.json");
        std::env::set_var("BIND_ADDR", "127.0.0.1");
        std::env::set_var("PORT", "3000");

        let config = Config::from_env().expect("config");
        assert_eq!(config.socket_addr().expect("addr").to_string(), "127.0.0.1:3000");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_catalog_path() {
        clear_env();
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("CATALOG_PATH"));
    }

    #[test]
    #[serial]
    fn test_invalid_port_falls_back() {
        clear_env();
        std::env::set_var("CATALOG_PATH", "catalog.json");
        std::env::set_var("PORT", "not-a-port");

        assert_eq!(Config::from_env().expect("config").port, 8080);
        clear_env();
    }

    #[test]
    fn test_invalid_bind_addr() {
        let config = Config {
            catalog_path: "catalog.json".to_string(),
            bind_addr: "not an address".to_string(),
            port: 80,
        };
        assert!(config.socket_addr().is_err());
    }
}
