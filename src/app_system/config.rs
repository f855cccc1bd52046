use crate::clients::StockOnReject;
use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub actor_buffer_size: usize,
    pub stock_on_reject: StockOnReject,
    pub seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            actor_buffer_size: 32,
            stock_on_reject: StockOnReject::Retain,
            seed_file: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let server_port = match lookup("SERVER_PORT") {
            Some(raw) => raw.trim().parse().context("SERVER_PORT must be a port number")?,
            None => defaults.server_port,
        };
        let actor_buffer_size = match lookup("ACTOR_BUFFER_SIZE") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("ACTOR_BUFFER_SIZE must be a positive integer")?,
            None => defaults.actor_buffer_size,
        };
        if actor_buffer_size == 0 {
            bail!("ACTOR_BUFFER_SIZE must be a positive integer");
        }
        let restock = match lookup("RESTOCK_ON_REJECT") {
            Some(raw) => parse_flag(&raw).context("RESTOCK_ON_REJECT")?,
            None => false,
        };
        let stock_on_reject = if restock {
            StockOnReject::Restore
        } else {
            StockOnReject::Retain
        };

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            actor_buffer_size,
            stock_on_reject,
            seed_file: lookup("SEED_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.server_host, self.server_port))
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean flag, got {:?}", other),
    }
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
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.actor_buffer_size, 32);
        assert_eq!(config.stock_on_reject, StockOnReject::Retain);
        assert!(config.seed_file.is_none());
        assert_eq!(config.bind_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("ACTOR_BUFFER_SIZE", "4"),
            ("RESTOCK_ON_REJECT", "TRUE"),
            ("SEED_FILE", "seed.json"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.actor_buffer_size, 4);
        assert_eq!(config.stock_on_reject, StockOnReject::Restore);
        assert_eq!(config.seed_file, Some(PathBuf::from("seed.json")));
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup_from(&[("SERVER_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("ACTOR_BUFFER_SIZE", "0")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("RESTOCK_ON_REJECT", "maybe")])).is_err());
    }
}
