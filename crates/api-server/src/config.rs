use std::path::PathBuf;

use anyhow::{Context, Result};
use fund_analytics::LatencyProfile;
use fund_core::FundCatalog;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Sleep before each response to mimic network latency
    pub simulated_latency: bool,
    /// JSON catalog to serve instead of the built-in sample
    pub catalog_path: Option<PathBuf>,
    pub cors_allow_origin: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            simulated_latency: false,
            catalog_path: None,
            cors_allow_origin: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("API_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("API_PORT must be a port number, got {raw:?}"))?,
            None => defaults.port,
        };

        let simulated_latency = match non_empty("SIMULATED_LATENCY") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("SIMULATED_LATENCY must be true or false, got {raw:?}"))?,
            None => defaults.simulated_latency,
        };

        Ok(Self {
            host: non_empty("API_HOST").unwrap_or(defaults.host),
            port,
            simulated_latency,
            catalog_path: non_empty("FUND_CATALOG_PATH").map(PathBuf::from),
            cors_allow_origin: non_empty("CORS_ALLOW_ORIGIN"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn latency_profile(&self) -> LatencyProfile {
        if self.simulated_latency {
            LatencyProfile::realistic()
        } else {
            LatencyProfile::none()
        }
    }

    pub fn load_catalog(&self) -> Result<FundCatalog> {
        let Some(path) = &self.catalog_path else {
            return Ok(FundCatalog::sample());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fund catalog {}", path.display()))?;
        let catalog = FundCatalog::from_json(&json)
            .with_context(|| format!("Failed to load fund catalog {}", path.display()))?;
        Ok(catalog)
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.latency_profile(), LatencyProfile::none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8088"),
            ("SIMULATED_LATENCY", "TRUE"),
            ("CORS_ALLOW_ORIGIN", "http://localhost:5173"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8088");
        assert_eq!(config.latency_profile(), LatencyProfile::realistic());
        assert_eq!(config.cors_allow_origin.as_deref(), Some("http://localhost:5173"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServerConfig::from_lookup(lookup(&[("API_PORT", "eighty")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("SIMULATED_LATENCY", "maybe")])).is_err());
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let config = ServerConfig {
            catalog_path: Some(PathBuf::from("/definitely/not/here/funds.json")),
            ..ServerConfig::default()
        };
        assert!(config.load_catalog().is_err());
        assert_eq!(ServerConfig::default().load_catalog().unwrap().len(), 8);
    }
}
