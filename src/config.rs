//! Configuration management for quarrychain

use crate::error::ChainError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub miner: MinerConfig,
}

#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

#[derive(Debug, Default, Deserialize)]
pub struct MinerConfig {
    /// Reward address for blocks mined by this node. When unset, the node
    /// generates a fresh wallet at startup and logs its keys.
    #[serde(default)]
    pub address: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            api_port: default_api_port(),
        }
    }
}

fn default_api_port() -> u16 {
    5000
}

/// Load configuration from `path`. An absent file yields the defaults; a
/// present file must parse, and a set `miner.address` must be non-empty.
pub fn load_config(path: &Path) -> Result<Config, ChainError> {
    let config_str = fs::read_to_string(path).unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        Config::default()
    } else {
        toml::from_str(&config_str)
            .map_err(|e| ChainError::Config(format!("Failed to parse {}: {}", path.display(), e)))?
    };

    if let Some(address) = &config.miner.address {
        if address.is_empty() {
            return Err(ChainError::Config(
                "miner.address must not be empty when set".to_string(),
            ));
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_absent_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config.network.api_port, 5000);
        assert!(config.miner.address.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[miner]\naddress = \"abc123\"").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.network.api_port, 5000);
        assert_eq!(config.miner.address.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_full_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[network]\napi_port = 9000\n\n[miner]\naddress = \"abc123\"").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.network.api_port, 9000);
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "network = not toml").unwrap();

        let result = load_config(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_empty_miner_address_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[miner]\naddress = \"\"").unwrap();

        assert!(load_config(&path).is_err());
    }
}
