//! Configuration Module
//!
//! This module defines all configuration structures for the verifier.
//! Configuration is loaded from TOML files and parsed using serde.

use serde::Deserialize;
use std::fs;

/// Main configuration structure
///
/// Contains all configuration sections for the verifier.
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [rules]
/// shipment_model = "Cybertruck"
///
/// [api]
/// host = "127.0.0.1"
/// port = 8545
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rules: RulesConfig,
    pub api: ApiConfig,
}

/// Contract rule parameters
///
/// # Fields
/// - `shipment_model`: The vehicle model the shipment rules accept.
///   Proposals shipping any other model are rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    pub shipment_model: String,
}

/// API server configuration
///
/// Controls the JSON-RPC verification endpoint settings.
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on (e.g., 8545)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        // Read the file contents as a string
        let content = fs::read_to_string(path)?;

        // Parse the TOML into our Config structure
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }
}
