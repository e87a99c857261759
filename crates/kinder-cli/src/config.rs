//! Gateway configuration

use config::{Config, Environment, File};
use kinder_core::TreeConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides, e.g. `KINDER__PORT=8080` or
/// `KINDER__AVL__DUPLICATES=ignore`
pub const ENV_PREFIX: &str = "KINDER";

/// Gateway server configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable debug logging
    pub debug: bool,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
    /// Enable CORS
    pub cors_enabled: bool,
    /// Settings of the age-ordered BST
    pub bst: TreeConfig,
    /// Settings of the id-ordered AVL tree
    pub avl: TreeConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            debug: false,
            max_body_size: 64 * 1024, // 64 KB
            cors_enabled: true,
            bst: TreeConfig::default(),
            avl: TreeConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load defaults, then the optional TOML file, then `KINDER__*`
    /// environment variables
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
