// src/server/config.rs
//! Configuration file parsing for the Recipe Box server
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address, CORS
//! - [store] - Id scheme, delete policy, seed recipes

use crate::server::{validate_seed, ServerConfig};
use crate::store::{default_seed, DeletePolicy, IdScheme, NewRecipe};
use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct RecipeBoxConfig {
    /// Server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Store settings
    #[serde(default)]
    pub store: StoreSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// API bind address
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Enable the permissive CORS layer
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors: true,
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_true() -> bool {
    true
}

/// Store configuration section
#[derive(Debug, Deserialize)]
pub struct StoreSection {
    /// "uuid" or "sequential"
    #[serde(default)]
    pub id_scheme: IdScheme,

    /// "idempotent" or "strict"
    #[serde(default)]
    pub delete_policy: DeletePolicy,

    /// Recipes loaded at startup
    #[serde(default = "default_seed")]
    pub seed: Vec<NewRecipe>,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            id_scheme: IdScheme::default(),
            delete_policy: DeletePolicy::default(),
            seed: default_seed(),
        }
    }
}

impl RecipeBoxConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: RecipeBoxConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        validate_seed(&self.store.seed)
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|e| {
            Error::config(format!("invalid server.bind address '{}': {}", self.server.bind, e))
        })
    }

    /// Convert to the internal ServerConfig structure
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        Ok(ServerConfig {
            bind_addr: self.bind_addr()?,
            enable_cors: self.server.cors,
            id_scheme: self.store.id_scheme,
            delete_policy: self.store.delete_policy,
            seed: self.store.seed.clone(),
        })
    }
}
