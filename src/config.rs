//! TOML configuration
//!
//! ```toml
//! [logging]
//! level = "info"       # trace, debug, info, warn, error
//! format = "text"      # or "json"
//!
//! [[shims]]
//! id = "cdh61"
//! vendor = "Cloudera"
//! version = "6.1"
//! active = true
//!
//! [[clusters]]
//! name = "prod"
//! shim = "cdh61"
//! hdfs_host = "namenode"
//! hdfs_port = "8020"
//! ```

use crate::cluster::{InMemoryClusterService, NamedCluster, ShimIdentity, ShimRegistry};
use crate::error::{Result, ShimError};
use crate::observability::LogConfig;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Logging section of the configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format: text or json
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub shims: Vec<ShimIdentity>,
    #[serde(default)]
    pub clusters: Vec<NamedCluster>,
}

impl BridgeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn log_config(&self) -> Result<LogConfig> {
        LogConfig::from_section(&self.logging.level, &self.logging.format)
    }

    /// Registry of every configured shim
    ///
    /// Fails on duplicate identifiers or more than one active shim.
    pub fn shim_registry(&self) -> Result<ShimRegistry> {
        let mut registry = ShimRegistry::new();
        for identity in &self.shims {
            registry.register(identity.clone())?;
        }
        Ok(registry)
    }

    pub fn cluster_service(&self) -> InMemoryClusterService {
        InMemoryClusterService::with_clusters(self.clusters.iter().cloned())
    }

    /// Check shims, cluster names and cluster shim references
    pub fn validate(&self) -> Result<()> {
        let registry = self.shim_registry()?;
        let mut names = std::collections::HashSet::new();
        for cluster in &self.clusters {
            if cluster.name.is_empty() {
                return Err(ShimError::Config("cluster name must not be empty".to_string()));
            }
            if !names.insert(cluster.name.as_str()) {
                return Err(ShimError::Config(format!(
                    "cluster '{}' is defined more than once",
                    cluster.name
                )));
            }
            if let Some(shim) = cluster.shim_identifier() {
                if registry.get(shim).is_none() {
                    return Err(ShimError::Config(format!(
                        "cluster '{}' references unknown shim '{}'",
                        cluster.name, shim
                    )));
                }
            }
        }
        Ok(())
    }
}
