//! Named cluster and shim identity types
//!
//! Both are supplied by configuration and treated as read-only values by the
//! filesystem factory and the delegating driver.

use serde::{Deserialize, Serialize};

/// A configured logical reference to a physical Hadoop/Hive cluster
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedCluster {
    /// Unique cluster name, referenced from JDBC URLs
    pub name: String,

    /// Identifier of the shim that serves this cluster
    #[serde(default, rename = "shim")]
    pub shim_identifier: Option<String>,

    /// HDFS NameNode host
    #[serde(default)]
    pub hdfs_host: Option<String>,

    /// HDFS NameNode port, kept as configured
    #[serde(default)]
    pub hdfs_port: Option<String>,

    /// MapR clusters resolve their filesystem without an explicit host
    #[serde(default)]
    pub mapr: bool,
}

impl NamedCluster {
    /// Create a cluster with only a name
    ///
    /// # Example
    ///
    /// ```
    /// use bigdata_shims::cluster::NamedCluster;
    ///
    /// let cluster = NamedCluster::new("prod")
    ///     .with_shim("cdh61")
    ///     .with_hdfs("namenode", Some("8020"));
    /// assert_eq!(cluster.shim_identifier(), Some("cdh61"));
    /// assert!(!cluster.is_mapr());
    /// ```
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the shim identifier
    pub fn with_shim<S: Into<String>>(mut self, shim_identifier: S) -> Self {
        self.shim_identifier = Some(shim_identifier.into());
        self
    }

    /// Set HDFS host and optional port
    pub fn with_hdfs<S: Into<String>>(mut self, host: S, port: Option<&str>) -> Self {
        self.hdfs_host = Some(host.into());
        self.hdfs_port = port.map(str::to_string);
        self
    }

    /// Flag the cluster as MapR
    pub fn with_mapr(mut self, mapr: bool) -> Self {
        self.mapr = mapr;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shim_identifier(&self) -> Option<&str> {
        self.shim_identifier.as_deref()
    }

    pub fn hdfs_host(&self) -> Option<&str> {
        self.hdfs_host.as_deref().filter(|h| !h.trim().is_empty())
    }

    pub fn hdfs_port(&self) -> Option<&str> {
        self.hdfs_port.as_deref().filter(|p| !p.trim().is_empty())
    }

    pub fn is_mapr(&self) -> bool {
        self.mapr
    }
}

/// Self-declared identity of one registered shim
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShimIdentity {
    /// Opaque shim identifier, matched against `NamedCluster::shim_identifier`
    pub id: String,

    #[serde(default)]
    pub vendor: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Whether this shim is the active/default configuration
    #[serde(default)]
    pub active: bool,
}

impl ShimIdentity {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_vendor<S: Into<String>>(mut self, vendor: S, version: S) -> Self {
        self.vendor = Some(vendor.into());
        self.version = Some(version.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl std::fmt::Display for ShimIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.vendor, &self.version) {
            (Some(vendor), Some(version)) => write!(f, "{} ({} {})", self.id, vendor, version),
            _ => write!(f, "{}", self.id),
        }
    }
}
