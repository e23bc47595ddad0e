//! Filesystem factory: builds and validates the filesystem of one shim

use super::filesystem::HadoopFileSystem;
use super::shim::{FileSystemKind, HadoopShim, FS_DEFAULT_FS};
use crate::cluster::{NamedCluster, ShimIdentity};
use crate::error::{Result, ShimError};
use std::sync::Arc;
use tracing::{debug, error};

/// Default filesystem URI for MapR clusters
pub const MAPR_DEFAULT_FS: &str = "maprfs:///";

/// Builds filesystems for the named clusters served by one shim
pub struct HadoopFileSystemFactory {
    active_configuration: bool,
    shim: Arc<dyn HadoopShim>,
    scheme: String,
    identity: ShimIdentity,
}

impl HadoopFileSystemFactory {
    pub fn new<S: Into<String>>(
        active_configuration: bool,
        shim: Arc<dyn HadoopShim>,
        scheme: S,
        identity: ShimIdentity,
    ) -> Self {
        Self {
            active_configuration,
            shim,
            scheme: scheme.into(),
            identity,
        }
    }

    /// Factory whose activity follows the identity's own flag
    pub fn from_identity<S: Into<String>>(
        shim: Arc<dyn HadoopShim>,
        scheme: S,
        identity: ShimIdentity,
    ) -> Self {
        Self::new(identity.active, shim, scheme, identity)
    }

    pub fn identity(&self) -> &ShimIdentity {
        &self.identity
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// True iff `cluster` names this factory's shim and the factory is active
    pub fn can_handle(&self, cluster: &NamedCluster) -> bool {
        self.active_configuration && cluster.shim_identifier() == Some(self.identity.id())
    }

    /// Default filesystem URI for `cluster`
    ///
    /// MapR clusters need no host. Others need a host and use an explicit
    /// `host:port` only when a port is configured.
    pub fn default_fs_uri(&self, cluster: &NamedCluster) -> Result<String> {
        if cluster.is_mapr() {
            return Ok(MAPR_DEFAULT_FS.to_string());
        }
        let host = cluster.hdfs_host().ok_or_else(|| ShimError::MissingHost {
            cluster: cluster.name().to_string(),
        })?;
        Ok(match cluster.hdfs_port() {
            Some(port) => format!("{}://{}:{}", self.scheme, host.trim(), port.trim()),
            None => format!("{}://{}", self.scheme, host.trim()),
        })
    }

    /// Open the distributed filesystem of `cluster`
    ///
    /// Shim failures propagate as `ShimError::Io`. A shim that hands back a
    /// local filesystem fails with `ShimError::LocalFileSystem`; distributed
    /// and vendor-specific (`Other`) filesystems are accepted.
    pub fn create(&self, cluster: &NamedCluster) -> Result<HadoopFileSystem> {
        let default_fs = self.default_fs_uri(cluster)?;

        let mut configuration = self.shim.create_configuration(cluster)?;
        configuration.set(FS_DEFAULT_FS, default_fs.as_str());

        let file_system = self.shim.get_file_system(&configuration)?;
        if let FileSystemKind::Local = file_system.kind() {
            error!(
                cluster = cluster.name(),
                shim = self.identity.id(),
                "got a local filesystem, was expecting an hdfs connection"
            );
            return Err(ShimError::LocalFileSystem {
                cluster: cluster.name().to_string(),
            });
        }

        debug!(
            cluster = cluster.name(),
            shim = self.identity.id(),
            kind = ?file_system.kind(),
            %default_fs,
            "created filesystem"
        );
        Ok(HadoopFileSystem::new(
            cluster.name().to_string(),
            self.scheme.clone(),
            file_system,
        ))
    }
}
