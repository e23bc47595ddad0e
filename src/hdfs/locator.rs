//! Picks the filesystem factory that serves a named cluster

use super::factory::HadoopFileSystemFactory;
use super::filesystem::HadoopFileSystem;
use crate::cluster::NamedCluster;
use crate::error::Result;
use tracing::debug;

#[derive(Default)]
pub struct HadoopFileSystemLocator {
    factories: Vec<HadoopFileSystemFactory>,
}

impl HadoopFileSystemLocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, factory: HadoopFileSystemFactory) {
        self.factories.push(factory);
    }

    pub fn factories(&self) -> &[HadoopFileSystemFactory] {
        &self.factories
    }

    /// Filesystem for `cluster` from the first factory that can handle it
    ///
    /// `Ok(None)` when no registered factory handles the cluster.
    pub fn file_system(&self, cluster: &NamedCluster) -> Result<Option<HadoopFileSystem>> {
        match self.factories.iter().find(|f| f.can_handle(cluster)) {
            Some(factory) => factory.create(cluster).map(Some),
            None => {
                debug!(
                    cluster = cluster.name(),
                    shim = ?cluster.shim_identifier(),
                    "no filesystem factory handles cluster"
                );
                Ok(None)
            }
        }
    }
}
