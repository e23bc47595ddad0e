//! Named cluster lookup
//!
//! JDBC URLs reference clusters by name; the service resolves that name
//! into the configured `NamedCluster`.

use super::NamedCluster;
use crate::error::{Result, ShimError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Source of named cluster definitions
pub trait NamedClusterService: Send + Sync {
    /// Look up a cluster by name. `Ok(None)` means no such cluster.
    fn read(&self, name: &str) -> Result<Option<NamedCluster>>;

    /// All known clusters, sorted by name.
    fn list(&self) -> Result<Vec<NamedCluster>>;
}

/// Named cluster storage held in memory
#[derive(Clone, Default)]
pub struct InMemoryClusterService {
    clusters: Arc<RwLock<HashMap<String, NamedCluster>>>,
}

impl InMemoryClusterService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clusters<I: IntoIterator<Item = NamedCluster>>(clusters: I) -> Self {
        let map = clusters
            .into_iter()
            .map(|c| (c.name.clone(), c))
            .collect::<HashMap<_, _>>();
        Self {
            clusters: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace a cluster, returning the previous definition
    pub fn insert(&self, cluster: NamedCluster) -> Result<Option<NamedCluster>> {
        let mut clusters = self
            .clusters
            .write()
            .map_err(|e| ShimError::ClusterLookup(e.to_string()))?;
        Ok(clusters.insert(cluster.name.clone(), cluster))
    }

    pub fn remove(&self, name: &str) -> Result<Option<NamedCluster>> {
        let mut clusters = self
            .clusters
            .write()
            .map_err(|e| ShimError::ClusterLookup(e.to_string()))?;
        Ok(clusters.remove(name))
    }
}

impl NamedClusterService for InMemoryClusterService {
    fn read(&self, name: &str) -> Result<Option<NamedCluster>> {
        let clusters = self
            .clusters
            .read()
            .map_err(|e| ShimError::ClusterLookup(e.to_string()))?;
        Ok(clusters.get(name).cloned())
    }

    fn list(&self) -> Result<Vec<NamedCluster>> {
        let clusters = self
            .clusters
            .read()
            .map_err(|e| ShimError::ClusterLookup(e.to_string()))?;
        let mut all: Vec<_> = clusters.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_read_remove() {
        let service = InMemoryClusterService::new();
        assert!(service.read("prod").unwrap().is_none());

        service
            .insert(NamedCluster::new("prod").with_shim("cdh61"))
            .unwrap();
        let cluster = service.read("prod").unwrap().unwrap();
        assert_eq!(cluster.shim_identifier(), Some("cdh61"));

        let previous = service
            .insert(NamedCluster::new("prod").with_shim("hdp30"))
            .unwrap();
        assert_eq!(previous.unwrap().shim_identifier(), Some("cdh61"));

        assert!(service.remove("prod").unwrap().is_some());
        assert!(service.read("prod").unwrap().is_none());
    }

    #[test]
    fn test_list_sorted() {
        let service = InMemoryClusterService::with_clusters(vec![
            NamedCluster::new("b"),
            NamedCluster::new("a"),
        ]);
        let names: Vec<_> = service
            .list()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_clones_share_storage() {
        let service = InMemoryClusterService::new();
        let clone = service.clone();
        clone.insert(NamedCluster::new("shared")).unwrap();
        assert!(service.read("shared").unwrap().is_some());
    }
}
