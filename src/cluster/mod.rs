//! Cluster and identifier resolution
//!
//! - `NamedCluster`: a configured logical cluster carrying its shim identifier
//! - `ShimIdentity` / `ShimRegistry`: which shims exist and which is active
//! - `NamedClusterService`: resolves cluster names referenced by JDBC URLs

mod registry;
mod service;
mod types;

pub use registry::ShimRegistry;
pub use service::{InMemoryClusterService, NamedClusterService};
pub use types::{NamedCluster, ShimIdentity};
