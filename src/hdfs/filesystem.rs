//! Validated filesystem handle
//!
//! A `HadoopFileSystem` is only created by `HadoopFileSystemFactory` after the
//! shim's filesystem has been checked to be distributed.

use super::shim::{FileStatus, ShimFileSystem};
use std::fmt;
use std::io;

pub struct HadoopFileSystem {
    cluster_name: String,
    scheme: String,
    inner: Box<dyn ShimFileSystem>,
}

impl HadoopFileSystem {
    pub(crate) fn new(cluster_name: String, scheme: String, inner: Box<dyn ShimFileSystem>) -> Self {
        Self {
            cluster_name,
            scheme,
            inner,
        }
    }

    pub fn cluster_name(&self) -> &str {
        &self.cluster_name
    }

    /// Scheme of the factory that produced this handle
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn uri(&self) -> String {
        self.inner.uri()
    }

    pub fn exists(&self, path: &str) -> io::Result<bool> {
        self.inner.exists(path)
    }

    pub fn mkdirs(&self, path: &str) -> io::Result<bool> {
        self.inner.mkdirs(path)
    }

    pub fn delete(&self, path: &str, recursive: bool) -> io::Result<bool> {
        self.inner.delete(path, recursive)
    }

    pub fn rename(&self, from: &str, to: &str) -> io::Result<bool> {
        self.inner.rename(from, to)
    }

    pub fn list_status(&self, path: &str) -> io::Result<Vec<FileStatus>> {
        self.inner.list_status(path)
    }
}

impl fmt::Debug for HadoopFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HadoopFileSystem")
            .field("cluster_name", &self.cluster_name)
            .field("scheme", &self.scheme)
            .field("uri", &self.inner.uri())
            .finish()
    }
}
