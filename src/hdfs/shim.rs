//! Capabilities a Hadoop shim provides to the filesystem factory

use crate::cluster::NamedCluster;
use std::collections::BTreeMap;
use std::io;

/// Configuration key holding the default filesystem URI
pub const FS_DEFAULT_FS: &str = "fs.defaultFS";

/// Hadoop-style string configuration built by a shim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    props: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.props.insert(key.into(), value.into());
    }

    pub fn default_fs(&self) -> Option<&str> {
        self.get(FS_DEFAULT_FS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// What kind of filesystem a shim actually produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemKind {
    Distributed,
    Local,
    /// Any other implementation, by name
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: String,
    pub len: u64,
    pub is_dir: bool,
}

/// Filesystem handle returned by a shim
pub trait ShimFileSystem: Send + Sync {
    /// Kind of the concrete implementation behind this handle
    fn kind(&self) -> FileSystemKind;

    fn uri(&self) -> String;

    fn exists(&self, path: &str) -> io::Result<bool>;

    fn mkdirs(&self, path: &str) -> io::Result<bool>;

    fn delete(&self, path: &str, recursive: bool) -> io::Result<bool>;

    fn rename(&self, from: &str, to: &str) -> io::Result<bool>;

    fn list_status(&self, path: &str) -> io::Result<Vec<FileStatus>>;
}

/// One vendor's Hadoop client library
pub trait HadoopShim: Send + Sync {
    fn create_configuration(&self, cluster: &NamedCluster) -> io::Result<Configuration>;

    fn get_file_system(&self, configuration: &Configuration) -> io::Result<Box<dyn ShimFileSystem>>;
}
