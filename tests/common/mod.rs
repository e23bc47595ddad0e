//! Hand-written vendor driver and shim doubles shared by the integration tests

#![allow(dead_code)]

use bigdata_shims::cluster::NamedCluster;
use bigdata_shims::hdfs::{Configuration, FileStatus, FileSystemKind, HadoopShim, ShimFileSystem};
use bigdata_shims::jdbc::{Connection, Driver, DriverPropertyInfo, ParentLogger, Properties};
use bigdata_shims::DriverError;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct MockConnection {
    closed: Arc<AtomicBool>,
}

impl Connection for MockConnection {
    fn close(&mut self) -> Result<(), DriverError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// Vendor driver double. Errors are handed out once each.
#[derive(Default)]
pub struct MockDriver {
    /// `None` makes `accepts_url` fail
    pub accepts: Option<bool>,
    pub connect_error: Mutex<Option<DriverError>>,
    pub compliant_error: bool,
    pub compliant: Mutex<Vec<bool>>,
    pub logger_error: Mutex<Option<DriverError>>,
    pub property_info: Option<Vec<DriverPropertyInfo>>,
    pub major: i32,
    pub minor: i32,
    /// Set when the connection handed out by `connect` is closed
    pub connection_closed: Arc<AtomicBool>,
    pub accepts_calls: AtomicUsize,
    pub connect_calls: AtomicUsize,
}

impl MockDriver {
    pub fn accepting(accepts: bool) -> Self {
        Self {
            accepts: Some(accepts),
            ..Default::default()
        }
    }

    pub fn failing_connect(error: DriverError) -> Self {
        Self {
            accepts: Some(true),
            connect_error: Mutex::new(Some(error)),
            ..Default::default()
        }
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn accepts_calls(&self) -> usize {
        self.accepts_calls.load(Ordering::SeqCst)
    }
}

impl Driver for MockDriver {
    fn accepts_url(&self, _url: &str) -> Result<bool, DriverError> {
        self.accepts_calls.fetch_add(1, Ordering::SeqCst);
        self.accepts
            .ok_or_else(|| DriverError::sql("accepts_url failed", None))
    }

    fn connect(
        &self,
        _url: &str,
        _properties: &Properties,
    ) -> Result<Option<Box<dyn Connection>>, DriverError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.connect_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(Some(Box::new(MockConnection {
            closed: Arc::clone(&self.connection_closed),
        })))
    }

    fn property_info(
        &self,
        _url: &str,
        _properties: &Properties,
    ) -> Result<Option<Vec<DriverPropertyInfo>>, DriverError> {
        Ok(self.property_info.clone())
    }

    fn major_version(&self) -> i32 {
        self.major
    }

    fn minor_version(&self) -> i32 {
        self.minor
    }

    fn jdbc_compliant(&self) -> Result<bool, DriverError> {
        if self.compliant_error {
            return Err(DriverError::runtime("jdbc_compliant failed"));
        }
        let mut answers = self.compliant.lock().unwrap();
        Ok(if answers.is_empty() {
            false
        } else {
            answers.remove(0)
        })
    }

    fn parent_logger(&self) -> Result<ParentLogger, DriverError> {
        match self.logger_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(ParentLogger::new("vendor.hive")),
        }
    }
}

pub struct MockFileSystem {
    pub kind: FileSystemKind,
    pub uri: String,
    pub paths: Mutex<Vec<String>>,
}

impl ShimFileSystem for MockFileSystem {
    fn kind(&self) -> FileSystemKind {
        self.kind.clone()
    }

    fn uri(&self) -> String {
        self.uri.clone()
    }

    fn exists(&self, path: &str) -> io::Result<bool> {
        Ok(self.paths.lock().unwrap().iter().any(|p| p == path))
    }

    fn mkdirs(&self, path: &str) -> io::Result<bool> {
        self.paths.lock().unwrap().push(path.to_string());
        Ok(true)
    }

    fn delete(&self, path: &str, _recursive: bool) -> io::Result<bool> {
        let mut paths = self.paths.lock().unwrap();
        let before = paths.len();
        paths.retain(|p| p != path);
        Ok(paths.len() != before)
    }

    fn rename(&self, from: &str, to: &str) -> io::Result<bool> {
        let mut paths = self.paths.lock().unwrap();
        match paths.iter_mut().find(|p| p.as_str() == from) {
            Some(p) => {
                *p = to.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_status(&self, _path: &str) -> io::Result<Vec<FileStatus>> {
        Ok(self
            .paths
            .lock()
            .unwrap()
            .iter()
            .map(|p| FileStatus {
                path: p.clone(),
                len: 0,
                is_dir: true,
            })
            .collect())
    }
}

/// Shim double recording the configuration it was asked to open
pub struct MockShim {
    pub kind: FileSystemKind,
    pub configuration_error: Option<io::ErrorKind>,
    pub file_system_error: Option<io::ErrorKind>,
    pub last_configuration: Mutex<Option<Configuration>>,
    pub configuration_calls: AtomicUsize,
}

impl MockShim {
    pub fn new(kind: FileSystemKind) -> Self {
        Self {
            kind,
            configuration_error: None,
            file_system_error: None,
            last_configuration: Mutex::new(None),
            configuration_calls: AtomicUsize::new(0),
        }
    }

    pub fn distributed() -> Self {
        Self::new(FileSystemKind::Distributed)
    }

    pub fn last_default_fs(&self) -> Option<String> {
        self.last_configuration
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|c| c.default_fs().map(str::to_string))
    }
}

impl HadoopShim for MockShim {
    fn create_configuration(&self, cluster: &NamedCluster) -> io::Result<Configuration> {
        self.configuration_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(kind) = self.configuration_error {
            return Err(io::Error::new(kind, "createConfiguration failed"));
        }
        let mut conf = Configuration::new();
        conf.set("pentaho.cluster.name", cluster.name());
        Ok(conf)
    }

    fn get_file_system(&self, configuration: &Configuration) -> io::Result<Box<dyn ShimFileSystem>> {
        *self.last_configuration.lock().unwrap() = Some(configuration.clone());
        if let Some(kind) = self.file_system_error {
            return Err(io::Error::new(kind, "getFileSystem failed"));
        }
        Ok(Box::new(MockFileSystem {
            kind: self.kind.clone(),
            uri: configuration.default_fs().unwrap_or_default().to_string(),
            paths: Mutex::new(Vec::new()),
        }))
    }
}
