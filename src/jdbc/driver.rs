//! JDBC driver contract
//!
//! Vendor drivers loaded by shims implement `Driver`. Failures are reported
//! as `DriverError`s rather than panics, so callers can tell declines, soft
//! incompatibilities and hard failures apart.

use crate::error::DriverError;
use std::collections::BTreeMap;

/// Connection properties passed to `Driver::connect`
pub type Properties = BTreeMap<String, String>;

/// Version reported when no vendor driver is available
pub const UNKNOWN_VERSION: i32 = -1;

/// Description of one connection property a driver understands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverPropertyInfo {
    pub name: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub choices: Vec<String>,
}

impl DriverPropertyInfo {
    pub fn new<S: Into<String>>(name: S, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            value: value.map(str::to_string),
            ..Default::default()
        }
    }
}

/// Logging target a driver writes its diagnostics under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentLogger {
    pub target: String,
}

impl ParentLogger {
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
        }
    }
}

/// An open database session owned by a vendor driver
pub trait Connection: Send {
    fn close(&mut self) -> Result<(), DriverError>;

    fn is_closed(&self) -> bool;
}

/// A JDBC-style database driver
pub trait Driver: Send + Sync {
    /// Whether this driver can open connections to `url`
    fn accepts_url(&self, url: &str) -> Result<bool, DriverError>;

    /// Open a connection. `Ok(None)` means the driver declines the URL.
    fn connect(
        &self,
        url: &str,
        properties: &Properties,
    ) -> Result<Option<Box<dyn Connection>>, DriverError>;

    fn property_info(
        &self,
        url: &str,
        properties: &Properties,
    ) -> Result<Option<Vec<DriverPropertyInfo>>, DriverError>;

    fn major_version(&self) -> i32;

    fn minor_version(&self) -> i32;

    fn jdbc_compliant(&self) -> Result<bool, DriverError>;

    fn parent_logger(&self) -> Result<ParentLogger, DriverError>;
}
