//! Multi-driver routing
//!
//! Keeps the registered drivers in order and offers each URL to them in
//! turn until one accepts it.

use super::driver::{Connection, Driver, Properties};
use crate::error::{Result, ShimError};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct DriverManager {
    drivers: Vec<Arc<dyn Driver>>,
}

impl DriverManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, driver: Arc<dyn Driver>) {
        self.drivers.push(driver);
    }

    pub fn drivers(&self) -> &[Arc<dyn Driver>] {
        &self.drivers
    }

    /// First driver accepting `url`. Drivers that fail the check are skipped.
    pub fn driver_for(&self, url: &str) -> Option<Arc<dyn Driver>> {
        self.drivers
            .iter()
            .find(|driver| matches!(driver.accepts_url(url), Ok(true)))
            .cloned()
    }

    /// Connect through the first driver that does not decline `url`
    ///
    /// A driver error stops the search and is returned as `ShimError::Driver`.
    pub fn connect(&self, url: &str, properties: &Properties) -> Result<Box<dyn Connection>> {
        for (index, driver) in self.drivers.iter().enumerate() {
            match driver.connect(url, properties)? {
                Some(conn) => {
                    debug!(url, driver = index, "connection established");
                    return Ok(conn);
                }
                None => debug!(url, driver = index, "driver declined"),
            }
        }
        Err(ShimError::NoSuitableDriver(url.to_string()))
    }
}
