//! Hive JDBC routing
//!
//! - `url`: parse connection URLs and resolve their named cluster
//! - `driver`: the driver contract vendor drivers implement
//! - `hive`: `HiveDriver`, which delegates to one shim's vendor driver
//! - `manager`: `DriverManager`, which offers a URL to every registered driver

pub mod driver;
pub mod hive;
pub mod manager;
pub mod url;

pub use driver::{Connection, Driver, DriverPropertyInfo, ParentLogger, Properties, UNKNOWN_VERSION};
pub use hive::{ConnectOutcome, DeclineReason, DriverFlavor, HiveDriver, SIMBA_SPECIFIC_URL_PARAMETER};
pub use manager::DriverManager;
pub use self::url::{DefaultJdbcUrlParser, JdbcUrl, JdbcUrlParser, NAMED_CLUSTER_PROPERTY};
