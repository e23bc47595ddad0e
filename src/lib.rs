pub mod cluster;
pub mod config;
pub mod error;
pub mod hdfs;
pub mod jdbc;
pub mod observability;

pub use config::BridgeConfig;
pub use error::{DriverError, Result, ShimError, SQL_STATE_NOT_SUPPORTED};
pub use hdfs::{HadoopFileSystemFactory, HadoopFileSystemLocator};
pub use jdbc::{DriverManager, HiveDriver};
