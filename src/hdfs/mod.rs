//! HDFS filesystem creation through shims
//!
//! - `shim`: what a vendor shim offers (configuration, filesystem handles)
//! - `factory`: `HadoopFileSystemFactory`, one per shim
//! - `locator`: finds the factory serving a named cluster

mod factory;
mod filesystem;
mod locator;
pub mod shim;

pub use factory::{HadoopFileSystemFactory, MAPR_DEFAULT_FS};
pub use filesystem::HadoopFileSystem;
pub use locator::HadoopFileSystemLocator;
pub use shim::{Configuration, FileStatus, FileSystemKind, HadoopShim, ShimFileSystem, FS_DEFAULT_FS};
