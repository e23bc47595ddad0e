//! Observability module
//!
//! Structured logging through `tracing`, with text or JSON output.

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};
