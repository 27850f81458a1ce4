//! # SvgKit Common
//!
//! Logging setup shared by the SvgKit tools and benchmarks.
//!
//! ## Features
//!
//! - Pretty, compact and JSON output through `tracing-subscriber`
//! - `RUST_LOG` or explicit filter directives
//! - Debug, trace and production presets

use thiserror::Error;

pub mod logging;

pub use logging::{init_logging, try_init_logging, LogConfig, LogFormat};

/// Logging setup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    #[error("Unknown log format: {0} (expected pretty, compact or json)")]
    UnknownFormat(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}
