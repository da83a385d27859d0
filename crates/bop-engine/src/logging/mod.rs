//! Logging utilities.
//!
//! This module centralizes logger initialization.
//! Library code only uses the standard `log` facade; the host decides
//! whether `env_logger` is installed.

mod init;

pub use init::{init_logging, LoggingConfig};
