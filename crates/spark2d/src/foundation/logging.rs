//! Logging
//!
//! Thin wrapper over the `log` facade with an `env_logger` backend, so
//! binaries control verbosity through `RUST_LOG`.

pub use log::{debug, error, info, trace, warn};

/// Installs the `env_logger` backend; call once at startup
pub fn init() {
    env_logger::init();
}
