//! Logging setup
//!
//! Log lines go to stdout with a timestamp and level. `--debug` lowers the
//! default level from `info` to `debug`; `RUST_LOG` overrides both.

use tracing_subscriber::EnvFilter;

use crate::error::{ReclaimError, Result};

fn default_directive(debug: bool) -> &'static str {
    if debug { "reclaim=debug,info" } else { "info" }
}

pub fn init(debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .try_init()
        .map_err(|e| ReclaimError::LoggingInitFailed {
            message: e.to_string(),
        })
}
