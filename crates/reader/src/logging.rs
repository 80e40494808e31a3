//! Diagnostic logging setup

use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact stderr subscriber
///
/// `RUST_LOG` takes precedence over `level`. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_tracing(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .is_ok();

    if installed {
        debug!("ectester logging initialized");
    }
    installed
}
