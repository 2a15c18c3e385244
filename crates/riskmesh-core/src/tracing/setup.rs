//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the riskmesh logging system.
///
/// Reads `RISKMESH_LOG` for per-crate log levels, e.g.
/// `RISKMESH_LOG=riskmesh_engine=debug,riskmesh_cli=warn`. Falls back to
/// `DEFAULT_LOG_FILTER` when unset or invalid. Output goes to stderr so the
/// report on stdout stays machine-readable.
///
/// Idempotent. If another subscriber is already installed it is left alone.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
