// 📜 Logging - tracing subscriber setup for embedding applications
//
// The library only emits `tracing` events; the host decides where they go.

use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a compact fmt subscriber.
/// - Respects `RUST_LOG` if set, otherwise `info`
/// - Safe to call more than once; later calls are no-ops
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}
