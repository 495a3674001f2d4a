//! Logging initialization for embedding applications
//!
//! The crate itself only emits `tracing` events; wiring up a subscriber is
//! the host application's call. This helper sets up the conventional one:
//! `RUST_LOG`-driven filtering, stderr output, no ANSI.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Build an EnvFilter from `RUST_LOG`, defaulting to `info`
fn build_env_filter() -> tracing_subscriber::EnvFilter {
    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        if !rust_log.is_empty() {
            return tracing_subscriber::EnvFilter::new(rust_log);
        }
    }

    tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into())
}

/// Initialize a stderr subscriber, ignoring a previously installed one
///
/// Safe to call more than once; only the first call wins.
pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    drop(
        tracing_subscriber::registry()
            .with(build_env_filter())
            .with(fmt_layer)
            .try_init(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
