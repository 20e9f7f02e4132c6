//! Subscriber setup for binaries and integration harnesses.
//!
//! The library itself only emits through `log` and `tracing`; installing a
//! subscriber is left to whoever owns the process.

use tracing_subscriber::EnvFilter;

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter` when the variable is unset or invalid. `log` records are
/// forwarded to the same subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(default_filter: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        init_logging("warn");
        assert!(!init_logging("debug"));
    }
}
