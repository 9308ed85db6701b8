//! Logging setup for the Murmur binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the calling crate and the binary get the default level. `RUST_LOG`
/// overrides the whole filter when set.
///
/// # Arguments
///
/// * `crate_name` - The library crate of the binary (e.g., "murmur-server")
/// * `binary_name` - The name of the binary (e.g., "murmur-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
///
/// # Examples
///
/// ```no_run
/// use murmur_shared::logger::setup_logger;
///
/// setup_logger(env!("CARGO_PKG_NAME"), "murmur-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Crate and binary names are normalised to their module form (`-` → `_`),
/// and the shared crate is always included so wire-level logs show up.
pub fn default_filter(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    let mut targets = vec![
        crate_name.replace('-', "_"),
        binary_name.replace('-', "_"),
        env!("CARGO_PKG_NAME").replace('-', "_"),
    ];
    targets.dedup();

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}
