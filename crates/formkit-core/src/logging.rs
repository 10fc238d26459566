#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Library code logs through `tracing` unconditionally; installing a
//! subscriber is left to the application. With the `subscriber` feature this
//! module offers a ready-made fmt subscriber filtered by `FORMKIT_LOG`.

/// Environment variable holding the `EnvFilter` directive.
pub const ENV_LOG_FILTER: &str = "FORMKIT_LOG";

/// Directive used when `FORMKIT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Install a global fmt subscriber.
///
/// Returns `false` if another global subscriber was already installed.
#[cfg(feature = "subscriber")]
pub fn init() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(ENV_LOG_FILTER)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
