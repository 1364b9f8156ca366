use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,solar_system_demo=debug";

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        tracing::debug!("logging was already initialised");
    }
}
