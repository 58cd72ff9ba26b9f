//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a global subscriber writing formatted events to stderr.
///
/// The filter is built from `config.trace_level` (any `EnvFilter`
/// directive string, e.g. `"headless_ui=debug"`), falling back to `"info"`
/// when unset or unparseable.
///
/// Idempotent: if a global subscriber is already installed this does nothing,
/// so tests and hosts can call it freely.
///
/// # Example
///
/// ```rust
/// use headless_ui::observability::init_tracing;
/// use headless_ui::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}
