use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing for the named service. Call once at
/// startup.
///
/// JSON format; the filter comes from `RUST_LOG`, falling back to `info`.
/// Safe to call multiple times — subsequent calls are silently ignored.
pub fn init_tracing(service: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init()
        .is_ok();
    if initialized {
        tracing::info!(service, "tracing initialized");
    }
}
