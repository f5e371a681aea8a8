use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Installs the global structured-logging subscriber.
///
/// `RUST_LOG` in the environment wins; otherwise the crate logs at the level
/// named in `config.rust_log`. Calling this twice is harmless: the second
/// registration is ignored.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    tracing::info!("Resume editor core v{}", env!("CARGO_PKG_VERSION"));
}
