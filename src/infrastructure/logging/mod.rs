// Logging module - Logging infrastructure
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use std::io;

/// Build the filter: `RUST_LOG` wins, otherwise `llmctl=<level>`.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("llmctl={},warn", level)))
        .unwrap_or_else(|_| EnvFilter::new("llmctl=info,warn"))
}

/// Initialize logging system. Everything goes to stderr so stdout only
/// carries report and log output.
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_level(true)
        )
        .try_init()?;

    tracing::debug!("llmctl logging system initialized");
    Ok(())
}
