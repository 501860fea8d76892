use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `level` when set. Fails if a subscriber is already
/// installed, which callers that may initialise twice can ignore.
pub fn init_tracing_with_level(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Failed to create tracing filter")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(false),
        )
        .with(filter)
        .try_init()
        .context("Failed to initialize tracing")?;

    tracing::debug!("Tracing initialized with level: {}", level);
    Ok(())
}

/// Subscriber for tests: output captured by the test harness, ignores re-init
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
