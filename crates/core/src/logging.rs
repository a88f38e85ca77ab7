//! Logging initialisation
//!
//! Native builds log to stderr through `tracing-subscriber`; in the browser
//! events go to the developer console via `tracing-web`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directives when `RUST_LOG` is not set
fn default_directives(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    format!("timeline_core={level},timeline_http={level},timeline_router={level}")
}

/// Initialize logging for the current target
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: Level) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;

    Ok(())
}

/// Initialize logging for the current target
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: Level) -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_web::MakeWebConsoleWriter;

    let env_filter =
        EnvFilter::try_new(default_directives(level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
