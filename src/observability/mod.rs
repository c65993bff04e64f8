//! Logging setup
//!
//! Structured logs via `tracing`, filtered through `RUST_LOG` with a
//! sensible default, optionally rendered as JSON for log shippers.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TracingSettings;

/// Initialize the global tracing subscriber.
pub fn init_tracing(settings: &TracingSettings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lotkeeper_backend=debug,tower_http=debug,info"));

    let registry = tracing_subscriber::registry().with(filter);

    if settings.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    tracing::info!(service = %settings.service_name, "Tracing initialized");
    Ok(())
}
