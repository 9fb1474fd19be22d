pub mod config;
pub mod error;

pub use config::{Config, JmaEndpoints};
pub use error::{ConfigError, DatabaseError, ForecastError, NetworkError};

use anyhow::Result;

/// Initialize tracing for the application.
///
/// Respects `RUST_LOG`; defaults to `info`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("tenki core initialized");
    Ok(())
}
