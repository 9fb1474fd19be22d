//! Forecast source seam.
//!
//! The session talks to a `ForecastSource` rather than the HTTP client
//! directly, so tests can inject a scripted backend and assert that guard
//! paths issue no fetch at all.

use tenki_jma::{extract, DisplayLine, JmaClient, JmaError};

/// A blocking fetch-and-extract for one area code.
pub trait ForecastSource: Send {
    fn fetch_lines(&self, code: &str) -> Result<Vec<DisplayLine>, JmaError>;
}

/// The real source: async JMA client driven to completion on a runtime
/// handle, blocking the presentation thread for the duration.
pub struct JmaForecastSource {
    client: JmaClient,
    runtime: tokio::runtime::Handle,
}

impl JmaForecastSource {
    pub fn new(client: JmaClient, runtime: tokio::runtime::Handle) -> Self {
        Self { client, runtime }
    }
}

impl ForecastSource for JmaForecastSource {
    fn fetch_lines(&self, code: &str) -> Result<Vec<DisplayLine>, JmaError> {
        let document = self.runtime.block_on(self.client.fetch_forecast(code))?;
        extract(&document)
    }
}
