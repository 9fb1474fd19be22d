//! HTTP client for the JMA "bosai" API.
//!
//! Two GETs, no retries: the area metadata document and the per-area
//! forecast document. Any non-200 response is a failure.

use crate::types::{AreaMetadata, ForecastDocument, JmaError};
use reqwest::Client;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct JmaClient {
    client: Client,
    area_url: Url,
    forecast_url: String,
}

impl JmaClient {
    /// Create a client with explicit endpoints. The public JMA defaults
    /// live in the application config.
    ///
    /// `forecast_url` must carry a `{code}` placeholder; the selected area
    /// code is substituted verbatim.
    pub fn with_endpoints(area_url: &str, forecast_url: &str) -> Result<Self, JmaError> {
        let area_url =
            Url::parse(area_url).map_err(|e| JmaError::Endpoint(format!("area_url: {}", e)))?;

        if !forecast_url.contains("{code}") {
            return Err(JmaError::Endpoint(
                "forecast_url is missing the {code} placeholder".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            area_url,
            forecast_url: forecast_url.to_string(),
        })
    }

    /// Fetch the area metadata document.
    pub async fn fetch_area_metadata(&self) -> Result<AreaMetadata, JmaError> {
        tracing::debug!("fetching area metadata from {}", self.area_url);

        let response = self.client.get(self.area_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("area metadata request returned HTTP {}", status);
            return Err(JmaError::Status(status.as_u16()));
        }

        let metadata = response
            .json::<AreaMetadata>()
            .await
            .map_err(|e| JmaError::parse(e.to_string()))?;

        tracing::info!("loaded {} offices", metadata.offices.len());
        Ok(metadata)
    }

    /// Fetch the forecast document for an area code.
    pub async fn fetch_forecast(&self, code: &str) -> Result<ForecastDocument, JmaError> {
        let url = self.forecast_url.replace("{code}", code);
        tracing::debug!("fetching forecast from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("forecast request for {} returned HTTP {}", code, status);
            return Err(JmaError::Status(status.as_u16()));
        }

        let document = response
            .json::<ForecastDocument>()
            .await
            .map_err(|e| JmaError::parse(e.to_string()))?;

        Ok(document)
    }
}
