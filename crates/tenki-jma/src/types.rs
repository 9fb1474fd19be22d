use serde::{Deserialize, Serialize};

/// One selectable forecast area: a display name plus the office code the
/// forecast API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaEntry {
    pub name: String,
    pub code: String,
}

/// One rendered forecast line: a sub-area name and its weather text
/// (multiple descriptions joined by newlines).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub area_name: String,
    pub text: String,
}

/// The area metadata document. Only the `offices` map is consumed;
/// insertion order of the source document is preserved.
#[derive(Debug, Deserialize)]
pub struct AreaMetadata {
    pub offices: serde_json::Map<String, serde_json::Value>,
}

/// A raw forecast document.
///
/// The document is treated as opaque JSON; the only shape the extractor
/// relies on is reports → `timeSeries` → `areas` → `weathers`.
pub type ForecastDocument = serde_json::Value;

/// JMA access errors.
#[derive(Debug, thiserror::Error)]
pub enum JmaError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    #[error("invalid endpoint: {0}")]
    Endpoint(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl JmaError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
