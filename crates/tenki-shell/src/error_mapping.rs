//! Maps JMA access errors into the core hierarchy and into the strings
//! shown in the output region.

use tenki_core::error::ReqwestErrorExt;
use tenki_core::ForecastError;
use tenki_jma::JmaError;

/// Classify a failure of the startup metadata fetch.
pub fn metadata_error(error: JmaError) -> ForecastError {
    match error {
        JmaError::Network(e) => {
            ForecastError::MetadataUnavailable(e.into_network_error().to_string())
        }
        other => ForecastError::MetadataUnavailable(other.to_string()),
    }
}

/// Classify a failure of a forecast fetch-and-extract.
pub fn forecast_error(error: JmaError) -> ForecastError {
    match error {
        JmaError::Parse(cause) => ForecastError::Parse(cause),
        JmaError::Network(e) => {
            ForecastError::ForecastUnavailable(e.into_network_error().to_string())
        }
        other => ForecastError::ForecastUnavailable(other.to_string()),
    }
}

/// Render the message shown to the user for a forecast error.
///
/// Parse errors carry their underlying cause, matching the app's
/// `データ解析エラー: <cause>` wording.
pub fn message_for(error: &ForecastError) -> String {
    match error {
        ForecastError::Parse(cause) => format!("{}: {}", error.user_message(), cause),
        other => other.user_message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_keep_their_cause() {
        let error = forecast_error(JmaError::Parse("missing timeSeries".into()));
        assert_eq!(message_for(&error), "データ解析エラー: missing timeSeries");
    }

    #[test]
    fn status_errors_map_to_forecast_unavailable() {
        let error = forecast_error(JmaError::Status(503));
        assert!(matches!(error, ForecastError::ForecastUnavailable(_)));
        assert_eq!(message_for(&error), "天気予報データの取得に失敗しました。");
    }

    #[test]
    fn metadata_errors_have_their_own_message() {
        let error = metadata_error(JmaError::Status(500));
        assert_eq!(message_for(&error), "地域データの取得に失敗しました。");
    }
}
