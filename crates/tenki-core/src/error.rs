//! Centralized error types for the tenki application.
//!
//! This module provides the typed errors the pipeline runs on:
//! - Per-layer enums with precise variants for handling and logging
//! - The user-facing messages the shell renders, via `user_message()`
//! - Extension traits converting library errors into the typed enums

use thiserror::Error;

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Database/storage errors (SQLite, local state).
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Forecast pipeline errors, as surfaced to the user.
///
/// The user messages are the wording the app displays in the output
/// region; the `Display` forms are for logs.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("area metadata unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("forecast unavailable: {0}")]
    ForecastUnavailable(String),

    #[error("no area selected")]
    NoSelection,

    #[error("unknown area: {0}")]
    UnknownArea(String),

    #[error("forecast parse error: {0}")]
    Parse(String),
}

impl ForecastError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ForecastError::MetadataUnavailable(_) => "地域データの取得に失敗しました。",
            ForecastError::ForecastUnavailable(_) => "天気予報データの取得に失敗しました。",
            ForecastError::NoSelection => "地域を選択してください。",
            ForecastError::UnknownArea(_) => "地域コードが見つかりません。",
            ForecastError::Parse(_) => "データ解析エラー",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_database_error(self) -> DatabaseError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_database_error(self) -> DatabaseError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                DatabaseError::Corruption(self.to_string())
            }
            _ => DatabaseError::QueryFailed(self.to_string()),
        }
    }
}
