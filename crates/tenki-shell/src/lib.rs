//! Presentation session for tenki
//!
//! Owns the selection, the trigger action and the output state; the
//! front-end only renders what the session exposes.

pub mod error_mapping;
pub mod session;
pub mod source;

pub use error_mapping::{forecast_error, message_for, metadata_error};
pub use session::{ForecastSession, Outcome, SessionState};
pub use source::{ForecastSource, JmaForecastSource};
