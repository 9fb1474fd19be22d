//! SQLite persistence for displayed forecasts (storing variant).

pub mod record;
pub mod store;

pub use record::WeatherRecord;
pub use store::{StoredRow, WeatherStore};
