//! JMA forecast access for tenki
//!
//! Talks to the Japan Meteorological Agency "bosai" API: area metadata
//! (the selectable offices) and per-area forecast documents, plus the
//! extraction of the descriptive weather text out of a forecast.

pub mod catalog;
pub mod client;
pub mod extract;
pub mod types;

pub use catalog::AreaCatalog;
pub use client::JmaClient;
pub use extract::extract;
pub use types::*;
