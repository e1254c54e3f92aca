//! Weather service for Sky Report
//!
//! Fetches cloud cover and temperature from Open-Meteo (forecast or archive,
//! depending on how far back the requested time lies), aligns the hourly data
//! with the requested time, and classifies the readings.

pub mod provider;
pub mod sample;
pub mod source;
pub mod types;

pub use provider::{WeatherObservation, WeatherProvider};
pub use sample::{select, select_or, SampleError, Snapshot, TimeSeries};
pub use source::WeatherSource;
pub use types::*;
