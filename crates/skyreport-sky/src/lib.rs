//! Sky darkness estimation for Sky Report
//!
//! Estimates light pollution from proximity to major population centres.
//! Everything here is pure and synchronous.

pub mod cities;
pub mod geo;
pub mod light_pollution;

pub use cities::{CityReference, MAJOR_CITIES};
pub use geo::distance_km;
pub use light_pollution::{LightLevel, LightPollutionEstimator, SkyDarkness};
