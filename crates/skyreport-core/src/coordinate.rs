//! Geographic coordinate validated at the request boundary.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A point on the Earth's surface in decimal degrees.
///
/// Construct through [`Coordinate::new`] so that out-of-range values never
/// reach the estimator or the weather provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Validate and build a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Latitude`] or [`ValidationError::Longitude`]
    /// when a component is out of range or not a number.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}
