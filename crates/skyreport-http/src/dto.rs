//! Request and response bodies, and their validation.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use skyreport_core::{Coordinate, ValidationError};

/// Query string for `GET /api/v1/sky-condition`.
///
/// Fields stay strings so each failure gets its own message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkyConditionQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub time: Option<String>,
}

/// Body for `POST /api/v1/sky-condition`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkyConditionRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// RFC 3339; omitted or empty means now
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

/// A validated sky-condition request.
#[derive(Debug, Clone, PartialEq)]
pub struct SkyConditionParams {
    pub coordinate: Coordinate,
    pub time: Option<DateTime<FixedOffset>>,
}

/// Parse an optional RFC 3339 time; absent or empty means now.
pub fn parse_time(raw: Option<&str>) -> Result<Option<DateTime<FixedOffset>>, ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(Some)
            .map_err(|_| ValidationError::InvalidTime(s.to_string())),
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber(field.to_string()))
}

impl TryFrom<SkyConditionQuery> for SkyConditionParams {
    type Error = ValidationError;

    fn try_from(query: SkyConditionQuery) -> Result<Self, Self::Error> {
        let (Some(lat), Some(lon)) = (
            query.lat.filter(|s| !s.is_empty()),
            query.lon.filter(|s| !s.is_empty()),
        ) else {
            return Err(ValidationError::MissingParameter("lat and lon".to_string()));
        };

        let latitude = parse_number("latitude", &lat)?;
        let longitude = parse_number("longitude", &lon)?;

        Ok(Self {
            coordinate: Coordinate::new(latitude, longitude)?,
            time: parse_time(query.time.as_deref())?,
        })
    }
}

impl TryFrom<SkyConditionRequest> for SkyConditionParams {
    type Error = ValidationError;

    fn try_from(request: SkyConditionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            coordinate: Coordinate::new(request.latitude, request.longitude)?,
            time: parse_time(request.time.as_deref())?,
        })
    }
}
