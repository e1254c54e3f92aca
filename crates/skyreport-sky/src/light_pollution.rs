//! Light pollution estimate from proximity to major cities.
//!
//! The model takes the brightest single city contribution
//! (population in millions over distance in km) among cities within
//! [`INFLUENCE_RADIUS_KM`], maps it onto the Bortle scale, then nudges the
//! result by one level for very remote or very urban locations.

use serde::{Deserialize, Serialize};
use skyreport_core::Coordinate;

use crate::cities::{CityReference, MAJOR_CITIES};
use crate::geo::distance_km;

/// Cities farther than this contribute no sky glow.
pub const INFLUENCE_RADIUS_KM: f64 = 500.0;
/// Beyond this nearest-city distance the sky improves by one level.
pub const REMOTE_DISTANCE_KM: f64 = 200.0;
/// Within this nearest-city distance the sky worsens by one level.
pub const URBAN_DISTANCE_KM: f64 = 20.0;

const BASELINE_SCORE: f64 = 1.0;

/// Upper bounds (exclusive) of the pollution score for Bortle classes 1..=8.
const BORTLE_THRESHOLDS: [f64; 8] = [0.05, 0.1, 0.5, 1.5, 3.0, 6.0, 12.0, 25.0];

/// Level and SQM for Bortle classes 1..=9.
const BORTLE_TABLE: [(LightLevel, f64); 9] = [
    (LightLevel::Excellent, 21.9),
    (LightLevel::Excellent, 21.7),
    (LightLevel::Good, 21.4),
    (LightLevel::Good, 20.8),
    (LightLevel::Moderate, 19.8),
    (LightLevel::Moderate, 19.1),
    (LightLevel::Poor, 18.5),
    (LightLevel::VeryPoor, 18.0),
    (LightLevel::VeryPoor, 17.5),
];

/// Qualitative light pollution level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightLevel {
    Excellent,
    Good,
    Moderate,
    Poor,
    VeryPoor,
}

impl LightLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
            Self::VeryPoor => "very_poor",
        }
    }
}

impl std::fmt::Display for LightLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sky darkness at a location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyDarkness {
    /// 1 (darkest) to 9 (inner city)
    pub bortle_scale: u8,
    pub level: LightLevel,
    /// Sky Quality Meter reading in mag/arcsec²
    pub sqm: f64,
}

impl SkyDarkness {
    /// Look up level and SQM for a Bortle class; out-of-range input is clamped.
    pub fn from_bortle(scale: u8) -> Self {
        let scale = scale.clamp(1, 9);
        let (level, sqm) = BORTLE_TABLE[usize::from(scale - 1)];
        Self {
            bortle_scale: scale,
            level,
            sqm,
        }
    }
}

/// Raw model output before classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollutionSample {
    pub score: f64,
    pub closest_distance_km: f64,
}

/// Map a pollution score onto Bortle classes 1..=9, before proximity correction.
pub fn bortle_from_score(score: f64) -> u8 {
    BORTLE_THRESHOLDS
        .iter()
        .position(|&upper| score < upper)
        .map_or(9, |i| i as u8 + 1)
}

#[derive(Debug, Clone, Copy)]
pub struct LightPollutionEstimator {
    cities: &'static [CityReference],
}

impl Default for LightPollutionEstimator {
    fn default() -> Self {
        Self::with_cities(MAJOR_CITIES)
    }
}

impl LightPollutionEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cities(cities: &'static [CityReference]) -> Self {
        Self { cities }
    }

    /// Score and nearest-city distance for a coordinate.
    pub fn measure(&self, coordinate: Coordinate) -> PollutionSample {
        let mut score = BASELINE_SCORE;
        let mut closest_distance_km = f64::INFINITY;

        for city in self.cities {
            let distance = distance_km(coordinate, city.coordinate());
            closest_distance_km = closest_distance_km.min(distance);

            if distance < INFLUENCE_RADIUS_KM {
                let contribution = city.population_millions / distance.max(1.0);
                score = score.max(contribution);
            }
        }

        PollutionSample {
            score,
            closest_distance_km,
        }
    }

    /// Estimate sky darkness at a coordinate.
    pub fn estimate(&self, coordinate: Coordinate) -> SkyDarkness {
        let sample = self.measure(coordinate);
        let mut scale = bortle_from_score(sample.score);

        if sample.closest_distance_km > REMOTE_DISTANCE_KM {
            scale = scale.saturating_sub(1).max(1);
        } else if sample.closest_distance_km < URBAN_DISTANCE_KM {
            scale = (scale + 1).min(9);
        }

        tracing::debug!(
            score = sample.score,
            closest_km = sample.closest_distance_km,
            bortle = scale,
            "Estimated light pollution"
        );

        SkyDarkness::from_bortle(scale)
    }
}
