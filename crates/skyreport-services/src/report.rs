//! The `evaluate` operation behind the sky-condition endpoint.
//!
//! Weather trouble never fails a request: upstream or alignment errors are
//! logged and replaced by fixed fallback readings marked `unknown`.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use skyreport_core::Coordinate;
use skyreport_sky::{LightPollutionEstimator, SkyDarkness};
use skyreport_weather::{CloudInfo, Temperature, WeatherProvider, WeatherReading};

use crate::recommendation::recommend;

const LIGHT_POLLUTION_SOURCE: &str = "Calculated based on proximity to major cities";
const DISCLAIMER: &str = "Weather data may not reflect actual local conditions. \
    Cloud coverage can vary significantly over short distances. \
    Always verify conditions on-site before astrophotography.";

/// Where the numbers in a verdict came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub weather: String,
    pub light_pollution: String,
    pub disclaimer: String,
}

/// Complete answer for one location and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub location: Coordinate,
    /// RFC 3339, in the offset the caller asked with
    pub observation_time: String,
    pub cloud_coverage: CloudInfo,
    pub light_pollution: SkyDarkness,
    pub temperature: Temperature,
    pub recommendation: String,
    pub data_source: DataSource,
}

#[derive(Debug, Clone)]
pub struct SkyReportService {
    weather: WeatherProvider,
    estimator: LightPollutionEstimator,
}

impl SkyReportService {
    pub fn new(weather: WeatherProvider, estimator: LightPollutionEstimator) -> Self {
        Self { weather, estimator }
    }

    /// Evaluate conditions at `coordinate`; `None` means now.
    pub async fn evaluate(
        &self,
        coordinate: Coordinate,
        timestamp: Option<DateTime<FixedOffset>>,
    ) -> Verdict {
        self.evaluate_at(coordinate, timestamp, Utc::now()).await
    }

    /// [`SkyReportService::evaluate`] with an explicit current time.
    pub async fn evaluate_at(
        &self,
        coordinate: Coordinate,
        timestamp: Option<DateTime<FixedOffset>>,
        now: DateTime<Utc>,
    ) -> Verdict {
        let observation_time = timestamp.unwrap_or_else(|| now.fixed_offset());
        let target = observation_time.with_timezone(&Utc);

        let reading = self.weather_at(coordinate, target, now).await;
        let sky = self.estimator.estimate(coordinate);
        let recommendation = recommend(&reading.cloud, &sky, &reading.temperature);

        tracing::info!(
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            bortle = sky.bortle_scale,
            cloud = reading.cloud.percentage,
            weather_known = reading.is_known(),
            "Evaluated sky conditions"
        );

        Verdict {
            location: coordinate,
            observation_time: observation_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            cloud_coverage: reading.cloud,
            light_pollution: sky,
            temperature: reading.temperature,
            recommendation,
            data_source: DataSource {
                weather: self.weather.source_for(target, now).label().to_string(),
                light_pollution: LIGHT_POLLUTION_SOURCE.to_string(),
                disclaimer: DISCLAIMER.to_string(),
            },
        }
    }

    async fn weather_at(
        &self,
        coordinate: Coordinate,
        target: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> WeatherReading {
        let observation = match self.weather.fetch_at(coordinate, target, now).await {
            Ok(observation) => observation,
            Err(e) => {
                tracing::warn!("Error fetching weather, using fallback: {}", e);
                return WeatherReading::fallback();
            }
        };

        match observation.sample_at(target, now) {
            Ok(sample) => WeatherReading::from(sample),
            Err(e) => {
                tracing::warn!("No usable weather sample, using fallback: {}", e);
                WeatherReading::fallback()
            }
        }
    }
}
