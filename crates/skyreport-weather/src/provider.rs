//! Open-Meteo client. Free, no API key required.

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::Client;
use serde::Deserialize;
use skyreport_core::{Coordinate, WeatherConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::sample::{select, SampleError, Snapshot, TimeSeries};
use crate::source::WeatherSource;
use crate::types::{WeatherError, WeatherSample};

const USER_AGENT: &str = concat!("sky-report/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: Option<OpenMeteoCurrent>,
    hourly: Option<OpenMeteoHourly>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    time: String,
    temperature_2m: f64,
    cloud_cover: f64,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoHourly {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
}

/// Live readings from the forecast endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub time: String,
    pub cloud_cover: f64,
    pub temperature: f64,
}

/// Everything one upstream call returned for a location
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub source: WeatherSource,
    pub current: Option<CurrentConditions>,
    pub cloud_cover: TimeSeries<f64>,
    pub temperature: TimeSeries<f64>,
}

impl WeatherObservation {
    /// Cloud cover and temperature aligned to `target`.
    ///
    /// # Errors
    ///
    /// Propagates [`SampleError`] from either series.
    pub fn sample_at(
        &self,
        target: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<WeatherSample, SampleError> {
        let current_cloud = self.current.as_ref().map(|c| Snapshot {
            timestamp: c.time.clone(),
            value: c.cloud_cover,
        });
        let current_temperature = self.current.as_ref().map(|c| Snapshot {
            timestamp: c.time.clone(),
            value: c.temperature,
        });

        Ok(WeatherSample {
            cloud_percentage: select(current_cloud.as_ref(), &self.cloud_cover, target, now)?,
            temperature_celsius: select(
                current_temperature.as_ref(),
                &self.temperature,
                target,
                now,
            )?,
        })
    }
}

/// Drop hours with a null reading, keeping timestamps and values paired.
fn aligned_series(
    name: &str,
    time: &[String],
    values: Vec<Option<f64>>,
) -> Result<TimeSeries<f64>, WeatherError> {
    if time.len() != values.len() {
        return Err(WeatherError::Parse(format!(
            "hourly {} has {} values for {} timestamps",
            name,
            values.len(),
            time.len()
        )));
    }

    let (timestamps, values) = time
        .iter()
        .zip(values)
        .filter_map(|(t, v)| v.map(|v| (t.clone(), v)))
        .unzip();
    Ok(TimeSeries::new(timestamps, values))
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    forecast_url: String,
    archive_url: String,
    archive_after: TimeDelta,
}

impl WeatherProvider {
    /// Build a provider from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            forecast_url: config.forecast_url.clone(),
            archive_url: config.archive_url.clone(),
            archive_after: TimeDelta::hours(i64::from(config.archive_after_hours)),
        })
    }

    /// Source that would serve `target` at time `now`
    pub fn source_for(&self, target: DateTime<Utc>, now: DateTime<Utc>) -> WeatherSource {
        WeatherSource::for_target(target, now, self.archive_after)
    }

    /// Fetch weather for `target`, relative to the current time.
    ///
    /// # Errors
    ///
    /// See [`WeatherProvider::fetch_at`].
    pub async fn fetch(
        &self,
        coordinate: Coordinate,
        target: DateTime<Utc>,
    ) -> Result<WeatherObservation, WeatherError> {
        self.fetch_at(coordinate, target, Utc::now()).await
    }

    /// Fetch weather for `target` as seen from `now`.
    ///
    /// # Errors
    ///
    /// [`WeatherError::Network`] on transport failure, timeout or a
    /// non-success status; [`WeatherError::Parse`] on a malformed payload.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_at(
        &self,
        coordinate: Coordinate,
        target: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<WeatherObservation, WeatherError> {
        let source = self.source_for(target, now);
        let base_url = match source {
            WeatherSource::Forecast => &self.forecast_url,
            WeatherSource::Archive => &self.archive_url,
        };
        let url = source.request_url(base_url, coordinate, target);
        tracing::debug!("Requesting weather from {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;

        let body: OpenMeteoResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        let (cloud_cover, temperature) = match body.hourly {
            Some(hourly) => (
                aligned_series("cloud_cover", &hourly.time, hourly.cloud_cover)?,
                aligned_series("temperature_2m", &hourly.time, hourly.temperature_2m)?,
            ),
            None => (TimeSeries::default(), TimeSeries::default()),
        };

        let current = body.current.map(|c| CurrentConditions {
            time: c.time,
            cloud_cover: c.cloud_cover,
            temperature: c.temperature_2m,
        });

        tracing::info!(
            source = source.label(),
            hours = cloud_cover.len(),
            has_current = current.is_some(),
            "Fetched weather"
        );

        Ok(WeatherObservation {
            source,
            current,
            cloud_cover,
            temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyreport_core::NetworkError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    fn provider_for(server: &MockServer) -> WeatherProvider {
        let config = WeatherConfig {
            forecast_url: server.uri(),
            archive_url: server.uri(),
            timeout_secs: 5,
            archive_after_hours: 24,
        };
        WeatherProvider::new(&config).unwrap()
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "latitude": 40.71,
            "longitude": -74.0,
            "timezone": "GMT",
            "current": {
                "time": "2024-06-02T12:00",
                "temperature_2m": 21.5,
                "cloud_cover": 12,
                "wind_speed_10m": 3.4,
                "relative_humidity_2m": 60
            },
            "hourly": {
                "time": ["2024-06-02T20:00", "2024-06-02T21:00", "2024-06-02T22:00"],
                "temperature_2m": [18.0, 16.5, 15.0],
                "cloud_cover": [30, 80, 5]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_forecast() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("hourly", "temperature_2m,cloud_cover"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let coordinate = Coordinate::new(40.7128, -74.0060).unwrap();
        let now = utc("2024-06-02T12:05:00Z");
        let target = utc("2024-06-02T21:30:00Z");

        let observation = provider.fetch_at(coordinate, target, now).await.unwrap();
        assert_eq!(observation.source, WeatherSource::Forecast);
        assert_eq!(observation.cloud_cover.len(), 3);
        assert!(observation.current.is_some());

        let sample = observation.sample_at(target, now).unwrap();
        assert_eq!(sample.cloud_percentage, 80.0);
        assert_eq!(sample.temperature_celsius, 16.5);

        let live = observation.sample_at(now, now).unwrap();
        assert_eq!(live.cloud_percentage, 12.0);
        assert_eq!(live.temperature_celsius, 21.5);
    }

    #[tokio::test]
    async fn test_fetch_archive_for_old_target() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/archive"))
            .and(query_param("start_date", "2024-05-01"))
            .and(query_param("end_date", "2024-05-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hourly": {
                    "time": ["2024-05-01T22:00", "2024-05-01T23:00"],
                    "temperature_2m": [9.0, null],
                    "cloud_cover": [0, null]
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let coordinate = Coordinate::new(0.0, -150.0).unwrap();
        let now = utc("2024-06-02T12:00:00Z");
        let target = utc("2024-05-01T23:00:00Z");

        let observation = provider.fetch_at(coordinate, target, now).await.unwrap();
        assert_eq!(observation.source, WeatherSource::Archive);
        assert!(observation.current.is_none());
        // The null hour is dropped from both series.
        assert_eq!(observation.temperature.len(), 1);

        let sample = observation.sample_at(target, now).unwrap();
        assert_eq!(sample.cloud_percentage, 0.0);
        assert_eq!(sample.temperature_celsius, 9.0);
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let now = utc("2024-06-02T12:00:00Z");
        let result = provider
            .fetch_at(Coordinate::new(10.0, 10.0).unwrap(), now, now)
            .await;

        assert!(matches!(
            result,
            Err(WeatherError::Network(NetworkError::ServerError { status: 500, .. }))
        ));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let now = utc("2024-06-02T12:00:00Z");
        let result = provider
            .fetch_at(Coordinate::new(10.0, 10.0).unwrap(), now, now)
            .await;

        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_misaligned_hourly_block() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hourly": {
                    "time": ["2024-06-02T20:00", "2024-06-02T21:00"],
                    "temperature_2m": [18.0],
                    "cloud_cover": [30, 40]
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = provider_for(&mock_server);
        let now = utc("2024-06-02T12:00:00Z");
        let result = provider
            .fetch_at(Coordinate::new(10.0, 10.0).unwrap(), now, now)
            .await;

        assert!(matches!(result, Err(WeatherError::Parse(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        let config = WeatherConfig {
            forecast_url: "http://127.0.0.1:9".to_string(),
            ..WeatherConfig::default()
        };
        let provider = WeatherProvider::new(&config).unwrap();
        let now = utc("2024-06-02T12:00:00Z");
        let result = provider
            .fetch_at(Coordinate::new(10.0, 10.0).unwrap(), now, now)
            .await;

        assert!(matches!(result, Err(WeatherError::Network(_))));
    }

    #[test]
    fn test_observation_without_data() {
        let observation = WeatherObservation {
            source: WeatherSource::Forecast,
            current: None,
            cloud_cover: TimeSeries::default(),
            temperature: TimeSeries::default(),
        };
        let now = utc("2024-06-02T12:00:00Z");
        assert_eq!(
            observation.sample_at(now, now),
            Err(SampleError::NoDataAvailable)
        );
    }
}
