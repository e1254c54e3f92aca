//! Choosing between the Open-Meteo forecast and archive endpoints.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use skyreport_core::Coordinate;

/// Which upstream dataset serves a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherSource {
    Forecast,
    Archive,
}

impl WeatherSource {
    /// Targets more than `archive_after` in the past come from the archive.
    /// A cutoff earlier than chrono can represent never selects the archive.
    pub fn for_target(
        target: DateTime<Utc>,
        now: DateTime<Utc>,
        archive_after: TimeDelta,
    ) -> Self {
        match now.checked_sub_signed(archive_after) {
            Some(cutoff) if target < cutoff => Self::Archive,
            _ => Self::Forecast,
        }
    }

    /// Attribution shown in a verdict's data source block
    pub fn label(&self) -> &'static str {
        match self {
            Self::Forecast => "Open-Meteo Forecast API",
            Self::Archive => "Open-Meteo Archive API (historical data)",
        }
    }

    /// Build the request URL for this source against `base_url`.
    pub fn request_url(
        &self,
        base_url: &str,
        coordinate: Coordinate,
        target: DateTime<Utc>,
    ) -> String {
        let base_url = base_url.trim_end_matches('/');
        match self {
            Self::Forecast => format!(
                "{}/v1/forecast?latitude={:.6}&longitude={:.6}\
                 &current=temperature_2m,relative_humidity_2m,cloud_cover,wind_speed_10m\
                 &hourly=temperature_2m,cloud_cover&past_days=1&forecast_days=16&timezone=UTC",
                base_url, coordinate.latitude, coordinate.longitude
            ),
            Self::Archive => {
                let date = target.format("%Y-%m-%d");
                format!(
                    "{}/v1/archive?latitude={:.6}&longitude={:.6}\
                     &start_date={}&end_date={}\
                     &hourly=temperature_2m,cloud_cover&timezone=UTC",
                    base_url, coordinate.latitude, coordinate.longitude, date, date
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_recent_past_uses_forecast() {
        let now = utc("2024-06-02T12:00:00Z");
        let day = TimeDelta::hours(24);
        assert_eq!(
            WeatherSource::for_target(utc("2024-06-01T13:00:00Z"), now, day),
            WeatherSource::Forecast
        );
        assert_eq!(
            WeatherSource::for_target(utc("2024-06-01T12:00:00Z"), now, day),
            WeatherSource::Forecast
        );
    }

    #[test]
    fn test_old_target_uses_archive() {
        let now = utc("2024-06-02T12:00:00Z");
        assert_eq!(
            WeatherSource::for_target(utc("2024-06-01T11:59:00Z"), now, TimeDelta::hours(24)),
            WeatherSource::Archive
        );
    }

    #[test]
    fn test_future_uses_forecast() {
        let now = utc("2024-06-02T12:00:00Z");
        assert_eq!(
            WeatherSource::for_target(utc("2024-06-05T22:00:00Z"), now, TimeDelta::hours(24)),
            WeatherSource::Forecast
        );
    }

    #[test]
    fn test_unrepresentable_cutoff_uses_forecast() {
        let now = utc("2024-06-02T12:00:00Z");
        let huge = TimeDelta::hours(i64::from(u32::MAX));
        assert_eq!(WeatherSource::for_target(now, now, huge), WeatherSource::Forecast);
        assert_eq!(
            WeatherSource::for_target(utc("1900-01-01T00:00:00Z"), now, huge),
            WeatherSource::Forecast
        );
    }

    #[test]
    fn test_archive_url_uses_target_date() {
        let coordinate = Coordinate::new(51.5, -0.12).unwrap();
        let url = WeatherSource::Archive.request_url(
            "https://archive-api.open-meteo.com/",
            coordinate,
            utc("2023-12-24T21:00:00Z"),
        );
        assert!(url.starts_with("https://archive-api.open-meteo.com/v1/archive?"));
        assert!(url.contains("latitude=51.500000"));
        assert!(url.contains("start_date=2023-12-24&end_date=2023-12-24"));
        assert!(!url.contains("current="));
    }

    #[test]
    fn test_forecast_url_requests_current_block() {
        let coordinate = Coordinate::new(0.0, -150.0).unwrap();
        let url = WeatherSource::Forecast.request_url(
            "https://api.open-meteo.com",
            coordinate,
            utc("2024-06-02T12:00:00Z"),
        );
        assert!(url.starts_with("https://api.open-meteo.com/v1/forecast?"));
        assert!(url.contains("longitude=-150.000000"));
        assert!(url.contains("current=temperature_2m"));
        assert!(url.contains("timezone=UTC"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(WeatherSource::Forecast.label(), "Open-Meteo Forecast API");
        assert!(WeatherSource::Archive.label().contains("historical"));
    }
}
