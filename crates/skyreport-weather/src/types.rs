use serde::{Deserialize, Serialize};
use skyreport_core::{NetworkError, ReqwestErrorExt};

/// Cloud cover used when no weather data could be obtained.
pub const FALLBACK_CLOUD_PERCENTAGE: u8 = 50;
/// Temperature used when no weather data could be obtained.
pub const FALLBACK_CELSIUS: f64 = 15.0;

/// Cloud cover categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Overcast,
    /// Weather data was unavailable
    Unknown,
}

impl CloudCondition {
    /// Classify a cloud cover percentage
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            0..=10 => Self::Clear,
            11..=40 => Self::PartlyCloudy,
            41..=75 => Self::Cloudy,
            _ => Self::Overcast,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly_cloudy",
            Self::Cloudy => "cloudy",
            Self::Overcast => "overcast",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CloudCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temperature comfort categories for a night outdoors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureCondition {
    VeryCold,
    Cold,
    Comfortable,
    Warm,
    Hot,
    /// Weather data was unavailable
    Unknown,
}

impl TemperatureCondition {
    /// Classify a temperature in degrees Celsius
    pub fn from_celsius(celsius: f64) -> Self {
        if celsius < -10.0 {
            Self::VeryCold
        } else if celsius < 5.0 {
            Self::Cold
        } else if celsius < 20.0 {
            Self::Comfortable
        } else if celsius < 30.0 {
            Self::Warm
        } else {
            Self::Hot
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryCold => "very_cold",
            Self::Cold => "cold",
            Self::Comfortable => "comfortable",
            Self::Warm => "warm",
            Self::Hot => "hot",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TemperatureCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Cloud cover reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudInfo {
    /// 0-100
    pub percentage: u8,
    pub condition: CloudCondition,
}

impl CloudInfo {
    /// Classify a raw percentage; the value is rounded and clamped to 0-100.
    pub fn from_percentage(percentage: f64) -> Self {
        let percentage = if percentage.is_nan() {
            0
        } else {
            percentage.round().clamp(0.0, 100.0) as u8
        };
        Self {
            percentage,
            condition: CloudCondition::from_percentage(percentage),
        }
    }

    pub fn fallback() -> Self {
        Self {
            percentage: FALLBACK_CLOUD_PERCENTAGE,
            condition: CloudCondition::Unknown,
        }
    }
}

/// Temperature reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
    pub condition: TemperatureCondition,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self {
            celsius,
            fahrenheit: celsius_to_fahrenheit(celsius),
            condition: TemperatureCondition::from_celsius(celsius),
        }
    }

    pub fn fallback() -> Self {
        Self {
            celsius: FALLBACK_CELSIUS,
            fahrenheit: celsius_to_fahrenheit(FALLBACK_CELSIUS),
            condition: TemperatureCondition::Unknown,
        }
    }
}

/// Raw readings aligned to the requested time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub cloud_percentage: f64,
    pub temperature_celsius: f64,
}

/// Classified weather for a verdict
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub cloud: CloudInfo,
    pub temperature: Temperature,
}

impl WeatherReading {
    pub fn fallback() -> Self {
        Self {
            cloud: CloudInfo::fallback(),
            temperature: Temperature::fallback(),
        }
    }

    /// Whether this reading came from real data
    pub fn is_known(&self) -> bool {
        self.cloud.condition != CloudCondition::Unknown
    }
}

impl From<WeatherSample> for WeatherReading {
    fn from(sample: WeatherSample) -> Self {
        Self {
            cloud: CloudInfo::from_percentage(sample.cloud_percentage),
            temperature: Temperature::from_celsius(sample.temperature_celsius),
        }
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Network(e.into_network_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_condition_boundaries() {
        assert_eq!(CloudCondition::from_percentage(0), CloudCondition::Clear);
        assert_eq!(CloudCondition::from_percentage(10), CloudCondition::Clear);
        assert_eq!(CloudCondition::from_percentage(11), CloudCondition::PartlyCloudy);
        assert_eq!(CloudCondition::from_percentage(40), CloudCondition::PartlyCloudy);
        assert_eq!(CloudCondition::from_percentage(41), CloudCondition::Cloudy);
        assert_eq!(CloudCondition::from_percentage(75), CloudCondition::Cloudy);
        assert_eq!(CloudCondition::from_percentage(76), CloudCondition::Overcast);
        assert_eq!(CloudCondition::from_percentage(100), CloudCondition::Overcast);
    }

    #[test]
    fn test_temperature_condition_boundaries() {
        assert_eq!(TemperatureCondition::from_celsius(-10.5), TemperatureCondition::VeryCold);
        assert_eq!(TemperatureCondition::from_celsius(-10.0), TemperatureCondition::Cold);
        assert_eq!(TemperatureCondition::from_celsius(4.9), TemperatureCondition::Cold);
        assert_eq!(TemperatureCondition::from_celsius(5.0), TemperatureCondition::Comfortable);
        assert_eq!(TemperatureCondition::from_celsius(19.9), TemperatureCondition::Comfortable);
        assert_eq!(TemperatureCondition::from_celsius(20.0), TemperatureCondition::Warm);
        assert_eq!(TemperatureCondition::from_celsius(30.0), TemperatureCondition::Hot);
    }

    #[test]
    fn test_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
    }

    #[test]
    fn test_cloud_info_rounds_and_clamps() {
        assert_eq!(CloudInfo::from_percentage(10.4).percentage, 10);
        assert_eq!(CloudInfo::from_percentage(10.6).condition, CloudCondition::PartlyCloudy);
        assert_eq!(CloudInfo::from_percentage(140.0).percentage, 100);
        assert_eq!(CloudInfo::from_percentage(-3.0).percentage, 0);
    }

    #[test]
    fn test_fallback_reading() {
        let reading = WeatherReading::fallback();
        assert!(!reading.is_known());
        assert_eq!(reading.cloud.percentage, 50);
        assert_eq!(reading.temperature.celsius, 15.0);
        assert_eq!(reading.temperature.fahrenheit, 59.0);
        assert_eq!(reading.temperature.condition, TemperatureCondition::Unknown);
    }

    #[test]
    fn test_reading_from_sample() {
        let reading = WeatherReading::from(WeatherSample {
            cloud_percentage: 5.0,
            temperature_celsius: -12.0,
        });
        assert!(reading.is_known());
        assert_eq!(reading.cloud.condition, CloudCondition::Clear);
        assert_eq!(reading.temperature.condition, TemperatureCondition::VeryCold);
    }

    #[test]
    fn test_conditions_serialize_snake_case() {
        let json = serde_json::to_string(&CloudInfo::from_percentage(30.0)).unwrap();
        assert_eq!(json, r#"{"percentage":30,"condition":"partly_cloudy"}"#);
        let json = serde_json::to_string(&TemperatureCondition::VeryCold).unwrap();
        assert_eq!(json, r#""very_cold""#);
    }
}
