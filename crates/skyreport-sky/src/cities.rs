//! Reference table of major light sources.

use skyreport_core::Coordinate;

/// A population centre used by the light pollution model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityReference {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub population_millions: f64,
}

impl CityReference {
    const fn new(name: &'static str, latitude: f64, longitude: f64, population_millions: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
            population_millions,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Major cities worldwide (sample data).
pub static MAJOR_CITIES: &[CityReference] = &[
    CityReference::new("New York", 40.7128, -74.0060, 8.0),
    CityReference::new("Los Angeles", 34.0522, -118.2437, 4.0),
    CityReference::new("Chicago", 41.8781, -87.6298, 3.0),
    CityReference::new("London", 51.5074, -0.1278, 9.0),
    CityReference::new("Paris", 48.8566, 2.3522, 2.0),
    CityReference::new("Tokyo", 35.6762, 139.6503, 14.0),
    CityReference::new("Beijing", 39.9042, 116.4074, 21.0),
    CityReference::new("Shanghai", 31.2304, 121.4737, 27.0),
    CityReference::new("Mumbai", 19.0760, 72.8777, 20.0),
    CityReference::new("Delhi", 28.7041, 77.1025, 30.0),
    CityReference::new("São Paulo", -23.5505, -46.6333, 12.0),
    CityReference::new("Mexico City", 19.4326, -99.1332, 9.0),
    CityReference::new("Moscow", 55.7558, 37.6173, 12.0),
    CityReference::new("Istanbul", 41.0082, 28.9784, 15.0),
    CityReference::new("Sydney", -33.8688, 151.2093, 5.0),
    CityReference::new("Toronto", 43.6532, -79.3832, 3.0),
    CityReference::new("Berlin", 52.5200, 13.4050, 4.0),
    CityReference::new("Madrid", 40.4168, -3.7038, 3.0),
    CityReference::new("Rome", 41.9028, 12.4964, 3.0),
    CityReference::new("Dubai", 25.2048, 55.2708, 3.0),
];
