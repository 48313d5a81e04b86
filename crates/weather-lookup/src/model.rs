use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    /// Display label, e.g. `Paris, France`.
    pub fn label(&self) -> String {
        if self.country.trim().is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub condition_code: i32,
    pub humidity_pct: Option<u8>,
    pub observed_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(LocationCandidate),
}

impl LocationQuery {
    pub fn new(
        city: Option<&str>,
        lat: Option<f64>,
        lon: Option<f64>,
        name: Option<&str>,
        country: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let has_coords = lat.is_some() || lon.is_some();

        if city.is_some() && (has_coords || name.is_some() || country.is_some()) {
            return Err(ValidationError::ConflictingLocationInput);
        }

        match (city, lat, lon) {
            (Some(raw_city), None, None) => Ok(Self::City(normalize_query(raw_city)?)),
            (None, Some(lat), Some(lon)) => {
                validate_coordinates(lat, lon)?;
                let name = name
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(ToOwned::to_owned)
                    .unwrap_or_else(|| coordinate_label(lat, lon));
                Ok(Self::Coordinates(LocationCandidate {
                    name,
                    country: country.map(str::trim).unwrap_or_default().to_string(),
                    latitude: lat,
                    longitude: lon,
                }))
            }
            (None, None, None) => Err(ValidationError::MissingLocationInput),
            _ => Err(ValidationError::PartialCoordinates),
        }
    }
}

pub fn normalize_query(raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyCity);
    }
    Ok(value.to_string())
}

pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), ValidationError> {
    if !((-90.0)..=90.0).contains(&lat) {
        return Err(ValidationError::InvalidLatitude(lat));
    }
    if !((-180.0)..=180.0).contains(&lon) {
        return Err(ValidationError::InvalidLongitude(lon));
    }
    Ok(())
}

pub fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("{:.4},{:.4}", round4(lat), round4(lon))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("missing location input: use --city or --lat/--lon")]
    MissingLocationInput,
    #[error("partial coordinates: provide both --lat and --lon")]
    PartialCoordinates,
    #[error("conflicting location input: use either --city or --lat/--lon")]
    ConflictingLocationInput,
    #[error("Please enter a city name.")]
    EmptyCity,
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),
}
