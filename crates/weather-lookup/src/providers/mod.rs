use reqwest::blocking::Client;
use thiserror::Error;

use crate::config::RuntimeConfig;
use crate::hour_key::HourlySeries;
use crate::model::LocationCandidate;

pub mod open_meteo;

/// Current-conditions block of a forecast response, before hour alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub wind_speed_kmh: f64,
    pub wind_direction_deg: f64,
    pub weather_code: i32,
    pub time: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderForecast {
    pub current: Option<CurrentConditions>,
    pub hourly: HourlySeries,
}

/// Upstream calls the resolver and fetcher are built on.
pub trait ProviderApi {
    fn geocode(&self, name: &str, count: u8) -> Result<Vec<LocationCandidate>, ProviderError>;
    fn forecast(&self, lat: f64, lon: f64) -> Result<ProviderForecast, ProviderError>;
}

impl<P: ProviderApi + ?Sized> ProviderApi for &P {
    fn geocode(&self, name: &str, count: u8) -> Result<Vec<LocationCandidate>, ProviderError> {
        (**self).geocode(name, count)
    }

    fn forecast(&self, lat: f64, lon: f64) -> Result<ProviderForecast, ProviderError> {
        (**self).forecast(lat, lon)
    }
}

#[derive(Debug, Clone)]
pub struct HttpProviders {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

impl HttpProviders {
    pub fn new(config: &RuntimeConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|error| ProviderError::Transport(error.to_string()))?;

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
        })
    }
}

impl ProviderApi for HttpProviders {
    fn geocode(&self, name: &str, count: u8) -> Result<Vec<LocationCandidate>, ProviderError> {
        open_meteo::fetch_geocode(&self.client, &self.geocoding_url, name, count)
    }

    fn forecast(&self, lat: f64, lon: f64) -> Result<ProviderForecast, ProviderError> {
        open_meteo::fetch_forecast(&self.client, &self.forecast_url, lat, lon)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http error ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}
