use tracing::debug;

use crate::error::{LookupError, Upstream};
use crate::hour_key::parse_timestamp;
use crate::model::WeatherReading;
use crate::providers::{ProviderApi, ProviderError};

/// Fetches current conditions and aligns the hourly humidity sample.
#[derive(Debug, Clone)]
pub struct WeatherFetcher<P> {
    providers: P,
}

impl<P: ProviderApi> WeatherFetcher<P> {
    pub fn new(providers: P) -> Self {
        Self { providers }
    }

    pub fn fetch(&self, lat: f64, lon: f64) -> Result<WeatherReading, LookupError> {
        let forecast = self
            .providers
            .forecast(lat, lon)
            .map_err(|error| LookupError::transport(Upstream::Forecast, error))?;

        let current = forecast.current.ok_or(LookupError::Unavailable)?;
        let observed_at = parse_timestamp(&current.time).ok_or_else(|| {
            LookupError::transport(
                Upstream::Forecast,
                ProviderError::InvalidResponse(format!(
                    "forecast payload: invalid current_weather.time '{}'",
                    current.time
                )),
            )
        })?;

        let humidity_pct = forecast.hourly.humidity_at(observed_at);
        debug!(
            lat,
            lon,
            %observed_at,
            humidity = ?humidity_pct,
            hourly_samples = forecast.hourly.len(),
            "current conditions resolved"
        );

        Ok(WeatherReading {
            temperature_c: current.temperature_c,
            wind_speed_kmh: current.wind_speed_kmh,
            wind_direction_deg: current.wind_direction_deg,
            condition_code: current.weather_code,
            humidity_pct,
            observed_at,
        })
    }
}
