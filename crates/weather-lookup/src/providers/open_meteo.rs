use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::hour_key::HourlySeries;
use crate::model::LocationCandidate;

use super::{CurrentConditions, ProviderError, ProviderForecast};

const GEOCODE_PATH: &str = "/v1/search";
const FORECAST_PATH: &str = "/v1/forecast";
const HOURLY_FIELDS: &str = "relativehumidity_2m";

#[derive(Debug, Serialize)]
struct GeocodeQuery<'a> {
    name: &'a str,
    count: u8,
    language: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    #[serde(default)]
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    current_weather: bool,
    hourly: &'a str,
    timezone: &'a str,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeatherBlock>,
    #[serde(default)]
    hourly: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
    temperature: f64,
    windspeed: f64,
    winddirection: f64,
    weathercode: f64,
    time: String,
}

pub fn fetch_geocode(
    client: &Client,
    base_url: &str,
    name: &str,
    count: u8,
) -> Result<Vec<LocationCandidate>, ProviderError> {
    let query = GeocodeQuery {
        name,
        count,
        language: "en",
        format: "json",
    };
    debug!(name, count, "geocoding request");

    let body = execute_request(client.get(format!("{base_url}{GEOCODE_PATH}")).query(&query))?;
    parse_geocode_response(&body)
}

pub fn fetch_forecast(
    client: &Client,
    base_url: &str,
    lat: f64,
    lon: f64,
) -> Result<ProviderForecast, ProviderError> {
    let query = ForecastQuery {
        latitude: lat,
        longitude: lon,
        current_weather: true,
        hourly: HOURLY_FIELDS,
        timezone: "auto",
    };
    debug!(lat, lon, "forecast request");

    let body = execute_request(client.get(format!("{base_url}{FORECAST_PATH}")).query(&query))?;
    parse_forecast_response(&body)
}

fn execute_request(request: RequestBuilder) -> Result<String, ProviderError> {
    let response = request
        .send()
        .map_err(|error| ProviderError::Transport(error.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|error| ProviderError::Transport(error.to_string()))?;

    if status.is_success() {
        return Ok(body);
    }

    let message = extract_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    Err(ProviderError::Http {
        status: status.as_u16(),
        message,
    })
}

fn parse_geocode_response(body: &str) -> Result<Vec<LocationCandidate>, ProviderError> {
    let payload: GeocodeResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("geocode payload: {error}")))?;

    Ok(payload
        .results
        .unwrap_or_default()
        .into_iter()
        .filter(|result| !result.name.trim().is_empty())
        .map(|result| LocationCandidate {
            name: result.name.trim().to_string(),
            country: result
                .country
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
            latitude: result.latitude,
            longitude: result.longitude,
        })
        .collect())
}

fn parse_forecast_response(body: &str) -> Result<ProviderForecast, ProviderError> {
    let payload: ForecastResponse = serde_json::from_str(body)
        .map_err(|error| ProviderError::InvalidResponse(format!("forecast payload: {error}")))?;

    let current = payload.current_weather.map(|block| CurrentConditions {
        temperature_c: block.temperature,
        wind_speed_kmh: block.windspeed,
        wind_direction_deg: block.winddirection,
        weather_code: block.weathercode.round() as i32,
        time: block.time,
    });

    Ok(ProviderForecast {
        current,
        hourly: HourlySeries::from_json(payload.hourly.as_ref()),
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let from_json = serde_json::from_str::<Value>(trimmed)
        .ok()
        .and_then(|json| {
            ["reason", "message", "error", "detail"]
                .iter()
                .filter_map(|key| json.get(*key).and_then(Value::as_str))
                .map(str::trim)
                .find(|message| !message.is_empty())
                .map(ToOwned::to_owned)
        });

    from_json.or_else(|| Some(trimmed.to_string()))
}
