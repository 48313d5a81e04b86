use std::process::{Command, Output};

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_lookup::config::RuntimeConfig;
use weather_lookup::providers::{HttpProviders, ProviderApi, ProviderError};

async fn run_cli(args: &[&str], server: &MockServer) -> Output {
    let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_weather-lookup"))
            .args(&args)
            .env("WEATHER_GEOCODING_URL", &base_url)
            .env("WEATHER_FORECAST_URL", &base_url)
            .env("WEATHER_TIMEOUT_SECS", "5")
            .output()
            .expect("run weather-lookup")
    })
    .await
    .expect("join")
}

/// The blocking client owns a runtime of its own, so it is built, used and
/// dropped on a blocking thread.
async fn with_providers<T, F>(server: &MockServer, call: F) -> T
where
    T: Send + 'static,
    F: FnOnce(&HttpProviders) -> T + Send + 'static,
{
    let base_url = server.uri();

    tokio::task::spawn_blocking(move || {
        let config = RuntimeConfig::from_pairs([
            ("WEATHER_GEOCODING_URL", base_url.clone()),
            ("WEATHER_FORECAST_URL", base_url),
        ]);
        let providers = HttpProviders::new(&config).expect("client");
        call(&providers)
    })
    .await
    .expect("join")
}

fn paris_geocode() -> Value {
    json!({
        "results": [
            { "name": "Paris", "country": "France", "latitude": 48.85341, "longitude": 2.3488 },
            {
                "name": "Paris",
                "country": "United States",
                "latitude": 33.66094,
                "longitude": -95.55551
            }
        ]
    })
}

fn paris_forecast() -> Value {
    json!({
        "timezone": "Europe/Paris",
        "current_weather": {
            "temperature": 21.4,
            "windspeed": 12.3,
            "winddirection": 270.0,
            "weathercode": 2,
            "time": "2025-07-08T17:00"
        },
        "hourly": {
            "time": ["2025-07-08T16:00", "2025-07-08T17:00", "2025-07-08T18:00"],
            "relativehumidity_2m": [58, 63, 70]
        }
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn open_meteo_suggest_requests_five_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Par"))
        .and(query_param("count", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocode()))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["suggest", "--query", "Par", "--json"], &server).await;

    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    let suggestions = json["result"]["suggestions"].as_array().expect("array");
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[1]["country"], "United States");
}

#[tokio::test(flavor = "multi_thread")]
async fn open_meteo_current_renders_aligned_humidity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocode()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("current_weather", "true"))
        .and(query_param("hourly", "relativehumidity_2m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast()))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["current", "--city", "  Paris "], &server).await;

    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Paris, France\n"), "{stdout}");
    assert!(stdout.contains("21.4°C"));
    assert!(stdout.contains("Humidity: 63%"));
    assert!(stdout.contains("Wind: 12.3 km/h"));
    assert!(stdout.contains("Direction: 270°"));
}

#[tokio::test(flavor = "multi_thread")]
async fn open_meteo_unknown_city_never_requests_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "generationtime_ms": 0.2 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_forecast()))
        .expect(0)
        .mount(&server)
        .await;

    let output = run_cli(&["current", "--city", "Qzxvbnm", "--json"], &server).await;

    assert_eq!(output.status.code(), Some(2));
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        json["error"]["message"],
        "City not found. Check spelling and try again."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn open_meteo_missing_current_block_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "timezone": "GMT" })))
        .mount(&server)
        .await;

    let output = run_cli(
        &["current", "--lat", "0", "--lon", "0", "--json"],
        &server,
    )
    .await;

    assert_eq!(output.status.code(), Some(1));
    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(json["error"]["code"], "runtime.weather_unavailable");
    assert_eq!(
        json["error"]["message"],
        "Weather data unavailable for this location."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn open_meteo_unmatched_hour_shows_placeholder() {
    let server = MockServer::start().await;
    let mut forecast = paris_forecast();
    forecast["current_weather"]["time"] = json!("2025-07-09T09:00");
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast))
        .mount(&server)
        .await;

    let output = run_cli(&["current", "--lat", "48.85", "--lon", "2.35"], &server).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Humidity: --"));
}

#[tokio::test(flavor = "multi_thread")]
async fn open_meteo_http_error_surfaces_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "error": true, "reason": "Latitude must be in range" })),
        )
        .mount(&server)
        .await;

    let error = with_providers(&server, |providers| providers.forecast(120.0, 0.0))
        .await
        .expect_err("must fail");

    assert_eq!(
        error,
        ProviderError::Http {
            status: 400,
            message: "Latitude must be in range".to_string(),
        }
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn open_meteo_geocode_sends_english_json_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_geocode()))
        .expect(1)
        .mount(&server)
        .await;

    let candidates = with_providers(&server, |providers| providers.geocode("Paris", 1))
        .await
        .expect("geocode");

    assert_eq!(candidates[0].label(), "Paris, France");
}
