use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry, Units},
};

use super::WeatherSource;

const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Message shown when the API's error body carries no usable message.
const UNKNOWN_ERROR: &str = "Unknown error.";

/// Client for the OpenWeatherMap 2.5 API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint, e.g. a local mock
    /// server in tests.
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_current(
        &self,
        location: &str,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError> {
        tracing::debug!(%location, units = units.api_code(), "requesting current conditions");

        let body = self.get_body("weather", location, units).await?;

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(e.to_string()))?;

        let condition = first_condition(parsed.weather)?;

        Ok(CurrentConditions {
            location_name: parsed.name,
            temperature: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            condition,
        })
    }

    pub async fn fetch_forecast(
        &self,
        location: &str,
        units: Units,
    ) -> Result<Vec<ForecastEntry>, WeatherError> {
        tracing::debug!(%location, units = units.api_code(), "requesting forecast");

        let body = self.get_body("forecast", location, units).await?;

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::malformed(e.to_string()))?;

        parsed
            .list
            .into_iter()
            .map(|entry| {
                let condition = first_condition(entry.weather)?;
                Ok(ForecastEntry {
                    timestamp: entry.dt_txt,
                    temperature: entry.main.temp,
                    condition,
                })
            })
            .collect()
    }

    /// One GET round trip. Non-success statuses are turned into an
    /// `Api` error carrying the message from the API's error envelope.
    async fn get_body(
        &self,
        endpoint: &str,
        location: &str,
        units: Units,
    ) -> Result<String, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", location),
                ("units", units.api_code()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(%status, endpoint, "request rejected");
            return Err(WeatherError::Api(extract_error_message(&body)));
        }

        Ok(body)
    }
}

/// Pull the `message` field out of an API error body, falling back to a
/// fixed string when the body is unparsable or carries no message.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

fn first_condition(weather: Vec<OwWeather>) -> Result<String, WeatherError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| WeatherError::malformed("weather array is empty"))
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(
        &self,
        location: &str,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError> {
        self.fetch_current(location, units).await
    }

    async fn forecast(
        &self,
        location: &str,
        units: Units,
    ) -> Result<Vec<ForecastEntry>, WeatherError> {
        self.fetch_forecast(location, units).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::with_base_url("test-key".to_string(), &server.uri())
    }

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Kyiv",
            "main": {"temp": 21.5, "humidity": 40},
            "weather": [{"main": "Clouds", "description": "scattered clouds"}],
            "wind": {"speed": 3.2}
        })
    }

    #[tokio::test]
    async fn current_conditions_are_parsed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Kyiv"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let current = client_for(&server)
            .fetch_current("Kyiv", Units::Metric)
            .await
            .unwrap();

        assert_eq!(current.location_name, "Kyiv");
        assert_eq!(current.temperature, 21.5);
        assert_eq!(current.humidity_pct, 40);
        assert_eq!(current.wind_speed, 3.2);
        assert_eq!(current.condition, "Clouds");
    }

    #[tokio::test]
    async fn imperial_selection_reaches_the_query_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_current("Kyiv", Units::Imperial).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn not_found_surfaces_the_api_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "cod": "404",
                "message": "city not found"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_current("Nowhere", Units::Metric)
            .await
            .unwrap_err();

        match err {
            WeatherError::Api(message) => assert_eq!(message, "city not found"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparsable_error_body_falls_back_to_unknown() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_current("Kyiv", Units::Metric)
            .await
            .unwrap_err();

        match err {
            WeatherError::Api(message) => assert_eq!(message, "Unknown error."),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn error_body_without_message_falls_back_to_unknown() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({"cod": 401})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_current("Kyiv", Units::Metric)
            .await
            .unwrap_err();

        match err {
            WeatherError::Api(message) => assert_eq!(message, "Unknown error."),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_schema_fields_are_malformed_not_a_crash() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Kyiv"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_current("Kyiv", Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Malformed(_)));
    }

    #[tokio::test]
    async fn empty_weather_array_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Kyiv",
                "main": {"temp": 21.5, "humidity": 40},
                "weather": [],
                "wind": {"speed": 3.2}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_current("Kyiv", Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Malformed(_)));
    }

    #[tokio::test]
    async fn forecast_list_is_parsed_in_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Kyiv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [
                    {
                        "dt_txt": "2025-03-14 12:00:00",
                        "main": {"temp": 10.0, "humidity": 60},
                        "weather": [{"main": "Rain"}]
                    },
                    {
                        "dt_txt": "2025-03-14 15:00:00",
                        "main": {"temp": 11.0, "humidity": 55},
                        "weather": [{"main": "Clouds"}]
                    }
                ]
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server)
            .fetch_forecast("Kyiv", Units::Metric)
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp, "2025-03-14 12:00:00");
        assert_eq!(entries[0].temperature, 10.0);
        assert_eq!(entries[0].condition, "Rain");
        assert_eq!(entries[1].condition, "Clouds");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Grab a port that nothing listens on anymore.
        let dead_uri = {
            let server = MockServer::start().await;
            server.uri()
        };

        let client = OpenWeatherClient::with_base_url("test-key".to_string(), &dead_uri);
        let err = client.fetch_current("Kyiv", Units::Metric).await.unwrap_err();

        assert!(matches!(err, WeatherError::Transport(_)));
    }
}
