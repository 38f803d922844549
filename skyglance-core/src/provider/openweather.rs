use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt, time::Duration};
use tracing::debug;

use crate::{Coordinate, WeatherError, WeatherReading};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    api_key: Option<String>,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        })
    }

    fn current_url(&self) -> String {
        format!("{}{CURRENT_WEATHER_PATH}", self.base_url)
    }
}

impl fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, at: Coordinate) -> Result<WeatherReading, WeatherError> {
        let url = self.current_url();
        debug!(%url, lat = at.latitude, lon = at.longitude, "requesting current weather");

        let mut request = self
            .http
            .get(&url)
            .query(&[("lat", at.latitude), ("lon", at.longitude)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("appid", key.as_str())]);
        }

        let res = request.send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        debug!(body = %truncate_body(&body), "weather response");
        parse_current(&body)
    }
}

/// Turn a current-weather body into a validated reading.
pub fn parse_current(body: &str) -> Result<WeatherReading, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    parsed.into_reading()
}

// Every field is optional so that a missing one surfaces as `MissingField` with its
// path instead of a generic decode error.
#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<f64>,
    sunset: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    main: Option<OwMain>,
    sys: Option<OwSys>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_reading(self) -> Result<WeatherReading, WeatherError> {
        let temperature_kelvin = self
            .main
            .and_then(|m| m.temp)
            .ok_or(WeatherError::MissingField("main.temp"))?;
        if !temperature_kelvin.is_finite() {
            return Err(WeatherError::InvalidField {
                field: "main.temp",
                reason: format!("expected a finite number, got {temperature_kelvin}"),
            });
        }

        let sys = self.sys.ok_or(WeatherError::MissingField("sys"))?;
        let country_code = sys.country.ok_or(WeatherError::MissingField("sys.country"))?;
        let sunrise_epoch = sys.sunrise.ok_or(WeatherError::MissingField("sys.sunrise"))?;
        let sunset_epoch = sys.sunset.ok_or(WeatherError::MissingField("sys.sunset"))?;

        let city_name = self.name.ok_or(WeatherError::MissingField("name"))?;

        let condition_code = self
            .weather
            .first()
            .and_then(|w| w.id)
            .ok_or(WeatherError::MissingField("weather[0].id"))?;

        Ok(WeatherReading {
            temperature_kelvin,
            country_code,
            condition_code,
            sunrise_epoch,
            sunset_epoch,
            city_name,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.13, "lat": 51.51},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04n"}],
        "main": {"temp": 280.32, "pressure": 1012, "humidity": 81},
        "sys": {"type": 1, "id": 5091, "country": "GB", "sunrise": 1485762037, "sunset": 1485794875},
        "id": 2643743,
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn parses_full_body() {
        let reading = parse_current(LONDON).expect("body should parse");

        assert_eq!(reading.temperature_kelvin, 280.32);
        assert_eq!(reading.country_code, "GB");
        assert_eq!(reading.condition_code, 803);
        assert_eq!(reading.sunrise_epoch, 1485762037.0);
        assert_eq!(reading.sunset_epoch, 1485794875.0);
        assert_eq!(reading.city_name, "London");
    }

    #[test]
    fn missing_temperature() {
        let body = r#"{"name": "X", "sys": {"country": "GB", "sunrise": 1, "sunset": 2}, "weather": [{"id": 800}]}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherError::MissingField("main.temp")));
    }

    #[test]
    fn empty_weather_array() {
        let body = r#"{"name": "X", "main": {"temp": 280.0}, "sys": {"country": "GB", "sunrise": 1, "sunset": 2}, "weather": []}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherError::MissingField("weather[0].id")));
    }

    #[test]
    fn missing_country() {
        let body = r#"{"name": "X", "main": {"temp": 280.0}, "sys": {"sunrise": 1, "sunset": 2}, "weather": [{"id": 800}]}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherError::MissingField("sys.country")));
    }

    #[test]
    fn wrong_type_is_a_decode_error() {
        let body = r#"{"name": "X", "main": {"temp": "warm"}}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[test]
    fn not_json() {
        let err = parse_current("<html>502</html>").unwrap_err();
        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[test]
    fn debug_redacts_api_key() {
        let provider = OpenWeatherProvider::new(
            "http://example.test/",
            Some("SECRET".into()),
            Duration::from_secs(1),
        )
        .expect("client");
        let dbg = format!("{provider:?}");

        assert!(!dbg.contains("SECRET"));
        assert!(dbg.contains("http://example.test"));
        assert_eq!(provider.current_url(), "http://example.test/data/2.5/weather");
    }

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "é".repeat(300);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
