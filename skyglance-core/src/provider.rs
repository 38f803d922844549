use crate::{
    Config, Coordinate, WeatherError, WeatherReading, provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current conditions for a coordinate.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, at: Coordinate) -> Result<WeatherReading, WeatherError>;
}

/// Construct the weather provider described by `config`.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let provider = OpenWeatherProvider::new(
        config.weather_endpoint(),
        config.api_key().map(str::to_owned),
        config.request_timeout(),
    )?;

    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_default_config_builds() {
        let cfg = Config::default();
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_from_config_uses_endpoint() {
        let cfg = Config {
            weather_endpoint: Some("http://localhost:1234/".into()),
            ..Config::default()
        };

        let provider = provider_from_config(&cfg).expect("provider should build");
        assert!(format!("{provider:?}").contains("localhost:1234"));
    }
}
