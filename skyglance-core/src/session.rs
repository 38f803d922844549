use chrono::Utc;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    DisplayState, LocationFix,
    error::NO_LOCATION_MESSAGE,
    location::LocationProvider,
    provider::WeatherProvider,
};

pub const DEFAULT_FIX_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of one refresh cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Display(DisplayState),
    Status(String),
}

impl Outcome {
    fn status(message: &str) -> Self {
        Outcome::Status(message.to_string())
    }
}

/// Drives location → weather → display, one request per cycle.
#[derive(Debug)]
pub struct WeatherSession {
    location: Box<dyn LocationProvider>,
    weather: Box<dyn WeatherProvider>,
    fix_timeout: Duration,
}

impl WeatherSession {
    pub fn new(location: Box<dyn LocationProvider>, weather: Box<dyn WeatherProvider>) -> Self {
        Self { location, weather, fix_timeout: DEFAULT_FIX_TIMEOUT }
    }

    pub fn with_fix_timeout(mut self, fix_timeout: Duration) -> Self {
        self.fix_timeout = fix_timeout;
        self
    }

    /// Run one cycle. Never retries; call again to refresh.
    pub async fn refresh(&self) -> Outcome {
        let Some(fix) = self.first_usable_fix().await else {
            return Outcome::status(NO_LOCATION_MESSAGE);
        };

        match self.weather.current_weather(fix.coordinate).await {
            Ok(reading) => {
                let state = DisplayState::derive(&reading, Utc::now());
                info!(
                    location = %state.display_location_name,
                    temperature = %state.display_temperature,
                    icon = %state.display_icon,
                    "weather updated"
                );
                Outcome::Display(state)
            }
            Err(e) => {
                warn!(error = %e, "weather refresh failed");
                Outcome::status(e.status_message())
            }
        }
    }

    /// Wait for the first fix with a positive accuracy, then stop the provider.
    async fn first_usable_fix(&self) -> Option<LocationFix> {
        let mut rx = match self.location.request_updates().await {
            Ok(rx) => rx,
            Err(e) => {
                warn!(error = %e, "could not start location updates");
                return None;
            }
        };

        let wait = async {
            while let Some(fix) = rx.recv().await {
                if fix.is_usable() {
                    return Some(fix);
                }
                debug!(accuracy = fix.horizontal_accuracy, "ignoring inaccurate fix");
            }
            None
        };

        let found = match tokio::time::timeout(self.fix_timeout, wait).await {
            Ok(found) => found,
            Err(_) => {
                warn!(timeout = ?self.fix_timeout, "timed out waiting for a location fix");
                None
            }
        };

        self.location.stop_updates();

        match found {
            Some(fix) => {
                debug!(
                    lat = fix.coordinate.latitude,
                    lon = fix.coordinate.longitude,
                    accuracy = fix.horizontal_accuracy,
                    "using location fix"
                );
                Some(fix)
            }
            None => {
                warn!("no usable location fix");
                None
            }
        }
    }
}
