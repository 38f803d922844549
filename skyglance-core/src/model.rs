use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{daynight, icon::{self, IconId}, units};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// One sample from a location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinate: Coordinate,
    /// Radius of uncertainty in meters. Zero or negative means the fix is invalid.
    pub horizontal_accuracy: f64,
}

impl LocationFix {
    pub fn new(coordinate: Coordinate, horizontal_accuracy: f64) -> Self {
        Self { coordinate, horizontal_accuracy }
    }

    pub fn is_usable(&self) -> bool {
        self.horizontal_accuracy > 0.0
    }
}

/// Current conditions as reported by the weather provider, already validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_kelvin: f64,
    pub country_code: String,
    pub condition_code: i64,
    pub sunrise_epoch: f64,
    pub sunset_epoch: f64,
    pub city_name: String,
}

/// What the user sees after a successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    pub display_temperature: String,
    pub display_icon: IconId,
    pub display_location_name: String,
}

impl DisplayState {
    pub fn derive(reading: &WeatherReading, now: DateTime<Utc>) -> Self {
        let temperature = units::convert(reading.temperature_kelvin, &reading.country_code);
        let night = daynight::is_night(
            daynight::epoch_seconds(now),
            reading.sunrise_epoch,
            reading.sunset_epoch,
        );

        Self {
            display_temperature: format!("{temperature}°"),
            display_icon: icon::resolve_icon(reading.condition_code, night),
            display_location_name: reading.city_name.clone(),
        }
    }
}
