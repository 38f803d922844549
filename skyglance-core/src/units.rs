use serde::{Deserialize, Serialize};

const KELVIN_OFFSET: f64 = 273.15;

/// Display unit for temperatures, picked from the reading's country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Fahrenheit for `"US"` (exact match), Celsius everywhere else.
    pub fn for_country(country_code: &str) -> Self {
        if country_code == "US" {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

/// Convert a Kelvin reading into the rounded display temperature for `country_code`.
///
/// Rounds half away from zero. Non-finite input is expected to be rejected by the
/// parse step; if it gets here anyway the saturating cast turns NaN into 0.
pub fn convert(temp_kelvin: f64, country_code: &str) -> i64 {
    let celsius = temp_kelvin - KELVIN_OFFSET;

    let value = match TemperatureUnit::for_country(country_code) {
        TemperatureUnit::Fahrenheit => celsius * 1.8 + 32.0,
        TemperatureUnit::Celsius => celsius,
    };

    value.round() as i64
}
