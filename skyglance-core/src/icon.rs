use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a bundled condition icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconId {
    Tstorm1,
    Tstorm1Night,
    LightRain,
    Shower3,
    Snow4,
    Fog,
    FogNight,
    Tstorm3,
    Sunny,
    SunnyNight,
    Cloudy2,
    Cloudy2Night,
    Overcast,
    Snow5,
    Dunno,
}

impl IconId {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconId::Tstorm1 => "tstorm1",
            IconId::Tstorm1Night => "tstorm1_night",
            IconId::LightRain => "light_rain",
            IconId::Shower3 => "shower3",
            IconId::Snow4 => "snow4",
            IconId::Fog => "fog",
            IconId::FogNight => "fog_night",
            IconId::Tstorm3 => "tstorm3",
            IconId::Sunny => "sunny",
            IconId::SunnyNight => "sunny_night",
            IconId::Cloudy2 => "cloudy2",
            IconId::Cloudy2Night => "cloudy2_night",
            IconId::Overcast => "overcast",
            IconId::Snow5 => "snow5",
            IconId::Dunno => "dunno",
        }
    }

    pub const fn all() -> &'static [IconId] {
        &[
            IconId::Tstorm1,
            IconId::Tstorm1Night,
            IconId::LightRain,
            IconId::Shower3,
            IconId::Snow4,
            IconId::Fog,
            IconId::FogNight,
            IconId::Tstorm3,
            IconId::Sunny,
            IconId::SunnyNight,
            IconId::Cloudy2,
            IconId::Cloudy2Night,
            IconId::Overcast,
            IconId::Snow5,
            IconId::Dunno,
        ]
    }
}

impl fmt::Display for IconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an OpenWeather condition code to an icon.
///
/// Arms are checked top to bottom. Clear sky (800) and overcast (804) are exact
/// matches around the 801..=803 cloud band, and only thunderstorms, fog, clear sky
/// and clouds have a night variant.
/// Code table: <https://openweathermap.org/weather-conditions>
pub fn resolve_icon(condition: i64, is_night: bool) -> IconId {
    let pick = |day: IconId, night: IconId| if is_night { night } else { day };

    match condition {
        // Thunderstorm
        i64::MIN..=299 => pick(IconId::Tstorm1, IconId::Tstorm1Night),
        // Drizzle
        300..=499 => IconId::LightRain,
        // Rain, freezing rain, shower rain
        500..=599 => IconId::Shower3,
        600..=699 => IconId::Snow4,
        // Mist, haze, dust, fog
        700..=770 => pick(IconId::Fog, IconId::FogNight),
        // Squalls, tornado
        771..=799 => IconId::Tstorm3,
        800 => pick(IconId::Sunny, IconId::SunnyNight),
        801..=803 => pick(IconId::Cloudy2, IconId::Cloudy2Night),
        804 => IconId::Overcast,
        // Extreme
        900..=902 | 905..=999 => IconId::Tstorm3,
        // Cold
        903 => IconId::Snow5,
        // Hot
        904 => IconId::Sunny,
        _ => IconId::Dunno,
    }
}
