use chrono::{DateTime, Utc};

/// True when `now` falls before sunrise or after sunset.
///
/// All three values must share a unit (epoch seconds in practice). The ordering of
/// `sunrise` and `sunset` is not checked: a reading with `sunrise > sunset` is
/// classified by the same two comparisons.
pub fn is_night(now: f64, sunrise: f64, sunset: f64) -> bool {
    now < sunrise || now > sunset
}

/// Fractional seconds since the Unix epoch.
pub fn epoch_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SUNRISE: f64 = 1_700_000_000.0;
    const SUNSET: f64 = 1_700_040_000.0;

    #[test]
    fn before_sunrise_is_night() {
        assert!(is_night(SUNRISE - 1.0, SUNRISE, SUNSET));
    }

    #[test]
    fn sunrise_and_sunset_instants_are_day() {
        assert!(!is_night(SUNRISE, SUNRISE, SUNSET));
        assert!(!is_night(SUNSET, SUNRISE, SUNSET));
    }

    #[test]
    fn midday_is_day() {
        assert!(!is_night((SUNRISE + SUNSET) / 2.0, SUNRISE, SUNSET));
    }

    #[test]
    fn after_sunset_is_night() {
        assert!(is_night(SUNSET + 1.0, SUNRISE, SUNSET));
    }

    #[test]
    fn inverted_sun_times_are_not_corrected() {
        // Between the two values: neither comparison holds.
        assert!(!is_night(1_500.0, 1_000.0, 2_000.0));
        // Swapped: every instant satisfies one of the comparisons.
        assert!(is_night(1_500.0, 2_000.0, 1_000.0));
        assert!(is_night(500.0, 2_000.0, 1_000.0));
        assert!(is_night(2_500.0, 2_000.0, 1_000.0));
    }

    #[test]
    fn epoch_seconds_keeps_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_250).unwrap();
        assert_eq!(epoch_seconds(at), 1_700_000_000.25);
    }
}
